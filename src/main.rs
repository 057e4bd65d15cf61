//! buildroot-sbom: CycloneDX SBOM generator for Buildroot firmware images.

use anyhow::Result;
use buildroot_sbom::pipeline::{self, exit_codes};
use buildroot_sbom::{GenerateConfig, SpecVersion};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nOutput Formats:",
        "\n  CycloneDX: 1.4, 1.5, 1.6 (JSON, XML)",
        "\n\nInput:",
        "\n  Buildroot manifest.csv",
        "\n  CPE dictionaries from `make show-info` or `make pkg-stats`"
    )
}

#[derive(Parser)]
#[command(name = "buildroot-sbom")]
#[command(author = "Binarly.io")]
#[command(version, long_version = build_long_version())]
#[command(about = "Generate a CycloneDX SBOM from a Buildroot manifest", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  SBOM artifacts written
    1  Error occurred

EXAMPLES:
    # Default run next to a Buildroot output directory
    buildroot-sbom -i output/images/manifest.csv -o router_sbom

    # Full product metadata plus CPE enrichment
    buildroot-sbom -i manifest.csv -n router-fw -v 2024.02 -m Acme \\
        -c cpe_data.json -o router_sbom")]
struct Cli {
    /// Buildroot manifest CSV file
    #[arg(short = 'i', long = "input", default_value = "manifest.csv")]
    input: PathBuf,

    /// Output base name for the generated .json and .xml documents
    #[arg(short = 'o', long = "output", default_value = "buildroot_IOT_sbom")]
    output: String,

    /// Name of the product the BOM describes
    #[arg(short = 'n', long, default_value = "unknown")]
    product_name: String,

    /// Product version string
    #[arg(short = 'v', long, default_value = "unknown")]
    product_version: String,

    /// Name of the product manufacturer
    #[arg(short = 'm', long, default_value = "unknown")]
    manufacturer: String,

    /// CPE dictionary from `make show-info` or `make pkg-stats`
    /// ("unknown" disables enrichment)
    #[arg(short = 'c', long = "cpe-file", default_value = buildroot_sbom::config::NO_CPE_SENTINEL)]
    cpe_file: String,

    /// CycloneDX specification version for the output documents
    #[arg(long, default_value = "1.4")]
    spec_version: SpecVersion,

    /// Warn about LICENSE fields that are not valid SPDX expressions
    #[arg(long)]
    warn_invalid_licenses: bool,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(exit_codes::ERROR);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = GenerateConfig {
        manifest: cli.input,
        cpe_file: GenerateConfig::cpe_source(&cli.cpe_file),
        product_name: cli.product_name,
        product_version: cli.product_version,
        manufacturer: cli.manufacturer,
        output_base: cli.output,
        spec_version: cli.spec_version,
        warn_invalid_licenses: cli.warn_invalid_licenses,
    };

    tracing::info!("Buildroot manifest input file: {}", config.manifest.display());
    tracing::info!("Output SBOM: {}", config.output_base);
    tracing::info!("SBOM Product Name: {}", config.product_name);
    tracing::info!("SBOM Product Version: {}", config.product_version);
    tracing::info!("SBOM Product Manufacturer: {}", config.manufacturer);
    match &config.cpe_file {
        Some(path) => tracing::info!("Buildroot cpe input file: {}", path.display()),
        None => tracing::info!("Buildroot cpe input file: none"),
    }

    let artifacts = pipeline::generate(&config)?;
    tracing::info!(
        components = artifacts.component_count,
        "SBOM written to {} and {}",
        artifacts.json.display(),
        artifacts.xml.display()
    );
    Ok(())
}
