//! **CycloneDX SBOM generation for Buildroot firmware images.**
//!
//! Buildroot builds drop a `manifest.csv` inventory next to their image
//! artifacts. `buildroot-sbom` turns that inventory into a CycloneDX Software
//! Bill of Materials in two interchangeable forms, pretty-printed JSON and
//! multi-line indented XML, for supply-chain transparency pipelines.
//!
//! ## Core Concepts & Modules
//!
//! - **[`manifest`]**: lazy, fail-fast reader for the seven-column Buildroot
//!   manifest, plus the row → component conversion.
//! - **[`model`]**: the canonical data model: [`Component`], the
//!   [`BuildrootBom`] graph (synthetic root + flat root→package dependency
//!   edges), license expression utilities.
//! - **[`enrichment`]**: CPE platform-identity lookup against the JSON tables
//!   Buildroot emits from `make show-info` or `make pkg-stats`.
//! - **[`cyclonedx`]**: JSON and XML renderers with a schema-version selector.
//! - **[`pipeline`]**: the single-pass orchestration used by the CLI.
//!
//! ## Getting Started
//!
//! ```no_run
//! use buildroot_sbom::{pipeline, GenerateConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GenerateConfig {
//!         manifest: "manifest.csv".into(),
//!         product_name: "router-fw".to_string(),
//!         ..GenerateConfig::default()
//!     };
//!
//!     let artifacts = pipeline::generate(&config)?;
//!     println!(
//!         "wrote {} and {} ({} components)",
//!         artifacts.json.display(),
//!         artifacts.xml.display(),
//!         artifacts.component_count
//!     );
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]

pub mod config;
pub mod cyclonedx;
pub mod enrichment;
pub mod error;
pub mod manifest;
pub mod model;
pub mod pipeline;

// Re-export main types for convenience
pub use config::GenerateConfig;
pub use cyclonedx::SpecVersion;
pub use enrichment::CpeDictionary;
pub use error::{Result, SbomError};
pub use manifest::{ManifestReader, ManifestRow};
pub use model::{BuildrootBom, Component, Product};
pub use pipeline::{generate, GeneratedArtifacts};
