//! Pipeline orchestration for SBOM generation.
//!
//! Single pass, single thread: manifest rows are read in file order, each one
//! becomes a component (enriched from the CPE dictionary when one is loaded),
//! the graph is assembled in memory, and only then are the artifacts written.
//! Any fatal error therefore aborts before the first byte of output exists.

use crate::config::GenerateConfig;
use crate::cyclonedx;
use crate::enrichment::CpeDictionary;
use crate::error::{Result, SbomError};
use crate::manifest::ManifestReader;
use crate::model::{split_outside_parens, BuildrootBom, Product};
use std::fs;
use std::path::PathBuf;

/// Exit codes for CI integration
pub mod exit_codes {
    /// Success - both artifacts written
    pub const SUCCESS: i32 = 0;
    /// An error occurred; nothing useful was produced
    pub const ERROR: i32 = 1;
}

/// Paths of the artifacts a successful run produced.
#[derive(Debug, Clone)]
pub struct GeneratedArtifacts {
    pub json: PathBuf,
    pub xml: PathBuf,
    pub component_count: usize,
}

/// Run the whole manifest → BOM → artifacts pipeline.
pub fn generate(config: &GenerateConfig) -> Result<GeneratedArtifacts> {
    let cpe_dictionary = match &config.cpe_file {
        Some(path) => {
            let dictionary = CpeDictionary::load(path)?;
            tracing::debug!(path = %path.display(), "CPE dictionary loaded");
            Some(dictionary)
        }
        None => None,
    };

    let mut bom = BuildrootBom::new(Product {
        name: config.product_name.clone(),
        version: config.product_version.clone(),
        manufacturer: config.manufacturer.clone(),
    });

    for row in ManifestReader::open(&config.manifest)? {
        let row = row?;
        let cpe = cpe_dictionary
            .as_ref()
            .and_then(|dictionary| dictionary.resolve(&row.package))
            .map(str::to_string);

        let component = row.to_component(cpe);
        if config.warn_invalid_licenses && component.license.is_none() && !row.license.is_empty() {
            let tokens = split_outside_parens(&row.license, ',');
            tracing::warn!(
                package = %row.package,
                license = %row.license,
                tokens = tokens.len(),
                "LICENSE field is not a valid SPDX expression; component will carry no license"
            );
        }

        bom.add_component(component);
    }

    tracing::debug!(components = bom.component_count(), "BOM graph assembled");
    write_artifacts(&bom, config)
}

/// Serialize and write both artifacts.
///
/// JSON first, then the XML pair: the single-line `.one.xml` intermediate is
/// re-indented into the final `.xml` and removed afterwards.
fn write_artifacts(bom: &BuildrootBom, config: &GenerateConfig) -> Result<GeneratedArtifacts> {
    let json_path = PathBuf::from(format!("{}.json", config.output_base));
    let json = cyclonedx::render_json(bom, config.spec_version)?;
    fs::write(&json_path, json).map_err(|e| SbomError::io(&json_path, e))?;

    let single_line_path = PathBuf::from(format!("{}.one.xml", config.output_base));
    let xml = cyclonedx::render_xml(bom, config.spec_version)?;
    fs::write(&single_line_path, &xml).map_err(|e| SbomError::io(&single_line_path, e))?;

    let xml_path = PathBuf::from(format!("{}.xml", config.output_base));
    let single_line = fs::read_to_string(&single_line_path)
        .map_err(|e| SbomError::io(&single_line_path, e))?;
    let pretty = cyclonedx::indent_document(&single_line)?;
    fs::write(&xml_path, pretty).map_err(|e| SbomError::io(&xml_path, e))?;
    fs::remove_file(&single_line_path).map_err(|e| SbomError::io(&single_line_path, e))?;

    Ok(GeneratedArtifacts {
        json: json_path,
        xml: xml_path,
        component_count: bom.component_count(),
    })
}
