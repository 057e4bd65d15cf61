//! Runtime configuration for a generation run.

use crate::cyclonedx::SpecVersion;
use std::path::PathBuf;

/// CLI value meaning "no CPE dictionary supplied".
///
/// Inherited from the Buildroot tooling convention; the pipeline must not
/// touch the filesystem for CPE data when this is given.
pub const NO_CPE_SENTINEL: &str = "unknown";

/// Everything one generation run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Buildroot manifest CSV path.
    pub manifest: PathBuf,
    /// CPE dictionary path; `None` disables enrichment.
    pub cpe_file: Option<PathBuf>,
    /// Product name recorded on the root component.
    pub product_name: String,
    /// Product version recorded on the root component.
    pub product_version: String,
    /// Manufacturer recorded in the BOM metadata.
    pub manufacturer: String,
    /// Base name for the produced artifacts (`<base>.json`, `<base>.xml`).
    pub output_base: String,
    /// CycloneDX schema version of the produced documents.
    pub spec_version: SpecVersion,
    /// Surface unparseable LICENSE fields as warnings.
    pub warn_invalid_licenses: bool,
}

impl GenerateConfig {
    /// Interpret a raw CPE path argument, honoring the sentinel.
    #[must_use]
    pub fn cpe_source(raw: &str) -> Option<PathBuf> {
        (raw != NO_CPE_SENTINEL).then(|| PathBuf::from(raw))
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("manifest.csv"),
            cpe_file: None,
            product_name: "unknown".to_string(),
            product_version: "unknown".to_string(),
            manufacturer: "unknown".to_string(),
            output_base: "buildroot_IOT_sbom".to_string(),
            spec_version: SpecVersion::default(),
            warn_invalid_licenses: false,
        }
    }
}
