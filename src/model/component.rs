//! The canonical component record.

use serde::Serialize;

/// One software package from the manifest, normalized for BOM assembly.
///
/// The name doubles as the component's graph reference key (bom-ref), so it
/// must be unique within a BOM; [`crate::model::BuildrootBom`] enforces that
/// on insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: String,
    pub version: String,
    /// Declared license as a validated SPDX expression; `None` when the
    /// LICENSE field did not parse.
    pub license: Option<String>,
    /// Generic package locator with the upstream download URL.
    pub purl: String,
    /// Platform identity from the CPE dictionary, when resolved.
    pub cpe: Option<String>,
}

impl Component {
    /// The component's reference key in the dependency graph.
    #[must_use]
    pub fn bom_ref(&self) -> &str {
        &self.name
    }
}
