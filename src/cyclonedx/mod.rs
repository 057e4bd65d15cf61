//! CycloneDX document rendering.
//!
//! Both renderers walk the same [`crate::model::BuildrootBom`] and emit the
//! same logical graph: the product as `metadata.component`, one `firmware`
//! component per package, and a flat dependency section hanging every package
//! directly under the root.

mod json;
mod xml;

pub use json::render_json;
pub use xml::{indent_document, render_xml};

use clap::ValueEnum;
use std::fmt;

/// CycloneDX schema version selector for the produced documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SpecVersion {
    #[default]
    #[value(name = "1.4")]
    V1_4,
    #[value(name = "1.5")]
    V1_5,
    #[value(name = "1.6")]
    V1_6,
}

impl SpecVersion {
    /// The `specVersion` string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1_4 => "1.4",
            Self::V1_5 => "1.5",
            Self::V1_6 => "1.6",
        }
    }

    /// The XML namespace for this schema version.
    #[must_use]
    pub const fn xml_namespace(self) -> &'static str {
        match self {
            Self::V1_4 => "http://cyclonedx.org/schema/bom/1.4",
            Self::V1_5 => "http://cyclonedx.org/schema/bom/1.5",
            Self::V1_6 => "http://cyclonedx.org/schema/bom/1.6",
        }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fresh `urn:uuid:` serial number for one document pair.
#[must_use]
pub(crate) fn serial_number() -> String {
    format!("urn:uuid:{}", uuid::Uuid::new_v4())
}

/// BOM metadata timestamp, RFC 3339 in UTC.
#[must_use]
pub(crate) fn timestamp() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
