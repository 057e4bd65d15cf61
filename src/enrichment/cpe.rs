//! CPE dictionary loading and lookup.
//!
//! Buildroot produces CPE tables in two shapes, depending on which make
//! target generated them:
//!
//! - `make show-info`: a map from arbitrary keys to detail objects carrying
//!   `name` and `cpe-id` fields;
//! - `make pkg-stats`: a map whose values are themselves maps keyed by
//!   package name, each entry carrying a `cpeid` field.
//!
//! Entries are classified once at load time into an explicit [`CpeEntry`]
//! tagged union instead of re-inspecting JSON per lookup. Resolution walks
//! entries in document order and the first match wins; entries that fit
//! neither shape are skipped, never errors. Only an unreadable file or a
//! top level that is not a JSON object is fatal.

use crate::error::{CpeErrorKind, Result, SbomError};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One top-level dictionary entry, classified at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CpeEntry {
    /// `make show-info` detail object: matches one package by `name`.
    Detail { name: String, cpe_id: String },
    /// `make pkg-stats` nested table: package name → `cpeid`.
    Nested(IndexMap<String, String>),
    /// Not an object; kept so document order stays intact, never matches.
    Malformed,
}

impl CpeEntry {
    fn classify(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::Malformed;
        };

        let detail = object
            .get("name")
            .and_then(Value::as_str)
            .zip(object.get("cpe-id").and_then(Value::as_str));
        if let Some((name, cpe_id)) = detail {
            return Self::Detail {
                name: name.to_string(),
                cpe_id: cpe_id.to_string(),
            };
        }

        // Sub-entries without a string `cpeid` can never match; drop them here
        // so lookup is a plain map probe.
        let nested = object
            .iter()
            .filter_map(|(package, entry)| {
                entry
                    .get("cpeid")
                    .and_then(Value::as_str)
                    .map(|cpe_id| (package.clone(), cpe_id.to_string()))
            })
            .collect();
        Self::Nested(nested)
    }

    /// The CPE identifier this entry holds for `package`, if any.
    fn resolve(&self, package: &str) -> Option<&str> {
        match self {
            Self::Detail { name, cpe_id } if name == package => Some(cpe_id),
            Self::Nested(entries) => entries.get(package).map(String::as_str),
            _ => None,
        }
    }
}

/// A loaded CPE dictionary.
///
/// Absence of a dictionary (no file supplied) is represented by the caller
/// holding no `CpeDictionary` at all, which keeps "no enrichment requested"
/// distinct from "package not found".
#[derive(Debug, Clone)]
pub struct CpeDictionary {
    entries: Vec<CpeEntry>,
}

impl CpeDictionary {
    /// Load and classify a dictionary file.
    ///
    /// The file is read exactly once; lookups afterwards touch no I/O.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SbomError::cpe(path, CpeErrorKind::Io(e)))?;

        // IndexMap keeps document order, which defines lookup precedence.
        let table: IndexMap<String, Value> = serde_json::from_str(&text)
            .map_err(|e| SbomError::cpe(path, CpeErrorKind::InvalidJson(e.to_string())))?;

        let entries = table.values().map(CpeEntry::classify).collect();
        Ok(Self { entries })
    }

    /// Resolve the CPE identifier for a package name.
    ///
    /// First matching entry in document order wins; `None` means the package
    /// is simply not listed.
    #[must_use]
    pub fn resolve(&self, package: &str) -> Option<&str> {
        self.entries
            .iter()
            .find_map(|entry| entry.resolve(package))
    }
}
