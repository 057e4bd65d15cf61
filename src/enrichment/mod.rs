//! Component enrichment from external data sources.
//!
//! The only enricher here is the CPE dictionary lookup: Buildroot can emit a
//! JSON table of CPE identifiers (`make show-info` / `make pkg-stats`) and,
//! when supplied, each component is annotated with its platform identity for
//! vulnerability matching.

mod cpe;

pub use cpe::{CpeDictionary, CpeEntry};
