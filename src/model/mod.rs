//! Canonical BOM data model.
//!
//! The manifest reader produces [`Component`]s, the [`BuildrootBom`] owns the
//! assembled graph (one synthetic root, one component per package, one
//! root→package edge each), and the `cyclonedx` module renders it. Nothing in
//! here touches the filesystem.

mod bom;
mod component;
mod identifiers;
mod license;

pub use bom::*;
pub use component::*;
pub use identifiers::*;
pub use license::*;
