//! The assembled BOM graph.

use super::Component;
use indexmap::IndexMap;

/// The product a BOM describes: the synthetic root component.
///
/// Not derived from manifest rows; supplied once by the caller at pipeline
/// start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub version: String,
    pub manufacturer: String,
}

/// A directed dependency edge between two bom-refs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
}

/// The complete BOM graph: one root product, the component set, and one
/// root→component edge per package.
///
/// Built once, in memory, then handed to the renderers. There is no removal
/// operation and no explicit close: once the manifest is drained the graph is
/// complete.
#[derive(Debug, Clone)]
pub struct BuildrootBom {
    pub product: Product,
    /// Components keyed by name (= bom-ref), in manifest order.
    pub components: IndexMap<String, Component>,
    /// Dependency edges, all of them from the root.
    pub edges: Vec<DependencyEdge>,
}

impl BuildrootBom {
    /// Create an empty BOM for the given product.
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            components: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// The root component's reference key.
    #[must_use]
    pub fn root_ref(&self) -> &str {
        &self.product.name
    }

    /// Insert a component and its root→component dependency edge.
    ///
    /// Duplicate package names are last-write-wins: the new component replaces
    /// the old one in place (keeping its position), the existing edge is kept,
    /// and a warning is logged. Returns `true` when a duplicate was replaced.
    pub fn add_component(&mut self, component: Component) -> bool {
        let name = component.name.clone();
        let replaced = self.components.insert(name.clone(), component).is_some();
        if replaced {
            tracing::warn!(
                package = %name,
                "duplicate package name in manifest; keeping the later row"
            );
        } else {
            self.edges.push(DependencyEdge {
                from: self.product.name.clone(),
                to: name,
            });
        }
        replaced
    }

    /// Number of components in the set.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}
