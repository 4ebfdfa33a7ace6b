use crate::node::ComponentNode;
use std::{
    collections::BTreeMap,
    sync::{LazyLock, RwLock, RwLockWriteGuard},
};

///
/// Catalog
/// Registry of component classes keyed by class path. Keying by path makes
/// iteration order independent of startup registration order.
///

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    nodes: BTreeMap<String, ComponentNode>,
    duplicates: Vec<String>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class node. Duplicate paths are recorded and surfaced at
    /// scan time; registration hooks must never panic.
    pub fn insert_node(&mut self, node: ComponentNode) {
        let path = node.path();
        if self.nodes.contains_key(&path) {
            self.duplicates.push(path);
        } else {
            self.nodes.insert(path, node);
        }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ComponentNode> {
        self.nodes.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ComponentNode)> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Class paths that were registered more than once.
    #[must_use]
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

///
/// CATALOG
/// the static data structure
///

static CATALOG: LazyLock<RwLock<Catalog>> = LazyLock::new(|| RwLock::new(Catalog::new()));

/// Acquire a write guard to the global catalog during startup registration.
pub fn catalog_write() -> RwLockWriteGuard<'static, Catalog> {
    CATALOG
        .write()
        .expect("catalog RwLock poisoned while acquiring write lock")
}

/// Snapshot the global catalog for scanning or inspection.
#[must_use]
pub fn catalog() -> Catalog {
    CATALOG
        .read()
        .expect("catalog RwLock poisoned while acquiring read lock")
        .clone()
}
