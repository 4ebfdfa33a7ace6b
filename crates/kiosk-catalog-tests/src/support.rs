//! Helpers for assembling explicit catalogs from a chosen slice of fixture
//! nodes. Tests never scan the process-global catalog: the clash fixtures
//! in `test::routes` poison it on purpose.

use kiosk::{
    core::dispatch::Dispatcher,
    schema::{
        catalog::Catalog,
        map::ComponentMap,
        node::ComponentNode,
        scan::{ScanError, scan},
    },
};

/// Catalog holding exactly the given nodes.
#[must_use]
pub fn catalog_of(nodes: &[&'static ComponentNode]) -> Catalog {
    let mut catalog = Catalog::new();
    for node in nodes {
        catalog.insert_node(**node);
    }

    catalog
}

/// Scan the given nodes into a component map.
pub fn map_of(nodes: &[&'static ComponentNode]) -> Result<ComponentMap, ScanError> {
    scan(&catalog_of(nodes))
}

/// Dispatcher over exactly the given nodes.
#[must_use]
pub fn engine_of(nodes: &[&'static ComponentNode]) -> Dispatcher {
    let map = map_of(nodes).expect("fixture catalog should scan");

    Dispatcher::from_map(map)
}
