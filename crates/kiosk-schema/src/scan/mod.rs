//! Catalog scanning: staged validation and component-map assembly.

pub mod relation;
pub mod route;

use crate::{catalog::Catalog, error::ErrorTree, map::ComponentMap, prelude::*};
use thiserror::Error as ThisError;

///
/// ScanError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ScanError {
    #[error("catalog is empty; no component classes are linked into this process")]
    EmptyCatalog,

    #[error("validation failed: {0}")]
    Validation(ErrorTree),
}

/// Compile a class catalog into a component map.
///
/// Violations are aggregated across the whole catalog before failing; a scan
/// never stops at the first problem.
pub fn scan(catalog: &Catalog) -> Result<ComponentMap, ScanError> {
    if catalog.is_empty() {
        return Err(ScanError::EmptyCatalog);
    }

    // Phase 1: local invariants on each node.
    let mut errs = validate_nodes(catalog);

    // Phase 2: catalog-wide invariants.
    validate_global(catalog, &mut errs);

    errs.result().map_err(ScanError::Validation)?;

    Ok(assemble(catalog))
}

fn validate_nodes(catalog: &Catalog) -> ErrorTree {
    let mut errs = ErrorTree::new();
    for (_, node) in catalog.iter() {
        if let Err(tree) = node.validate() {
            errs.merge(tree);
        }
    }

    errs
}

fn validate_global(catalog: &Catalog, errs: &mut ErrorTree) {
    for path in catalog.duplicates() {
        err!(errs, path, "class path is registered more than once");
    }

    route::validate_route_uniqueness(catalog, errs);
    relation::validate_relations(catalog, errs);
}

// Assembly runs only on a catalog that passed both phases.
fn assemble(catalog: &Catalog) -> ComponentMap {
    let mut map = ComponentMap::default();

    for (path, node) in catalog.iter() {
        map.routes.insert(node.route.key.to_string(), path.clone());

        if let Some(nav) = &node.nav {
            map.navigation
                .entry(nav.key.to_string())
                .or_default()
                .insert(path.clone());
        }
    }

    relation::assemble_relations(catalog, &mut map);

    map
}
