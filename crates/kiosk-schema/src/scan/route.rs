use crate::{catalog::Catalog, error::ErrorTree, prelude::*};
use std::collections::BTreeMap;

/// Every route key must resolve to exactly one component class.
pub fn validate_route_uniqueness(catalog: &Catalog, errs: &mut ErrorTree) {
    let mut by_key: BTreeMap<&str, &str> = BTreeMap::new();

    for (path, node) in catalog.iter() {
        if let Some(prev) = by_key.insert(node.route.key, path) {
            err!(
                errs,
                path,
                "duplicate route key '{0}' for '{prev}' and '{path}'",
                node.route.key
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(ident: &'static str, route: &'static str) -> ComponentNode {
        ComponentNode {
            def: Def {
                module_path: "schema_route_tests",
                ident,
            },
            route: RouteModel { key: route },
            render: RenderKind::Text,
            page: None,
            nav: None,
            remove_nav: false,
            bindings: &[],
            parents: &[],
            children: &[],
        }
    }

    #[test]
    fn unique_keys_pass() {
        let mut catalog = Catalog::new();
        catalog.insert_node(node("A", "probe:a"));
        catalog.insert_node(node("B", "probe:b"));

        let mut errs = ErrorTree::new();
        validate_route_uniqueness(&catalog, &mut errs);
        assert!(errs.is_empty(), "got: {errs}");
    }

    #[test]
    fn colliding_keys_are_reported_once_per_extra_claimant() {
        let mut catalog = Catalog::new();
        catalog.insert_node(node("A", "probe:same"));
        catalog.insert_node(node("B", "probe:same"));
        catalog.insert_node(node("C", "probe:same"));

        let mut errs = ErrorTree::new();
        validate_route_uniqueness(&catalog, &mut errs);
        assert_eq!(errs.len(), 2, "got: {errs}");
    }
}
