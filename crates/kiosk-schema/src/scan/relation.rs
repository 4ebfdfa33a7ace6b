use crate::{catalog::Catalog, error::ErrorTree, map::ComponentMap, prelude::*};

/// Validate relationship declarations across the whole catalog.
///
/// A one-sided declaration is accepted. When both sides declare, they must
/// corroborate: if A lists B as a child and B lists any parents at all, A
/// must be among them (and dually for the other direction).
pub fn validate_relations(catalog: &Catalog, errs: &mut ErrorTree) {
    for (path, node) in catalog.iter() {
        for target in node.parents {
            check_edge(catalog, errs, path, target, RelationKind::Parent);
        }
        for target in node.children {
            check_edge(catalog, errs, path, target, RelationKind::Child);
        }
    }
}

fn check_edge(
    catalog: &Catalog,
    errs: &mut ErrorTree,
    source: &str,
    target: &str,
    kind: RelationKind,
) {
    let Some(target_node) = catalog.get(target) else {
        err!(
            errs,
            source,
            "declared {0} '{target}' is not a registered component class",
            kind.label()
        );
        return;
    };

    let (inverse, inverse_label) = match kind {
        RelationKind::Parent => (target_node.children, "children"),
        RelationKind::Child => (target_node.parents, "parents"),
    };

    if !inverse.is_empty() && !inverse.iter().any(|p| *p == source) {
        err!(
            errs,
            source,
            "declares {0} '{target}', but '{target}' lists its own {inverse_label} and '{source}' is not among them",
            kind.label()
        );
    }
}

/// Materialize the symmetric closure of declared edges into the map. Each
/// edge is written in both directions regardless of which side declared it.
pub(crate) fn assemble_relations(catalog: &Catalog, map: &mut ComponentMap) {
    for (path, node) in catalog.iter() {
        for target in node.parents {
            map.relations
                .entry(path.clone())
                .or_default()
                .parents
                .insert((*target).to_string());
            map.relations
                .entry((*target).to_string())
                .or_default()
                .children
                .insert(path.clone());
        }
        for target in node.children {
            map.relations
                .entry(path.clone())
                .or_default()
                .children
                .insert((*target).to_string());
            map.relations
                .entry((*target).to_string())
                .or_default()
                .parents
                .insert(path.clone());
        }
    }
}
