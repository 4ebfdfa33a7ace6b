use crate::prelude::*;

///
/// ClashFirst
/// Claims the same route as `ClashSecond` on purpose. Their startup hooks
/// run like any other fixture's, so the process-global catalog never scans
/// clean in this binary; scan tests build explicit catalogs instead.
///

#[component(route = "clash:duplicate", render = "text")]
#[derive(Default)]
pub struct ClashFirst;

impl Component for ClashFirst {}

impl TextComponent for ClashFirst {
    fn text(&self, _cx: &RequestContext) -> Result<String, RenderError> {
        Ok("first".to_string())
    }
}

///
/// ClashSecond
///

#[component(route = "clash:duplicate", render = "text")]
#[derive(Default)]
pub struct ClashSecond;

impl Component for ClashSecond {}

impl TextComponent for ClashSecond {
    fn text(&self, _cx: &RequestContext) -> Result<String, RenderError> {
        Ok("second".to_string())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        support::{engine_of, map_of},
        test::{
            binding::HasEveryBinding,
            lifecycle::{CountsConstructions, FailsPrepare, RecordsStages},
            relation::{BranchLeaf, BranchRoot},
        },
    };

    #[test]
    fn duplicate_route_key_fails_the_scan_and_names_both_classes() {
        let err = map_of(&[ClashFirst::node(), ClashSecond::node()])
            .expect_err("clashing routes must fail");

        let rendered = err.to_string();
        assert!(
            rendered.contains("duplicate route key 'clash:duplicate'"),
            "got: {rendered}"
        );
        assert!(
            rendered.contains(ClashFirst::PATH) && rendered.contains(ClashSecond::PATH),
            "both claimants should be named, got: {rendered}"
        );
    }

    #[test]
    fn the_global_catalog_fails_to_scan_while_the_clash_pair_is_linked() {
        let err = kiosk::schema::scan::scan(&kiosk::schema::catalog::catalog())
            .expect_err("clash fixtures poison the global catalog");

        assert!(
            err.to_string().contains("duplicate route key 'clash:duplicate'"),
            "got: {err}"
        );
    }

    #[test]
    fn startup_hooks_register_every_fixture_globally() {
        let catalog = kiosk::schema::catalog::catalog();

        for path in [
            HasEveryBinding::PATH,
            RecordsStages::PATH,
            BranchRoot::PATH,
            ClashFirst::PATH,
            ClashSecond::PATH,
        ] {
            assert!(catalog.get(path).is_some(), "not in the catalog: {path}");
            assert!(
                kiosk::core::registry::lookup(path).is_some(),
                "not in the runtime registry: {path}"
            );
        }
    }

    #[test]
    fn route_resolution_is_injective_across_the_fixture_set() {
        let nodes = [
            HasEveryBinding::node(),
            RecordsStages::node(),
            FailsPrepare::node(),
            CountsConstructions::node(),
            BranchRoot::node(),
            BranchLeaf::node(),
            ClashFirst::node(),
        ];

        let map = map_of(&nodes).expect("distinct routes should scan");
        assert_eq!(map.route_count(), nodes.len());
        for node in nodes {
            assert_eq!(map.resolve(node.route.key), Some(node.path().as_str()));
        }
    }

    #[test]
    fn a_route_dispatches_the_class_that_claimed_it() {
        let output = engine_of(&[ClashSecond::node()])
            .dispatch("clash:duplicate", &InputBag::new(), &RequestContext::new())
            .expect("sole claimant should dispatch");

        assert_eq!(output, RenderedOutput::Text("second".to_string()));
    }
}
