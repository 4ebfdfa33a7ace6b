use crate::prelude::*;
use std::collections::BTreeSet;

///
/// ComponentNode
/// Complete declared metadata for one component class. Instances are emitted
/// as statics by the `#[component]` attribute and registered at startup.
///

#[derive(Clone, Copy, Debug)]
pub struct ComponentNode {
    pub def: Def,
    pub route: RouteModel,
    pub render: RenderKind,
    pub page: Option<PageModel>,
    pub nav: Option<NavModel>,
    pub remove_nav: bool,
    pub bindings: &'static [BindingModel],
    pub parents: &'static [&'static str],
    pub children: &'static [&'static str],
}

impl ComponentNode {
    /// Fully-qualified class path.
    #[must_use]
    pub fn path(&self) -> String {
        self.def.path()
    }

    /// Local invariants only; uniqueness and relation resolution need the
    /// whole catalog and run as scan-wide passes.
    pub(crate) fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();
        let subject = self.path();

        self.route.check(&subject, &mut errs);

        // Page, nav and remove-nav descriptors are page-strategy concerns.
        if self.render == RenderKind::Page {
            match &self.page {
                Some(page) => page.check(&subject, &mut errs),
                None => err!(errs, &subject, "page components must declare page metadata"),
            }
        } else {
            if self.page.is_some() {
                err!(
                    errs,
                    &subject,
                    "page metadata is only valid on page components"
                );
            }
            if self.nav.is_some() {
                err!(
                    errs,
                    &subject,
                    "navigation placement is only valid on page components"
                );
            }
            if self.remove_nav {
                err!(errs, &subject, "remove_nav is only valid on page components");
            }
        }

        if let Some(nav) = &self.nav {
            nav.check(&subject, &mut errs);
            if self.remove_nav {
                err!(
                    errs,
                    &subject,
                    "remove_nav conflicts with a declared navigation key"
                );
            }
        }

        self.check_bindings(&subject, &mut errs);
        self.check_relation_lists(&subject, &mut errs);

        errs.result()
    }

    fn check_bindings(&self, subject: &str, errs: &mut ErrorTree) {
        let mut fields = BTreeSet::new();
        let mut keys = BTreeSet::new();

        for binding in self.bindings {
            binding.check(subject, errs);

            if !fields.insert(binding.field) {
                err!(
                    errs,
                    subject,
                    "duplicate binding for field '{0}'",
                    binding.field
                );
            }
            if !keys.insert(binding.key) {
                err!(
                    errs,
                    subject,
                    "input key '{0}' is bound more than once",
                    binding.key
                );
            }
        }
    }

    fn check_relation_lists(&self, subject: &str, errs: &mut ErrorTree) {
        let mut seen = BTreeSet::new();

        for (targets, label) in [(self.parents, "parent"), (self.children, "child")] {
            for target in targets {
                if *target == subject {
                    err!(errs, subject, "component relates to itself as {label}");
                }
                if !seen.insert((*target, label)) {
                    err!(
                        errs,
                        subject,
                        "{label} '{target}' is declared more than once"
                    );
                }
            }
        }

        for target in self.parents {
            if self.children.contains(target) {
                err!(
                    errs,
                    subject,
                    "'{target}' is declared as both parent and child"
                );
            }
        }
    }
}
