//! Builtin component classes every catalog gets for free.

use crate::prelude::*;

///
/// SystemNotFound
/// Fallback page for requests whose route resolves to nothing. Callers map
/// `DispatchError::NotFound` onto this route instead of hand-writing a 404
/// body per site.
///

#[component(
    route = "system:not-found",
    render = "page",
    page(title = "Page not found", indexable = false),
    remove_nav
)]
#[derive(Default)]
pub struct SystemNotFound;

impl Component for SystemNotFound {}

impl PageComponent for SystemNotFound {
    fn body(&self, _cx: &RequestContext) -> Result<String, RenderError> {
        Ok("<h1>Page not found</h1><p>The address you followed does not match any \
            content on this site.</p>"
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_page_is_chromeless_and_unindexed() {
        let node = SystemNotFound::node();

        assert_eq!(node.route.key, "system:not-found");
        assert!(node.remove_nav);

        let page = node.page.expect("builtin should declare page metadata");
        assert_eq!(page.title, "Page not found");
        assert!(!page.indexable);
    }

    #[test]
    fn not_found_page_renders_a_body() {
        let cx = RequestContext::new();
        let body = SystemNotFound
            .body(&cx)
            .expect("builtin body should render");

        assert!(body.contains("Page not found"));
    }
}
