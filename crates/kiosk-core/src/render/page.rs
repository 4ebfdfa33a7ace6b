use crate::{
    component::{PageComponent, TitleMode},
    context::RequestContext,
    render::{NavChrome, PageHead, RenderError, RenderedOutput, RenderedPage},
};
use kiosk_schema::node::ComponentNode;

// Page strategy: body from the component, head from the class metadata,
// nav chrome unless the class opted out.
pub(super) fn render(
    component: &dyn PageComponent,
    node: &ComponentNode,
    cx: &RequestContext,
) -> Result<RenderedOutput, RenderError> {
    let body = component.body(cx)?;

    let title = match component.title() {
        TitleMode::Custom(title) => Some(title),
        TitleMode::Declared => node.page.map(|page| page.title.to_string()),
        TitleMode::Suppressed => None,
    };
    let head = PageHead {
        title,
        description: node.page.and_then(|page| page.description.map(String::from)),
        indexable: node.page.is_none_or(|page| page.indexable),
    };

    let nav = if node.remove_nav {
        None
    } else {
        Some(NavChrome {
            active: node.nav.map(|nav| nav.key.to_string()),
        })
    };

    Ok(RenderedOutput::Page(RenderedPage { head, nav, body }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use kiosk_schema::{
        node::{Def, NavModel, PageModel, RouteModel},
        types::RenderKind,
    };

    struct Plain;

    impl Component for Plain {}

    impl PageComponent for Plain {
        fn body(&self, _cx: &RequestContext) -> Result<String, RenderError> {
            Ok("<p>hello</p>".to_string())
        }
    }

    struct Titled;

    impl Component for Titled {}

    impl PageComponent for Titled {
        fn body(&self, _cx: &RequestContext) -> Result<String, RenderError> {
            Ok(String::new())
        }

        fn title(&self) -> TitleMode {
            TitleMode::Custom("Override".to_string())
        }
    }

    struct Headless;

    impl Component for Headless {}

    impl PageComponent for Headless {
        fn body(&self, _cx: &RequestContext) -> Result<String, RenderError> {
            Ok(String::new())
        }

        fn title(&self) -> TitleMode {
            TitleMode::Suppressed
        }
    }

    const fn node() -> ComponentNode {
        ComponentNode {
            def: Def {
                module_path: "pages",
                ident: "Plain",
            },
            route: RouteModel { key: "page:plain" },
            render: RenderKind::Page,
            page: Some(PageModel {
                title: "Plain Page",
                description: Some("a plain page"),
                indexable: true,
            }),
            nav: Some(NavModel { key: "home" }),
            remove_nav: false,
            bindings: &[],
            parents: &[],
            children: &[],
        }
    }

    fn page(output: RenderedOutput) -> RenderedPage {
        match output {
            RenderedOutput::Page(page) => page,
            other => panic!("expected a page, got {other:?}"),
        }
    }

    #[test]
    fn declared_title_comes_from_the_class() {
        let cx = RequestContext::new();
        let output = render(&Plain, &node(), &cx).expect("render should succeed");

        let page = page(output);
        assert_eq!(page.head.title.as_deref(), Some("Plain Page"));
        assert_eq!(page.head.description.as_deref(), Some("a plain page"));
        assert!(page.head.indexable);
        assert_eq!(page.body, "<p>hello</p>");
    }

    #[test]
    fn custom_title_overrides_the_class() {
        let cx = RequestContext::new();
        let output = render(&Titled, &node(), &cx).expect("render should succeed");

        assert_eq!(page(output).head.title.as_deref(), Some("Override"));
    }

    #[test]
    fn suppressed_title_renders_none() {
        let cx = RequestContext::new();
        let output = render(&Headless, &node(), &cx).expect("render should succeed");

        assert_eq!(page(output).head.title, None);
    }

    #[test]
    fn nav_chrome_carries_the_active_key() {
        let cx = RequestContext::new();
        let output = render(&Plain, &node(), &cx).expect("render should succeed");

        let nav = page(output).nav.expect("nav chrome should be present");
        assert_eq!(nav.active.as_deref(), Some("home"));
    }

    #[test]
    fn remove_nav_drops_the_chrome() {
        let bare = ComponentNode {
            nav: None,
            remove_nav: true,
            ..node()
        };
        let cx = RequestContext::new();
        let output = render(&Plain, &bare, &cx).expect("render should succeed");

        assert_eq!(page(output).nav, None);
    }
}
