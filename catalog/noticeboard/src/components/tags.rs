use crate::components::NoticeBoard;
use kiosk::prelude::*;

///
/// TagBrowse
/// Tag-filtered view of the board. `tag` may repeat in the query string;
/// the binder folds every occurrence into one list.
///

#[component(
    route = "tag:browse",
    render = "page",
    page(title = "Browse by tag"),
    nav = "tags",
    parent = "NoticeBoard"
)]
#[derive(Default)]
pub struct TagBrowse {
    #[bind(key = "tag", prim = "Text", many)]
    tags: Vec<String>,
}

impl Component for TagBrowse {}

impl PageComponent for TagBrowse {
    fn body(&self, _cx: &RequestContext) -> Result<String, RenderError> {
        if self.tags.is_empty() {
            return Ok("<p>Pick a tag to narrow the board.</p>".to_string());
        }

        let items: Vec<String> = self
            .tags
            .iter()
            .map(|tag| format!("<li>{tag}</li>"))
            .collect();

        Ok(format!("<ul class=\"tags\">{}</ul>", items.join("")))
    }
}
