use crate::components::{AdvertSpotlight, TagBrowse};
use kiosk::prelude::*;

///
/// NoticeBoard
/// Front page of the site and declared parent of the advert and tag pages.
///

#[component(
    route = "board:home",
    render = "page",
    page(
        title = "Noticeboard",
        description = "Local adverts, sorted by freshness"
    ),
    nav = "home",
    child = "AdvertSpotlight",
    child = "TagBrowse"
)]
#[derive(Default)]
pub struct NoticeBoard;

impl Component for NoticeBoard {}

impl PageComponent for NoticeBoard {
    fn body(&self, _cx: &RequestContext) -> Result<String, RenderError> {
        Ok("<section class=\"board\"><h2>Latest adverts</h2>\
            <p>Browse by tag or search for a seller to get started.</p></section>"
            .to_string())
    }
}
