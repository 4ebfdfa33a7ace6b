use crate::services::UserIndex;
use kiosk::prelude::*;
use serde_json::json;
use std::sync::Arc;

///
/// UserSearch
/// Seller autocomplete endpoint. The hit list is computed in `prepare`;
/// the payload only shapes it.
///

#[component(route = "search:users", render = "json")]
#[derive(Default)]
pub struct UserSearch {
    #[bind(prim = "Text")]
    term: Option<String>,

    hits: Vec<String>,
}

impl Component for UserSearch {
    fn prepare(&mut self, cx: &RequestContext) -> Result<(), PrepareError> {
        let index = cx.require::<Arc<dyn UserIndex>>("UserIndex")?;
        self.hits = index.autocomplete(self.term.as_deref().unwrap_or_default());

        Ok(())
    }
}

impl JsonComponent for UserSearch {
    fn payload(&self, _cx: &RequestContext) -> Result<serde_json::Value, RenderError> {
        Ok(json!({
            "term": self.term,
            "hits": self.hits,
        }))
    }
}
