use kiosk::prelude::*;

///
/// SignOut
/// Redirect back to the front page, or to a caller-supplied target.
///

#[component(route = "session:sign-out", render = "redirect")]
#[derive(Default)]
pub struct SignOut {
    #[bind(prim = "Text")]
    to: Option<String>,

    target: String,
}

impl Component for SignOut {
    fn prepare(&mut self, _cx: &RequestContext) -> Result<(), PrepareError> {
        self.target = self.to.clone().unwrap_or_else(|| "/".to_string());

        Ok(())
    }
}

impl RedirectComponent for SignOut {
    fn location(&self, _cx: &RequestContext) -> Result<String, RenderError> {
        Ok(self.target.clone())
    }
}
