use crate::{
    component::TextComponent,
    context::RequestContext,
    render::{RenderError, RenderedOutput},
};

pub(super) fn render(
    component: &dyn TextComponent,
    cx: &RequestContext,
) -> Result<RenderedOutput, RenderError> {
    let body = component.text(cx)?;

    Ok(RenderedOutput::Text(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;

    struct Pong;

    impl Component for Pong {}

    impl TextComponent for Pong {
        fn text(&self, _cx: &RequestContext) -> Result<String, RenderError> {
            Ok("pong".to_string())
        }
    }

    #[test]
    fn text_body_is_returned_verbatim() {
        let cx = RequestContext::new();
        let output = render(&Pong, &cx).expect("render should succeed");

        assert_eq!(output, RenderedOutput::Text("pong".to_string()));
    }
}
