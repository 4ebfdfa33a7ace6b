use crate::{
    component::JsonComponent,
    context::RequestContext,
    render::{RenderError, RenderedOutput},
};

pub(super) fn render(
    component: &dyn JsonComponent,
    cx: &RequestContext,
) -> Result<RenderedOutput, RenderError> {
    let payload = component.payload(cx)?;

    Ok(RenderedOutput::Json(payload))
}
