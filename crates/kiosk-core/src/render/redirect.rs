use crate::{
    component::RedirectComponent,
    context::RequestContext,
    render::{Location, RenderError, RenderedOutput},
};

pub(super) fn render(
    component: &dyn RedirectComponent,
    cx: &RequestContext,
) -> Result<RenderedOutput, RenderError> {
    let location = Location::new(component.location(cx)?)?;

    Ok(RenderedOutput::Redirect(location))
}
