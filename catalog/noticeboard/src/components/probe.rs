use crate::services::SitePulse;
use kiosk::prelude::*;
use std::sync::Arc;

///
/// ContentFreshness
/// Plain-text probe emitting the latest content revision timestamp, for
/// uptime checks and cache warming.
///

#[component(route = "probe:freshness", render = "text")]
#[derive(Default)]
pub struct ContentFreshness {
    revised_at: u64,
}

impl Component for ContentFreshness {
    fn prepare(&mut self, cx: &RequestContext) -> Result<(), PrepareError> {
        let pulse = cx.require::<Arc<dyn SitePulse>>("SitePulse")?;
        self.revised_at = pulse.content_revised_at();

        Ok(())
    }
}

impl TextComponent for ContentFreshness {
    fn text(&self, _cx: &RequestContext) -> Result<String, RenderError> {
        Ok(self.revised_at.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::demo_context;

    #[test]
    fn probe_emits_the_pulse_timestamp() {
        let cx = demo_context();
        let mut probe = ContentFreshness::default();

        probe.prepare(&cx).expect("prepare should succeed");
        let text = probe.text(&cx).expect("text should render");

        assert_eq!(text, "1755900000");
    }

    #[test]
    fn probe_without_the_pulse_service_names_it() {
        let err = ContentFreshness::default()
            .prepare(&RequestContext::new())
            .expect_err("missing collaborator must fail");
        assert_eq!(
            err.to_string(),
            "collaborator 'SitePulse' is not installed in the request context"
        );
    }
}
