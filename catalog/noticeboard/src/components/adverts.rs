use crate::services::{Advert, AdvertDirectory, Viewer};
use kiosk::prelude::*;
use std::sync::Arc;

///
/// AdvertSpotlight
/// Singles out one advert for the requested advertising context. The viewer
/// is part of the constructor contract, so dispatch fails before binding
/// when the caller has not established one.
///

#[component(
    route = "advert:spotlight",
    render = "page",
    page(
        title = "Advert spotlight",
        description = "One advert, hand picked for the context"
    ),
    construct = "manual"
)]
#[derive(Debug)]
pub struct AdvertSpotlight {
    #[bind(prim = "Text", required)]
    context: String,

    #[bind(prim = "Text")]
    slot: Option<String>,

    viewer: Viewer,
    advert: Option<Advert>,
}

impl Construct for AdvertSpotlight {
    fn construct(cx: &RequestContext) -> Result<Self, ConstructError> {
        let viewer = cx
            .service::<Viewer>()
            .cloned()
            .ok_or(ConstructError::MissingState("viewer"))?;

        Ok(Self {
            context: String::new(),
            slot: None,
            viewer,
            advert: None,
        })
    }
}

impl Component for AdvertSpotlight {
    fn prepare(&mut self, cx: &RequestContext) -> Result<(), PrepareError> {
        let directory = cx.require::<Arc<dyn AdvertDirectory>>("AdvertDirectory")?;
        let slot = self.slot.as_deref().unwrap_or("banner");
        self.advert = directory.advert_for_slot(&self.context, slot);

        Ok(())
    }
}

impl PageComponent for AdvertSpotlight {
    fn body(&self, _cx: &RequestContext) -> Result<String, RenderError> {
        let advert = match &self.advert {
            Some(advert) => format!(
                "<article><h2>{}</h2><a href=\"{}\">View advert</a></article>",
                advert.headline, advert.link
            ),
            None => "<p>No advert fits this context right now.</p>".to_string(),
        };

        Ok(format!(
            "<p>Curated for {}.</p>{advert}",
            self.viewer.handle
        ))
    }

    /// A resolved advert takes over the page title.
    fn title(&self) -> TitleMode {
        match &self.advert {
            Some(advert) => TitleMode::Custom(advert.headline.clone()),
            None => TitleMode::Declared,
        }
    }
}
