//! Outbound collaborators of the noticeboard site. Each is a black-box
//! trait; the in-memory implementations here back the CLI and the tests.

use kiosk::prelude::*;
use std::sync::Arc;

///
/// Advert
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Advert {
    pub headline: String,
    pub link: String,
}

///
/// AdvertDirectory
/// Picks the advert to show for an advertising context and slot.
///

pub trait AdvertDirectory: Send + Sync {
    fn advert_for_slot(&self, context: &str, slot: &str) -> Option<Advert>;
}

///
/// UserIndex
///

pub trait UserIndex: Send + Sync {
    /// Handles matching `term`. An empty term matches nothing.
    fn autocomplete(&self, term: &str) -> Vec<String>;
}

///
/// SitePulse
///

pub trait SitePulse: Send + Sync {
    /// Unix timestamp of the most recent content revision.
    fn content_revised_at(&self) -> u64;
}

///
/// Viewer
/// Caller-established state for components whose constructor contract
/// requires a signed-in viewer.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Viewer {
    pub handle: String,
}

///
/// StaticAdverts
///

struct StaticAdverts;

impl AdvertDirectory for StaticAdverts {
    fn advert_for_slot(&self, context: &str, slot: &str) -> Option<Advert> {
        let (headline, link) = match (context, slot) {
            ("garden", "banner") => ("Greenhouse frames, half price", "/adverts/greenhouse"),
            ("garden", "sidebar") => ("Compost delivered Tuesdays", "/adverts/compost"),
            ("music", "banner") => ("Upright piano, tuned in spring", "/adverts/piano"),
            _ => return None,
        };

        Some(Advert {
            headline: headline.to_string(),
            link: link.to_string(),
        })
    }
}

///
/// HandleList
///

struct HandleList {
    handles: Vec<String>,
}

impl UserIndex for HandleList {
    fn autocomplete(&self, term: &str) -> Vec<String> {
        if term.is_empty() {
            return Vec::new();
        }

        self.handles
            .iter()
            .filter(|handle| handle.contains(term))
            .cloned()
            .collect()
    }
}

///
/// FixedPulse
///

struct FixedPulse(u64);

impl SitePulse for FixedPulse {
    fn content_revised_at(&self) -> u64 {
        self.0
    }
}

/// Request context carrying the full demo service set and a signed-in viewer.
#[must_use]
pub fn demo_context() -> RequestContext {
    let adverts: Arc<dyn AdvertDirectory> = Arc::new(StaticAdverts);
    let users: Arc<dyn UserIndex> = Arc::new(HandleList {
        handles: ["ada", "adebayo", "petra", "peter", "quinn"]
            .map(String::from)
            .to_vec(),
    });
    let pulse: Arc<dyn SitePulse> = Arc::new(FixedPulse(1_755_900_000));

    RequestContext::new()
        .with_service(adverts)
        .with_service(users)
        .with_service(pulse)
        .with_service(Viewer {
            handle: "ada".to_string(),
        })
}
