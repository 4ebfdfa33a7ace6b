//! Noticeboard demo catalog: a small classifieds site expressed as kiosk
//! components. The CLI and the integration tests both link it, so the
//! operator commands always act on a real component set.

pub mod components;
pub mod services;

pub use components::{
    AdvertSpotlight, ContentFreshness, NoticeBoard, SignOut, TagBrowse, UserSearch,
};
pub use services::{Advert, AdvertDirectory, SitePulse, UserIndex, Viewer, demo_context};
