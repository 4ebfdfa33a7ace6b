//! The demo component set. One file per site area, one route per class.

mod adverts;
mod board;
mod probe;
mod session;
mod tags;
mod users;

pub use adverts::AdvertSpotlight;
pub use board::NoticeBoard;
pub use probe::ContentFreshness;
pub use session::SignOut;
pub use tags::TagBrowse;
pub use users::UserSearch;
