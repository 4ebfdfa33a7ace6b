//! Component metadata for Kiosk: descriptor nodes, the static catalog,
//! the scanner that validates it, and the persisted component map.

pub mod catalog;
pub mod error;
pub mod map;
pub mod node;
pub mod scan;
pub mod types;

/// Maximum length in bytes for a component route key.
pub const MAX_ROUTE_KEY_LEN: usize = 96;

/// Maximum length in bytes for a navigation key.
pub const MAX_NAV_KEY_LEN: usize = 64;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        types::{BindingPrim, RelationKind, RenderKind},
    };
}
