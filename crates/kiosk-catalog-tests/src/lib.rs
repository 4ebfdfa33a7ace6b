//! Engine integration surface: fixture component classes declared through
//! the real `#[component]` attribute, with the tests that exercise them
//! beside the declarations. Everything here runs macro expansion, startup
//! registration, scanning, building and dispatch as one stack.

pub mod e2e;
pub mod support;
pub mod test;

///
/// Prelude
///

pub mod prelude {
    pub use kiosk::prelude::*;
}
