//! # Kiosk
//!
//! An attribute-driven component engine for content sites. Classes annotated
//! with `#[component]` register themselves at link time; the scanner validates
//! the catalog, the builder persists a component map, and the dispatcher
//! routes requests to component instances and renders them.
//!
//! ```ignore
//! use kiosk::prelude::*;
//!
//! #[component(route = "board:home", render = "page", page(title = "Home"))]
//! pub struct Home;
//!
//! impl Component for Home {}
//!
//! impl PageComponent for Home {
//!     fn body(&self, _cx: &RequestContext) -> Result<String, RenderError> {
//!         Ok("<h1>Welcome</h1>".to_string())
//!     }
//! }
//! ```

pub mod base;

pub use kiosk_build as build;
pub use kiosk_core as core;
pub use kiosk_schema as schema;

// export so the macros can find the crate internally
extern crate self as kiosk;

///
/// re-exports
/// macros can use these, stops the user having to specify all the dependencies
/// in the Cargo.toml file manually
///

pub mod __reexports {
    pub use ctor;
}

//
// Consts
//

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use kiosk_derive::component;

///
/// Prelude
///
/// Everything a component author needs in one import.
/// Traits that are only implemented, never named, come in as `_`.
///

pub mod prelude {
    pub use crate::component;
    pub use crate::core::{
        bind::BindTarget as _,
        component::{
            Component, ComponentCell, ComponentKind, Construct, ConstructError, JsonComponent,
            PageComponent, PrepareError, RedirectComponent, TextComponent, TitleMode,
        },
        context::{RequestContext, Services},
        dispatch::{DispatchError, Dispatcher, MapError, Presentation},
        input::InputBag,
        render::{RenderError, RenderedOutput},
        value::Value,
    };
    pub use crate::schema::types::RenderKind;
}
