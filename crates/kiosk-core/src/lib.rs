//! Core runtime for Kiosk: component traits, input binding, dispatch,
//! render strategies, and the ergonomics exported via the `prelude`.

pub mod bind;
pub mod component;
pub mod context;
pub mod dispatch;
pub mod input;
pub mod lifecycle;
pub mod obs;
pub mod registry;
pub mod render;
pub mod value;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        bind::{BindError, BindTarget},
        component::{
            Component, ComponentCell, ComponentKind, Construct, ConstructError, JsonComponent,
            PageComponent, PrepareError, RedirectComponent, TextComponent, TitleMode,
        },
        context::{RequestContext, Services},
        dispatch::{DispatchError, Dispatcher, MapError, Presentation},
        input::{InputBag, RawValue},
        render::{RenderError, RenderedOutput},
        value::Value,
    };
    pub use kiosk_schema::types::{BindingPrim, RelationKind, RenderKind};
}
