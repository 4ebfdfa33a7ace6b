use crate::{
    bind::BindError,
    context::RequestContext,
    render::RenderError,
};
use kiosk_schema::{node::ComponentNode, types::RenderKind};
use thiserror::Error as ThisError;

///
/// Component
/// Base contract every dispatched class fulfils. `prepare` runs once per
/// request, after inputs are bound and before rendering.
///

pub trait Component: 'static {
    fn prepare(&mut self, cx: &RequestContext) -> Result<(), PrepareError> {
        let _ = cx;
        Ok(())
    }
}

///
/// PageComponent
/// HTML page strategy: produces a body fragment; head metadata comes from
/// the declared page descriptor unless `title` overrides it.
///

pub trait PageComponent: Component {
    fn body(&self, cx: &RequestContext) -> Result<String, RenderError>;

    fn title(&self) -> TitleMode {
        TitleMode::Declared
    }
}

///
/// JsonComponent
///

pub trait JsonComponent: Component {
    fn payload(&self, cx: &RequestContext) -> Result<serde_json::Value, RenderError>;
}

///
/// TextComponent
///

pub trait TextComponent: Component {
    fn text(&self, cx: &RequestContext) -> Result<String, RenderError>;
}

///
/// RedirectComponent
/// The returned target is validated by the redirect strategy.
///

pub trait RedirectComponent: Component {
    fn location(&self, cx: &RequestContext) -> Result<String, RenderError>;
}

///
/// TitleMode
///

#[derive(Clone, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum TitleMode {
    Custom(String),
    Declared,
    Suppressed,
}

///
/// ComponentCell
/// A constructed instance, erased to its committed strategy. The set of
/// strategies is closed; adding one is an engine change, not a catalog one.
///

#[remain::sorted]
pub enum ComponentCell {
    Json(Box<dyn JsonComponent>),
    Page(Box<dyn PageComponent>),
    Redirect(Box<dyn RedirectComponent>),
    Text(Box<dyn TextComponent>),
}

impl ComponentCell {
    #[must_use]
    pub const fn kind(&self) -> RenderKind {
        match self {
            Self::Json(_) => RenderKind::Json,
            Self::Page(_) => RenderKind::Page,
            Self::Redirect(_) => RenderKind::Redirect,
            Self::Text(_) => RenderKind::Text,
        }
    }

    pub(crate) fn prepare(&mut self, cx: &RequestContext) -> Result<(), PrepareError> {
        match self {
            Self::Json(component) => component.prepare(cx),
            Self::Page(component) => component.prepare(cx),
            Self::Redirect(component) => component.prepare(cx),
            Self::Text(component) => component.prepare(cx),
        }
    }
}

///
/// Construct
/// Per-request instantiation. The attribute macro emits a `Default`-based
/// impl unless the class opts into manual construction to pull seeded
/// caller state from the request context.
///

pub trait Construct: Sized {
    fn construct(cx: &RequestContext) -> Result<Self, ConstructError>;
}

///
/// ConstructError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConstructError {
    #[error("required caller state '{0}' is absent from the request context")]
    MissingState(&'static str),

    #[error("{0}")]
    Other(String),
}

impl ConstructError {
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

///
/// PrepareError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum PrepareError {
    #[error("collaborator '{0}' is not installed in the request context")]
    MissingService(&'static str),

    #[error("{0}")]
    Other(String),
}

impl PrepareError {
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

///
/// MakeError
/// Construct-or-bind failure surfaced from the factory thunk, before the
/// instance is erased into a cell.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum MakeError {
    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Construct(#[from] ConstructError),
}

///
/// ComponentKind
/// Compile-time identity of a declared component class.
///

pub trait ComponentKind {
    const PATH: &'static str;
    const ROUTE: &'static str;

    fn node() -> &'static ComponentNode;
}
