//! Renderer strategies. Dispatch hands a prepared cell to exactly one of
//! these; which one was fixed when the class declared its render kind.

mod json;
mod page;
mod redirect;
mod text;

use crate::{component::ComponentCell, context::RequestContext};
use derive_more::Display;
use kiosk_schema::{node::ComponentNode, types::RenderKind};
use thiserror::Error as ThisError;

///
/// RenderError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum RenderError {
    #[error("redirect location is empty")]
    EmptyLocation,

    #[error("{0}")]
    Other(String),

    #[error("payload could not be serialized: {0}")]
    Serialize(String),

    #[error("redirect location '{target}' contains control characters")]
    UnsafeLocation { target: String },
}

impl RenderError {
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    #[must_use]
    pub fn serialize(cause: &serde_json::Error) -> Self {
        Self::Serialize(cause.to_string())
    }
}

///
/// RenderedOutput
///

#[derive(Clone, Debug, PartialEq)]
#[remain::sorted]
pub enum RenderedOutput {
    Json(serde_json::Value),
    Page(RenderedPage),
    Redirect(Location),
    Text(String),
}

impl RenderedOutput {
    #[must_use]
    pub const fn kind(&self) -> RenderKind {
        match self {
            Self::Json(_) => RenderKind::Json,
            Self::Page(_) => RenderKind::Page,
            Self::Redirect(_) => RenderKind::Redirect,
            Self::Text(_) => RenderKind::Text,
        }
    }
}

///
/// RenderedPage
///

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPage {
    pub head: PageHead,
    pub nav: Option<NavChrome>,
    pub body: String,
}

///
/// PageHead
///

#[derive(Clone, Debug, PartialEq)]
pub struct PageHead {
    pub title: Option<String>,
    pub description: Option<String>,
    pub indexable: bool,
}

///
/// NavChrome
/// Site navigation shell; `active` is the component's declared nav key.
///

#[derive(Clone, Debug, PartialEq)]
pub struct NavChrome {
    pub active: Option<String>,
}

///
/// Location
/// Validated redirect target; never empty, never control characters.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct Location(String);

impl Location {
    pub(crate) fn new(target: impl Into<String>) -> Result<Self, RenderError> {
        let target = target.into();
        if target.is_empty() {
            return Err(RenderError::EmptyLocation);
        }
        if target.chars().any(char::is_control) {
            return Err(RenderError::UnsafeLocation { target });
        }

        Ok(Self(target))
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.0
    }
}

/// Run the strategy the cell committed to.
pub(crate) fn render(
    cell: &ComponentCell,
    node: &ComponentNode,
    cx: &RequestContext,
) -> Result<RenderedOutput, RenderError> {
    match cell {
        ComponentCell::Json(component) => json::render(component.as_ref(), cx),
        ComponentCell::Page(component) => page::render(component.as_ref(), node, cx),
        ComponentCell::Redirect(component) => redirect::render(component.as_ref(), cx),
        ComponentCell::Text(component) => text::render(component.as_ref(), cx),
    }
}
