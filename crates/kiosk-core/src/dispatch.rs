//! Request dispatch: resolve a route key against the persisted component
//! map, run the matched class through its lifecycle, and render.

use crate::{
    bind::BindError,
    component::{ConstructError, MakeError, PrepareError},
    context::RequestContext,
    input::InputBag,
    lifecycle::{Lifecycle, LifecycleError, Stage},
    obs::{self, EngineEvent, FailStage},
    registry,
    render::{self, RenderError, RenderedOutput},
};
use derive_more::Display;
use kiosk_schema::map::{ComponentMap, MapCodecError};
use std::path::Path;
use thiserror::Error as ThisError;

///
/// MapError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum MapError {
    #[error(transparent)]
    Codec(#[from] MapCodecError),

    #[error("cannot read component map at '{path}': {cause}")]
    Io { path: String, cause: String },

    #[error("no component map found at '{path}'; build the catalog first")]
    NotBuilt { path: String },
}

///
/// Presentation
/// How a dispatch failure should face the caller.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum Presentation {
    ClientError,
    NotFound,
    ServerError,
}

impl Presentation {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ClientError => "client error",
            Self::NotFound => "not found",
            Self::ServerError => "server error",
        }
    }
}

///
/// DispatchError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum DispatchError {
    #[error("component could not be constructed: {cause}")]
    ConstructFailed {
        #[source]
        cause: ConstructError,
    },

    #[error("input '{key}' is invalid: {cause}")]
    InvalidInput { key: String, cause: String },

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("required input '{key}' is missing")]
    MissingInput { key: String },

    #[error("no component is mapped to route '{route}'")]
    NotFound { route: String },

    #[error("component could not be prepared: {cause}")]
    PrepareFailed {
        #[source]
        cause: PrepareError,
    },

    #[error("component could not be rendered: {cause}")]
    RenderFailed {
        #[source]
        cause: RenderError,
    },

    #[error(
        "route '{route}' maps to '{path}' but that class is not linked into this \
         runtime; rebuild the component map"
    )]
    StaleMap { route: String, path: String },
}

impl DispatchError {
    #[must_use]
    pub const fn presentation(&self) -> Presentation {
        match self {
            Self::InvalidInput { .. } | Self::MissingInput { .. } => Presentation::ClientError,
            Self::NotFound { .. } => Presentation::NotFound,
            Self::ConstructFailed { .. }
            | Self::Lifecycle(_)
            | Self::PrepareFailed { .. }
            | Self::RenderFailed { .. }
            | Self::StaleMap { .. } => Presentation::ServerError,
        }
    }

    #[must_use]
    pub const fn fail_stage(&self) -> FailStage {
        match self {
            Self::ConstructFailed { .. } => FailStage::Construct,
            Self::InvalidInput { .. } | Self::MissingInput { .. } => FailStage::Bind,
            Self::Lifecycle(_) => FailStage::Internal,
            Self::NotFound { .. } => FailStage::NotFound,
            Self::PrepareFailed { .. } => FailStage::Prepare,
            Self::RenderFailed { .. } => FailStage::Render,
            Self::StaleMap { .. } => FailStage::Resolve,
        }
    }
}

impl From<MakeError> for DispatchError {
    fn from(err: MakeError) -> Self {
        match err {
            MakeError::Bind(BindError::Missing { key, .. }) => Self::MissingInput {
                key: key.to_string(),
            },
            MakeError::Bind(BindError::Coerce { key, cause, .. }) => Self::InvalidInput {
                key: key.to_string(),
                cause: cause.to_string(),
            },
            MakeError::Bind(BindError::Apply { field, cause }) => Self::InvalidInput {
                key: field,
                cause: cause.to_string(),
            },
            MakeError::Bind(BindError::UnknownField { field }) => Self::InvalidInput {
                key: field,
                cause: "no binding declared for this field".to_string(),
            },
            MakeError::Construct(cause) => Self::ConstructFailed { cause },
        }
    }
}

///
/// Dispatcher
/// Read side of the engine: holds one decoded component map and runs
/// requests against the classes linked into this process.
///

#[derive(Debug)]
pub struct Dispatcher {
    map: ComponentMap,
}

impl Dispatcher {
    /// Load the persisted component map artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MapError::NotBuilt {
                    path: path.display().to_string(),
                }
            } else {
                MapError::Io {
                    path: path.display().to_string(),
                    cause: e.to_string(),
                }
            }
        })?;
        let map = ComponentMap::from_bytes(&bytes)?;

        Ok(Self { map })
    }

    /// Wrap an already-decoded map (embedded callers, tests).
    #[must_use]
    pub const fn from_map(map: ComponentMap) -> Self {
        Self { map }
    }

    #[must_use]
    pub const fn map(&self) -> &ComponentMap {
        &self.map
    }

    /// Run one request through the full component lifecycle.
    pub fn dispatch(
        &self,
        route: &str,
        inputs: &InputBag,
        cx: &RequestContext,
    ) -> Result<RenderedOutput, DispatchError> {
        obs::record(EngineEvent::DispatchStarted { route });

        match self.run(route, inputs, cx) {
            Ok(output) => {
                obs::record(EngineEvent::DispatchFinished { route });
                Ok(output)
            }
            Err(err) => {
                obs::record(EngineEvent::DispatchFailed {
                    route,
                    stage: err.fail_stage(),
                });
                Err(err)
            }
        }
    }

    // Resolution happens before construction, so an unmapped route touches
    // no component state at all.
    fn run(
        &self,
        route: &str,
        inputs: &InputBag,
        cx: &RequestContext,
    ) -> Result<RenderedOutput, DispatchError> {
        let path = self
            .map
            .resolve(route)
            .ok_or_else(|| DispatchError::NotFound {
                route: route.to_string(),
            })?;
        let vtable = registry::lookup(path).ok_or_else(|| DispatchError::StaleMap {
            route: route.to_string(),
            path: path.to_string(),
        })?;

        let mut lifecycle = Lifecycle::new();
        let mut cell = match (vtable.make)(cx, inputs) {
            Ok(cell) => cell,
            Err(err) => {
                lifecycle.abort();
                return Err(err.into());
            }
        };
        lifecycle.advance(Stage::Bound)?;

        if let Err(cause) = cell.prepare(cx) {
            lifecycle.abort();
            return Err(DispatchError::PrepareFailed { cause });
        }
        lifecycle.advance(Stage::Prepared)?;

        let output = match render::render(&cell, vtable.node, cx) {
            Ok(output) => output,
            Err(cause) => {
                lifecycle.abort();
                return Err(DispatchError::RenderFailed { cause });
            }
        };
        lifecycle.advance(Stage::Rendered)?;

        Ok(output)
    }
}
