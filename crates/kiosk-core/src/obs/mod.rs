//! Ephemeral, in-memory counters for dispatch and build activity.

pub mod sink;

pub use sink::{EngineEvent, EventSink, FailStage, record, with_event_sink};

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    sync::{LazyLock, Mutex},
};

///
/// EngineState
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EngineState {
    pub ops: EngineOps,
    pub routes: BTreeMap<String, RouteCounters>,
}

///
/// EngineOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EngineOps {
    // Dispatch entrypoints
    pub dispatch_calls: u64,
    pub dispatch_rendered: u64,
    pub dispatch_failed: u64,
    pub not_found: u64,

    // Failures attributed to each pipeline step
    pub failed_resolve: u64,
    pub failed_construct: u64,
    pub failed_bind: u64,
    pub failed_prepare: u64,
    pub failed_render: u64,
    pub failed_internal: u64,

    // Artifact builds
    pub build_calls: u64,
    pub build_succeeded: u64,
    pub build_failed: u64,
    pub routes_built: u64,
}

///
/// RouteCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RouteCounters {
    pub calls: u64,
    pub rendered: u64,
    pub failed: u64,
}

static ENGINE_STATE: LazyLock<Mutex<EngineState>> =
    LazyLock::new(|| Mutex::new(EngineState::default()));

/// Borrow counters immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EngineState) -> R) -> R {
    let state = ENGINE_STATE
        .lock()
        .expect("engine state Mutex poisoned while acquiring lock");

    f(&state)
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EngineState) -> R) -> R {
    let mut state = ENGINE_STATE
        .lock()
        .expect("engine state Mutex poisoned while acquiring lock");

    f(&mut state)
}

/// Snapshot the current counters for endpoint/test plumbing.
#[must_use]
pub fn report() -> EngineState {
    with_state(Clone::clone)
}

/// Reset all counters (useful in tests).
pub fn reset_all() {
    with_state_mut(|state| *state = EngineState::default());
}
