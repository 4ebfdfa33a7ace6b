use derive_more::Display;
use thiserror::Error as ThisError;

///
/// Stage
/// Dispatch progress for one component instance, in pipeline order.
/// `Rendered` and `Failed` are terminal.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Stage {
    Created,
    Bound,
    Prepared,
    Rendered,
    Failed,
}

///
/// LifecycleError
///

#[derive(Debug, ThisError)]
pub enum LifecycleError {
    #[error("cannot advance component lifecycle from {from} to {to}")]
    InvalidTransition { from: Stage, to: Stage },
}

///
/// Lifecycle
/// Single-pass state machine: Created -> Bound -> Prepared -> Rendered, with
/// `Failed` reachable from any non-terminal stage. No stage repeats.
///

#[derive(Clone, Copy, Debug)]
pub struct Lifecycle {
    stage: Stage,
}

impl Lifecycle {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stage: Stage::Created,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.stage, Stage::Rendered | Stage::Failed)
    }

    /// Move to the next pipeline stage.
    pub fn advance(&mut self, next: Stage) -> Result<(), LifecycleError> {
        let allowed = matches!(
            (self.stage, next),
            (Stage::Created, Stage::Bound)
                | (Stage::Bound, Stage::Prepared)
                | (Stage::Prepared, Stage::Rendered)
        ) || (!self.is_terminal() && next == Stage::Failed);

        if allowed {
            self.stage = next;
            Ok(())
        } else {
            Err(LifecycleError::InvalidTransition {
                from: self.stage,
                to: next,
            })
        }
    }

    /// Mark the in-flight instance failed. Only valid before a terminal
    /// stage; the dispatch pipeline drops the instance right after.
    pub fn abort(&mut self) {
        debug_assert!(!self.is_terminal(), "abort on a terminal lifecycle");
        self.stage = Stage::Failed;
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
