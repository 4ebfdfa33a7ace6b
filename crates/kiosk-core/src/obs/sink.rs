//! Event sink boundary.
//!
//! Dispatch and build logic never touch counter state directly. All
//! instrumentation flows through EngineEvent and EventSink, so tests and
//! embedders can intercept events with a scoped override.

use crate::obs;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = const { RefCell::new(None) };
}

///
/// EngineEvent
///

#[derive(Clone, Copy, Debug)]
#[remain::sorted]
pub enum EngineEvent<'a> {
    BuildFailed,
    BuildFinished { routes: u64 },
    BuildStarted,
    DispatchFailed { route: &'a str, stage: FailStage },
    DispatchFinished { route: &'a str },
    DispatchStarted { route: &'a str },
}

///
/// FailStage
/// Pipeline step a dispatch failure is attributed to. `NotFound` is a route
/// miss, `Resolve` a stale-map resolution failure, `Internal` an engine
/// ordering violation.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[remain::sorted]
pub enum FailStage {
    Bind,
    Construct,
    Internal,
    NotFound,
    Prepare,
    Render,
    Resolve,
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: EngineEvent<'_>);
}

///
/// GlobalEventSink
/// Default process-local sink that writes into global counter state.
/// Acts as the concrete sink when no scoped override is installed.
///

struct GlobalEventSink;

impl EventSink for GlobalEventSink {
    fn record(&self, event: EngineEvent<'_>) {
        match event {
            EngineEvent::BuildFailed => {
                obs::with_state_mut(|m| {
                    m.ops.build_failed = m.ops.build_failed.saturating_add(1);
                });
            }

            EngineEvent::BuildFinished { routes } => {
                obs::with_state_mut(|m| {
                    m.ops.build_succeeded = m.ops.build_succeeded.saturating_add(1);
                    m.ops.routes_built = m.ops.routes_built.saturating_add(routes);
                });
            }

            EngineEvent::BuildStarted => {
                obs::with_state_mut(|m| {
                    m.ops.build_calls = m.ops.build_calls.saturating_add(1);
                });
            }

            EngineEvent::DispatchFailed { route, stage } => {
                obs::with_state_mut(|m| {
                    m.ops.dispatch_failed = m.ops.dispatch_failed.saturating_add(1);
                    let counter = match stage {
                        FailStage::Bind => &mut m.ops.failed_bind,
                        FailStage::Construct => &mut m.ops.failed_construct,
                        FailStage::Internal => &mut m.ops.failed_internal,
                        FailStage::NotFound => &mut m.ops.not_found,
                        FailStage::Prepare => &mut m.ops.failed_prepare,
                        FailStage::Render => &mut m.ops.failed_render,
                        FailStage::Resolve => &mut m.ops.failed_resolve,
                    };
                    *counter = counter.saturating_add(1);
                    let entry = m.routes.entry(route.to_string()).or_default();
                    entry.failed = entry.failed.saturating_add(1);
                });
            }

            EngineEvent::DispatchFinished { route } => {
                obs::with_state_mut(|m| {
                    m.ops.dispatch_rendered = m.ops.dispatch_rendered.saturating_add(1);
                    let entry = m.routes.entry(route.to_string()).or_default();
                    entry.rendered = entry.rendered.saturating_add(1);
                });
            }

            EngineEvent::DispatchStarted { route } => {
                obs::with_state_mut(|m| {
                    m.ops.dispatch_calls = m.ops.dispatch_calls.saturating_add(1);
                    let entry = m.routes.entry(route.to_string()).or_default();
                    entry.calls = entry.calls.saturating_add(1);
                });
            }
        }
    }
}

/// Record an event through the active sink.
pub fn record(event: EngineEvent<'_>) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    if let Some(sink) = override_sink {
        sink.record(event);
    } else {
        GlobalEventSink.record(event);
    }
}

/// Run a closure with a temporary event sink override on this thread.
/// The previous sink is restored on all exits, including unwind.
pub fn with_event_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn EventSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::Mutex;

    // Serializes the tests that assert on global counter state.
    static STATE_LOCK: Mutex<()> = Mutex::new(());

    #[derive(Default)]
    struct CountingSink {
        calls: Cell<usize>,
    }

    impl EventSink for CountingSink {
        fn record(&self, _: EngineEvent<'_>) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn with_event_sink_routes_and_restores_nested_overrides() {
        let outer = Rc::new(CountingSink::default());
        let inner = Rc::new(CountingSink::default());

        // No override installed yet.
        record(EngineEvent::DispatchStarted {
            route: "obs:nested-probe",
        });
        assert_eq!(outer.calls.get(), 0);
        assert_eq!(inner.calls.get(), 0);

        with_event_sink(outer.clone(), || {
            record(EngineEvent::BuildStarted);
            assert_eq!(outer.calls.get(), 1);
            assert_eq!(inner.calls.get(), 0);

            with_event_sink(inner.clone(), || {
                record(EngineEvent::BuildFailed);
            });

            // Inner override was restored to outer override.
            record(EngineEvent::BuildFinished { routes: 1 });
        });

        assert_eq!(outer.calls.get(), 2);
        assert_eq!(inner.calls.get(), 1);

        // Outer override was restored to previous (none).
        SINK_OVERRIDE.with(|cell| {
            assert!(cell.borrow().is_none());
        });

        record(EngineEvent::DispatchFailed {
            route: "obs:nested-probe",
            stage: FailStage::Render,
        });
        assert_eq!(outer.calls.get(), 2);
        assert_eq!(inner.calls.get(), 1);
    }

    #[test]
    fn with_event_sink_restores_override_on_panic() {
        let sink = Rc::new(CountingSink::default());

        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_event_sink(sink.clone(), || {
                record(EngineEvent::BuildStarted);
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();
        assert!(panicked);
        assert_eq!(sink.calls.get(), 1);

        // Guard restored the slot after unwind.
        SINK_OVERRIDE.with(|cell| {
            assert!(cell.borrow().is_none());
        });
    }

    #[test]
    fn global_sink_accumulates_per_route_counters() {
        let _guard = STATE_LOCK.lock().expect("state lock");

        record(EngineEvent::DispatchStarted {
            route: "obs:route-counter-probe",
        });
        record(EngineEvent::DispatchStarted {
            route: "obs:route-counter-probe",
        });
        record(EngineEvent::DispatchFinished {
            route: "obs:route-counter-probe",
        });
        record(EngineEvent::DispatchFailed {
            route: "obs:route-counter-probe",
            stage: FailStage::Prepare,
        });

        let report = obs::report();
        let entry = report
            .routes
            .get("obs:route-counter-probe")
            .expect("route counters should be present");
        assert_eq!(entry.calls, 2);
        assert_eq!(entry.rendered, 1);
        assert_eq!(entry.failed, 1);
    }

    #[test]
    fn failed_dispatches_count_toward_their_stage() {
        let _guard = STATE_LOCK.lock().expect("state lock");

        let before = obs::report().ops;
        record(EngineEvent::DispatchFailed {
            route: "obs:stage-probe",
            stage: FailStage::NotFound,
        });
        record(EngineEvent::DispatchFailed {
            route: "obs:stage-probe",
            stage: FailStage::Bind,
        });
        record(EngineEvent::DispatchFailed {
            route: "obs:stage-probe",
            stage: FailStage::Bind,
        });

        let after = obs::report().ops;
        assert_eq!(after.dispatch_failed, before.dispatch_failed + 3);
        assert_eq!(after.not_found, before.not_found + 1);
        assert_eq!(after.failed_bind, before.failed_bind + 2);
        assert_eq!(after.failed_prepare, before.failed_prepare);
    }

    #[test]
    fn reset_all_clears_recorded_routes() {
        let _guard = STATE_LOCK.lock().expect("state lock");

        record(EngineEvent::DispatchStarted {
            route: "obs:reset-probe",
        });
        assert!(obs::report().routes.contains_key("obs:reset-probe"));

        obs::reset_all();

        assert!(!obs::report().routes.contains_key("obs:reset-probe"));
    }
}
