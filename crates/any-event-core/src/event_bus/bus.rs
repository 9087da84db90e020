//! Event Bus implementation.
//!
//! Provides the `EventBus` struct: a map from event name to an ordered list
//! of listener registrations, dispatched synchronously.

use std::collections::HashMap;
use std::fmt;

use super::listener::{Listener, Registration};
use super::payload::Payload;
use super::target::TargetRef;
use crate::config::{EmitReport, EventBusConfig, FailurePolicy};
use crate::error::{EmitError, ListenerFailure};

/// Named-event emitter with optional per-listener target filters.
///
/// The bus is single-threaded: listeners are `Rc`-backed and run on the
/// caller's thread, in registration order, before `emit` returns.
///
/// `P` is the payload data type and `H` the element handle type that
/// targets are built from.
pub struct EventBus<P, H> {
    /// Listener lists keyed by event name
    callbacks: HashMap<String, Vec<Registration<P, H>>>,
    /// Filter picked up by the next `on` call
    pending_target: Option<TargetRef<H>>,
    /// Every handle passed to `target`, flattened
    pending_targets: Vec<H>,
    config: EventBusConfig,
}

impl<P, H> EventBus<P, H> {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            callbacks: HashMap::new(),
            pending_target: None,
            pending_targets: Vec::new(),
            config,
        }
    }

    /// Register `listener` for `event`.
    ///
    /// The listener takes the target recorded by the preceding
    /// [`target`](Self::target) call as its filter. The pending target is
    /// cleared afterwards whether or not one was set, so it applies to
    /// exactly one registration.
    pub fn on(&mut self, event: impl Into<String>, listener: Listener<P, H>) -> &mut Self {
        let filter = self.pending_target.take();
        self.on_with_filter(event, listener, filter)
    }

    /// Register `listener` for `event` with an explicit target filter.
    ///
    /// Leaves any pending target from [`target`](Self::target) untouched.
    /// Registering the same listener twice adds two independent entries.
    pub fn on_with_filter(
        &mut self,
        event: impl Into<String>,
        listener: Listener<P, H>,
        filter: Option<TargetRef<H>>,
    ) -> &mut Self {
        let event = event.into();
        tracing::debug!(
            "Registering listener for '{}' (filtered: {})",
            event,
            filter.is_some()
        );
        self.callbacks
            .entry(event)
            .or_default()
            .push(Registration::new(listener, filter));
        self
    }

    /// Remove listeners for `event`.
    ///
    /// With `None`, every listener for the event is dropped. With a
    /// listener, only the first entry sharing its identity is removed;
    /// unknown events and unregistered listeners are ignored.
    pub fn off(&mut self, event: &str, listener: Option<&Listener<P, H>>) -> &mut Self {
        match listener {
            None => {
                if let Some(removed) = self.callbacks.remove(event) {
                    tracing::debug!("Removed all {} listener(s) for '{}'", removed.len(), event);
                }
            }
            Some(listener) => {
                if let Some(registrations) = self.callbacks.get_mut(event) {
                    if let Some(index) = registrations
                        .iter()
                        .position(|r| r.listener().same_as(listener))
                    {
                        registrations.remove(index);
                        tracing::debug!("Removed listener #{} for '{}'", index, event);
                    }
                }
            }
        }
        self
    }

    /// Drop every registration and pending target.
    ///
    /// The bus is left in the same state as a freshly constructed one and
    /// stays usable.
    pub fn destroy(&mut self) {
        self.callbacks.clear();
        self.pending_target = None;
        self.pending_targets.clear();
        tracing::debug!("Event bus destroyed");
    }

    /// Registrations for `event` in dispatch order
    pub fn registrations(&self, event: &str) -> &[Registration<P, H>] {
        self.callbacks.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of listeners registered for `event`
    pub fn listener_count(&self, event: &str) -> usize {
        self.registrations(event).len()
    }

    /// Whether `event` has at least one listener
    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// Names that currently have a listener list, in no particular order.
    ///
    /// A name whose last listener was removed individually keeps an empty
    /// list and is still reported here.
    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.callbacks.keys().map(String::as_str)
    }

    /// Target waiting for the next `on` call
    pub fn pending_target(&self) -> Option<&TargetRef<H>> {
        self.pending_target.as_ref()
    }

    /// Every handle recorded by `target` since construction or the last
    /// `destroy`, collections flattened to their members
    pub fn pending_targets(&self) -> &[H] {
        &self.pending_targets
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }
}

impl<P, H: Clone> EventBus<P, H> {
    /// Record `target` as the filter for the next [`on`](Self::on) call.
    ///
    /// A later `target` call before `on` replaces the pending filter. The
    /// handles are also appended to [`pending_targets`](Self::pending_targets).
    pub fn target(&mut self, target: TargetRef<H>) -> &mut Self {
        self.pending_targets.extend(target.elements().iter().cloned());
        self.pending_target = Some(target);
        self
    }
}

impl<P, H: PartialEq> EventBus<P, H> {
    /// Deliver `payload` to the listeners of `event`.
    ///
    /// Listeners run in registration order. A listener whose filter does
    /// not match `payload.target` is skipped; a payload without a target
    /// reaches every listener.
    ///
    /// With the default [`EmitReport::Registered`] the result is `true`
    /// when the event had any listener at all, even if filtering skipped
    /// every one of them. A listener error stops delivery and is returned
    /// under [`FailurePolicy::FailFast`]; under [`FailurePolicy::Isolate`]
    /// the remaining listeners still run and all errors are returned
    /// together.
    pub fn emit(&self, event: &str, payload: &Payload<P, H>) -> Result<bool, EmitError> {
        let Some(registrations) = self.callbacks.get(event).filter(|r| !r.is_empty()) else {
            tracing::trace!("No listeners for '{}'", event);
            return Ok(false);
        };

        let target = payload.target.as_ref();
        let mut dispatched = 0usize;
        let mut failures = Vec::new();

        for (index, registration) in registrations.iter().enumerate() {
            if !registration.accepts(target) {
                tracing::trace!("Listener #{} for '{}' filtered out", index, event);
                continue;
            }

            dispatched += 1;
            tracing::trace!("Dispatching '{}' to listener #{}", event, index);

            if let Err(error) = registration.listener().call(payload) {
                match self.config.failure_policy {
                    FailurePolicy::FailFast => {
                        return Err(EmitError::ListenerFailed {
                            event: event.to_string(),
                            index,
                            source: error,
                        });
                    }
                    FailurePolicy::Isolate => {
                        tracing::warn!("Listener #{} for '{}' failed: {}", index, event, error);
                        failures.push(ListenerFailure { index, error });
                    }
                }
            }
        }

        if !failures.is_empty() {
            return Err(EmitError::ListenersFailed {
                event: event.to_string(),
                failures,
            });
        }

        Ok(match self.config.emit_report {
            EmitReport::Registered => true,
            EmitReport::Dispatched => dispatched > 0,
        })
    }
}

impl<P, H> Default for EventBus<P, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, H> fmt::Debug for EventBus<P, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.callbacks.len())
            .field(
                "listeners",
                &self.callbacks.values().map(Vec::len).sum::<usize>(),
            )
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenerError;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    type Bus = EventBus<u32, &'static str>;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Listener<u32, &'static str> {
        let log = log.clone();
        Listener::infallible(move |_| log.borrow_mut().push(name))
    }

    fn failing(message: &'static str) -> Listener<u32, &'static str> {
        Listener::new(move |_| Err(ListenerError::msg(message)))
    }

    #[test]
    fn test_event_bus_creation() {
        let bus = Bus::new();
        assert_eq!(bus.event_names().count(), 0);
        assert_eq!(bus.config(), &EventBusConfig::default());
        assert!(bus.pending_target().is_none());
    }

    #[test]
    fn test_register_and_remove() {
        let mut bus = Bus::new();
        let listener = Listener::infallible(|_| {});

        bus.on("save", listener.clone());
        assert_eq!(bus.listener_count("save"), 1);

        bus.off("save", Some(&listener));
        assert_eq!(bus.listener_count("save"), 0);
        assert!(!bus.has_listeners("save"));

        // Removing again is a no-op
        bus.off("save", Some(&listener));
        assert_eq!(bus.listener_count("save"), 0);
    }

    #[test]
    fn test_event_delivery() {
        let mut bus = Bus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        bus.on(
            "save",
            Listener::infallible(move |payload| {
                counter_clone.fetch_add(payload.data.unwrap_or(0) as usize, Ordering::SeqCst);
            }),
        );

        assert!(bus.emit("save", &Payload::new(3)).expect("no failures"));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_off_removes_first_matching_entry_only() {
        let mut bus = Bus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder(&log, "a");

        bus.target(TargetRef::element("first"))
            .on("click", a.clone())
            .target(TargetRef::element("second"))
            .on("click", a.clone());

        bus.off("click", Some(&a));

        let remaining = bus.registrations("click");
        assert_eq!(remaining.len(), 1);
        assert_eq!(
            remaining[0].target_filter(),
            Some(&TargetRef::element("second"))
        );
    }

    #[test]
    fn test_empty_list_after_removal_reports_false() {
        let mut bus = Bus::new();
        let a = Listener::infallible(|_| {});
        bus.on("save", a.clone()).off("save", Some(&a));

        assert!(bus.event_names().any(|name| name == "save"));
        assert!(!bus.emit("save", &Payload::empty()).expect("no failures"));
    }

    #[test]
    fn test_on_with_filter_keeps_pending_target() {
        let mut bus = Bus::new();
        bus.target(TargetRef::element("pending"));
        bus.on_with_filter(
            "click",
            Listener::infallible(|_| {}),
            Some(TargetRef::element("explicit")),
        );

        assert_eq!(bus.pending_target(), Some(&TargetRef::element("pending")));

        bus.on("click", Listener::infallible(|_| {}));
        let filters: Vec<_> = bus
            .registrations("click")
            .iter()
            .map(|r| r.target_filter().cloned())
            .collect();
        assert_eq!(
            filters,
            vec![
                Some(TargetRef::element("explicit")),
                Some(TargetRef::element("pending")),
            ]
        );
        assert!(bus.pending_target().is_none());
    }

    #[test]
    fn test_target_accumulates_flattened_handles() {
        let mut bus = Bus::new();
        bus.target(TargetRef::element("a"))
            .target(TargetRef::collection(["b", "c"]));

        assert_eq!(bus.pending_targets(), &["a", "b", "c"]);
        // Only the latest target is pending
        assert_eq!(
            bus.pending_target(),
            Some(&TargetRef::collection(["b", "c"]))
        );

        bus.on("click", Listener::infallible(|_| {}));
        assert_eq!(bus.pending_targets(), &["a", "b", "c"]);
    }

    #[test]
    fn test_fail_fast_stops_delivery() {
        let mut bus = Bus::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        bus.on("save", recorder(&log, "a"))
            .on("save", failing("disk full"))
            .on("save", recorder(&log, "c"));

        let err = bus.emit("save", &Payload::empty()).unwrap_err();
        match err {
            EmitError::ListenerFailed { event, index, source } => {
                assert_eq!(event, "save");
                assert_eq!(index, 1);
                assert_eq!(source.to_string(), "disk full");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn test_isolate_runs_every_listener() {
        let config = EventBusConfig {
            failure_policy: FailurePolicy::Isolate,
            ..Default::default()
        };
        let mut bus = Bus::with_config(config);
        let log = Rc::new(RefCell::new(Vec::new()));

        bus.on("save", failing("first"))
            .on("save", recorder(&log, "b"))
            .on("save", failing("third"));

        let err = bus.emit("save", &Payload::empty()).unwrap_err();
        assert_eq!(*log.borrow(), vec!["b"]);
        match err {
            EmitError::ListenersFailed { failures, .. } => {
                let indices: Vec<_> = failures.iter().map(|f| f.index).collect();
                assert_eq!(indices, vec![0, 2]);
                assert_eq!(failures[1].error.to_string(), "third");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_isolate_without_failures_is_ok() {
        let config = EventBusConfig {
            failure_policy: FailurePolicy::Isolate,
            ..Default::default()
        };
        let mut bus = Bus::with_config(config);
        bus.on("save", Listener::infallible(|_| {}));
        assert!(bus.emit("save", &Payload::empty()).expect("no failures"));
    }

    #[test]
    fn test_registered_report_ignores_filtering() {
        let mut bus = Bus::new();
        bus.target(TargetRef::element("a"))
            .on("click", Listener::infallible(|_| {}));

        let payload = Payload::targeted(TargetRef::element("b"));
        assert!(bus.emit("click", &payload).expect("no failures"));
    }

    #[test]
    fn test_dispatched_report_reflects_filtering() {
        let config = EventBusConfig {
            emit_report: EmitReport::Dispatched,
            ..Default::default()
        };
        let mut bus = Bus::with_config(config);
        bus.target(TargetRef::element("a"))
            .on("click", Listener::infallible(|_| {}));

        let miss = Payload::targeted(TargetRef::element("b"));
        let hit = Payload::targeted(TargetRef::element("a"));
        assert!(!bus.emit("click", &miss).expect("no failures"));
        assert!(bus.emit("click", &hit).expect("no failures"));
        assert!(!bus.emit("unknown", &hit).expect("no failures"));
    }

    #[test]
    fn test_destroy_resets_pending_state() {
        let mut bus = Bus::new();
        bus.target(TargetRef::element("a"))
            .on("click", Listener::infallible(|_| {}))
            .target(TargetRef::element("b"));

        bus.destroy();
        assert_eq!(bus.event_names().count(), 0);
        assert!(bus.pending_target().is_none());
        assert!(bus.pending_targets().is_empty());

        // Destroy is idempotent
        bus.destroy();
        assert_eq!(bus.event_names().count(), 0);
    }

    #[test]
    fn test_debug_output() {
        let mut bus = Bus::new();
        bus.on("a", Listener::infallible(|_| {}))
            .on("a", Listener::infallible(|_| {}))
            .on("b", Listener::infallible(|_| {}));

        let text = format!("{bus:?}");
        assert!(text.contains("events: 2"));
        assert!(text.contains("listeners: 3"));
    }
}
