//! # AnyEvent Core
//!
//! Named-event emitter for attaching callbacks to optional UI element
//! targets. Listeners run synchronously, in registration order, on the
//! caller's thread; a target filter restricts a listener to payloads
//! aimed at a particular element or collection of elements.

pub mod config;
pub mod error;
pub mod event_bus;

pub use config::{EmitReport, EventBusConfig, FailurePolicy};
pub use error::{ConfigError, EmitError, ListenerError, ListenerFailure};
pub use event_bus::{
    ElementRef, EventBus, Listener, ListenerResult, Payload, Registration, TargetRef,
};
