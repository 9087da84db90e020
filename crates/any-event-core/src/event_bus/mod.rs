//! # Event Bus Module
//!
//! Synchronous named-event emitter with optional target filtering.
//!
//! ## Overview
//!
//! - Listeners are registered per event name and fire in registration order
//! - A listener may be restricted to a target element or element collection
//! - `emit` runs every matching listener on the caller's thread before
//!   returning
//!
//! ## Usage
//!
//! ```rust
//! use any_event_core::{EventBus, Listener, Payload, TargetRef};
//!
//! let mut bus: EventBus<&str, u32> = EventBus::new();
//!
//! // Fires for every "click"
//! bus.on("click", Listener::infallible(|p| println!("any: {:?}", p.data)));
//!
//! // Fires only for clicks aimed at element 7
//! bus.target(TargetRef::element(7))
//!     .on("click", Listener::infallible(|p| println!("seven: {:?}", p.data)));
//!
//! let payload = Payload::new("pressed").with_target(TargetRef::element(7));
//! assert!(bus.emit("click", &payload).unwrap());
//!
//! // Drop every "click" listener
//! bus.off("click", None);
//! assert!(!bus.emit("click", &payload).unwrap());
//! ```

mod bus;
mod listener;
mod payload;
mod target;

pub use bus::*;
pub use listener::*;
pub use payload::*;
pub use target::*;
