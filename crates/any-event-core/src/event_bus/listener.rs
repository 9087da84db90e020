//! Listener callbacks and their registrations.

use std::fmt;
use std::rc::Rc;

use super::payload::Payload;
use super::target::TargetRef;
use crate::error::ListenerError;

/// Result type returned by listener callbacks
pub type ListenerResult = std::result::Result<(), ListenerError>;

type Callback<P, H> = dyn Fn(&Payload<P, H>) -> ListenerResult;

/// A registered callback.
///
/// Cloning a `Listener` yields a handle to the same callback; clones compare
/// equal, independently created listeners never do, even when built from
/// identical closures. `EventBus::off` relies on this identity.
pub struct Listener<P, H>(Rc<Callback<P, H>>);

impl<P, H> Listener<P, H> {
    /// Wrap a fallible callback
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Payload<P, H>) -> ListenerResult + 'static,
    {
        Self(Rc::new(callback))
    }

    /// Wrap a callback that cannot fail
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(&Payload<P, H>) + 'static,
        P: 'static,
        H: 'static,
    {
        Self::new(move |payload| {
            callback(payload);
            Ok(())
        })
    }

    /// Whether both handles refer to the same callback
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn call(&self, payload: &Payload<P, H>) -> ListenerResult {
        (self.0)(payload)
    }
}

impl<P, H> Clone for Listener<P, H> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<P, H> PartialEq for Listener<P, H> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<P, H> fmt::Debug for Listener<P, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// One entry in an event's listener list.
///
/// The target filter belongs to the entry, not the callback, so the same
/// listener registered twice may carry two different filters.
pub struct Registration<P, H> {
    listener: Listener<P, H>,
    target_filter: Option<TargetRef<H>>,
}

impl<P, H> Registration<P, H> {
    pub(crate) fn new(listener: Listener<P, H>, target_filter: Option<TargetRef<H>>) -> Self {
        Self {
            listener,
            target_filter,
        }
    }

    /// The registered callback
    pub fn listener(&self) -> &Listener<P, H> {
        &self.listener
    }

    /// Target this entry is restricted to; `None` fires for every target
    pub fn target_filter(&self) -> Option<&TargetRef<H>> {
        self.target_filter.as_ref()
    }
}

impl<P, H: PartialEq> Registration<P, H> {
    /// Whether this entry should run for an event aimed at `target`
    pub fn accepts(&self, target: Option<&TargetRef<H>>) -> bool {
        match (target, &self.target_filter) {
            (None, _) | (_, None) => true,
            (Some(target), Some(filter)) => filter.matches(target),
        }
    }
}

impl<P, H: fmt::Debug> fmt::Debug for Registration<P, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("listener", &self.listener)
            .field("target_filter", &self.target_filter)
            .finish()
    }
}
