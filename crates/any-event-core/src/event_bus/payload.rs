//! Payload envelope passed to listeners.

use super::target::TargetRef;

/// Data delivered with an emitted event.
///
/// `target` drives listener filtering: when it is `None` every listener
/// runs. `data` is opaque to the bus.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload<P, H> {
    /// Element the event is aimed at, if any
    pub target: Option<TargetRef<H>>,
    /// Caller-defined event data
    pub data: Option<P>,
}

impl<P, H> Payload<P, H> {
    /// A payload with no data and no target
    pub fn empty() -> Self {
        Self {
            target: None,
            data: None,
        }
    }

    /// A payload carrying `data` and no target
    pub fn new(data: P) -> Self {
        Self {
            target: None,
            data: Some(data),
        }
    }

    /// A payload aimed at `target`, with no data
    pub fn targeted(target: TargetRef<H>) -> Self {
        Self {
            target: Some(target),
            data: None,
        }
    }

    /// Aim this payload at `target`
    pub fn with_target(mut self, target: TargetRef<H>) -> Self {
        self.target = Some(target);
        self
    }
}

impl<P, H> Default for Payload<P, H> {
    fn default() -> Self {
        Self::empty()
    }
}
