//! Scheduling interface to the host's event queue.
//!
//! The instruction model never runs retirement logic itself. It only asks the
//! host to schedule an event that the host owns; queueing and ordering are the
//! host's business.

use std::fmt;
use std::rc::{Rc, Weak};

/// An event the host simulation can schedule.
///
/// Implementations must only enqueue; the call returns immediately and must
/// not run the event inline.
pub trait Schedulable {
    /// Requests that the event fire.
    fn schedule(&self);
}

/// Non-owning reference to a host event.
///
/// Holders never keep the event alive. If the host has dropped it by the time
/// it would be scheduled, the request is lost.
#[derive(Clone)]
pub struct EventRef(Weak<dyn Schedulable>);

impl EventRef {
    /// Creates a reference to `event` without taking ownership.
    pub fn new<E: Schedulable + 'static>(event: &Rc<E>) -> Self {
        let event: Rc<dyn Schedulable> = Rc::<E>::clone(event);
        Self(Rc::downgrade(&event))
    }

    /// Schedules the event if it is still alive.
    ///
    /// Returns `false` if the event has been dropped.
    pub fn schedule(&self) -> bool {
        self.0.upgrade().is_some_and(|event| {
            event.schedule();
            true
        })
    }

    /// Returns true if the referenced event still exists.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl<E: Schedulable + 'static> From<&Rc<E>> for EventRef {
    fn from(event: &Rc<E>) -> Self {
        Self::new(event)
    }
}

impl fmt::Debug for EventRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRef")
            .field("alive", &self.is_alive())
            .finish()
    }
}
