use std::cell::RefCell;

use mockall::mock;
use pipesim_core::sim::{Clock, Schedulable};

/// Retire event that records the cycle of every `schedule` call.
pub struct RecordingEvent {
    clock: Clock,
    fired: RefCell<Vec<u64>>,
}

impl RecordingEvent {
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: clock.clone(),
            fired: RefCell::new(Vec::new()),
        }
    }

    /// Number of schedule requests received.
    pub fn count(&self) -> usize {
        self.fired.borrow().len()
    }

    /// Cycles at which schedule requests were received.
    pub fn cycles(&self) -> Vec<u64> {
        self.fired.borrow().clone()
    }
}

impl Schedulable for RecordingEvent {
    fn schedule(&self) {
        self.fired.borrow_mut().push(self.clock.cycle());
    }
}

// Retire event with call-count expectations.
mock! {
    pub RetireEvent {}

    impl Schedulable for RetireEvent {
        fn schedule(&self);
    }
}
