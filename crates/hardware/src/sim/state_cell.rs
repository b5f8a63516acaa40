//! Dual-buffered state visible as "current" and "next".
//!
//! A [`StateCell`] models a value that other units only observe after a clock
//! edge. It provides:
//! 1. **Pending Writes:** `write` stages a value for the next cycle without
//!    disturbing what the rest of the model observes this cycle.
//! 2. **Settled Reads:** `read` returns the value as of the last clock boundary.
//! 3. **Boundary Promotion:** the pending value becomes current once the clock
//!    has moved past the write cycle, or when the host calls `commit`.
//!
//! Reading the pending view in a cycle with no write is reported as
//! [`InstError::NextStateNotWritten`] instead of returning stale data.

use std::cell::Cell;
use std::fmt;

use crate::common::error::{InstError, Result};
use crate::sim::clock::Clock;

/// A clocked value with a settled view and a pending view.
pub struct StateCell<T: Copy> {
    name: &'static str,
    clock: Clock,
    current: Cell<Option<T>>,
    next: Cell<Option<T>>,
    written_at: Cell<Option<u64>>,
}

impl<T: Copy> StateCell<T> {
    /// Creates an empty cell; neither view is valid until the first write settles.
    pub fn new(name: &'static str, clock: &Clock) -> Self {
        Self {
            name,
            clock: clock.clone(),
            current: Cell::new(None),
            next: Cell::new(None),
            written_at: Cell::new(None),
        }
    }

    /// Creates a cell whose settled view already holds `init`.
    pub fn with_value(name: &'static str, clock: &Clock, init: T) -> Self {
        let cell = Self::new(name, clock);
        cell.current.set(Some(init));
        cell
    }

    /// Returns the cell name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the clock this cell is buffered against.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Promotes a pending value written in an earlier cycle.
    #[inline]
    fn settle(&self) {
        if self
            .written_at
            .get()
            .is_some_and(|at| self.clock.cycle() > at)
        {
            self.commit();
        }
    }

    /// Stages `value` as the next-cycle state.
    ///
    /// A second write in the same cycle replaces the first.
    pub fn write(&self, value: T) {
        self.settle();
        self.next.set(Some(value));
        self.written_at.set(Some(self.clock.cycle()));
    }

    /// Returns the settled value, or `None` if nothing has settled yet.
    pub fn read(&self) -> Option<T> {
        self.settle();
        self.current.get()
    }

    /// Returns true if a settled value exists.
    pub fn is_valid(&self) -> bool {
        self.read().is_some()
    }

    /// Returns the value staged for the next cycle.
    ///
    /// # Errors
    ///
    /// Returns [`InstError::NextStateNotWritten`] if nothing was written in
    /// the current cycle.
    pub fn read_next(&self) -> Result<T> {
        self.settle();
        self.next.get().ok_or(InstError::NextStateNotWritten {
            name: self.name,
            cycle: self.clock.cycle(),
        })
    }

    /// Returns true if a value was written in the current cycle.
    pub fn is_valid_next(&self) -> bool {
        self.settle();
        self.next.get().is_some()
    }

    /// Makes the pending value current immediately.
    ///
    /// Hosts that drive the clock boundary by hand call this once per edge;
    /// it is a no-op when nothing is pending.
    pub fn commit(&self) {
        if let Some(value) = self.next.take() {
            self.current.set(Some(value));
        }
        self.written_at.set(None);
    }

    /// Invalidates both views.
    pub fn clear(&self) {
        self.current.set(None);
        self.next.set(None);
        self.written_at.set(None);
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("name", &self.name)
            .field("current", &self.current.get())
            .field("next", &self.next.get())
            .field("written_at", &self.written_at.get())
            .finish()
    }
}
