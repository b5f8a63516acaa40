//! Logical clock shared by everything that lives on one clock domain.
//!
//! The clock itself does not schedule anything: the host simulation advances it
//! once per clock edge with [`Clock::tick`]. Buffered state reads the current
//! cycle to decide which of its two views is settled.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A cheap, cloneable handle to a logical cycle counter.
///
/// Clones observe the same counter.
#[derive(Clone)]
pub struct Clock {
    name: &'static str,
    cycle: Rc<Cell<u64>>,
}

impl Clock {
    /// Creates a clock at cycle 0.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cycle: Rc::new(Cell::new(0)),
        }
    }

    /// Returns the clock name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the current cycle.
    #[inline]
    pub fn cycle(&self) -> u64 {
        self.cycle.get()
    }

    /// Advances the clock by one edge.
    #[inline]
    pub fn tick(&self) {
        self.cycle.set(self.cycle.get() + 1);
    }

    /// Advances the clock by `cycles` edges.
    pub fn advance(&self, cycles: u64) {
        self.cycle.set(self.cycle.get() + cycles);
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new("core")
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("name", &self.name)
            .field("cycle", &self.cycle.get())
            .finish()
    }
}
