//! Fixed-capacity instruction pool.
//!
//! Millions of instructions churn through a run, but only a few hundred are
//! live at once. The pool keeps a slab of instruction slots and hands them out
//! through shared [`InstPtr`] handles:
//! 1. **Acquire:** Pops a free slot and re-initializes it in place.
//! 2. **Release:** When the last handle to a slot drops, the slot goes back on
//!    the free list. There is no other recycling path.
//! 3. **Replenish:** Slots are allocated a chunk at a time, only when the free
//!    list is empty, up to the configured capacity.
//!
//! Exceeding the capacity is a model bug (instructions accumulating without
//! bound) and is reported as [`InstError::PoolExhausted`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::common::error::{InstError, Result};
use crate::config::{Config, PoolConfig};
use crate::inst::{Instruction, StaticInfo, Status};
use crate::sim::clock::Clock;
use crate::stats::PoolStats;

/// Shared instruction handle.
pub mod ptr;

pub use ptr::InstPtr;

/// One pooled instruction.
pub(crate) struct Slot {
    pub(crate) pool: Weak<PoolShared>,
    /// Number of times the slot has been handed out.
    uses: u64,
    pub(crate) inst: Instruction,
}

/// State shared by the pool and every slot it created.
pub(crate) struct PoolShared {
    /// Handed to slots so the last handle can find its way home.
    me: Weak<Self>,
    config: PoolConfig,
    free: RefCell<Vec<Rc<Slot>>>,
    stats: Cell<PoolStats>,
    water_mark_warned: Cell<bool>,
}

impl PoolShared {
    /// Takes back a slot whose last handle is being dropped.
    pub(crate) fn release(&self, slot: Rc<Slot>) {
        self.free.borrow_mut().push(slot);
        let mut stats = self.stats.get();
        stats.live -= 1;
        stats.releases += 1;
        self.stats.set(stats);
    }

    /// Allocates the next chunk of slots onto the free list.
    fn replenish(&self, clock: &Clock) -> Result<()> {
        let mut stats = self.stats.get();
        let room = self.config.capacity - stats.allocated;
        if room == 0 {
            stats.exhausted += 1;
            self.stats.set(stats);
            return Err(InstError::PoolExhausted {
                capacity: self.config.capacity,
            });
        }

        let count = self.config.chunk_size.clamp(1, room);
        let mut free = self.free.borrow_mut();
        free.extend((0..count).map(|_| {
            Rc::new(Slot {
                pool: Weak::clone(&self.me),
                uses: 0,
                inst: Instruction::new(StaticInfo::default(), clock, Status::Fetched),
            })
        }));
        stats.allocated += count;
        self.stats.set(stats);

        debug!(
            allocated = stats.allocated,
            capacity = self.config.capacity,
            "instruction pool replenished"
        );
        Ok(())
    }

    fn acquire(&self, info: StaticInfo, clock: &Clock, status: Status) -> Result<InstPtr> {
        if self.free.borrow().is_empty() {
            self.replenish(clock)?;
        }
        let popped = self.free.borrow_mut().pop();
        let Some(mut slot) = popped else {
            return Err(InstError::PoolExhausted {
                capacity: self.config.capacity,
            });
        };

        // Free slots are referenced by the free list alone.
        let Some(entry) = Rc::get_mut(&mut slot) else {
            return Err(InstError::PoolExhausted {
                capacity: self.config.capacity,
            });
        };
        entry.inst = Instruction::new(info, clock, status);
        entry.uses += 1;
        let reused = entry.uses > 1;

        let mut stats = self.stats.get();
        stats.live += 1;
        stats.high_water = stats.high_water.max(stats.live);
        stats.acquires += 1;
        if reused {
            stats.reuses += 1;
        }
        self.stats.set(stats);

        if stats.live > self.config.chunk_size && !self.water_mark_warned.get() {
            self.water_mark_warned.set(true);
            warn!(
                live = stats.live,
                water_mark = self.config.chunk_size,
                capacity = self.config.capacity,
                "live instructions passed the pool water mark"
            );
        }

        Ok(InstPtr::from_slot(slot))
    }
}

/// The instruction allocator for one simulation run.
///
/// Cloning yields another handle to the same pool. Instructions may outlive
/// every pool handle; their slots are then simply freed.
#[derive(Clone)]
pub struct InstPool {
    shared: Rc<PoolShared>,
}

impl InstPool {
    /// Creates an empty pool. No slot is allocated until the first acquire.
    pub fn new(config: PoolConfig) -> Self {
        let shared = Rc::new_cyclic(|me| PoolShared {
            me: Weak::clone(me),
            config,
            free: RefCell::new(Vec::with_capacity(config.capacity)),
            stats: Cell::new(PoolStats::default()),
            water_mark_warned: Cell::new(false),
        });
        Self { shared }
    }

    /// Creates a pool from the `pool` section of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.pool)
    }

    /// Acquires a new instruction in `Fetched` status.
    ///
    /// # Errors
    ///
    /// Returns [`InstError::PoolExhausted`] if `capacity` instructions are
    /// already live.
    pub fn acquire(&self, info: StaticInfo, clock: &Clock) -> Result<InstPtr> {
        self.shared.acquire(info, clock, Status::Fetched)
    }

    /// Acquires a new instruction starting in `status`.
    ///
    /// Producers that inject instructions mid-pipeline (replay, trace-driven
    /// front ends) use this instead of [`acquire`](Self::acquire).
    ///
    /// # Arguments
    ///
    /// * `info` - Static decode info copied into the instruction.
    /// * `clock` - Clock that drives the instruction's buffered status.
    /// * `status` - Initial status, visible in every view at once.
    ///
    /// # Returns
    ///
    /// A handle to a freshly initialized instruction with no unique id,
    /// a zero virtual address and no retire binding.
    ///
    /// # Errors
    ///
    /// Returns [`InstError::PoolExhausted`] if `capacity` instructions are
    /// already live.
    pub fn acquire_with_status(
        &self,
        info: StaticInfo,
        clock: &Clock,
        status: Status,
    ) -> Result<InstPtr> {
        self.shared.acquire(info, clock, status)
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.shared.config.capacity
    }

    /// Returns the replenishment chunk size.
    pub fn chunk_size(&self) -> usize {
        self.shared.config.chunk_size
    }

    /// Returns the number of live instructions.
    pub fn live(&self) -> usize {
        self.shared.stats.get().live
    }

    /// Returns how many more instructions can be acquired.
    pub fn available(&self) -> usize {
        self.capacity() - self.live()
    }

    /// Returns a snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        self.shared.stats.get()
    }
}

impl Default for InstPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl fmt::Debug for InstPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstPool")
            .field("config", &self.shared.config)
            .field("stats", &self.shared.stats.get())
            .finish()
    }
}
