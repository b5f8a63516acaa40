//! The in-flight instruction.
//!
//! An [`Instruction`] is one dynamic occurrence of a decoded instruction moving
//! through the pipeline. It provides:
//! 1. **Identity:** Static decode info plus a unique id assigned by fetch.
//! 2. **State Machine:** A monotonic lifecycle status, mirrored for same-cycle
//!    readers and double-buffered for clock-boundary readers.
//! 3. **Retirement Trigger:** Schedules the reorder buffer's retire event once
//!    the instruction is both completed and next to retire, whichever is second.
//! 4. **Dynamic State:** Virtual address and speculation flag.
//!
//! Instructions are shared between stages through [`InstPtr`](crate::pool::InstPtr)
//! handles, so every mutator takes `&self`.

use std::cell::{Cell, OnceCell};
use std::fmt;

use tracing::{trace, warn};

use crate::common::addr::{PhysAddr, VirtAddr};
use crate::common::error::{InstError, Result};
use crate::inst::static_info::{StaticInfo, TargetUnit};
use crate::inst::status::Status;
use crate::sim::clock::Clock;
use crate::sim::event::EventRef;
use crate::sim::state_cell::StateCell;

/// A dynamic instruction in flight.
pub struct Instruction {
    info: StaticInfo,
    unique_id: Cell<u64>,
    vaddr: Cell<VirtAddr>,
    speculative: Cell<bool>,
    /// Buffered status, observed by other units after the clock edge.
    status: StateCell<Status>,
    /// Immediately visible status.
    status_state: Cell<Status>,
    /// Set together with `retire_event` by the reorder buffer.
    last: Cell<bool>,
    retire_event: OnceCell<EventRef>,
    retire_scheduled: Cell<bool>,
}

impl Instruction {
    /// Creates an instruction in `status` on `clock`.
    ///
    /// Pipeline models get instructions from an
    /// [`InstPool`](crate::pool::InstPool); this constructor exists for the
    /// pool and for standalone use in tests.
    ///
    /// # Arguments
    ///
    /// * `info` - Static decode info; fixed for the instruction's lifetime.
    /// * `clock` - Clock whose edges settle the buffered status.
    /// * `status` - Initial status, already settled.
    ///
    /// # Returns
    ///
    /// An unflagged instruction with unique id 0 and no retire binding.
    pub fn new(info: StaticInfo, clock: &Clock, status: Status) -> Self {
        Self {
            info,
            unique_id: Cell::new(0),
            vaddr: Cell::new(VirtAddr::default()),
            speculative: Cell::new(false),
            status: StateCell::with_value("inst_status", clock, status),
            status_state: Cell::new(status),
            last: Cell::new(false),
            retire_event: OnceCell::new(),
            retire_scheduled: Cell::new(false),
        }
    }

    /// Returns the static decode info.
    #[inline]
    pub fn static_info(&self) -> &StaticInfo {
        &self.info
    }

    /// Returns the mnemonic.
    #[inline]
    pub fn mnemonic(&self) -> &'static str {
        self.info.mnemonic
    }

    /// Returns the raw encoding.
    #[inline]
    pub fn opcode(&self) -> u32 {
        self.info.opcode
    }

    /// Returns the target execution unit.
    #[inline]
    pub fn unit(&self) -> TargetUnit {
        self.info.unit
    }

    /// Returns the execution latency in cycles.
    #[inline]
    pub fn execute_time(&self) -> u32 {
        self.info.execute_time
    }

    /// Returns true for store instructions.
    #[inline]
    pub fn is_store(&self) -> bool {
        self.info.is_store
    }

    /// Returns the unique id (0 until fetch assigns one).
    #[inline]
    pub fn unique_id(&self) -> u64 {
        self.unique_id.get()
    }

    /// Assigns the unique sequence number. Fetch calls this once, before the
    /// instruction reaches any other stage.
    pub fn set_unique_id(&self, uid: u64) {
        self.unique_id.set(uid);
    }

    /// Returns the virtual address (zero if never set).
    #[inline]
    pub fn vaddr(&self) -> VirtAddr {
        self.vaddr.get()
    }

    /// Records the virtual address.
    pub fn set_vaddr(&self, vaddr: VirtAddr) {
        self.vaddr.set(vaddr);
    }

    /// Returns the modeled physical address.
    #[inline]
    pub fn raddr(&self) -> PhysAddr {
        self.vaddr.get().to_phys()
    }

    /// Returns true if the instruction may still be flushed.
    #[inline]
    pub fn is_speculative(&self) -> bool {
        self.speculative.get()
    }

    /// Sets the speculation flag.
    pub fn set_speculative(&self, speculative: bool) {
        self.speculative.set(speculative);
    }

    /// Returns the immediately visible status.
    ///
    /// This is what pipeline stages reason with within a cycle.
    #[inline]
    pub fn status(&self) -> Status {
        self.status_state.get()
    }

    /// Returns the status as of the last clock boundary.
    pub fn settled_status(&self) -> Status {
        self.status.read().unwrap_or(self.status_state.get())
    }

    /// Returns the status written this cycle, effective at the next edge.
    ///
    /// # Errors
    ///
    /// Returns [`InstError::NextStateNotWritten`] if the status was not
    /// advanced in the current cycle.
    pub fn next_status(&self) -> Result<Status> {
        self.status.read_next()
    }

    /// Returns true if the immediately visible status is `Completed`.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status_state.get() == Status::Completed
    }

    /// Moves the instruction to `status`.
    ///
    /// Repeating the current status is a no-op. Reaching `Completed` runs the
    /// retirement trigger.
    ///
    /// # Errors
    ///
    /// Returns [`InstError::InvalidTransition`] if `status` is behind the
    /// current status; the write is dropped and the status is unchanged.
    pub fn advance_status(&self, status: Status) -> Result<()> {
        let from = self.status_state.get();
        if status == from {
            return Ok(());
        }
        if status < from {
            return Err(InstError::InvalidTransition {
                uid: self.unique_id.get(),
                from,
                to: status,
            });
        }

        self.status_state.set(status);
        self.status.write(status);
        trace!(
            uid = self.unique_id.get(),
            cycle = self.status.clock().cycle(),
            %from,
            to = %status,
            "status"
        );

        if status == Status::Completed {
            self.try_schedule_retire();
        }
        Ok(())
    }

    /// Flags this instruction as the next to retire in program order and binds
    /// the event to schedule when it completes.
    ///
    /// If the instruction has already completed, the event is scheduled now.
    ///
    /// # Errors
    ///
    /// Returns [`InstError::RetireAlreadyBound`] on a second call; the first
    /// binding is kept.
    pub fn mark_as_next_to_retire(&self, event: EventRef) -> Result<()> {
        if self.retire_event.set(event).is_err() {
            return Err(InstError::RetireAlreadyBound {
                uid: self.unique_id.get(),
            });
        }
        self.last.set(true);
        self.try_schedule_retire();
        Ok(())
    }

    /// Returns true once the reorder buffer has flagged this instruction.
    #[inline]
    pub fn is_next_to_retire(&self) -> bool {
        self.last.get()
    }

    /// Returns true once the retire event has been requested.
    #[inline]
    pub fn retire_scheduled(&self) -> bool {
        self.retire_scheduled.get()
    }

    /// Issues the retire request when flagged, bound and completed, at most
    /// once per instruction.
    fn try_schedule_retire(&self) {
        if !self.last.get() || self.retire_scheduled.get() || !self.is_completed() {
            return;
        }
        let Some(event) = self.retire_event.get() else {
            return;
        };

        self.retire_scheduled.set(true);
        let cycle = self.status.clock().cycle();
        if event.schedule() {
            trace!(uid = self.unique_id.get(), cycle, "retire scheduled");
        } else {
            warn!(
                uid = self.unique_id.get(),
                cycle, "retire event dropped before it could be scheduled"
            );
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info.mnemonic)
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("uid", &self.unique_id.get())
            .field("mnemonic", &self.info.mnemonic)
            .field("unit", &self.info.unit)
            .field("status", &self.status_state.get())
            .field("last", &self.last.get())
            .finish_non_exhaustive()
    }
}
