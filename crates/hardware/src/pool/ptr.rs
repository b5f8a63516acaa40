//! Shared handle to a pooled instruction.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use super::Slot;
use crate::inst::Instruction;

/// Shared-ownership handle to an instruction in an [`InstPool`](super::InstPool).
///
/// Any number of pipeline structures may hold a clone. When the last clone is
/// dropped the slot returns to the pool's free list; a speculative flush is
/// nothing more than dropping every handle.
pub struct InstPtr {
    slot: Rc<Slot>,
}

impl InstPtr {
    pub(super) fn from_slot(slot: Rc<Slot>) -> Self {
        Self { slot }
    }

    /// Returns true if both handles refer to the same instruction.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.slot, &other.slot)
    }

    /// Returns the number of live handles to this instruction.
    pub fn use_count(this: &Self) -> usize {
        Rc::strong_count(&this.slot)
    }
}

impl Deref for InstPtr {
    type Target = Instruction;

    #[inline]
    fn deref(&self) -> &Instruction {
        &self.slot.inst
    }
}

impl Clone for InstPtr {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl Drop for InstPtr {
    fn drop(&mut self) {
        if Rc::strong_count(&self.slot) != 1 {
            return;
        }
        if let Some(pool) = self.slot.pool.upgrade() {
            pool.release(Rc::clone(&self.slot));
        }
    }
}

impl fmt::Display for InstPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.slot.inst, f)
    }
}

impl fmt::Debug for InstPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.slot.inst, f)
    }
}
