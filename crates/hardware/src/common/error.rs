//! Contract-violation errors.
//!
//! Every error in this crate reports a programming-contract violation by the
//! pipeline model driving the instructions; none of them is transient and none
//! is worth retrying. The host simulation decides whether to abort or log.
//!
//! 1. **State Machine:** Non-monotonic status writes.
//! 2. **Retirement:** Binding the retire event more than once.
//! 3. **Pool:** Running out of instruction slots.
//! 4. **Buffered State:** Reading a pending value that was never written.
//! 5. **Enumerations:** Raw discriminants that name no valid member.

use thiserror::Error;

use crate::inst::Status;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, InstError>;

/// Errors raised by the instruction model.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InstError {
    /// A status write that does not move the instruction forward.
    ///
    /// The write is suppressed; the instruction keeps `from`.
    #[error("invalid status transition for uid {uid}: {from} -> {to}")]
    InvalidTransition {
        /// Unique id of the instruction.
        uid: u64,
        /// Status the instruction holds.
        from: Status,
        /// Status the caller tried to write.
        to: Status,
    },

    /// `mark_as_next_to_retire` was called a second time on one instruction.
    #[error("retire event already bound for uid {uid}")]
    RetireAlreadyBound {
        /// Unique id of the instruction.
        uid: u64,
    },

    /// More live instructions were requested than the pool can hold.
    ///
    /// This signals unbounded instruction accumulation in the pipeline model.
    #[error("instruction pool exhausted: all {capacity} slots are live")]
    PoolExhausted {
        /// Configured pool capacity.
        capacity: usize,
    },

    /// The pending (next-cycle) view of a buffered cell was read in a cycle
    /// with no write.
    #[error("next-cycle state of '{name}' read in cycle {cycle} before any write")]
    NextStateNotWritten {
        /// Name of the buffered cell.
        name: &'static str,
        /// Cycle of the read.
        cycle: u64,
    },

    /// A raw discriminant that does not name a valid member.
    #[error("{raw} cannot be a valid {kind} value")]
    InvalidEnumValue {
        /// Name of the enumeration.
        kind: &'static str,
        /// The rejected raw value.
        raw: u16,
    },
}
