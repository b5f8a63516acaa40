//! In-flight instruction model.
//!
//! This module contains everything that describes one instruction moving through
//! the pipeline:
//! 1. **Static Info:** Decode-time facts and the target execution unit.
//! 2. **Status:** The ordered lifecycle statuses.
//! 3. **Instruction:** The state machine and the retirement trigger.

/// The in-flight instruction and its retirement trigger.
pub mod instruction;

/// Decode-time instruction facts.
pub mod static_info;

/// Lifecycle statuses.
pub mod status;

pub use instruction::Instruction;
pub use static_info::{StaticInfo, TargetUnit};
pub use status::Status;
