//! In-flight instruction model for cycle-accurate pipeline simulators.
//!
//! This crate implements the part of a pipeline model that every stage shares:
//! 1. **Instruction:** Static decode info, identity, and dynamic state of one in-flight instruction.
//! 2. **State Machine:** A monotonic lifecycle status with same-cycle and next-cycle views.
//! 3. **Retirement:** Scheduling the reorder buffer's retire event when an instruction is
//!    both completed and next to retire.
//! 4. **Pool:** Fixed-capacity, recycled storage behind shared instruction handles.
//! 5. **Trace:** A stable, named projection of instruction fields for trace tooling.
//!
//! The event scheduler, the pipeline stages and the topology are supplied by the
//! host simulation through [`sim::Clock`] and [`sim::Schedulable`].

/// Common types and constants (addresses, errors, pool sizing).
pub mod common;
/// Model configuration (defaults and serde structures).
pub mod config;
/// In-flight instruction, statuses and static info.
pub mod inst;
/// Instruction pool and shared handles.
pub mod pool;
/// Host-facing simulation primitives (clock, buffered state, events).
pub mod sim;
/// Pool statistics.
pub mod stats;
/// Trace projection of instruction fields.
pub mod trace;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Error type shared by every fallible operation.
pub use crate::common::error::{InstError, Result};
/// Instruction types.
pub use crate::inst::{Instruction, StaticInfo, Status, TargetUnit};
/// Pool and handle types.
pub use crate::pool::{InstPool, InstPtr};
/// Clock and event types.
pub use crate::sim::{Clock, EventRef, Schedulable};
