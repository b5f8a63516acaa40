//! Simulation primitives consumed from the host.
//!
//! This module provides the narrow interfaces through which instructions see the
//! rest of the simulation:
//! 1. **Clock:** A shared logical cycle counter advanced by the host.
//! 2. **Buffered State:** A dual-view cell separating settled and pending values.
//! 3. **Events:** The `Schedulable` trait and a non-owning event reference.

/// Logical clock handle.
pub mod clock;

/// Non-owning references to host-scheduled events.
pub mod event;

/// Dual-buffered clocked state.
pub mod state_cell;

pub use clock::Clock;
pub use event::{EventRef, Schedulable};
pub use state_cell::StateCell;
