//! Common utilities and types used throughout the instruction model.
//!
//! This module provides building blocks shared by every other component. It includes:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Constants:** Pool sizing and address modeling constants.
//! 3. **Error Handling:** The contract-violation taxonomy reported to the host simulation.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Common constants used throughout the model.
pub mod constants;

/// Error types for contract violations.
pub mod error;

pub use addr::{PhysAddr, VirtAddr};
pub use error::{InstError, Result};
