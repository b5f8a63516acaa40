//! Global Model Constants.
//!
//! This module defines constants shared across the instruction model. It includes:
//! 1. **Pool Sizing:** Reference capacity and replenishment chunk for the instruction pool.
//! 2. **Address Modeling:** The offset used to fake physical addresses.

/// Reference capacity of the instruction pool (maximum live instructions).
///
/// Sized for pipeline depth times the maximum number of outstanding
/// instructions, with headroom; around 135 are outstanding in practice.
pub const DEFAULT_POOL_CAPACITY: usize = 300;

/// Number of instruction slots allocated at once when the pool replenishes.
pub const DEFAULT_POOL_CHUNK: usize = 250;

/// Bits OR-ed into a virtual address to form the modeled physical address.
pub const FAKE_PHYS_OFFSET: u64 = 0x3000;
