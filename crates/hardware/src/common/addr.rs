//! Physical and Virtual Address types.
//!
//! This module defines strong types for the addresses an in-flight instruction
//! carries. It provides the following:
//! 1. **Type Safety:** Distinguishes between virtual and physical address spaces at compile time.
//! 2. **Address Manipulation:** Raw value access and the modeled virtual-to-physical mapping.

use std::fmt;

use super::constants::FAKE_PHYS_OFFSET;

/// A virtual address recorded by the load/store path of an instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u64);

/// A physical ("real") address derived from a virtual address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw 64-bit value.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 64-bit address value.
    ///
    /// # Returns
    ///
    /// A new `VirtAddr` wrapping the provided address.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Returns the physical address the model assigns to this virtual address.
    ///
    /// # Returns
    ///
    /// The modeled `PhysAddr`; never fails.
    ///
    /// No translation is performed; the physical address is the virtual address
    /// with [`FAKE_PHYS_OFFSET`] OR-ed in, which is enough for trace output to
    /// distinguish the two spaces.
    #[inline(always)]
    pub const fn to_phys(self) -> PhysAddr {
        PhysAddr(self.0 | FAKE_PHYS_OFFSET)
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
