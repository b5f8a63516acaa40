//! Static (decode-time) instruction information.
//!
//! Everything here is fixed when the producing stage creates the instruction and
//! never changes while it is in flight.

use std::fmt;

use crate::common::error::InstError;

/// Execution unit an instruction is dispatched to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TargetUnit {
    /// Integer ALU 0.
    #[default]
    Alu0 = 0,
    /// Integer ALU 1.
    Alu1,
    /// Floating-point unit.
    Fpu,
    /// Branch unit.
    Br,
    /// Load/store unit.
    Lsu,
    /// No execution; goes straight to the reorder buffer to retire.
    Rob,
}

impl TargetUnit {
    /// Number of valid target units.
    pub const COUNT: usize = 6;

    /// All target units in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Alu0,
        Self::Alu1,
        Self::Fpu,
        Self::Br,
        Self::Lsu,
        Self::Rob,
    ];

    /// Returns the display token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alu0 => "ALU0",
            Self::Alu1 => "ALU1",
            Self::Fpu => "FPU",
            Self::Br => "BR",
            Self::Lsu => "LSU",
            Self::Rob => "ROB",
        }
    }

    /// Returns true if instructions for this unit skip execution.
    pub const fn retires_directly(self) -> bool {
        matches!(self, Self::Rob)
    }
}

impl TryFrom<u16> for TargetUnit {
    type Error = InstError;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(raw))
            .copied()
            .ok_or(InstError::InvalidEnumValue {
                kind: "TargetUnit",
                raw,
            })
    }
}

impl fmt::Display for TargetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode-time facts about an instruction.
///
/// Mnemonics come from the decoder's static tables, so `StaticInfo` is `Copy`
/// and re-initializing a pooled instruction never allocates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticInfo {
    /// Assembly mnemonic.
    pub mnemonic: &'static str,
    /// Raw instruction encoding.
    pub opcode: u32,
    /// Execution unit the instruction is dispatched to.
    pub unit: TargetUnit,
    /// Execution latency in cycles.
    pub execute_time: u32,
    /// Whether the instruction is a store.
    pub is_store: bool,
}

impl StaticInfo {
    /// Creates static info for a non-store instruction.
    pub const fn new(mnemonic: &'static str, opcode: u32, unit: TargetUnit, execute_time: u32) -> Self {
        Self {
            mnemonic,
            opcode,
            unit,
            execute_time,
            is_store: false,
        }
    }

    /// Marks the instruction as a store.
    #[must_use]
    pub const fn store(mut self) -> Self {
        self.is_store = true;
        self
    }
}

impl Default for StaticInfo {
    fn default() -> Self {
        Self::new("nop", 0x0000_0013, TargetUnit::Rob, 0)
    }
}
