//! Instruction lifecycle status.
//!
//! Statuses are totally ordered in pipeline order. An instruction only ever
//! moves forward through them.

use std::fmt;

use crate::common::error::InstError;

/// Lifecycle status of an in-flight instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum Status {
    /// Fetched from the instruction stream.
    #[default]
    Fetched = 0,
    /// Decoded.
    Decoded,
    /// Registers renamed.
    Renamed,
    /// Dispatched to an execution unit.
    Scheduled,
    /// Execution finished; waiting to retire.
    Completed,
    /// Retired. Terminal.
    Retired,
}

impl Status {
    /// Number of valid statuses.
    pub const COUNT: usize = 6;

    /// All statuses in pipeline order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Fetched,
        Self::Decoded,
        Self::Renamed,
        Self::Scheduled,
        Self::Completed,
        Self::Retired,
    ];

    /// Returns the status that follows this one, or `None` for `Retired`.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Fetched => Some(Self::Decoded),
            Self::Decoded => Some(Self::Renamed),
            Self::Renamed => Some(Self::Scheduled),
            Self::Scheduled => Some(Self::Completed),
            Self::Completed => Some(Self::Retired),
            Self::Retired => None,
        }
    }

    /// Returns true for the terminal status.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Retired)
    }

    /// Returns the display token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fetched => "FETCHED",
            Self::Decoded => "DECODED",
            Self::Renamed => "RENAMED",
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Retired => "RETIRED",
        }
    }
}

impl TryFrom<u16> for Status {
    type Error = InstError;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(raw))
            .copied()
            .ok_or(InstError::InvalidEnumValue {
                kind: "Status",
                raw,
            })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
