//! Mock host collaborators.

/// Retire events that record or verify `schedule` calls.
pub mod event;
