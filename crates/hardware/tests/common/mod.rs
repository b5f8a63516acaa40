//! Shared test infrastructure.



/// Mock host collaborators.
pub mod mocks;
