//! Configuration for the instruction model.
//!
//! This module defines the configuration structures used to parameterize the
//! model. It provides:
//! 1. **Defaults:** Reference pool sizing.
//! 2. **Structures:** General settings and pool settings.
//!
//! Configuration is supplied as JSON by the host or taken from `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{DEFAULT_POOL_CAPACITY, DEFAULT_POOL_CHUNK};

/// Default configuration constants.
mod defaults {
    use super::{DEFAULT_POOL_CAPACITY, DEFAULT_POOL_CHUNK};

    /// Maximum number of live instructions.
    pub const POOL_CAPACITY: usize = DEFAULT_POOL_CAPACITY;

    /// Slots allocated per replenishment.
    pub const POOL_CHUNK: usize = DEFAULT_POOL_CHUNK;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::Config;
///
/// let config = Config::default();
/// assert!(!config.general.trace_instructions);
/// assert_eq!(config.pool.capacity, 300);
/// ```
///
/// Deserializing from JSON; missing fields take their defaults:
///
/// ```
/// use pipesim_core::config::Config;
///
/// let config = Config::from_json(r#"{ "pool": { "capacity": 64 } }"#).unwrap();
/// assert_eq!(config.pool.capacity, 64);
/// assert_eq!(config.pool.chunk_size, 250);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Instruction pool settings
    #[serde(default)]
    pub pool: PoolConfig,
}

impl Config {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// General model settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit the trace projection of every retired instruction.
    #[serde(default)]
    pub trace_instructions: bool,
}

/// Instruction pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PoolConfig {
    /// Maximum number of simultaneously live instructions.
    #[serde(default = "PoolConfig::default_capacity")]
    pub capacity: usize,

    /// Number of slots allocated each time the free list runs dry.
    ///
    /// Also the water mark past which the pool warns about live instructions.
    #[serde(default = "PoolConfig::default_chunk_size")]
    pub chunk_size: usize,
}

impl PoolConfig {
    /// Returns the default pool capacity.
    const fn default_capacity() -> usize {
        defaults::POOL_CAPACITY
    }

    /// Returns the default replenishment chunk.
    const fn default_chunk_size() -> usize {
        defaults::POOL_CHUNK
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::POOL_CAPACITY,
            chunk_size: defaults::POOL_CHUNK,
        }
    }
}
