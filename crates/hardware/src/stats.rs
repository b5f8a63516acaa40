//! Instruction pool statistics.
//!
//! This module tracks how the instruction pool is used over a run. It provides:
//! 1. **Occupancy:** Slots allocated, instructions live, and the high-water mark.
//! 2. **Churn:** Total acquires, releases, and how many acquires reused a slot.

/// Counters maintained by [`InstPool`](crate::pool::InstPool).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Slots allocated so far (never shrinks).
    pub allocated: usize,
    /// Instructions currently held by at least one handle.
    pub live: usize,
    /// Largest `live` value seen.
    pub high_water: usize,
    /// Successful acquires.
    pub acquires: u64,
    /// Acquires served from a previously released slot.
    pub reuses: u64,
    /// Slots returned to the free list.
    pub releases: u64,
    /// Acquires rejected because the pool was full.
    pub exhausted: u64,
}

impl PoolStats {
    /// Fraction of acquires that reused a released slot.
    pub fn reuse_ratio(&self) -> f64 {
        if self.acquires == 0 {
            0.0
        } else {
            self.reuses as f64 / self.acquires as f64
        }
    }

    /// Prints a summary to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("INSTRUCTION POOL STATISTICS");
        println!("==========================================================");
        println!("pool.allocated           {}", self.allocated);
        println!("pool.live                {}", self.live);
        println!("pool.high_water          {}", self.high_water);
        println!("pool.acquires            {}", self.acquires);
        println!(
            "pool.reuses              {} ({:.2}%)",
            self.reuses,
            self.reuse_ratio() * 100.0
        );
        println!("pool.releases            {}", self.releases);
        println!("pool.exhausted           {}", self.exhausted);
        println!("----------------------------------------------------------");
    }
}
