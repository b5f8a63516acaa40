//! Pipeline trace driver.
//!
//! This binary pushes a synthetic instruction stream through the instruction
//! model and prints each instruction as it retires. It performs:
//! 1. **Fetch:** Acquires one instruction per cycle from the pool while the retire window has room.
//! 2. **Pipeline:** Walks every in-flight instruction one stage per cycle, holds it in
//!    `SCHEDULED` for its execute latency, then completes it.
//! 3. **Retire:** Flags the window head as next to retire; when the retire event fires,
//!    the head is retired, traced, and its handle dropped back to the pool.

use std::cell::Cell;
use std::collections::VecDeque;
use std::error::Error;
use std::rc::Rc;
use std::{fs, process};

use clap::Parser;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pipesim_core::common::addr::VirtAddr;
use pipesim_core::config::Config;
use pipesim_core::inst::{StaticInfo, Status, TargetUnit};
use pipesim_core::pool::{InstPool, InstPtr};
use pipesim_core::sim::{Clock, EventRef, Schedulable};
use pipesim_core::{InstError, trace};

/// One pass over every target unit, with per-unit latencies.
const PROGRAM: [StaticInfo; 8] = [
    StaticInfo::new("add", 0x0020_81b3, TargetUnit::Alu0, 1),
    StaticInfo::new("mul", 0x0220_81b3, TargetUnit::Alu1, 4),
    StaticInfo::new("fadd.d", 0x0220_f1d3, TargetUnit::Fpu, 3),
    StaticInfo::new("lw", 0x0000_a183, TargetUnit::Lsu, 2),
    StaticInfo::new("sw", 0x0030_a023, TargetUnit::Lsu, 1).store(),
    StaticInfo::new("beq", 0x0020_8463, TargetUnit::Br, 1),
    StaticInfo::new("fence", 0x0ff0_000f, TargetUnit::Rob, 0),
    StaticInfo::new("addi", 0x0010_8093, TargetUnit::Alu0, 1),
];

const DATA_BASE: u64 = 0x8000_0000;

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Drive a synthetic instruction stream through the pipesim instruction model",
    long_about = "Fetches a synthetic program into an in-order retire window, advances each \
                  instruction one stage per cycle, and prints every instruction as it retires.\n\n\
                  Examples:\n  pipesim --trace\n  pipesim -n 1000 --window 64 --json\n  \
                  RUST_LOG=pipesim_core=trace pipesim -n 4 --trace"
)]
struct Cli {
    /// Stop after this many retired instructions (0 runs the program once).
    #[arg(short = 'n', long, default_value_t = 0)]
    instructions: u64,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Retire window size.
    #[arg(short, long, default_value_t = 16)]
    window: usize,

    /// Print every retired instruction.
    #[arg(short, long)]
    trace: bool,

    /// Print traces and the summary as JSON (implies --trace).
    #[arg(long)]
    json: bool,
}

/// Retire event bound to the window head; the driver polls it once per cycle.
#[derive(Debug, Default)]
struct RetireEvent {
    pending: Cell<bool>,
}

impl RetireEvent {
    fn take(&self) -> bool {
        self.pending.replace(false)
    }
}

impl Schedulable for RetireEvent {
    fn schedule(&self) {
        self.pending.set(true);
    }
}

/// An instruction in the retire window.
#[derive(Debug)]
struct InFlight {
    inst: InstPtr,
    remaining: u32,
}

impl InFlight {
    fn new(inst: InstPtr) -> Self {
        let remaining = inst.execute_time();
        Self { inst, remaining }
    }

    /// Moves the instruction one stage, or one cycle closer to completing.
    fn step(&mut self) -> Result<(), InstError> {
        match self.inst.status() {
            Status::Scheduled if self.remaining > 0 => {
                self.remaining -= 1;
                Ok(())
            }
            status if status == Status::Completed || status.is_terminal() => Ok(()),
            status => match status.next() {
                Some(next) => self.inst.advance_status(next),
                None => Ok(()),
            },
        }
    }
}

/// Final counters for a run.
#[derive(Debug)]
struct Summary {
    cycles: u64,
    retired: u64,
}

#[derive(Debug)]
struct Driver {
    clock: Clock,
    pool: InstPool,
    retire: Rc<RetireEvent>,
    window: VecDeque<InFlight>,
    width: usize,
    limit: u64,
    fetched: u64,
    retired: u64,
    trace: bool,
    json: bool,
}

impl Driver {
    fn new(config: &Config, cli: &Cli) -> Self {
        let limit = if cli.instructions == 0 {
            PROGRAM.len() as u64
        } else {
            cli.instructions
        };
        Self {
            clock: Clock::new("core"),
            pool: InstPool::from_config(config),
            retire: Rc::new(RetireEvent::default()),
            window: VecDeque::with_capacity(cli.window),
            width: cli.window.max(1),
            limit,
            fetched: 0,
            retired: 0,
            trace: cli.trace || cli.json || config.general.trace_instructions,
            json: cli.json,
        }
    }

    fn run(&mut self) -> Result<Summary, InstError> {
        info!(limit = self.limit, window = self.width, "run start");
        while self.retired < self.limit {
            self.cycle()?;
            self.clock.tick();
        }
        Ok(Summary {
            cycles: self.clock.cycle(),
            retired: self.retired,
        })
    }

    fn cycle(&mut self) -> Result<(), InstError> {
        if self.retire.take() {
            self.retire_head()?;
        }

        if let Some(head) = self.window.front().filter(|h| !h.inst.is_next_to_retire()) {
            head.inst.mark_as_next_to_retire(EventRef::new(&self.retire))?;
        }

        for entry in &mut self.window {
            entry.step()?;
        }

        if self.window.len() < self.width && self.fetched < self.limit {
            self.fetch()?;
        }
        Ok(())
    }

    fn fetch(&mut self) -> Result<(), InstError> {
        let index = (self.fetched % PROGRAM.len() as u64) as usize;
        let info = PROGRAM[index];
        let inst = self.pool.acquire(info, &self.clock)?;
        self.fetched += 1;
        inst.set_unique_id(self.fetched);
        if info.unit == TargetUnit::Lsu {
            inst.set_vaddr(VirtAddr::new(DATA_BASE + self.fetched * 8));
        }
        debug!(uid = self.fetched, cycle = self.clock.cycle(), %inst, "fetch");
        self.window.push_back(InFlight::new(inst));
        Ok(())
    }

    fn retire_head(&mut self) -> Result<(), InstError> {
        let Some(head) = self.window.pop_front() else {
            return Ok(());
        };
        if self.trace {
            if self.json {
                println!("{}", trace::to_json(&head.inst));
            } else {
                println!("{:>8}: {}", self.clock.cycle(), trace::line(&head.inst));
            }
        }
        head.inst.advance_status(Status::Retired)?;
        self.retired += 1;
        Ok(())
    }
}

fn load_config(path: Option<&str>) -> Result<Config, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| format!("reading {path}: {e}"))?;
            Ok(Config::from_json(&text).map_err(|e| format!("parsing {path}: {e}"))?)
        }
        None => Ok(Config::default()),
    }
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut driver = Driver::new(&config, &cli);
    let summary = match driver.run() {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            driver.pool.stats().print();
            process::exit(1);
        }
    };

    let stats = driver.pool.stats();
    if cli.json {
        println!(
            "{}",
            json!({
                "cycles": summary.cycles,
                "retired": summary.retired,
                "pool": {
                    "allocated": stats.allocated,
                    "high_water": stats.high_water,
                    "acquires": stats.acquires,
                    "reuses": stats.reuses,
                    "releases": stats.releases,
                },
            })
        );
    } else {
        println!(
            "\n[*] Retired {} instructions in {} cycles",
            summary.retired, summary.cycles
        );
        stats.print();
    }
}
