//! Trace projection of an instruction.
//!
//! Trace and waveform tools see instructions only through the named pairs
//! registered here; the instruction exposes no other introspection surface.
//! It provides:
//! 1. **Registry:** A fixed, ordered table of `(key, format, accessor)` pairs.
//! 2. **Rendering:** Typed values rendered as text, addresses in hexadecimal.
//! 3. **Dumping:** A JSON object with the same keys for dump tooling.

use std::fmt;

use serde_json::{Map, Value};

use crate::inst::{Instruction, TargetUnit};

/// How a value is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceFormat {
    /// Natural formatting.
    #[default]
    Plain,
    /// Hexadecimal with a `0x` prefix.
    Hex,
}

/// A typed value read through a trace pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceValue {
    /// Unsigned 64-bit integer.
    U64(u64),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Flag.
    Bool(bool),
    /// Static text.
    Str(&'static str),
    /// Target execution unit.
    Unit(TargetUnit),
}

impl TraceValue {
    /// Renders the value as text in `format`.
    ///
    /// `Hex` only applies to integers.
    pub fn render(self, format: TraceFormat) -> String {
        match (self, format) {
            (Self::U64(v), TraceFormat::Hex) => format!("{v:#x}"),
            (Self::U32(v), TraceFormat::Hex) => format!("{v:#x}"),
            _ => self.to_string(),
        }
    }

    /// Converts the value to JSON; integers stay numeric.
    pub fn to_json(self) -> Value {
        match self {
            Self::U64(v) => Value::from(v),
            Self::U32(v) => Value::from(v),
            Self::Bool(v) => Value::from(v),
            Self::Str(v) => Value::from(v),
            Self::Unit(u) => Value::from(u.as_str()),
        }
    }
}

impl fmt::Display for TraceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U64(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{}", u8::from(*v)),
            Self::Str(v) => f.write_str(v),
            Self::Unit(u) => write!(f, "{u}"),
        }
    }
}

/// One named read-only view of an instruction.
#[derive(Clone, Copy)]
pub struct TracePair {
    /// Stable key.
    pub key: &'static str,
    /// Display format.
    pub format: TraceFormat,
    /// Accessor.
    pub get: fn(&Instruction) -> TraceValue,
}

impl TracePair {
    /// Reads the value from `inst`.
    pub fn value(&self, inst: &Instruction) -> TraceValue {
        (self.get)(inst)
    }

    /// Reads and renders the value from `inst`.
    pub fn render(&self, inst: &Instruction) -> String {
        self.value(inst).render(self.format)
    }
}

impl fmt::Debug for TracePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracePair")
            .field("key", &self.key)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

const fn pair(key: &'static str, get: fn(&Instruction) -> TraceValue) -> TracePair {
    TracePair {
        key,
        format: TraceFormat::Plain,
        get,
    }
}

const fn hex_pair(key: &'static str, get: fn(&Instruction) -> TraceValue) -> TracePair {
    TracePair {
        key,
        format: TraceFormat::Hex,
        get,
    }
}

/// The registered pairs, in output order.
///
/// `DID` and `uid` both carry the unique id; pipeline viewers key on `DID`.
pub static INSTRUCTION_PAIRS: [TracePair; 8] = [
    pair("DID", |i| TraceValue::U64(i.unique_id())),
    pair("uid", |i| TraceValue::U64(i.unique_id())),
    pair("mnemonic", |i| TraceValue::Str(i.mnemonic())),
    pair("complete", |i| TraceValue::Bool(i.is_completed())),
    pair("unit", |i| TraceValue::Unit(i.unit())),
    pair("latency", |i| TraceValue::U32(i.execute_time())),
    hex_pair("raddr", |i| TraceValue::U64(i.raddr().val())),
    hex_pair("vaddr", |i| TraceValue::U64(i.vaddr().val())),
];

/// Looks up a registered pair by key.
pub fn find(key: &str) -> Option<&'static TracePair> {
    INSTRUCTION_PAIRS.iter().find(|p| p.key == key)
}

/// Iterates `(key, rendered value)` over every registered pair.
pub fn pairs(inst: &Instruction) -> impl Iterator<Item = (&'static str, String)> + '_ {
    INSTRUCTION_PAIRS.iter().map(move |p| (p.key, p.render(inst)))
}

/// Renders every pair on one line as `key=value` separated by spaces.
pub fn line(inst: &Instruction) -> String {
    pairs(inst)
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds a JSON object keyed by the registered pair names.
///
/// Hex-formatted pairs are emitted as strings so the formatting survives.
pub fn to_json(inst: &Instruction) -> Value {
    let mut map = Map::with_capacity(INSTRUCTION_PAIRS.len());
    for p in &INSTRUCTION_PAIRS {
        let value = match p.format {
            TraceFormat::Hex => Value::from(p.render(inst)),
            TraceFormat::Plain => p.value(inst).to_json(),
        };
        let _ = map.insert(p.key.to_owned(), value);
    }
    Value::Object(map)
}
