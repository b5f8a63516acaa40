//! Trace Projection Tests.
//!
//! Verifies the registered keys, their order, rendering formats, and the JSON dump.

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::builder::static_info::StaticInfoBuilder;
use crate::common::harness::TestContext;
use pipesim_core::common::addr::VirtAddr;
use pipesim_core::inst::{Status, TargetUnit};
use pipesim_core::trace::{self, TraceFormat, TraceValue};

#[test]
fn registered_keys_in_order() {
    let keys: Vec<_> = trace::INSTRUCTION_PAIRS.iter().map(|p| p.key).collect();
    assert_eq!(
        keys,
        ["DID", "uid", "mnemonic", "complete", "unit", "latency", "raddr", "vaddr"]
    );
}

#[test]
fn addresses_are_hex() {
    assert_eq!(trace::find("raddr").unwrap().format, TraceFormat::Hex);
    assert_eq!(trace::find("vaddr").unwrap().format, TraceFormat::Hex);
    assert_eq!(trace::find("latency").unwrap().format, TraceFormat::Plain);
    assert!(trace::find("pc").is_none());
}

#[test]
fn renders_every_pair() {
    let ctx = TestContext::new();
    let inst = ctx.fetch(StaticInfoBuilder::new().lw().build(), 42);
    inst.set_vaddr(VirtAddr::new(0x1000));
    inst.advance_status(Status::Completed).unwrap();

    let pairs: Vec<_> = trace::pairs(&inst).collect();
    assert_eq!(
        pairs,
        vec![
            ("DID", "42".to_string()),
            ("uid", "42".to_string()),
            ("mnemonic", "lw".to_string()),
            ("complete", "1".to_string()),
            ("unit", "LSU".to_string()),
            ("latency", "2".to_string()),
            ("raddr", "0x3000".to_string()),
            ("vaddr", "0x1000".to_string()),
        ]
    );
    assert_eq!(
        trace::line(&inst),
        "DID=42 uid=42 mnemonic=lw complete=1 unit=LSU latency=2 raddr=0x3000 vaddr=0x1000"
    );
}

#[test]
fn complete_flag_follows_status() {
    let ctx = TestContext::new();
    let inst = ctx.fetch(StaticInfoBuilder::new().add().build(), 1);
    let complete = trace::find("complete").unwrap();
    assert_eq!(complete.value(&inst), TraceValue::Bool(false));
    inst.advance_status(Status::Completed).unwrap();
    assert_eq!(complete.value(&inst), TraceValue::Bool(true));
    inst.advance_status(Status::Retired).unwrap();
    assert_eq!(complete.value(&inst), TraceValue::Bool(false));
}

#[test]
fn json_dump_uses_same_keys() {
    let ctx = TestContext::new();
    let inst = ctx.fetch(StaticInfoBuilder::new().fadd().build(), 5);
    assert_eq!(
        trace::to_json(&inst),
        json!({
            "DID": 5,
            "uid": 5,
            "mnemonic": "fadd.d",
            "complete": false,
            "unit": "FPU",
            "latency": 3,
            "raddr": "0x3000",
            "vaddr": "0x0",
        })
    );
}

#[test]
fn value_rendering() {
    assert_eq!(TraceValue::U64(255).render(TraceFormat::Hex), "0xff");
    assert_eq!(TraceValue::U32(255).render(TraceFormat::Plain), "255");
    assert_eq!(TraceValue::Unit(TargetUnit::Br).render(TraceFormat::Hex), "BR");
    assert_eq!(TraceValue::Str("ecall").render(TraceFormat::Plain), "ecall");
}
