//! Retirement Trigger Tests.
//!
//! Verifies that the retire event is scheduled:
//!   1. Exactly once when the instruction is flagged before it completes
//!   2. Exactly once, at the binding call, when it completes first
//!   3. Never for an instruction that is not flagged
//!   4. Never twice, even with repeated COMPLETED writes
//!   5. Only the first binding is kept; a second is an error
//!   6. A dropped event is skipped with one warning and never retried

use pretty_assertions::assert_eq;
use std::rc::Rc;

use crate::common::builder::static_info::StaticInfoBuilder;
use crate::common::harness::TestContext;
use crate::common::mocks::event::RecordingEvent;
use crate::common::mocks::log::capture_warnings;
use pipesim_core::InstError;
use pipesim_core::inst::{Status, TargetUnit};
use pipesim_core::sim::EventRef;

const LATENCY: u32 = 4;

fn alu0_latency4() -> pipesim_core::inst::StaticInfo {
    StaticInfoBuilder::new()
        .mnemonic("mul")
        .unit(TargetUnit::Alu0)
        .latency(LATENCY)
        .build()
}

// ══════════════════════════════════════════════════════════
// 1. Flag first, complete second
// ══════════════════════════════════════════════════════════

#[test]
fn bound_before_completion_fires_at_completion() {
    let ctx = TestContext::new();
    let inst = ctx.fetch(alu0_latency4(), 1);
    ctx.step_to(&inst, Status::Scheduled);
    inst.mark_as_next_to_retire(ctx.retire_ref()).unwrap();
    assert_eq!(ctx.retire.count(), 0);

    ctx.run(u64::from(inst.execute_time()));
    let completed_at = ctx.clock.cycle();
    inst.advance_status(Status::Completed).unwrap();

    assert_eq!(ctx.retire.cycles(), vec![completed_at]);
    assert!(inst.retire_scheduled());
}

#[test]
fn bound_at_fetch_fires_once_at_completion() {
    let ctx = TestContext::new();
    let inst = ctx.fetch(alu0_latency4(), 1);
    inst.mark_as_next_to_retire(ctx.retire_ref()).unwrap();

    ctx.step_to(&inst, Status::Completed);
    assert_eq!(ctx.retire.count(), 1);

    ctx.tick();
    inst.advance_status(Status::Retired).unwrap();
    assert_eq!(ctx.retire.count(), 1);
}

// ══════════════════════════════════════════════════════════
// 2. Complete first, flag second
// ══════════════════════════════════════════════════════════

#[test]
fn bound_after_completion_fires_at_binding() {
    let ctx = TestContext::new();
    let inst = ctx.fetch(alu0_latency4(), 1);
    ctx.step_to(&inst, Status::Scheduled);
    ctx.run(u64::from(LATENCY));
    inst.advance_status(Status::Completed).unwrap();
    assert_eq!(ctx.retire.count(), 0);

    ctx.tick();
    let bound_at = ctx.clock.cycle();
    inst.mark_as_next_to_retire(ctx.retire_ref()).unwrap();

    assert_eq!(ctx.retire.cycles(), vec![bound_at]);
}

#[test]
fn bound_in_completion_cycle_fires_once() {
    let ctx = TestContext::new();
    let inst = ctx.fetch(alu0_latency4(), 1);
    inst.advance_status(Status::Completed).unwrap();
    inst.mark_as_next_to_retire(ctx.retire_ref()).unwrap();
    inst.advance_status(Status::Completed).unwrap();

    assert_eq!(ctx.retire.count(), 1);
}

// ══════════════════════════════════════════════════════════
// 3. Not flagged
// ══════════════════════════════════════════════════════════

#[test]
fn unflagged_never_fires() {
    let ctx = TestContext::new();
    let inst = ctx.fetch(alu0_latency4(), 1);
    ctx.step_to(&inst, Status::Completed);
    ctx.tick();
    inst.advance_status(Status::Retired).unwrap();

    assert_eq!(ctx.retire.count(), 0);
    assert!(!inst.is_next_to_retire());
    assert!(!inst.retire_scheduled());
}

#[test]
fn flagged_but_retired_without_completing_never_fires() {
    let ctx = TestContext::new();
    let inst = ctx.fetch(alu0_latency4(), 1);
    inst.advance_status(Status::Retired).unwrap();
    inst.mark_as_next_to_retire(ctx.retire_ref()).unwrap();
    assert_eq!(ctx.retire.count(), 0);
}

// ══════════════════════════════════════════════════════════
// 4. Idempotence
// ══════════════════════════════════════════════════════════

#[test]
fn repeated_completed_schedules_once() {
    let ctx = TestContext::new();
    let inst = ctx.fetch(alu0_latency4(), 1);
    inst.mark_as_next_to_retire(ctx.retire_ref()).unwrap();
    inst.advance_status(Status::Completed).unwrap();
    inst.advance_status(Status::Completed).unwrap();
    ctx.tick();
    inst.advance_status(Status::Completed).unwrap();

    assert_eq!(inst.status(), Status::Completed);
    assert_eq!(ctx.retire.count(), 1);
}

// ══════════════════════════════════════════════════════════
// 5. Binding rules
// ══════════════════════════════════════════════════════════

#[test]
fn second_binding_is_rejected() {
    let ctx = TestContext::new();
    let inst = ctx.fetch(alu0_latency4(), 9);
    inst.mark_as_next_to_retire(ctx.retire_ref()).unwrap();

    let other = Rc::new(RecordingEvent::new(&ctx.clock));
    let err = inst
        .mark_as_next_to_retire(EventRef::new(&other))
        .unwrap_err();
    assert_eq!(err, InstError::RetireAlreadyBound { uid: 9 });

    inst.advance_status(Status::Completed).unwrap();
    assert_eq!(ctx.retire.count(), 1, "first binding is kept");
    assert_eq!(other.count(), 0);
}

#[test]
fn only_flagged_instruction_fires() {
    let ctx = TestContext::new();
    let older = ctx.fetch(alu0_latency4(), 1);
    let younger = ctx.fetch(StaticInfoBuilder::new().add().build(), 2);

    // Younger completes first but is not at the head.
    younger.advance_status(Status::Completed).unwrap();
    older.mark_as_next_to_retire(ctx.retire_ref()).unwrap();
    assert_eq!(ctx.retire.count(), 0);

    ctx.run(u64::from(LATENCY));
    older.advance_status(Status::Completed).unwrap();
    assert_eq!(ctx.retire.count(), 1);

    // Older retires; younger becomes the head and is already complete.
    older.advance_status(Status::Retired).unwrap();
    drop(older);
    younger.mark_as_next_to_retire(ctx.retire_ref()).unwrap();
    assert_eq!(ctx.retire.count(), 2);
}

// ══════════════════════════════════════════════════════════
// 6. Dropped event
// ══════════════════════════════════════════════════════════

#[test]
fn dropped_event_warns_once() {
    capture_warnings(|warnings| {
        let ctx = TestContext::new();
        let inst = ctx.fetch(alu0_latency4(), 4);
        let short_lived = Rc::new(RecordingEvent::new(&ctx.clock));
        inst.mark_as_next_to_retire(EventRef::new(&short_lived)).unwrap();
        drop(short_lived);

        inst.advance_status(Status::Completed).unwrap();
        assert!(inst.retire_scheduled());
        assert_eq!(warnings.count(), 1);

        ctx.tick();
        inst.advance_status(Status::Completed).unwrap();
        inst.advance_status(Status::Retired).unwrap();
        assert_eq!(warnings.count(), 1);
    });
}

#[test]
fn live_event_does_not_warn() {
    capture_warnings(|warnings| {
        let ctx = TestContext::new();
        let inst = ctx.fetch(alu0_latency4(), 5);
        inst.mark_as_next_to_retire(ctx.retire_ref()).unwrap();
        inst.advance_status(Status::Completed).unwrap();
        assert_eq!(ctx.retire.count(), 1);
        assert_eq!(warnings.count(), 0);
    });
}
