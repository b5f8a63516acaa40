//! Property tests: arbitrary status write sequences, arbitrary binding point.

use proptest::prelude::*;

use crate::common::builder::static_info::StaticInfoBuilder;
use crate::common::harness::TestContext;
use pipesim_core::inst::Status;

fn any_status() -> impl Strategy<Value = Status> {
    (0u16..Status::COUNT as u16).prop_map(|raw| Status::try_from(raw).unwrap())
}

proptest! {
    /// Whatever the stages write, the observed status never decreases and
    /// every rejected write is a backward one.
    #[test]
    fn observed_status_never_decreases(
        writes in prop::collection::vec((any_status(), any::<bool>()), 1..40)
    ) {
        let ctx = TestContext::new();
        let inst = ctx.fetch(StaticInfoBuilder::new().add().build(), 1);
        let mut last = inst.status();

        for (status, tick) in writes {
            let before = inst.status();
            let result = inst.advance_status(status);
            prop_assert_eq!(result.is_err(), status < before);
            prop_assert!(inst.status() >= last);
            prop_assert!(inst.settled_status() <= inst.status());
            last = inst.status();
            if tick {
                ctx.tick();
            }
        }
    }

    /// The retire event fires exactly once if and only if the instruction was
    /// flagged and reached COMPLETED, wherever the binding falls.
    #[test]
    fn retire_fires_once_regardless_of_order(bind_at in 0usize..=6, flag in any::<bool>()) {
        let ctx = TestContext::new();
        let inst = ctx.fetch(StaticInfoBuilder::new().mul().build(), 1);
        let bind = |at: usize| {
            if flag && at == bind_at {
                inst.mark_as_next_to_retire(ctx.retire_ref()).unwrap();
            }
        };

        bind(0);
        for (step, status) in Status::ALL.iter().enumerate().skip(1) {
            bind(step);
            inst.advance_status(*status).unwrap();
            inst.advance_status(*status).unwrap();
            ctx.tick();
        }
        bind(Status::COUNT);

        // Binding at or before COMPLETED fires; binding after RETIRED does not.
        let expected = usize::from(flag && bind_at <= 5);
        prop_assert_eq!(ctx.retire.count(), expected);
    }
}
