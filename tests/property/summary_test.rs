// tests/property/summary_test.rs

//! Summary invariants over arbitrary report sequences.

use crate::test_helpers::TestContext;
use cupboard::presence::Status;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Heartbeat(u8),
    Select(u8, Status),
    Advance(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..16).prop_map(Op::Heartbeat),
        ((0u8..16), prop::sample::select(Status::ALL.to_vec()))
            .prop_map(|(id, status)| Op::Select(id, status)),
        (0u64..400).prop_map(Op::Advance),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        max_shrink_iters: 500,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_summary_is_consistent(ops in prop::collection::vec(op_strategy(), 1..=80)) {
        let ctx = TestContext::new();
        for op in &ops {
            match op {
                Op::Heartbeat(id) => ctx.service.record_heartbeat(&format!("c{id}")),
                Op::Select(id, status) => {
                    ctx.service.record_selection(&format!("c{id}"), status.as_ref()).unwrap();
                }
                Op::Advance(secs) => ctx.advance_secs(*secs),
            }

            let summary = ctx.service.get_summary();
            prop_assert_eq!(summary.known, summary.active + summary.inactive);
            prop_assert!(summary.known <= 16);

            let statuses: Vec<Status> = summary.buckets.iter().map(|b| b.status).collect();
            prop_assert_eq!(statuses, Status::ALL.to_vec());

            let counted: usize = summary.buckets.iter().map(|b| b.count).sum();
            prop_assert!(counted <= summary.active);

            let total: f64 = summary.buckets.iter().map(|b| b.percentage).sum();
            if counted > 0 {
                prop_assert!((total - 100.0).abs() < 1e-6, "percentages sum to {}", total);
            } else {
                prop_assert!(summary.buckets.iter().all(|b| b.percentage == 0.0));
            }
        }
    }
}
