//! [libs/core/pattern/tests/coalescing_properties.rs]
//! Order-independence and idempotency of pattern-table coalescing.

use proptest::prelude::*;
use vanity_core_pattern::table::PatternTableBuilder;

fn arb_byte20() -> impl Strategy<Value = [u8; 20]> {
    prop::collection::vec(any::<u8>(), 20).prop_map(|v| {
        let mut out = [0u8; 20];
        out.copy_from_slice(&v);
        out
    })
}

fn arb_interval() -> impl Strategy<Value = ([u8; 20], [u8; 20])> {
    (arb_byte20(), arb_byte20()).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

proptest! {
    #[test]
    fn insertion_order_never_changes_final_interval_count(
        intervals in prop::collection::vec(arb_interval(), 1..8)
    ) {
        let mut forward = PatternTableBuilder::new();
        for (low, high) in intervals.iter() {
            forward.add_pattern(*low, *high).unwrap();
        }

        let mut reversed_intervals = intervals.clone();
        reversed_intervals.reverse();
        let mut backward = PatternTableBuilder::new();
        for (low, high) in reversed_intervals.iter() {
            backward.add_pattern(*low, *high).unwrap();
        }

        prop_assert_eq!(
            forward.build().intervals().len(),
            backward.build().intervals().len()
        );
    }

    #[test]
    fn adding_the_same_interval_twice_is_idempotent(interval in arb_interval()) {
        let (low, high) = interval;
        let mut builder = PatternTableBuilder::new();
        builder.add_pattern(low, high).unwrap();
        builder.add_pattern(low, high).unwrap();
        prop_assert_eq!(builder.build().intervals().len(), 1);
    }

    #[test]
    fn every_inserted_point_is_covered_by_the_final_table(interval in arb_interval()) {
        let (low, high) = interval;
        let mut builder = PatternTableBuilder::new();
        builder.add_pattern(low, high).unwrap();
        let table = builder.build();
        prop_assert!(table.contains(&low));
        prop_assert!(table.contains(&high));
    }
}
