//! Property-based invariant tests for the distribution and board.
//!
//! These tests verify, over arbitrary gesture sequences:
//!
//! 1. Every column is in exactly one bucket (partition)
//! 2. Single-capacity buckets never hold more than one column
//! 3. Moving twice to the same bucket equals moving once
//! 4. Only accepted drops (and undo/redo) change the distribution
//! 5. Hover is last-entered-wins
//! 6. Load normalizes any prior assignment into a valid distribution
//! 7. Save then load preserves every column's bucket

use std::sync::Arc;

use colsort::{
    Assignment, Board, BoardConfig, Bucket, BucketId, Catalog, Distribution, DropOutcome,
    HoverResolver, Item, Slot,
};
use colsort_core::{Point, Rect, ZoneSignal};
use proptest::prelude::*;
use web_time::Instant;

const COLUMNS: [&str; 6] = ["age", "income", "city", "zip", "churned", "score"];
const BUCKETS: [&str; 5] = ["heap", "numeric", "categorical", "target", "id"];

fn catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::new(
            [
                Bucket::unbounded("heap", "Unassigned"),
                Bucket::unbounded("numeric", "Numeric"),
                Bucket::unbounded("categorical", "Categorical"),
                Bucket::single("target", "Target"),
                Bucket::single("id", "Identifier"),
            ],
            "heap",
        )
        .unwrap(),
    )
}

fn fresh() -> Distribution {
    Distribution::all_in_heap(catalog(), COLUMNS.map(Item::from))
}

// ── Strategies ──────────────────────────────────────────────────────────

/// Host input applied to a board.
#[derive(Debug, Clone)]
enum Op {
    Down(usize),
    Move(i32, i32),
    Enter(usize),
    Leave(usize),
    Up,
    Cancel,
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..COLUMNS.len()).prop_map(Op::Down),
        (-50i32..50, -50i32..50).prop_map(|(x, y)| Op::Move(x, y)),
        (0..BUCKETS.len()).prop_map(Op::Enter),
        (0..BUCKETS.len()).prop_map(Op::Leave),
        Just(Op::Up),
        Just(Op::Cancel),
        Just(Op::Undo),
        Just(Op::Redo),
    ]
}

fn column_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0..COLUMNS.len()).prop_map(|i| COLUMNS[i].to_string()),
        "[a-z]{1,4}",
    ]
}

fn slot_strategy() -> impl Strategy<Value = Slot> {
    prop_oneof![
        prop::collection::vec(column_strategy(), 0..4).prop_map(Slot::Many),
        prop::option::of(column_strategy()).prop_map(Slot::One),
        Just(Slot::One(Some(String::new()))),
    ]
}

fn prior_strategy() -> impl Strategy<Value = Assignment> {
    let category = prop_oneof![
        (0..BUCKETS.len()).prop_map(|i| BUCKETS[i].to_string()),
        "[a-z]{1,6}",
    ];
    prop::collection::vec((category, slot_strategy()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

fn assert_partition(d: &Distribution) {
    d.check_invariants().unwrap();
    let mut seen: Vec<&str> = d
        .buckets()
        .flat_map(|(_, items)| items.iter().map(|id| id.as_str()))
        .collect();
    seen.sort_unstable();
    let mut expected: Vec<&str> = COLUMNS.to_vec();
    expected.sort_unstable();
    assert_eq!(seen, expected);
}

/// Apply one op; returns whether it was expected to leave the distribution
/// unchanged.
fn apply(board: &mut Board, op: &Op) -> bool {
    let element = Rect::new(0, 0, 8, 1);
    match op {
        Op::Down(i) => {
            let _ = board.pointer_down(COLUMNS[*i], Point::ORIGIN, element);
            true
        }
        Op::Move(x, y) => {
            board.pointer_move(Point::new(*x, *y));
            true
        }
        Op::Enter(i) => {
            board.zone_enter(BUCKETS[*i]);
            true
        }
        Op::Leave(i) => {
            board.zone_leave(BUCKETS[*i]);
            true
        }
        Op::Up => !matches!(
            board.pointer_up(Point::ORIGIN, Instant::now()),
            Ok(DropOutcome::Moved(_))
        ),
        Op::Cancel => {
            board.cancel();
            true
        }
        Op::Undo => !board.undo(),
        Op::Redo => !board.redo(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 1-2, 4. Partition, capacity and change discipline under gestures
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn partition_and_capacity_hold_for_any_gesture_sequence(
        ops in prop::collection::vec(op_strategy(), 0..120),
    ) {
        let mut board = Board::new(fresh(), BoardConfig::default()).unwrap();
        for op in &ops {
            let before = board.distribution().clone();
            let revision = board.revision();
            let unchanged = apply(&mut board, op);
            assert_partition(board.distribution());
            if unchanged {
                prop_assert_eq!(board.distribution(), &before);
                prop_assert_eq!(board.revision(), revision);
            } else {
                prop_assert_eq!(board.revision(), revision + 1);
            }
        }
    }

    #[test]
    fn ghost_exists_exactly_while_dragging(
        ops in prop::collection::vec(op_strategy(), 0..80),
    ) {
        let mut board = Board::new(fresh(), BoardConfig::default()).unwrap();
        for op in &ops {
            apply(&mut board, op);
            prop_assert_eq!(board.ghost().is_some(), board.is_dragging());
        }
    }

    #[test]
    fn same_ops_yield_same_distribution(
        ops in prop::collection::vec(op_strategy(), 0..80),
    ) {
        let mut a = Board::new(fresh(), BoardConfig::default()).unwrap();
        let mut b = Board::new(fresh(), BoardConfig::default()).unwrap();
        for op in &ops {
            apply(&mut a, op);
            apply(&mut b, op);
        }
        prop_assert_eq!(a.distribution(), b.distribution());
        prop_assert_eq!(a.save(), b.save());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Move idempotence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn moving_twice_equals_moving_once(
        moves in prop::collection::vec((0..COLUMNS.len(), 0..BUCKETS.len()), 0..20),
        item in 0..COLUMNS.len(),
        target in 0..BUCKETS.len(),
    ) {
        let mut d = fresh();
        for (i, b) in moves {
            if colsort::can_accept(&d, COLUMNS[i], BUCKETS[b]) {
                d = d.move_item(COLUMNS[i], BUCKETS[b]);
            }
        }
        let once = d.move_item(COLUMNS[item], BUCKETS[target]);
        let twice = once.move_item(COLUMNS[item], BUCKETS[target]);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.locate(COLUMNS[item]).unwrap(), BUCKETS[target]);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Hover is last-entered-wins
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hovered_is_last_entered_still_inside(
        signals in prop::collection::vec((any::<bool>(), 0..BUCKETS.len()), 0..40),
    ) {
        let mut hover = HoverResolver::new();
        let mut inside: Vec<BucketId> = Vec::new();
        for (enter, i) in signals {
            let bucket = BucketId::new(BUCKETS[i]);
            if enter {
                hover.apply(ZoneSignal::Enter(bucket.clone()));
                prop_assert_eq!(hover.hovered(), Some(&bucket));
                inside.retain(|b| *b != bucket);
                inside.push(bucket);
            } else {
                hover.apply(ZoneSignal::Leave(bucket.clone()));
                inside.retain(|b| *b != bucket);
            }
            prop_assert_eq!(hover.hovered(), inside.last());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6-7. Load normalization and save/load
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn any_prior_loads_into_valid_distribution(prior in prior_strategy()) {
        let (d, _report) = Distribution::load(catalog(), COLUMNS, &prior);
        assert_partition(&d);
    }

    #[test]
    fn save_then_load_preserves_buckets(prior in prior_strategy()) {
        let (d, _) = Distribution::load(catalog(), COLUMNS, &prior);
        let (reloaded, report) = Distribution::load(catalog(), COLUMNS, &d.to_assignment());
        prop_assert!(report.is_clean(), "issues: {:?}", report.issues);
        for column in COLUMNS {
            prop_assert_eq!(d.locate(column), reloaded.locate(column));
        }
        for bucket in BUCKETS.iter().filter(|b| **b != "heap") {
            prop_assert_eq!(d.items_in(bucket), reloaded.items_in(bucket));
        }
    }
}
