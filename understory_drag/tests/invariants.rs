// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests over arbitrary input streams.
//!
//! 1. Every snapshot satisfies `delta == moved - start`.
//! 2. Start and End alternate; moves only appear between them.
//! 3. A locked axis is never written.
//! 4. The End snapshot reports the last move position.
//! 5. With a shadow, the effected element is written exactly twice per drag.

use kurbo::Point;
use proptest::prelude::*;
use understory_drag::DragEventKind::{End, Move, Start};
use understory_drag::memory::{ElementId, MemorySurface};
use understory_drag::{DragPhase, Draggable};

mod common;

use common::{Fixture, down, kinds, mv, record, up};

#[derive(Clone, Debug)]
enum Op {
    Down(usize),
    Move(f64, f64),
    Up,
}

fn coord() -> impl Strategy<Value = f64> {
    -2000.0..2000.0_f64
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (0_usize..4).prop_map(Op::Down),
        4 => (coord(), coord()).prop_map(|(x, y)| Op::Move(x, y)),
        1 => Just(Op::Up),
    ]
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op(), 0..40)
}

/// Targets 0 and 1 are items, 2 is a grip, 3 is outside the container.
fn target(fx: &Fixture, slot: usize) -> ElementId {
    match slot {
        0 | 1 => fx.items[slot],
        2 => fx.grips[0],
        _ => fx.outside,
    }
}

fn run(fx: &mut Fixture, drag: &mut Draggable<MemorySurface>, ops: &[Op]) {
    let mut last = Point::ZERO;
    for op in ops {
        let event = match *op {
            Op::Down(slot) => down(target(fx, slot), last.x, last.y),
            Op::Move(x, y) => {
                last = Point::new(x, y);
                mv(x, y)
            }
            Op::Up => up(last.x, last.y),
        };
        let _ = drag.handle(&mut fx.surface, &event);
    }
}

proptest! {
    #[test]
    fn delta_is_moved_minus_start(ops in ops()) {
        let mut fx = Fixture::new();
        let mut drag = fx.draggable(fx.items_config(false));
        let log = record(&mut drag);

        run(&mut fx, &mut drag, &ops);

        for (kind, meta) in log.borrow().iter() {
            let moved = if *kind == End { meta.end } else { meta.moved };
            prop_assert_eq!(meta.delta, moved - meta.start, "{:?}", kind);
        }
    }
}

proptest! {
    #[test]
    fn lifecycle_events_are_well_nested(ops in ops()) {
        let mut fx = Fixture::new();
        let mut drag = fx.draggable(fx.items_config(true));
        let log = record(&mut drag);

        run(&mut fx, &mut drag, &ops);

        let mut active = false;
        for kind in kinds(&log) {
            match kind {
                Start => {
                    prop_assert!(!active, "start while dragging");
                    active = true;
                }
                Move => prop_assert!(active, "move while idle"),
                End => {
                    prop_assert!(active, "end while idle");
                    active = false;
                }
            }
        }
        prop_assert_eq!(active, drag.phase() == DragPhase::Dragging);
        prop_assert_eq!(active, fx.surface.is_interaction_locked());
    }
}

proptest! {
    #[test]
    fn locked_axis_is_never_written(ops in ops(), horizontal in any::<bool>()) {
        let mut fx = Fixture::new();
        let axis = if horizontal { "x" } else { "y" };
        let mut drag = fx.draggable(fx.items_config(false).axis(axis));

        run(&mut fx, &mut drag, &ops);

        let origins = [Point::new(10.0, 20.0), Point::new(10.0, 100.0)];
        for (item, origin) in fx.items.into_iter().zip(origins) {
            let now = fx.offset(item);
            if horizontal {
                prop_assert_eq!(now.y, origin.y);
            } else {
                prop_assert_eq!(now.x, origin.x);
            }
        }
    }
}

proptest! {
    #[test]
    fn end_reports_last_move(
        start in (coord(), coord()),
        moves in proptest::collection::vec((coord(), coord()), 0..10),
        release in (coord(), coord()),
    ) {
        let mut fx = Fixture::new();
        let mut drag = fx.draggable(fx.items_config(false));
        let log = record(&mut drag);

        let _ = drag.handle(&mut fx.surface, &down(fx.items[0], start.0, start.1));
        for &(x, y) in &moves {
            let _ = drag.handle(&mut fx.surface, &mv(x, y));
        }
        let _ = drag.handle(&mut fx.surface, &up(release.0, release.1));

        let expected = moves
            .last()
            .map_or(Point::new(start.0, start.1), |&(x, y)| Point::new(x, y));
        let (kind, meta) = log.borrow().last().cloned().unwrap();
        prop_assert_eq!(kind, End);
        prop_assert_eq!(meta.end, expected);
    }
}

proptest! {
    #[test]
    fn shadow_commits_once_per_drag(moves in proptest::collection::vec((coord(), coord()), 0..10)) {
        let mut fx = Fixture::new();
        let mut drag = fx.draggable(fx.items_config(true));
        let item = fx.items[1];

        let _ = drag.handle(&mut fx.surface, &down(item, 0.0, 0.0));
        for &(x, y) in &moves {
            let _ = drag.handle(&mut fx.surface, &mv(x, y));
            prop_assert_eq!(fx.surface.offset_writes(item), 0);
        }
        let _ = drag.handle(&mut fx.surface, &up(0.0, 0.0));

        prop_assert_eq!(fx.surface.offset_writes(item), 2);
        let (dx, dy) = moves.last().copied().unwrap_or((0.0, 0.0));
        prop_assert_eq!(fx.offset(item), Point::new(10.0 + dx, 100.0 + dy));
    }
}
