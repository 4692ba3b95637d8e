// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for drag integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(
    dead_code,
    reason = "Each test binary uses a different subset of the helpers."
)]

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_drag::memory::{ElementId, MemorySurface};
use understory_drag::pointer::{InputKind, PointerEvent, Touch};
use understory_drag::{DragConfig, DragEventKind, DragMeta, Draggable, Flow};

/// `ul#list` holding two `li.item`s, each with a `span.grip`, plus a sibling
/// `div#outside` that is not part of the list.
pub(crate) struct Fixture {
    pub(crate) surface: MemorySurface,
    pub(crate) list: ElementId,
    pub(crate) items: [ElementId; 2],
    pub(crate) grips: [ElementId; 2],
    pub(crate) outside: ElementId,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let mut surface = MemorySurface::new();
        let root = surface.root();
        let list = surface.insert(root, "ul", Rect::new(0.0, 0.0, 400.0, 400.0));
        surface.set_id(list, "list");

        let first = surface.insert(list, "li", Rect::new(10.0, 20.0, 110.0, 70.0));
        let second = surface.insert(list, "li", Rect::new(10.0, 100.0, 110.0, 150.0));
        let mut grips = [first; 2];
        for (slot, item) in [first, second].into_iter().enumerate() {
            surface.add_class(item, "item");
            let grip = surface.insert(item, "span", Rect::new(0.0, 0.0, 10.0, 10.0));
            surface.add_class(grip, "grip");
            grips[slot] = grip;
        }

        let outside = surface.insert(root, "div", Rect::new(500.0, 0.0, 600.0, 100.0));
        surface.set_id(outside, "outside");

        Self {
            surface,
            list,
            items: [first, second],
            grips,
            outside,
        }
    }

    /// Items are effected; shadow as requested.
    pub(crate) fn items_config(&self, shadow: bool) -> DragConfig<MemorySurface> {
        DragConfig::for_element(self.list)
            .effected(".item")
            .shadow(shadow)
    }

    pub(crate) fn draggable(&mut self, config: DragConfig<MemorySurface>) -> Draggable<MemorySurface> {
        Draggable::new(&mut self.surface, config).expect("fixture container exists")
    }

    pub(crate) fn offset(&self, element: ElementId) -> Point {
        self.surface
            .bounds(element)
            .expect("element is alive")
            .origin()
    }
}

pub(crate) type Log = Rc<RefCell<Vec<(DragEventKind, DragMeta<ElementId>)>>>;

/// Record every lifecycle event; `cancel` decides the flow per event.
pub(crate) fn record_with(
    drag: &mut Draggable<MemorySurface>,
    cancel: impl Fn(DragEventKind, &DragMeta<ElementId>) -> bool + Clone + 'static,
) -> Log {
    let log: Log = Rc::default();
    for kind in [DragEventKind::Start, DragEventKind::Move, DragEventKind::End] {
        let log = Rc::clone(&log);
        let cancel = cancel.clone();
        drag.on(kind, move |meta| {
            log.borrow_mut().push((kind, meta.clone()));
            if cancel(kind, meta) {
                Flow::Cancel
            } else {
                Flow::Continue
            }
        });
    }
    log
}

pub(crate) fn record(drag: &mut Draggable<MemorySurface>) -> Log {
    record_with(drag, |_, _| false)
}

pub(crate) fn kinds(log: &Log) -> Vec<DragEventKind> {
    log.borrow().iter().map(|(kind, _)| *kind).collect()
}

pub(crate) fn down(target: ElementId, x: f64, y: f64) -> PointerEvent<ElementId> {
    PointerEvent::mouse(InputKind::MouseDown, Point::new(x, y), 0).with_target(target)
}

pub(crate) fn mv(x: f64, y: f64) -> PointerEvent<ElementId> {
    PointerEvent::mouse(InputKind::MouseMove, Point::new(x, y), 16)
}

pub(crate) fn up(x: f64, y: f64) -> PointerEvent<ElementId> {
    PointerEvent::mouse(InputKind::MouseUp, Point::new(x, y), 32)
}

pub(crate) fn touch(kind: InputKind, x: f64, y: f64, timestamp: u64) -> PointerEvent<ElementId> {
    PointerEvent::touch(kind, [Touch::new(1, Point::new(x, y))], timestamp)
}
