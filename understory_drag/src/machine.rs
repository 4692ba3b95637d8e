// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state machine: guards, session bookkeeping and orchestration.
//!
//! ## State transitions
//!
//! ```text
//! Idle     -> Dragging   (start-class input through a handle, instance enabled)
//! Dragging -> Dragging   (move-class input, anywhere on the surface)
//! Dragging -> Idle       (end-class input, or a Start/Move subscriber cancelling)
//! ```
//!
//! Starts while dragging, and moves or ends while idle, are ignored.
//!
//! The session is a plain [`DragSession`] value owned by the
//! [`Draggable`](crate::Draggable) and passed into each transition by `&mut`.
//! Subscribers only ever see a [`DragMeta`] snapshot cloned out of it, and the
//! session is reset only after [`DragEventKind::End`] has been fully dispatched.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::axis::{Axis, AxisConstraint};
use crate::dispatcher::{Dispatcher, DragEventKind};
use crate::offset::OffsetTracker;
use crate::pointer::{PointerEvent, PointerSample, TouchPoint, normalize};
use crate::shadow::ShadowProxy;
use crate::surface::{ElementRef, Surface, closest, closest_within};

/// Whether a drag is in progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// Waiting for a start input.
    #[default]
    Idle,
    /// Between a successful start and the matching end.
    Dragging,
}

/// Immutable copy of the session handed to lifecycle subscribers.
///
/// Fields that belong to a later phase stay at zero or `None` until that phase is
/// reached: `end`, `end_time` are only set in the [`DragEventKind::End`] snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct DragMeta<E> {
    /// The container the draggable was built on.
    pub container: E,
    /// Element that moves as a result of the drag.
    pub effected: Option<E>,
    /// Element whose input started the drag.
    pub handle: Option<E>,
    /// Host timestamp of the start input, in milliseconds.
    pub start_time: u64,
    /// Client position at start.
    pub start: Point,
    /// Most recent client position.
    pub moved: Point,
    /// `moved - start`.
    pub delta: Vec2,
    /// Host timestamp of the end input, in milliseconds.
    pub end_time: u64,
    /// Client position at end; always the last observed move.
    pub end: Point,
    /// Raw input that produced this snapshot.
    pub original_event: Option<PointerEvent<E>>,
    /// Primary contact of that input.
    pub touch0: Option<TouchPoint>,
    /// Secondary contact of that input.
    pub touch1: Option<TouchPoint>,
    /// Touch count of that input; `0` for mouse.
    pub touch_count: usize,
}

impl<E> DragMeta<E> {
    /// Cleared metadata for `container`.
    pub fn idle(container: E) -> Self {
        Self {
            container,
            effected: None,
            handle: None,
            start_time: 0,
            start: Point::ZERO,
            moved: Point::ZERO,
            delta: Vec2::ZERO,
            end_time: 0,
            end: Point::ZERO,
            original_event: None,
            touch0: None,
            touch1: None,
            touch_count: 0,
        }
    }
}

/// The mutable record of one start-to-end cycle, reused across cycles.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<E> {
    meta: DragMeta<E>,
    phase: DragPhase,
}

impl<E: Copy> DragSession<E> {
    /// A fresh, idle session on `container`.
    pub fn new(container: E) -> Self {
        Self {
            meta: DragMeta::idle(container),
            phase: DragPhase::Idle,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns `true` while dragging.
    pub fn is_active(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// The container; survives resets.
    pub fn container(&self) -> E {
        self.meta.container
    }

    /// Effected element of the current cycle.
    pub fn effected(&self) -> Option<E> {
        self.meta.effected
    }

    /// Handle element of the current cycle.
    pub fn handle(&self) -> Option<E> {
        self.meta.handle
    }

    /// Client position at start.
    pub fn start(&self) -> Point {
        self.meta.start
    }

    /// Most recent client position.
    pub fn moved(&self) -> Point {
        self.meta.moved
    }

    /// `moved - start`.
    pub fn delta(&self) -> Vec2 {
        self.meta.delta
    }

    /// Clone the public fields into a snapshot.
    pub fn snapshot(&self) -> DragMeta<E> {
        self.meta.clone()
    }

    fn record_input(&mut self, sample: &PointerSample, event: &PointerEvent<E>) {
        self.meta.original_event = Some(event.clone());
        self.meta.touch0 = Some(sample.touch0);
        self.meta.touch1 = sample.touch1;
        self.meta.touch_count = sample.touch_count;
    }

    fn begin(&mut self, effected: E, handle: E, sample: &PointerSample, event: &PointerEvent<E>) {
        self.phase = DragPhase::Dragging;
        self.meta.effected = Some(effected);
        self.meta.handle = Some(handle);
        self.meta.start_time = event.timestamp;
        self.meta.start = sample.client;
        self.meta.moved = sample.client;
        self.meta.delta = Vec2::ZERO;
        self.record_input(sample, event);
    }

    fn track(&mut self, sample: &PointerSample, event: &PointerEvent<E>) {
        self.meta.moved = sample.client;
        self.meta.delta = self.meta.moved - self.meta.start;
        self.record_input(sample, event);
    }

    fn finish(&mut self, sample: &PointerSample, event: &PointerEvent<E>) {
        // End coordinates can lag or lead the last move on some platforms; the
        // last move sample is authoritative.
        self.meta.end = self.meta.moved;
        self.meta.delta = self.meta.end - self.meta.start;
        self.meta.end_time = event.timestamp;
        self.record_input(sample, event);
    }

    fn reset(&mut self) {
        *self = Self::new(self.meta.container);
    }
}

/// What a single input did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Handled {
    /// Lifecycle events emitted, in order.
    pub emitted: SmallVec<[DragEventKind; 2]>,
    /// The host should suppress the input's default action.
    pub prevent_default: bool,
}

impl Handled {
    /// Returns `true` if the input caused no transition.
    pub fn is_empty(&self) -> bool {
        self.emitted.is_empty()
    }
}

/// Transition logic and the components it drives. The session lives outside.
pub(crate) struct DragMachine<S: Surface> {
    pub(crate) effected: ElementRef<S::Element>,
    pub(crate) handle: ElementRef<S::Element>,
    pub(crate) axes: AxisConstraint,
    pub(crate) offsets: OffsetTracker,
    pub(crate) shadow: ShadowProxy<S>,
    pub(crate) enabled: bool,
    pub(crate) draggable: bool,
    locked: bool,
}

impl<S: Surface> core::fmt::Debug for DragMachine<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragMachine")
            .field("effected", &self.effected)
            .field("handle", &self.handle)
            .field("axes", &self.axes)
            .field("offsets", &self.offsets)
            .field("shadow", &self.shadow)
            .field("enabled", &self.enabled)
            .field("draggable", &self.draggable)
            .field("locked", &self.locked)
            .finish()
    }
}

impl<S: Surface> DragMachine<S> {
    pub(crate) fn new(
        effected: ElementRef<S::Element>,
        handle: ElementRef<S::Element>,
        axes: AxisConstraint,
        shadow: ShadowProxy<S>,
        draggable: bool,
    ) -> Self {
        Self {
            effected,
            handle,
            axes,
            offsets: OffsetTracker::default(),
            shadow,
            enabled: true,
            draggable,
            locked: false,
        }
    }

    /// `Idle -> Dragging`. Returns `true` if the drag started (even if a subscriber
    /// cancelled it right away).
    pub(crate) fn start(
        &mut self,
        session: &mut DragSession<S::Element>,
        surface: &mut S,
        dispatcher: &mut Dispatcher<S::Element>,
        event: &PointerEvent<S::Element>,
        handled: &mut Handled,
    ) -> bool {
        if session.is_active() || !self.enabled {
            trace!(active = session.is_active(), enabled = self.enabled, "start ignored");
            return false;
        }
        if !event.starts_drag() {
            return false;
        }
        let Some(target) = event.target else {
            return false;
        };
        let container = session.container();
        let Some(handle) = closest_within(surface, target, &self.handle, container) else {
            trace!(?target, "start outside any handle");
            return false;
        };
        let Some(effected) = closest(surface, target, &self.effected) else {
            debug!(?target, ?handle, "no effected element for handle");
            return false;
        };

        let sample = normalize(event);
        session.begin(effected, handle, &sample, event);

        self.shadow.prepare(surface, effected);
        let moving = self.shadow.move_target(effected);
        self.offsets.begin(surface.offset(moving));

        surface.set_interaction_lock(true);
        self.locked = true;

        debug!(?effected, ?handle, start = ?sample.client, "drag start");
        handled.emitted.push(DragEventKind::Start);
        if dispatcher
            .emit(DragEventKind::Start, &session.snapshot())
            .is_cancel()
        {
            debug!("drag start cancelled");
            self.end(session, surface, dispatcher, event, handled);
        }
        true
    }

    /// `Dragging -> Dragging`. Returns `false` while idle.
    pub(crate) fn update(
        &mut self,
        session: &mut DragSession<S::Element>,
        surface: &mut S,
        dispatcher: &mut Dispatcher<S::Element>,
        event: &PointerEvent<S::Element>,
        handled: &mut Handled,
    ) -> bool {
        if !session.is_active() {
            return false;
        }
        let Some(effected) = session.effected() else {
            return false;
        };

        let sample = normalize(event);
        session.track(&sample, event);

        if self.draggable {
            let moving = self.shadow.move_target(effected);
            let update = self.offsets.update(session.delta(), self.axes);
            for axis in [Axis::Horizontal, Axis::Vertical] {
                if let Some(value) = update.get(axis) {
                    surface.set_offset(moving, axis, value);
                }
            }
        }

        trace!(moved = ?session.moved(), delta = ?session.delta(), "drag move");
        handled.emitted.push(DragEventKind::Move);
        if dispatcher
            .emit(DragEventKind::Move, &session.snapshot())
            .is_cancel()
        {
            debug!("drag move cancelled");
            self.end(session, surface, dispatcher, event, handled);
        }
        true
    }

    /// `Dragging -> Idle`. Returns `false` while idle.
    pub(crate) fn end(
        &mut self,
        session: &mut DragSession<S::Element>,
        surface: &mut S,
        dispatcher: &mut Dispatcher<S::Element>,
        event: &PointerEvent<S::Element>,
        handled: &mut Handled,
    ) -> bool {
        if !session.is_active() {
            return false;
        }

        if self.locked {
            surface.set_interaction_lock(false);
            self.locked = false;
        }

        if let Some(effected) = session.effected() {
            self.shadow.finish(surface, effected, self.offsets.last());
        }

        let sample = normalize(event);
        session.finish(&sample, event);

        debug!(end = ?session.meta.end, delta = ?session.delta(), "drag end");
        handled.emitted.push(DragEventKind::End);
        // Not cancellable.
        dispatcher.emit(DragEventKind::End, &session.snapshot());

        session.reset();
        self.offsets.reset();
        true
    }

    /// Drop an in-progress drag without emitting anything: release the lock, hide
    /// the overlay and reset the session. Used on teardown.
    pub(crate) fn abort(&mut self, session: &mut DragSession<S::Element>, surface: &mut S) {
        if self.locked {
            surface.set_interaction_lock(false);
            self.locked = false;
        }
        if session.is_active() {
            debug!(effected = ?session.effected(), "drag aborted");
            self.shadow.hide(surface);
        }
        session.reset();
        self.offsets.reset();
    }
}
