// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer normalization: one canonical sample for mouse and multi-touch input.
//!
//! Hosts translate their native events into a [`PointerEvent`]. The drag machine
//! never looks at raw touch lists directly; it asks [`normalize`] for a
//! [`PointerSample`] instead.
//!
//! Touch lists are consulted in priority order: `touches`, then `target_touches`,
//! then `changed_touches`. The first non-empty list supplies the first two touch
//! points and the touch count. When every list is empty the event is a mouse event
//! and its own client point becomes `touch0`.
//!
//! Missing coordinates are expected to arrive as `NaN`. They are carried through
//! untouched so a malformed event degrades the output instead of aborting a drag.
//!
//! ```
//! use kurbo::Point;
//! use understory_drag::pointer::{normalize, InputKind, PointerEvent, Touch};
//!
//! let ev: PointerEvent<u32> = PointerEvent::touch(
//!     InputKind::TouchStart,
//!     [Touch::new(7, Point::new(5.0, 6.0)), Touch::new(8, Point::new(9.0, 9.0))],
//!     0,
//! );
//! let sample = normalize(&ev);
//! assert_eq!(sample.client, Point::new(5.0, 6.0));
//! assert_eq!(sample.touch_count, 2);
//! assert_eq!(sample.touch1.map(|t| t.identifier), Some(Some(8)));
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// Raw input kinds a host can forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Mouse button pressed.
    MouseDown,
    /// Mouse moved.
    MouseMove,
    /// Mouse button released.
    MouseUp,
    /// A touch point began.
    TouchStart,
    /// A touch point moved.
    TouchMove,
    /// A touch point was lifted.
    TouchEnd,
    /// The platform cancelled the touch sequence.
    TouchCancel,
}

impl InputKind {
    /// The lifecycle class this input belongs to.
    pub const fn class(self) -> InputClass {
        match self {
            Self::MouseDown | Self::TouchStart => InputClass::Start,
            Self::MouseMove | Self::TouchMove => InputClass::Move,
            Self::MouseUp | Self::TouchEnd | Self::TouchCancel => InputClass::End,
        }
    }

    /// Returns `true` for touch inputs.
    pub const fn is_touch(self) -> bool {
        matches!(
            self,
            Self::TouchStart | Self::TouchMove | Self::TouchEnd | Self::TouchCancel
        )
    }
}

/// Input classes the drag machine listens for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputClass {
    /// Primary button down or touch start; scoped to the container.
    Start,
    /// Pointer or touch move; listened globally.
    Move,
    /// Pointer up, touch end or touch cancel; listened globally.
    End,
}

/// Mouse button associated with an input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left button.
    #[default]
    Primary,
    /// Usually the middle button or wheel press.
    Auxiliary,
    /// Usually the right button.
    Secondary,
    /// Any other button, by platform index.
    Other(u16),
}

/// A single touch point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Touch {
    /// Platform identifier, stable for the lifetime of the contact.
    pub identifier: i64,
    /// Position in client (viewport) coordinates.
    pub client: Point,
}

impl Touch {
    /// Create a touch point.
    pub const fn new(identifier: i64, client: Point) -> Self {
        Self { identifier, client }
    }
}

/// Touch list storage; two inline slots cover the common one- and two-finger cases.
pub type TouchList = SmallVec<[Touch; 2]>;

/// A raw input event as forwarded by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent<E> {
    /// What happened.
    pub kind: InputKind,
    /// Button for mouse inputs. Ignored for touch.
    pub button: PointerButton,
    /// The concrete element the platform targeted, if any.
    pub target: Option<E>,
    /// Client position of the mouse. Touch events usually leave this `NaN`.
    pub client: Point,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
    /// Every touch currently on the surface.
    pub touches: TouchList,
    /// Touches that started on the event target.
    pub target_touches: TouchList,
    /// Touches that changed in this event.
    pub changed_touches: TouchList,
}

impl<E> PointerEvent<E> {
    /// A mouse event with the primary button and no target.
    pub fn mouse(kind: InputKind, client: Point, timestamp: u64) -> Self {
        Self {
            kind,
            button: PointerButton::Primary,
            target: None,
            client,
            timestamp,
            touches: TouchList::new(),
            target_touches: TouchList::new(),
            changed_touches: TouchList::new(),
        }
    }

    /// A touch event whose `touches` list holds `touches`.
    pub fn touch(kind: InputKind, touches: impl IntoIterator<Item = Touch>, timestamp: u64) -> Self {
        Self {
            touches: touches.into_iter().collect(),
            ..Self::mouse(kind, Point::new(f64::NAN, f64::NAN), timestamp)
        }
    }

    /// Set the concrete target.
    pub fn with_target(mut self, target: E) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the mouse button.
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Replace the `target_touches` list.
    pub fn with_target_touches(mut self, touches: impl IntoIterator<Item = Touch>) -> Self {
        self.target_touches = touches.into_iter().collect();
        self
    }

    /// Replace the `changed_touches` list.
    pub fn with_changed_touches(mut self, touches: impl IntoIterator<Item = Touch>) -> Self {
        self.changed_touches = touches.into_iter().collect();
        self
    }

    /// Returns `true` if this input may start a drag: a touch start, or a mouse down
    /// with the primary button.
    pub fn starts_drag(&self) -> bool {
        match self.kind {
            InputKind::TouchStart => true,
            InputKind::MouseDown => self.button == PointerButton::Primary,
            _ => false,
        }
    }
}

/// A touch point as reported in lifecycle metadata.
///
/// Mouse input produces a point without an identifier.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Touch identifier, `None` for mouse input.
    pub identifier: Option<i64>,
    /// Client position.
    pub client: Point,
}

impl From<Touch> for TouchPoint {
    fn from(touch: Touch) -> Self {
        Self {
            identifier: Some(touch.identifier),
            client: touch.client,
        }
    }
}

/// Canonical pointer sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    /// Client position of `touch0`.
    pub client: Point,
    /// Primary contact.
    pub touch0: TouchPoint,
    /// Secondary contact, when at least two touches are present.
    pub touch1: Option<TouchPoint>,
    /// Length of the touch list that supplied the contacts; `0` for mouse input.
    pub touch_count: usize,
}

/// Normalize a raw event into a [`PointerSample`]. Pure; never panics.
pub fn normalize<E>(event: &PointerEvent<E>) -> PointerSample {
    let list = [
        &event.touches,
        &event.target_touches,
        &event.changed_touches,
    ]
    .into_iter()
    .find(|list| !list.is_empty());

    match list {
        Some(list) => {
            let touch0 = TouchPoint::from(list[0]);
            PointerSample {
                client: touch0.client,
                touch0,
                touch1: list.get(1).copied().map(TouchPoint::from),
                touch_count: list.len(),
            }
        }
        None => PointerSample {
            client: event.client,
            touch0: TouchPoint {
                identifier: None,
                client: event.client,
            },
            touch1: None,
            touch_count: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(id: i64, x: f64, y: f64) -> Touch {
        Touch::new(id, Point::new(x, y))
    }

    #[test]
    fn mouse_event_uses_own_client_point() {
        let ev = PointerEvent::<u32>::mouse(InputKind::MouseMove, Point::new(3.0, 4.0), 0);
        let sample = normalize(&ev);

        assert_eq!(sample.client, Point::new(3.0, 4.0));
        assert_eq!(sample.touch0.identifier, None);
        assert_eq!(sample.touch1, None);
        assert_eq!(sample.touch_count, 0);
    }

    #[test]
    fn touches_take_priority() {
        let ev = PointerEvent::<u32>::touch(InputKind::TouchMove, [t(1, 1.0, 1.0)], 0)
            .with_target_touches([t(2, 2.0, 2.0)])
            .with_changed_touches([t(3, 3.0, 3.0)]);
        let sample = normalize(&ev);

        assert_eq!(sample.touch0.identifier, Some(1));
        assert_eq!(sample.touch_count, 1);
    }

    #[test]
    fn falls_back_to_target_then_changed_touches() {
        let ev = PointerEvent::<u32>::touch(InputKind::TouchMove, core::iter::empty(), 0)
            .with_target_touches([t(2, 2.0, 2.0)])
            .with_changed_touches([t(3, 3.0, 3.0)]);
        assert_eq!(normalize(&ev).touch0.identifier, Some(2));

        // Touch end: the lifted finger is only in `changed_touches`.
        let ev = PointerEvent::<u32>::touch(InputKind::TouchEnd, core::iter::empty(), 0)
            .with_changed_touches([t(3, 30.0, 40.0), t(4, 0.0, 0.0), t(5, 0.0, 0.0)]);
        let sample = normalize(&ev);
        assert_eq!(sample.client, Point::new(30.0, 40.0));
        assert_eq!(sample.touch1.and_then(|t| t.identifier), Some(4));
        assert_eq!(sample.touch_count, 3);
    }

    #[test]
    fn missing_coordinates_stay_nan() {
        let ev = PointerEvent::<u32>::mouse(
            InputKind::MouseDown,
            Point::new(f64::NAN, 12.0),
            0,
        );
        let sample = normalize(&ev);

        assert!(sample.client.x.is_nan());
        assert_eq!(sample.client.y, 12.0);
    }

    #[test]
    fn normalize_does_not_touch_input() {
        let ev = PointerEvent::<u32>::touch(InputKind::TouchStart, [t(1, 1.0, 2.0)], 9);
        let before = ev.clone();
        let _ = normalize(&ev);

        // `client` is NaN for touch input, so compare it bitwise.
        assert_eq!(ev.client.x.to_bits(), before.client.x.to_bits());
        assert_eq!(ev.client.y.to_bits(), before.client.y.to_bits());
        assert_eq!(ev.kind, before.kind);
        assert_eq!(ev.timestamp, before.timestamp);
        assert_eq!(ev.touches, before.touches);
        assert_eq!(ev.changed_touches, before.changed_touches);
    }

    #[test]
    fn mouse_events_compare_equal_to_clones() {
        let ev = PointerEvent::mouse(InputKind::MouseDown, Point::new(1.0, 2.0), 3)
            .with_target(7_u32);
        assert_eq!(ev.clone(), ev);
    }

    #[test]
    fn classes_and_start_filter() {
        assert_eq!(InputKind::MouseDown.class(), InputClass::Start);
        assert_eq!(InputKind::TouchMove.class(), InputClass::Move);
        assert_eq!(InputKind::TouchCancel.class(), InputClass::End);

        let primary = PointerEvent::<u32>::mouse(InputKind::MouseDown, Point::ZERO, 0);
        assert!(primary.starts_drag());
        assert!(!primary.clone().with_button(PointerButton::Secondary).starts_drag());

        // Touch starts ignore the button field.
        let touch = PointerEvent::<u32>::touch(InputKind::TouchStart, [t(1, 0.0, 0.0)], 0)
            .with_button(PointerButton::Other(4));
        assert!(touch.starts_drag());
    }
}
