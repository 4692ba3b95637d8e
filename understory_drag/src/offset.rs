// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset tracker: turn pointer deltas into element offsets.
//!
//! ## Usage
//!
//! 1) When a drag starts, call [`OffsetTracker::begin`] with the current offset of the
//!    element that will move.
//! 2) On each move, call [`OffsetTracker::update`] with the pointer delta since the
//!    drag started. The returned [`OffsetUpdate`] carries the values to apply for each
//!    axis the [`AxisConstraint`] allows.
//! 3) When the drag ends, read [`OffsetTracker::last`] to commit the final position,
//!    then [`OffsetTracker::reset`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_drag::axis::AxisConstraint;
//! use understory_drag::offset::OffsetTracker;
//!
//! let mut offsets = OffsetTracker::default();
//! offsets.begin(Point::new(10.0, 20.0));
//!
//! let update = offsets.update(Vec2::new(30.0, 40.0), AxisConstraint::parse("x"));
//! assert_eq!(update.left, Some(40.0));
//! assert_eq!(update.top, None);
//! assert_eq!(offsets.last(), Point::new(40.0, 20.0));
//! ```

use kurbo::{Point, Vec2};

use crate::axis::{Axis, AxisConstraint};

/// Offsets to apply after a move. `None` means the axis is locked.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OffsetUpdate {
    /// New left offset, if the horizontal axis is allowed.
    pub left: Option<f64>,
    /// New top offset, if the vertical axis is allowed.
    pub top: Option<f64>,
}

impl OffsetUpdate {
    /// Value for `axis`, if any.
    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }
}

/// Tracks the start offset and the last applied offset of the moving element.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OffsetTracker {
    start: Point,
    last: Point,
}

impl OffsetTracker {
    /// Record the element's offset at drag start. The last offset starts out equal to it.
    pub fn begin(&mut self, origin: Point) {
        self.start = origin;
        self.last = origin;
    }

    /// Compute new offsets from the total pointer `delta` since drag start.
    ///
    /// Axes the constraint locks keep their last value and are reported as `None`.
    /// Non-finite deltas propagate into the result unchanged.
    pub fn update(&mut self, delta: Vec2, axes: AxisConstraint) -> OffsetUpdate {
        let mut update = OffsetUpdate::default();
        if axes.allows(Axis::Horizontal) {
            self.last.x = self.start.x + delta.x;
            update.left = Some(self.last.x);
        }
        if axes.allows(Axis::Vertical) {
            self.last.y = self.start.y + delta.y;
            update.top = Some(self.last.y);
        }
        update
    }

    /// Offset recorded at drag start.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Most recently computed offset; this is what gets committed at drag end.
    pub fn last(&self) -> Point {
        self.last
    }

    /// Clear both offsets back to the origin.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_sets_start_and_last() {
        let mut offsets = OffsetTracker::default();
        offsets.begin(Point::new(10.0, 20.0));

        assert_eq!(offsets.start(), Point::new(10.0, 20.0));
        assert_eq!(offsets.last(), offsets.start());
    }

    #[test]
    fn update_tracks_total_delta_not_increments() {
        let mut offsets = OffsetTracker::default();
        offsets.begin(Point::new(10.0, 20.0));

        offsets.update(Vec2::new(5.0, 5.0), AxisConstraint::BOTH);
        let update = offsets.update(Vec2::new(30.0, 40.0), AxisConstraint::BOTH);

        assert_eq!(update.left, Some(40.0));
        assert_eq!(update.top, Some(60.0));
        assert_eq!(offsets.last(), Point::new(40.0, 60.0));
    }

    #[test]
    fn locked_axis_keeps_last_value() {
        let mut offsets = OffsetTracker::default();
        offsets.begin(Point::new(10.0, 20.0));

        let update = offsets.update(Vec2::new(30.0, 40.0), AxisConstraint::parse("y"));

        assert_eq!(update.get(Axis::Horizontal), None);
        assert_eq!(update.get(Axis::Vertical), Some(60.0));
        assert_eq!(offsets.last(), Point::new(10.0, 60.0));
    }

    #[test]
    fn axis_re_enabled_mid_drag_jumps_to_total_delta() {
        let mut offsets = OffsetTracker::default();
        offsets.begin(Point::ZERO);

        offsets.update(Vec2::new(10.0, 10.0), AxisConstraint::parse("y"));
        let update = offsets.update(Vec2::new(12.0, 12.0), AxisConstraint::BOTH);

        assert_eq!(update.left, Some(12.0));
        assert_eq!(update.top, Some(12.0));
    }

    #[test]
    fn nan_delta_propagates() {
        let mut offsets = OffsetTracker::default();
        offsets.begin(Point::new(1.0, 1.0));

        let update = offsets.update(Vec2::new(f64::NAN, 2.0), AxisConstraint::BOTH);

        assert!(update.left.is_some_and(f64::is_nan));
        assert_eq!(update.top, Some(3.0));
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut offsets = OffsetTracker::default();
        offsets.begin(Point::new(3.0, 4.0));
        offsets.update(Vec2::new(1.0, 1.0), AxisConstraint::BOTH);

        offsets.reset();

        assert_eq!(offsets, OffsetTracker::default());
    }
}
