// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis constraint: decide which spatial axes an offset update may affect.
//!
//! The constraint is derived once from an axis string such as `"x"`, `"y"` or
//! `"xy"` and can then be toggled per axis at runtime.
//!
//! ```
//! use understory_drag::axis::{Axis, AxisConstraint};
//!
//! let mut axes = AxisConstraint::parse("X");
//! assert!(axes.allows(Axis::Horizontal));
//! assert!(!axes.allows(Axis::Vertical));
//!
//! axes.set(Axis::Vertical, true);
//! assert_eq!(axes, AxisConstraint::BOTH);
//! ```

/// One of the two screen axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right; offsets along this axis are "left" values.
    Horizontal,
    /// Up/down; offsets along this axis are "top" values.
    Vertical,
}

/// Which axes a drag is allowed to move along.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxisConstraint {
    horizontal: bool,
    vertical: bool,
}

impl AxisConstraint {
    /// Both axes enabled.
    pub const BOTH: Self = Self {
        horizontal: true,
        vertical: true,
    };

    /// No axis enabled; moves still emit events but never change offsets.
    pub const NONE: Self = Self {
        horizontal: false,
        vertical: false,
    };

    /// Derive the constraint from an axis string.
    ///
    /// Horizontal is enabled iff the string contains `x` (any case), vertical iff
    /// it contains `y` (any case). Anything else in the string is ignored, so
    /// `"xy"`, `"yx"` and `"x,y"` are all equivalent.
    pub fn parse(axis: &str) -> Self {
        let mut constraint = Self::NONE;
        for c in axis.chars() {
            match c {
                'x' | 'X' => constraint.horizontal = true,
                'y' | 'Y' => constraint.vertical = true,
                _ => {}
            }
        }
        constraint
    }

    /// Returns `true` if offsets along `axis` may change.
    pub const fn allows(self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Enable or disable a single axis.
    pub fn set(&mut self, axis: Axis, enabled: bool) {
        match axis {
            Axis::Horizontal => self.horizontal = enabled,
            Axis::Vertical => self.vertical = enabled,
        }
    }
}

impl Default for AxisConstraint {
    fn default() -> Self {
        Self::BOTH
    }
}
