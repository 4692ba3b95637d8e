// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shadow proxy: a stand-in overlay that moves during a drag instead of the real element.
//!
//! With a proxy, every move repositions a cheap overlay and the effected element is
//! moved exactly once, when the drag ends, through a pluggable commit step. Without a
//! proxy the effected element itself is the move target and there is nothing to
//! commit.
//!
//! The proxy is created once, hidden, when the [`Draggable`](crate::Draggable) is
//! built, and removed from the surface only when it is destroyed.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect};
use peniko::Color;
use tracing::{trace, warn};

use crate::axis::Axis;
use crate::surface::Surface;

/// Visual style of the shadow overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShadowStyle {
    /// Fill color.
    pub background: Color,
    /// Overall opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Border stroke width.
    pub border_width: f64,
    /// Border stroke color.
    pub border_color: Color,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            background: Color::from_rgb8(0x00, 0x00, 0x00),
            opacity: 0.3,
            border_width: 1.0,
            border_color: Color::from_rgb8(0xee, 0xee, 0xee),
        }
    }
}

/// Completion signal handed to a commit step.
///
/// A commit step must call [`Done::done`] once the element is in its final place.
#[derive(Debug)]
pub struct Done<'a> {
    signaled: &'a mut bool,
}

impl Done<'_> {
    /// Signal that the commit finished.
    pub fn done(self) {
        *self.signaled = true;
    }
}

/// Moves the effected element to its final offset when a shadowed drag ends.
///
/// Receives the surface, the effected element, the target left/top offset and the
/// completion signal.
pub type CommitStep<S> = Box<dyn FnMut(&mut S, <S as Surface>::Element, Point, Done<'_>)>;

/// Commit step used when none is configured: write left and top, then signal.
pub fn default_commit<S: Surface + ?Sized>(
    surface: &mut S,
    element: S::Element,
    to: Point,
    done: Done<'_>,
) {
    surface.set_offset(element, Axis::Horizontal, to.x);
    surface.set_offset(element, Axis::Vertical, to.y);
    done.done();
}

/// Owns the optional overlay and the commit step.
pub struct ShadowProxy<S: Surface> {
    overlay: Option<S::Element>,
    commit: CommitStep<S>,
    z_index: i32,
}

impl<S: Surface> fmt::Debug for ShadowProxy<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShadowProxy")
            .field("overlay", &self.overlay)
            .field("z_index", &self.z_index)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> ShadowProxy<S> {
    /// Create the manager. When `style` is `Some`, a hidden overlay is created on
    /// `surface` right away.
    pub fn new(
        surface: &mut S,
        style: Option<&ShadowStyle>,
        commit: CommitStep<S>,
        z_index: i32,
    ) -> Self {
        let overlay = style.map(|style| surface.create_overlay(style));
        Self {
            overlay,
            commit,
            z_index,
        }
    }

    /// The overlay element, if shadow mode is on.
    pub fn overlay(&self) -> Option<S::Element> {
        self.overlay
    }

    /// The element that moves during the drag.
    pub fn move_target(&self, effected: S::Element) -> S::Element {
        self.overlay.unwrap_or(effected)
    }

    /// Stacking order applied to the overlay at the next drag start.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Change the stacking order used at the next drag start.
    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Cover `effected` with the overlay and show it.
    pub fn prepare(&mut self, surface: &mut S, effected: S::Element) {
        let Some(overlay) = self.overlay else {
            return;
        };
        let bounds = Rect::from_origin_size(surface.offset(effected), surface.outer_size(effected));
        trace!(?overlay, ?bounds, z_index = self.z_index, "show shadow");
        surface.show_overlay(overlay, bounds, self.z_index);
    }

    /// Hide the overlay and commit `effected` to `last`.
    ///
    /// Does nothing without an overlay: the effected element already moved.
    pub fn finish(&mut self, surface: &mut S, effected: S::Element, last: Point) {
        let Some(overlay) = self.overlay else {
            return;
        };
        surface.hide(overlay);

        let mut signaled = false;
        (self.commit)(surface, effected, last, Done {
            signaled: &mut signaled,
        });
        if !signaled {
            warn!(?effected, "commit step returned without signaling completion");
        }
    }

    /// Hide the overlay without committing.
    pub fn hide(&mut self, surface: &mut S) {
        if let Some(overlay) = self.overlay {
            surface.hide(overlay);
        }
    }

    /// Remove the overlay from the surface. Safe to call more than once.
    pub fn destroy(&mut self, surface: &mut S) {
        if let Some(overlay) = self.overlay.take() {
            surface.remove(overlay);
        }
    }
}
