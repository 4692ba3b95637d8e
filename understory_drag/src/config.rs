// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draggable configuration.
//!
//! | Option | Default |
//! |---|---|
//! | container | required |
//! | effected | the container |
//! | handle | the effected reference |
//! | shadow | `true` |
//! | shadow style | [`ShadowStyle::default`] |
//! | prevent default | `true` |
//! | draggable | `true` |
//! | axis | [`DEFAULT_AXIS`] |
//! | z-index | [`DEFAULT_Z_INDEX`] |
//! | commit step | [`default_commit`] |
//!
//! ```
//! use understory_drag::DragConfig;
//! use understory_drag::memory::MemorySurface;
//!
//! let config = DragConfig::<MemorySurface>::new("#list")
//!     .effected(".item")
//!     .handle(".grip")
//!     .axis("y")
//!     .shadow(false);
//! assert_eq!(config.axis_str(), "y");
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use kurbo::Point;

use crate::shadow::{CommitStep, Done, ShadowStyle, default_commit};
use crate::surface::{ElementRef, Surface};

/// Axis string used when none is configured: both axes.
pub const DEFAULT_AXIS: &str = "xy";

/// Proxy stacking order used when none is configured.
pub const DEFAULT_Z_INDEX: i32 = 9999;

/// Options for a [`Draggable`](crate::Draggable). Consumed at construction.
pub struct DragConfig<S: Surface> {
    pub(crate) container: ElementRef<S::Element>,
    pub(crate) effected: Option<ElementRef<S::Element>>,
    pub(crate) handle: Option<ElementRef<S::Element>>,
    pub(crate) shadow: bool,
    pub(crate) shadow_style: ShadowStyle,
    pub(crate) prevent_default: bool,
    pub(crate) draggable: bool,
    pub(crate) axis: String,
    pub(crate) z_index: i32,
    pub(crate) commit: CommitStep<S>,
}

impl<S: Surface> fmt::Debug for DragConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragConfig")
            .field("container", &self.container)
            .field("effected", &self.effected)
            .field("handle", &self.handle)
            .field("shadow", &self.shadow)
            .field("shadow_style", &self.shadow_style)
            .field("prevent_default", &self.prevent_default)
            .field("draggable", &self.draggable)
            .field("axis", &self.axis)
            .field("z_index", &self.z_index)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> DragConfig<S> {
    /// Defaults for everything but the container.
    pub fn new(container: impl Into<ElementRef<S::Element>>) -> Self {
        Self {
            container: container.into(),
            effected: None,
            handle: None,
            shadow: true,
            shadow_style: ShadowStyle::default(),
            prevent_default: true,
            draggable: true,
            axis: DEFAULT_AXIS.into(),
            z_index: DEFAULT_Z_INDEX,
            commit: Box::new(default_commit::<S>),
        }
    }

    /// Config for a concrete container element.
    pub fn for_element(container: S::Element) -> Self {
        Self::new(ElementRef::Element(container))
    }

    /// The element that moves: nearest ancestor-or-self of the pointer target
    /// matching this reference.
    pub fn effected(mut self, effected: impl Into<ElementRef<S::Element>>) -> Self {
        self.effected = Some(effected.into());
        self
    }

    /// The element that starts a drag; must be inside the container.
    pub fn handle(mut self, handle: impl Into<ElementRef<S::Element>>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    /// Move a shadow overlay during the drag and commit the real element at the end.
    pub fn shadow(mut self, shadow: bool) -> Self {
        self.shadow = shadow;
        self
    }

    /// Style of the shadow overlay.
    pub fn shadow_style(mut self, style: ShadowStyle) -> Self {
        self.shadow_style = style;
        self
    }

    /// Ask the host to suppress default actions for handled inputs.
    pub fn prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = prevent;
        self
    }

    /// When `false`, lifecycle events still fire but no offsets are written.
    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Axis string; see [`AxisConstraint::parse`](crate::axis::AxisConstraint::parse).
    pub fn axis(mut self, axis: impl Into<String>) -> Self {
        self.axis = axis.into();
        self
    }

    /// Stacking order of the shadow overlay.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Replace the step that moves the effected element when a shadowed drag ends.
    pub fn commit_with(
        mut self,
        commit: impl FnMut(&mut S, S::Element, Point, Done<'_>) + 'static,
    ) -> Self {
        self.commit = Box::new(commit);
        self
    }

    /// The configured axis string.
    pub fn axis_str(&self) -> &str {
        &self.axis
    }
}
