// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host surface: element queries, geometry, overlays and listener registration.
//!
//! The drag machine never talks to a document or widget tree directly. Everything it
//! needs from the host goes through [`Surface`], so the same machine runs against a
//! browser DOM binding, a retained widget tree, or the headless
//! [`MemorySurface`](crate::memory::MemorySurface) used in tests.
//!
//! Element handles are small copyable values. The machine stores them for the length
//! of a drag but never owns the element they refer to.

use alloc::string::String;
use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::axis::Axis;
use crate::pointer::InputClass;
use crate::shadow::ShadowStyle;

/// Identifier of a listener registration, handed out by [`Surface::listen`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a host-specific raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenScope<E> {
    /// Only inputs targeting this element or its descendants.
    Element(E),
    /// Every input on the surface, wherever the pointer is.
    Global,
}

/// Capabilities the drag machine needs from its host.
///
/// Offsets are the element's position relative to its offset parent, in the same
/// units as pointer client coordinates.
pub trait Surface: 'static {
    /// Handle to an element on this surface.
    type Element: Copy + Eq + fmt::Debug + 'static;

    /// First element matching `selector`, in document order.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// Parent of `element`, or `None` at the root.
    fn parent(&self, element: Self::Element) -> Option<Self::Element>;

    /// Returns `true` if `element` matches `selector`.
    fn matches(&self, element: Self::Element, selector: &str) -> bool;

    /// Current left/top offset of `element`.
    fn offset(&self, element: Self::Element) -> Point;

    /// Set one component of the offset of `element`.
    fn set_offset(&mut self, element: Self::Element, axis: Axis, value: f64);

    /// Outer width/height of `element`, borders included.
    fn outer_size(&self, element: Self::Element) -> Size;

    /// Create a hidden, absolutely positioned overlay element styled with `style`.
    fn create_overlay(&mut self, style: &ShadowStyle) -> Self::Element;

    /// Remove `element` from the surface.
    fn remove(&mut self, element: Self::Element);

    /// Place `overlay` at `bounds`, stack it at `z_index` and make it visible.
    fn show_overlay(&mut self, overlay: Self::Element, bounds: Rect, z_index: i32);

    /// Hide `element`.
    fn hide(&mut self, element: Self::Element);

    /// Toggle the drag cursor and text-selection suppression on the whole surface.
    fn set_interaction_lock(&mut self, locked: bool);

    /// Start routing inputs of `class` within `scope` to the drag machine.
    fn listen(&mut self, class: InputClass, scope: ListenScope<Self::Element>) -> ListenerId;

    /// Undo a [`Surface::listen`] registration.
    fn unlisten(&mut self, id: ListenerId);
}

/// Reference to an element: either a concrete handle or a selector.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementRef<E> {
    /// A concrete element.
    Element(E),
    /// Any element matching this selector.
    Selector(String),
}

impl<E: Copy + Eq> ElementRef<E> {
    /// Reference a concrete element.
    pub const fn element(element: E) -> Self {
        Self::Element(element)
    }

    /// Reference elements by selector.
    pub fn selector(selector: impl Into<String>) -> Self {
        Self::Selector(selector.into())
    }

    /// Returns `true` if `element` is what this reference designates.
    pub fn matches<S>(&self, surface: &S, element: E) -> bool
    where
        S: Surface<Element = E> + ?Sized,
    {
        match self {
            Self::Element(e) => *e == element,
            Self::Selector(selector) => surface.matches(element, selector),
        }
    }

    pub(crate) fn is_empty_selector(&self) -> bool {
        matches!(self, Self::Selector(s) if s.is_empty())
    }
}

impl<E> From<&str> for ElementRef<E> {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.into())
    }
}

impl<E> From<String> for ElementRef<E> {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

/// Nearest ancestor-or-self of `from` that `reference` designates.
pub fn closest<S>(surface: &S, from: S::Element, reference: &ElementRef<S::Element>) -> Option<S::Element>
where
    S: Surface + ?Sized,
{
    let mut current = Some(from);
    while let Some(element) = current {
        if reference.matches(surface, element) {
            return Some(element);
        }
        current = surface.parent(element);
    }
    None
}

/// Like [`closest`], but the walk stops at `boundary` (inclusive).
///
/// Returns `None` when `from` is not `boundary` or one of its descendants. This is
/// the delegation rule used for handles: a handle must live inside the container.
pub fn closest_within<S>(
    surface: &S,
    from: S::Element,
    reference: &ElementRef<S::Element>,
    boundary: S::Element,
) -> Option<S::Element>
where
    S: Surface + ?Sized,
{
    let mut current = Some(from);
    while let Some(element) = current {
        if reference.matches(surface, element) {
            // A match outside the boundary does not count.
            return is_within(surface, element, boundary).then_some(element);
        }
        if element == boundary {
            return None;
        }
        current = surface.parent(element);
    }
    None
}

/// Returns `true` if `element` is `ancestor` or one of its descendants.
pub fn is_within<S>(surface: &S, element: S::Element, ancestor: S::Element) -> bool
where
    S: Surface + ?Sized,
{
    let mut current = Some(element);
    while let Some(e) = current {
        if e == ancestor {
            return true;
        }
        current = surface.parent(e);
    }
    false
}
