// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless, in-memory [`Surface`].
//!
//! [`MemorySurface`] keeps a small element tree with tags, ids, classes, offsets and
//! sizes, plus the overlay, interaction-lock and listener state a drag touches. It is
//! what this crate's own tests run against, and it is handy for simulating drags in
//! application tests without a real UI.
//!
//! Selectors are deliberately simple: `#id`, `.class`, `*` or a bare tag name.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_drag::memory::MemorySurface;
//! use understory_drag::surface::Surface;
//!
//! let mut surface = MemorySurface::new();
//! let list = surface.insert(surface.root(), "ul", Rect::new(0.0, 0.0, 200.0, 400.0));
//! surface.set_id(list, "list");
//! let item = surface.insert(list, "li", Rect::new(10.0, 20.0, 110.0, 70.0));
//! surface.add_class(item, "item");
//!
//! assert_eq!(surface.query("#list"), Some(list));
//! assert_eq!(surface.query(".item"), Some(item));
//! assert_eq!(surface.parent(item), Some(list));
//! assert_eq!(surface.offset(item), Point::new(10.0, 20.0));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::axis::Axis;
use crate::pointer::InputClass;
use crate::shadow::ShadowStyle;
use crate::surface::{ListenScope, ListenerId, Surface};

/// Generational handle of an element in a [`MemorySurface`].
///
/// Removing an element frees its slot; a later insert reusing the slot bumps the
/// generation, so stale handles never alias a new element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32, u32);

impl ElementId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<ElementId>,
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
    offset: Point,
    size: Size,
    visible: bool,
    z_index: i32,
    overlay: Option<ShadowStyle>,
    offset_writes: usize,
}

impl Node {
    fn new(parent: Option<ElementId>, tag: &str, bounds: Rect) -> Self {
        Self {
            parent,
            tag: tag.into(),
            id: None,
            classes: SmallVec::new(),
            offset: bounds.origin(),
            size: bounds.size(),
            visible: true,
            z_index: 0,
            overlay: None,
            offset_writes: 0,
        }
    }

    fn matches(&self, selector: &str) -> bool {
        if selector == "*" {
            return true;
        }
        if let Some(id) = selector.strip_prefix('#') {
            return self.id.as_deref() == Some(id);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return self.classes.iter().any(|c| c == class);
        }
        self.tag.eq_ignore_ascii_case(selector)
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// In-memory element tree implementing [`Surface`].
#[derive(Clone, Debug)]
pub struct MemorySurface {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: ElementId,
    listeners: HashMap<ListenerId, (InputClass, ListenScope<ElementId>)>,
    next_listener: u64,
    locked: bool,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// A surface holding only a root `html` element.
    pub fn new() -> Self {
        let mut surface = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: ElementId(0, 1),
            listeners: HashMap::new(),
            next_listener: 0,
            locked: false,
        };
        surface.root = surface.alloc(Node::new(None, "html", Rect::ZERO));
        surface
    }

    /// The root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Append an element under `parent` with the given offset rectangle.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` element slots are ever allocated.
    pub fn insert(&mut self, parent: ElementId, tag: &str, bounds: Rect) -> ElementId {
        debug_assert!(self.is_alive(parent), "parent {parent:?} is not alive");
        self.alloc(Node::new(Some(parent), tag, bounds))
    }

    /// Set the `#id` of `element`.
    pub fn set_id(&mut self, element: ElementId, id: &str) {
        if let Some(node) = self.node_mut(element) {
            node.id = Some(id.into());
        }
    }

    /// Add a `.class` to `element`.
    pub fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.into());
            }
        }
    }

    /// Move and resize `element` without counting it as an offset write.
    pub fn set_bounds(&mut self, element: ElementId, bounds: Rect) {
        if let Some(node) = self.node_mut(element) {
            node.offset = bounds.origin();
            node.size = bounds.size();
        }
    }

    /// Returns `true` if `element` refers to a live element.
    pub fn is_alive(&self, element: ElementId) -> bool {
        self.node(element).is_some()
    }

    /// Returns `true` if `element` is live and visible.
    pub fn is_visible(&self, element: ElementId) -> bool {
        self.node(element).is_some_and(|n| n.visible)
    }

    /// Stacking order of `element`; `0` when never set or not alive.
    pub fn z_index_of(&self, element: ElementId) -> i32 {
        self.node(element).map_or(0, |n| n.z_index)
    }

    /// Offset rectangle of `element`.
    pub fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.node(element).map(|n| Rect::from_origin_size(n.offset, n.size))
    }

    /// Number of [`Surface::set_offset`] calls that targeted `element`.
    pub fn offset_writes(&self, element: ElementId) -> usize {
        self.node(element).map_or(0, |n| n.offset_writes)
    }

    /// Style `element` was created with, if it is an overlay.
    pub fn overlay_style(&self, element: ElementId) -> Option<&ShadowStyle> {
        self.node(element).and_then(|n| n.overlay.as_ref())
    }

    /// Returns `true` while a drag holds the interaction lock.
    pub fn is_interaction_locked(&self) -> bool {
        self.locked
    }

    /// Number of active listener registrations.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Scope of the listener registered for `class`, if exactly one exists.
    pub fn listener_scope(&self, class: InputClass) -> Option<ListenScope<ElementId>> {
        let mut scopes = self
            .listeners
            .values()
            .filter(|(c, _)| *c == class)
            .map(|(_, scope)| *scope);
        let first = scopes.next()?;
        scopes.next().is_none().then_some(first)
    }

    fn alloc(&mut self, node: Node) -> ElementId {
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.node = Some(node);
            ElementId(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).expect("too many elements for ElementId (u32)");
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            ElementId(idx, 1)
        }
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.slots
            .get(element.idx())
            .filter(|slot| slot.generation == element.1)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.slots
            .get_mut(element.idx())
            .filter(|slot| slot.generation == element.1)
            .and_then(|slot| slot.node.as_mut())
    }

    fn live_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.node.as_ref()?;
            Some(ElementId(u32::try_from(idx).ok()?, slot.generation))
        })
    }
}

impl Surface for MemorySurface {
    type Element = ElementId;

    fn query(&self, selector: &str) -> Option<ElementId> {
        self.live_ids()
            .find(|&id| self.node(id).is_some_and(|n| n.matches(selector)))
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).and_then(|n| n.parent)
    }

    fn matches(&self, element: ElementId, selector: &str) -> bool {
        self.node(element).is_some_and(|n| n.matches(selector))
    }

    fn offset(&self, element: ElementId) -> Point {
        self.node(element).map_or(Point::ZERO, |n| n.offset)
    }

    fn set_offset(&mut self, element: ElementId, axis: Axis, value: f64) {
        if let Some(node) = self.node_mut(element) {
            match axis {
                Axis::Horizontal => node.offset.x = value,
                Axis::Vertical => node.offset.y = value,
            }
            node.offset_writes += 1;
        }
    }

    fn outer_size(&self, element: ElementId) -> Size {
        self.node(element).map_or(Size::ZERO, |n| n.size)
    }

    fn create_overlay(&mut self, style: &ShadowStyle) -> ElementId {
        let root = self.root;
        let mut node = Node::new(Some(root), "div", Rect::ZERO);
        node.visible = false;
        node.overlay = Some(*style);
        self.alloc(node)
    }

    fn remove(&mut self, element: ElementId) {
        if !self.is_alive(element) || element == self.root {
            return;
        }
        let children: Vec<ElementId> = self
            .live_ids()
            .filter(|&id| self.parent(id) == Some(element))
            .collect();
        for child in children {
            self.remove(child);
        }
        self.slots[element.idx()].node = None;
        self.free.push(element.0);
    }

    fn show_overlay(&mut self, overlay: ElementId, bounds: Rect, z_index: i32) {
        if let Some(node) = self.node_mut(overlay) {
            node.offset = bounds.origin();
            node.size = bounds.size();
            node.z_index = z_index;
            node.visible = true;
        }
    }

    fn hide(&mut self, element: ElementId) {
        if let Some(node) = self.node_mut(element) {
            node.visible = false;
        }
    }

    fn set_interaction_lock(&mut self, locked: bool) {
        self.locked = locked;
    }

    fn listen(&mut self, class: InputClass, scope: ListenScope<ElementId>) -> ListenerId {
        let id = ListenerId::new(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, (class, scope));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}
