// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Draggable`] instance: construction, input entry point and runtime toggles.

use kurbo::Point;
use smallvec::SmallVec;
use tracing::debug;

use crate::axis::{Axis, AxisConstraint};
use crate::config::DragConfig;
use crate::dispatcher::{Dispatcher, DragEventKind, Flow, SubscriptionId};
use crate::error::DragError;
use crate::machine::{DragMachine, DragMeta, DragPhase, DragSession, Handled};
use crate::pointer::{InputClass, PointerEvent};
use crate::shadow::ShadowProxy;
use crate::surface::{ElementRef, ListenScope, ListenerId, Surface};

/// Makes the children of a container draggable.
///
/// Feed every input the surface routes to the registered listeners into
/// [`Draggable::handle`]. Subscribe with [`Draggable::on`].
pub struct Draggable<S: Surface> {
    machine: DragMachine<S>,
    session: DragSession<S::Element>,
    dispatcher: Dispatcher<S::Element>,
    prevent_default: bool,
    listeners: SmallVec<[ListenerId; 3]>,
    destroyed: bool,
}

impl<S: Surface> core::fmt::Debug for Draggable<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Draggable")
            .field("machine", &self.machine)
            .field("session", &self.session)
            .field("dispatcher", &self.dispatcher)
            .field("prevent_default", &self.prevent_default)
            .field("listeners", &self.listeners)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl<S: Surface> Draggable<S> {
    /// Resolve the container, create the shadow overlay and register listeners.
    ///
    /// # Errors
    ///
    /// - [`DragError::EmptySelector`] if any configured selector is empty.
    /// - [`DragError::ContainerNotFound`] if the container selector matches nothing.
    pub fn new(surface: &mut S, config: DragConfig<S>) -> Result<Self, DragError> {
        let DragConfig {
            container,
            effected,
            handle,
            shadow,
            shadow_style,
            prevent_default,
            draggable,
            axis,
            z_index,
            commit,
        } = config;

        if [Some(&container), effected.as_ref(), handle.as_ref()]
            .into_iter()
            .flatten()
            .any(ElementRef::is_empty_selector)
        {
            return Err(DragError::EmptySelector);
        }

        let container = match container {
            ElementRef::Element(element) => element,
            ElementRef::Selector(selector) => surface
                .query(&selector)
                .ok_or(DragError::ContainerNotFound { selector })?,
        };
        let effected = effected.unwrap_or(ElementRef::Element(container));
        let handle = handle.unwrap_or_else(|| effected.clone());

        let proxy = ShadowProxy::new(surface, shadow.then_some(&shadow_style), commit, z_index);
        let machine = DragMachine::new(
            effected,
            handle,
            AxisConstraint::parse(&axis),
            proxy,
            draggable,
        );

        let listeners = SmallVec::from_buf([
            surface.listen(InputClass::Start, ListenScope::Element(container)),
            surface.listen(InputClass::Move, ListenScope::Global),
            surface.listen(InputClass::End, ListenScope::Global),
        ]);

        debug!(?container, shadow, draggable, axis = %axis, "draggable ready");
        Ok(Self {
            machine,
            session: DragSession::new(container),
            dispatcher: Dispatcher::new(),
            prevent_default,
            listeners,
            destroyed: false,
        })
    }

    /// Process one input. Inert after [`Draggable::destroy`].
    pub fn handle(&mut self, surface: &mut S, event: &PointerEvent<S::Element>) -> Handled {
        let mut handled = Handled::default();
        if self.destroyed {
            return handled;
        }

        let Self {
            machine,
            session,
            dispatcher,
            ..
        } = self;
        let transitioned = match event.kind.class() {
            InputClass::Start => machine.start(session, surface, dispatcher, event, &mut handled),
            InputClass::Move => machine.update(session, surface, dispatcher, event, &mut handled),
            InputClass::End => machine.end(session, surface, dispatcher, event, &mut handled),
        };
        handled.prevent_default = transitioned && self.prevent_default;
        handled
    }

    /// Subscribe to a lifecycle event. Returning [`Flow::Cancel`] from a
    /// [`DragEventKind::Start`] or [`DragEventKind::Move`] subscriber ends the drag
    /// immediately.
    pub fn on(
        &mut self,
        kind: DragEventKind,
        handler: impl FnMut(&DragMeta<S::Element>) -> Flow + 'static,
    ) -> SubscriptionId {
        self.dispatcher.subscribe(kind, handler)
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    /// Allow new drags to start.
    pub fn enable(&mut self) -> &mut Self {
        self.machine.enabled = true;
        self
    }

    /// Refuse new drags. A drag in progress runs to completion.
    pub fn disable(&mut self) -> &mut Self {
        self.machine.enabled = false;
        self
    }

    /// Returns `true` if new drags may start.
    pub fn is_enabled(&self) -> bool {
        self.machine.enabled
    }

    /// Ask the host to suppress default actions of handled inputs.
    pub fn prevent_default(&mut self) -> &mut Self {
        self.prevent_default = true;
        self
    }

    /// Let the host run default actions of handled inputs.
    pub fn allow_default(&mut self) -> &mut Self {
        self.prevent_default = false;
        self
    }

    /// Returns `true` if handled inputs report `prevent_default`.
    pub fn prevents_default(&self) -> bool {
        self.prevent_default
    }

    /// Whether horizontal movement is applied.
    pub fn horizontal(&self) -> bool {
        self.machine.axes.allows(Axis::Horizontal)
    }

    /// Enable or disable horizontal movement. Takes effect on the next move.
    pub fn set_horizontal(&mut self, enabled: bool) -> &mut Self {
        self.machine.axes.set(Axis::Horizontal, enabled);
        self
    }

    /// Whether vertical movement is applied.
    pub fn vertical(&self) -> bool {
        self.machine.axes.allows(Axis::Vertical)
    }

    /// Enable or disable vertical movement. Takes effect on the next move.
    pub fn set_vertical(&mut self, enabled: bool) -> &mut Self {
        self.machine.axes.set(Axis::Vertical, enabled);
        self
    }

    /// Stacking order of the shadow overlay.
    pub fn z_index(&self) -> i32 {
        self.machine.shadow.z_index()
    }

    /// Change the overlay stacking order. Applies from the next drag start.
    pub fn set_z_index(&mut self, z_index: i32) -> &mut Self {
        self.machine.shadow.set_z_index(z_index);
        self
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.session.phase()
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    /// Read-only view of the session.
    pub fn session(&self) -> &DragSession<S::Element> {
        &self.session
    }

    /// The container element.
    pub fn container(&self) -> S::Element {
        self.session.container()
    }

    /// The shadow overlay, if shadow mode is on and the instance is alive.
    pub fn shadow_element(&self) -> Option<S::Element> {
        self.machine.shadow.overlay()
    }

    /// Offset the move target had when the current drag started.
    pub fn start_offset(&self) -> Point {
        self.machine.offsets.start()
    }

    /// Offset most recently applied to the move target.
    pub fn last_offset(&self) -> Point {
        self.machine.offsets.last()
    }

    /// Returns `true` once [`Draggable::destroy`] ran.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Detach listeners, remove the overlay and drop subscribers.
    ///
    /// A drag in progress is dropped without a [`DragEventKind::End`] and the
    /// interaction lock is released. The instance is inert afterwards. Calling this
    /// again does nothing.
    pub fn destroy(&mut self, surface: &mut S) {
        if self.destroyed {
            return;
        }
        self.machine.abort(&mut self.session, surface);
        for id in self.listeners.drain(..) {
            surface.unlisten(id);
        }
        self.machine.shadow.destroy(surface);
        self.dispatcher.clear();
        self.destroyed = true;
        debug!(container = ?self.session.container(), "draggable destroyed");
    }
}
