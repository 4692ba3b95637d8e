// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle dispatcher: subscribe to drag events and honor cancellation.
//!
//! Subscribers receive a borrowed [`DragMeta`] snapshot and return a [`Flow`].
//! Every subscriber for the emitted kind runs, in subscription order; the emission
//! reports [`Flow::Cancel`] if at least one of them asked to cancel. What a
//! cancellation means is up to the caller: the drag machine ends the drag for
//! [`DragEventKind::Start`] and [`DragEventKind::Move`] and ignores it for
//! [`DragEventKind::End`].
//!
//! ```
//! use understory_drag::dispatcher::{Dispatcher, DragEventKind, Flow};
//! use understory_drag::DragMeta;
//!
//! let mut dispatcher = Dispatcher::<u32>::new();
//! dispatcher.subscribe(DragEventKind::Start, |_| Flow::Continue);
//! let id = dispatcher.subscribe(DragEventKind::Start, |meta| {
//!     if meta.handle == Some(3) { Flow::Cancel } else { Flow::Continue }
//! });
//!
//! let mut meta = DragMeta::idle(1);
//! meta.handle = Some(3);
//! assert_eq!(dispatcher.emit(DragEventKind::Start, &meta), Flow::Cancel);
//!
//! assert!(dispatcher.unsubscribe(id));
//! assert_eq!(dispatcher.emit(DragEventKind::Start, &meta), Flow::Continue);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::machine::DragMeta;

/// Lifecycle event kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragEventKind {
    /// A drag started. Cancellable.
    Start,
    /// The pointer moved during a drag. Cancellable.
    Move,
    /// A drag ended. Not cancellable.
    End,
}

/// What a subscriber wants to happen next.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Keep dragging.
    #[default]
    Continue,
    /// End the drag right away.
    Cancel,
}

impl Flow {
    /// Returns `true` for [`Flow::Cancel`].
    pub const fn is_cancel(self) -> bool {
        matches!(self, Self::Cancel)
    }
}

/// Handle returned by [`Dispatcher::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn FnMut(&DragMeta<E>) -> Flow>;

struct Subscriber<E> {
    id: SubscriptionId,
    kind: DragEventKind,
    handler: Handler<E>,
}

/// Owns lifecycle subscribers and emits snapshots to them.
pub struct Dispatcher<E> {
    subscribers: Vec<Subscriber<E>>,
    next_id: u64,
}

impl<E> fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<E> Default for Dispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Dispatcher<E> {
    /// An empty dispatcher.
    pub const fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register `handler` for events of `kind`.
    pub fn subscribe(
        &mut self,
        kind: DragEventKind,
        handler: impl FnMut(&DragMeta<E>) -> Flow + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a subscriber. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Run every subscriber of `kind` against `meta`.
    pub fn emit(&mut self, kind: DragEventKind, meta: &DragMeta<E>) -> Flow {
        let mut flow = Flow::Continue;
        for subscriber in self.subscribers.iter_mut().filter(|s| s.kind == kind) {
            if (subscriber.handler)(meta).is_cancel() {
                flow = Flow::Cancel;
            }
        }
        flow
    }

    /// Number of registered subscribers, all kinds included.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Drop every subscriber.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}
