// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag --heading-base-level=0

//! Understory Drag: a headless drag interaction state machine.
//!
//! This crate turns raw mouse and multi-touch input into a normalized drag
//! lifecycle: a guarded start, a stream of moves and a terminal end, each carrying
//! the same positional metadata. It handles the parts every "make this draggable"
//! widget re-implements:
//!
//! - [`pointer`]: mouse/touch normalization into one canonical sample.
//! - [`machine`]: the `Idle`/`Dragging` state machine, its guards and the session record.
//! - [`offset`] and [`axis`]: per-axis offset math.
//! - [`shadow`]: an optional overlay proxy that moves instead of the real element,
//!   which is then committed once when the drag ends.
//! - [`dispatcher`]: lifecycle subscriptions with synchronous cancellation.
//!
//! ## Host integration
//!
//! The crate does not know about any particular document model. Everything it
//! needs (element queries, geometry, overlays, listener registration) goes through
//! the [`Surface`](surface::Surface) trait. [`memory::MemorySurface`] is a
//! headless implementation used by the tests and handy for simulations.
//!
//! A [`Draggable`] registers three listeners when built: starts on the container,
//! moves and ends on the whole surface. Hosts forward matching inputs to
//! [`Draggable::handle`], which returns a [`Handled`] telling them what happened and
//! whether to suppress the input's default action.
//!
//! ## Element roles
//!
//! ```text
//! <ul>            container
//!   <li>          effected (moves)
//!     <header>    handle (starts the drag)
//!     <section>
//!   </li>
//!   ...
//! </ul>
//! ```
//!
//! The effected and handle elements are resolved again on every start, so one
//! container can host many independently draggable items.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_drag::memory::MemorySurface;
//! use understory_drag::pointer::{InputKind, PointerEvent};
//! use understory_drag::{DragConfig, DragEventKind, Draggable, Flow};
//!
//! let mut surface = MemorySurface::new();
//! let list = surface.insert(surface.root(), "ul", Rect::new(0.0, 0.0, 400.0, 400.0));
//! surface.set_id(list, "list");
//! let item = surface.insert(list, "li", Rect::new(10.0, 20.0, 110.0, 70.0));
//! surface.add_class(item, "item");
//!
//! let config = DragConfig::new("#list").effected(".item").shadow(false);
//! let mut drag = Draggable::new(&mut surface, config).unwrap();
//! drag.on(DragEventKind::End, |meta| {
//!     assert_eq!(meta.end, Point::new(130.0, 140.0));
//!     Flow::Continue
//! });
//!
//! let down = PointerEvent::mouse(InputKind::MouseDown, Point::new(100.0, 100.0), 0)
//!     .with_target(item);
//! let moved = PointerEvent::mouse(InputKind::MouseMove, Point::new(130.0, 140.0), 16);
//! let up = PointerEvent::mouse(InputKind::MouseUp, Point::new(131.0, 141.0), 32);
//!
//! assert_eq!(drag.handle(&mut surface, &down).emitted.as_slice(), &[DragEventKind::Start]);
//! let _ = drag.handle(&mut surface, &moved);
//! let _ = drag.handle(&mut surface, &up);
//!
//! assert_eq!(surface.bounds(item).unwrap().origin(), Point::new(40.0, 60.0));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forward `std` to dependencies.
//! - `libm`: `no_std` float support for `kurbo` and `peniko`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod axis;
pub mod config;
pub mod dispatcher;
mod draggable;
pub mod error;
pub mod machine;
pub mod memory;
pub mod offset;
pub mod pointer;
pub mod shadow;
pub mod surface;

pub use config::DragConfig;
pub use dispatcher::{DragEventKind, Flow, SubscriptionId};
pub use draggable::Draggable;
pub use error::DragError;
pub use machine::{DragMeta, DragPhase, DragSession, Handled};
