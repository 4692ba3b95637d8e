// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported while constructing a [`Draggable`](crate::Draggable).
//!
//! Nothing after construction returns an error: malformed input degrades to
//! `NaN` offsets and out-of-order input is ignored.

use alloc::string::String;

/// Construction-time failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    /// The container selector matched nothing on the surface.
    #[error("no element matches container selector `{selector}`")]
    ContainerNotFound {
        /// The selector that was queried.
        selector: String,
    },
    /// A container, effected or handle selector was the empty string.
    #[error("element selectors must not be empty")]
    EmptySelector,
}
