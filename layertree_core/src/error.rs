// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fatal errors.
//!
//! Only tree construction can fail outright. Rule violations found later are
//! collected as [`Finding`](crate::validate::Finding)s instead.

use alloc::string::String;

use thiserror::Error;

/// The flat input cannot be turned into a single rooted tree.
///
/// No later stage runs when this is returned; the caller must reject the
/// input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The input contains no layers at all.
    #[error("layer list is empty")]
    Empty,
    /// Every layer names a parent, so there is nothing to start from.
    #[error("no layer without a parent reference; cannot determine the top layer")]
    NoRoot,
    /// A parent reference names a layer that does not exist.
    #[error("layer `{layer}` references unknown parent `{parent}`")]
    DanglingParent {
        /// Layer holding the reference (empty if unnamed).
        layer: String,
        /// The missing parent name.
        parent: String,
    },
    /// A parent reference names a layer that occurs more than once.
    #[error("parent reference `{parent}` matches more than one layer")]
    AmbiguousParent {
        /// The ambiguous parent name.
        parent: String,
    },
    /// Following parent references revisits a layer.
    #[error("parent references of layer `{layer}` form a cycle")]
    Cycle {
        /// A layer on (or hanging from) the cycle.
        layer: String,
    },
}
