// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree data model.
//!
//! A *layer* is a node in a map service's layer hierarchy. Each layer has:
//!
//! - An identity ([`LayerId`]) — an index handle into the tree's arrays.
//! - Topology — parent, first-child, and sibling links forming an ordered tree.
//! - **Declared attributes** copied from the input
//!   ([`LayerAttributes`](crate::spec::LayerAttributes)).
//! - **Computed properties** produced when the tree is assembled:
//!   the [`LayerRole`] (top, group, data) and the effective bounding box per
//!   coordinate system ([`EffectiveBox`]).
//!
//! Layers are stored in struct-of-arrays layout in pre-order, so the root is
//! always slot 0 and every parent precedes its children. The tree is built
//! once per evaluation and never mutated afterwards.
//!
//! # Computed properties
//!
//! - **Role** — assigned root-first: the root is [`LayerRole::Top`] even when
//!   it has no children, any other node with children is
//!   [`LayerRole::Group`], and the remaining leaves are [`LayerRole::Data`].
//! - **Effective boxes** — for every coordinate system referenced anywhere in
//!   the tree: the node's own declared box, else the nearest ancestor's, else
//!   (primary coordinate system only) the built-in default extent.

mod classify;
mod id;
mod resolve;
mod traverse;
mod tree;

pub use classify::LayerRole;
pub use id::{INVALID, LayerId};
pub use resolve::{BoxSource, EffectiveBox};
pub use traverse::{Children, PreOrder};
pub use tree::LayerTree;
