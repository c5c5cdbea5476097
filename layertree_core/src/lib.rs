// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated, navigable layer-tree model for map-service configurations.
//!
//! `layertree_core` turns a declarative description of map layers into a
//! rooted hierarchy that downstream artifact generators (capabilities
//! documents, legends, feature-info schemas, proxy routing tables) can query.
//! It is `no_std` compatible (with `alloc`), performs no I/O, and keeps no
//! state between evaluations.
//!
//! # Architecture
//!
//! Every evaluation is a one-way pass over freshly built data:
//!
//! ```text
//!   LayerInput (flat list │ nested tree)
//!       │
//!       ▼
//!   TreeBuilder::build() ──► LayerSpec ──► LayerTree (arena)
//!                                              │
//!                 ┌────────────────────────────┘
//!                 ▼
//!   classify (roles) ──► resolve (effective boxes) ──► validate ──► Report
//!                                              │
//!                 ┌────────────────────────────┘
//!                 ▼
//!   TreeConsumer::consume() (capabilities, legends, routing, ...)
//! ```
//!
//! **[`spec`]** — Serde input records: [`LayerSpec`](spec::LayerSpec) for the
//! nested shape, [`FlatLayerSpec`](spec::FlatLayerSpec) for the legacy flat
//! shape where each record names its parent.
//!
//! **[`build`]** — [`TreeBuilder`](build::TreeBuilder) resolves flat parent
//! references into a nested tree, or fails with a
//! [`StructuralError`](error::StructuralError).
//!
//! **[`layer`]** — Struct-of-arrays [`LayerTree`](layer::LayerTree) with index
//! handles. Roles (top, group, data) and effective bounding boxes are
//! computed once when the tree is assembled.
//!
//! **[`validate`]** — Batch rule engine producing a
//! [`Report`](validate::Report) of every error and warning in one pass.
//!
//! **[`views`]** — Read-only queries shared by downstream generators.
//!
//! **[`pipeline`]** — [`evaluate`](pipeline::evaluate) runs all stages.
//!
//! **[`config`]** / **[`service`]** — Whole-tree flags and the service-kind
//! capability switch.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and the
//! zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod bbox;
pub mod build;
pub mod config;
pub mod consumer;
pub mod data;
pub mod error;
pub mod layer;
pub mod pipeline;
pub mod service;
pub mod spec;
pub mod style;
pub mod trace;
pub mod validate;
pub mod views;
