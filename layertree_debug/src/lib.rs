// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, tree outlines, and JSON validation reports for layertree
//! diagnostics.
//!
//! - [`pretty::PrettyPrintSink`] — a [`TraceSink`](layertree_core::trace::TraceSink)
//!   writing one human-readable line per pipeline event.
//! - [`outline::Outline`] — a [`TreeConsumer`](layertree_core::consumer::TreeConsumer)
//!   rendering an evaluated tree as indented text.
//! - [`report::export`] — writes an evaluation's findings as JSON, the payload
//!   an admission check returns.

pub mod outline;
pub mod pretty;
pub mod report;
