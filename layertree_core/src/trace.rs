// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the evaluation pipeline.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`evaluate`](crate::pipeline::evaluate) calls at each stage. All method
//! bodies default to no-ops, so implementing only the events you care about
//! is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.

use crate::layer::{LayerRole, LayerTree};
use crate::validate::Finding;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which pipeline stage is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Flat-to-nested conversion and arena layout.
    Build,
    /// Role assignment.
    Classify,
    /// Effective bounding-box resolution.
    Resolve,
    /// Rule evaluation.
    Validate,
}

impl Stage {
    /// All stages, in pipeline order.
    pub const ALL: [Self; 4] = [Self::Build, Self::Classify, Self::Resolve, Self::Validate];

    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Classify => "classify",
            Self::Resolve => "resolve",
            Self::Validate => "validate",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Marks the beginning of a stage.
#[derive(Clone, Copy, Debug)]
pub struct StageBeginEvent {
    /// Which stage is starting.
    pub stage: Stage,
}

/// Marks the end of a stage.
#[derive(Clone, Copy, Debug)]
pub struct StageEndEvent {
    /// Which stage is ending.
    pub stage: Stage,
    /// Layers processed, or findings produced for [`Stage::Validate`].
    pub items: usize,
}

/// Shape summary of a freshly classified and resolved tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeBuiltEvent {
    /// Total number of layers.
    pub layers: usize,
    /// Number of group layers.
    pub groups: usize,
    /// Number of data layers.
    pub data: usize,
    /// Deepest layer's distance from the top.
    pub max_depth: usize,
    /// Number of coordinate systems with effective boxes.
    pub referenced_crs: usize,
}

impl From<&LayerTree> for TreeBuiltEvent {
    fn from(tree: &LayerTree) -> Self {
        let mut event = Self {
            layers: tree.len(),
            referenced_crs: tree.referenced_crs().len(),
            ..Self::default()
        };
        for id in tree.flatten() {
            match tree.role(id) {
                LayerRole::Top => {}
                LayerRole::Group => event.groups += 1,
                LayerRole::Data => event.data += 1,
            }
            event.max_depth = event.max_depth.max(tree.depth(id));
        }
        event
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the evaluation pipeline.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the beginning of a stage.
    fn on_stage_begin(&mut self, e: &StageBeginEvent) {
        _ = e;
    }

    /// Called at the end of a stage.
    fn on_stage_end(&mut self, e: &StageEndEvent) {
        _ = e;
    }

    /// Called once the tree is classified and resolved.
    fn on_tree_built(&mut self, e: &TreeBuiltEvent) {
        _ = e;
    }

    /// Called for every error and warning, in report order.
    fn on_finding(&mut self, f: &Finding) {
        _ = f;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`StageBeginEvent`].
    #[inline]
    pub fn stage_begin(&mut self, stage: Stage) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_stage_begin(&StageBeginEvent { stage });
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = stage;
        }
    }

    /// Emits a [`StageEndEvent`].
    #[inline]
    pub fn stage_end(&mut self, stage: Stage, items: usize) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_stage_end(&StageEndEvent { stage, items });
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (stage, items);
        }
    }

    /// Emits a [`TreeBuiltEvent`] summarizing `tree`.
    ///
    /// The summary walks the whole tree, so it is only computed when a sink
    /// is attached.
    #[inline]
    pub fn tree_built(&mut self, tree: &LayerTree) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tree_built(&TreeBuiltEvent::from(tree));
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = tree;
        }
    }

    /// Emits a finding.
    #[inline]
    pub fn finding(&mut self, f: &Finding) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_finding(f);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = f;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::bbox::{BoundingBox, Crs};
    use crate::spec::{LayerAttributes, LayerSpec};

    use super::*;

    fn sample_tree() -> LayerTree {
        let mut top = LayerAttributes::named("top");
        top.bounding_boxes = vec![BoundingBox::new("EPSG:4326", 3.0, 50.0, 8.0, 54.0)];
        LayerTree::from_spec(
            LayerSpec::group(
                top,
                vec![
                    LayerSpec::group(
                        LayerAttributes::named("g"),
                        vec![LayerSpec::leaf(LayerAttributes::named("d1"))],
                    ),
                    LayerSpec::leaf(LayerAttributes::named("d2")),
                ],
            ),
            Crs::system_default(),
        )
    }

    #[test]
    fn tree_built_event_counts_roles() {
        let e = TreeBuiltEvent::from(&sample_tree());
        assert_eq!(e.layers, 4);
        assert_eq!(e.groups, 1);
        assert_eq!(e.data, 2);
        assert_eq!(e.max_depth, 2);
        assert_eq!(e.referenced_crs, 2);
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_stage_begin(&StageBeginEvent {
            stage: Stage::Build,
        });
        sink.on_stage_end(&StageEndEvent {
            stage: Stage::Build,
            items: 0,
        });
        sink.on_tree_built(&TreeBuiltEvent::default());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.stage_begin(Stage::Validate);
        tracer.stage_end(Stage::Validate, 3);
        tracer.tree_built(&sample_tree());
    }

    #[test]
    fn stage_labels() {
        let labels = Stage::ALL.map(Stage::as_str);
        assert_eq!(labels, ["build", "classify", "resolve", "validate"]);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            stages: Vec<Stage>,
        }
        impl TraceSink for RecordingSink {
            fn on_stage_begin(&mut self, e: &StageBeginEvent) {
                self.stages.push(e.stage);
            }
        }

        let mut sink = RecordingSink { stages: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.stage_begin(Stage::Classify);
        drop(tracer);
        assert_eq!(sink.stages, &[Stage::Classify]);
    }
}
