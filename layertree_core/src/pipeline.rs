// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-call evaluation: build, classify, resolve, validate.
//!
//! ```
//! use layertree_core::config::TreeConfig;
//! use layertree_core::pipeline::evaluate;
//! use layertree_core::spec::LayerInput;
//! use layertree_core::trace::Tracer;
//!
//! let input: LayerInput = serde_json::from_str(
//!     r#"[{"name": "a", "title": "A", "abstract": "a", "keywords": []},
//!         {"name": "b", "group": "a", "title": "B", "abstract": "b", "keywords": [],
//!          "data": {"tif": {"blobKey": "b.tif"}}}]"#,
//! )
//! .unwrap();
//! let evaluation = evaluate(input, &TreeConfig::default(), &mut Tracer::none()).unwrap();
//! assert!(evaluation.is_accepted());
//! assert_eq!(evaluation.tree.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::TreeConfig;
use crate::consumer::TreeConsumer;
use crate::error::StructuralError;
use crate::layer::LayerTree;
use crate::spec::{LayerAttributes, LayerInput};
use crate::trace::{Stage, Tracer};
use crate::validate::{Report, validate};

/// A classified, resolved tree together with its validation report.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// The evaluated tree.
    pub tree: LayerTree,
    /// Every error and warning found.
    pub report: Report,
}

impl Evaluation {
    /// Returns whether validation found no errors.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.report.is_accepted()
    }

    /// Hands the tree to each consumer, in order, if it was accepted.
    ///
    /// Returns whether the consumers ran.
    pub fn publish(&self, consumers: &mut [&mut dyn TreeConsumer]) -> bool {
        if !self.is_accepted() {
            return false;
        }
        for consumer in consumers {
            consumer.consume(&self.tree);
        }
        true
    }
}

/// Evaluates `input` against `config`.
///
/// A flat input with several parentless records gets an unnamed, empty top
/// layer; use [`evaluate_with_top`] to describe it.
///
/// # Errors
///
/// Returns a [`StructuralError`] if a flat input cannot be turned into a
/// single rooted tree. Rule violations are reported in
/// [`Evaluation::report`] instead.
pub fn evaluate(
    input: LayerInput,
    config: &TreeConfig,
    tracer: &mut Tracer<'_>,
) -> Result<Evaluation, StructuralError> {
    evaluate_with_top(input, None, config, tracer)
}

/// Evaluates `input`, using `top` for a synthesized top layer.
///
/// # Errors
///
/// See [`evaluate`].
pub fn evaluate_with_top(
    input: LayerInput,
    top: Option<LayerAttributes>,
    config: &TreeConfig,
    tracer: &mut Tracer<'_>,
) -> Result<Evaluation, StructuralError> {
    tracer.stage_begin(Stage::Build);
    let spec = input
        .into_nested(top)
        .inspect_err(|_| tracer.stage_end(Stage::Build, 0))?;
    let mut tree = LayerTree::assemble(spec, config.primary_crs.clone());
    tracer.stage_end(Stage::Build, tree.len());

    tracer.stage_begin(Stage::Classify);
    tree.classify();
    tracer.stage_end(Stage::Classify, tree.len());

    tracer.stage_begin(Stage::Resolve);
    tree.resolve_bounding_boxes();
    tracer.stage_end(Stage::Resolve, tree.len());
    tracer.tree_built(&tree);

    tracer.stage_begin(Stage::Validate);
    let report = validate(&tree, config);
    for finding in report.iter() {
        tracer.finding(finding);
    }
    tracer.stage_end(Stage::Validate, report.len());

    Ok(Evaluation { tree, report })
}

/// A complete service description: flags, optional top-layer fields and the
/// layers in either input shape.
///
/// ```json
/// { "config": { "primaryCrs": "EPSG:28992" },
///   "top": { "title": "Service", "abstract": "...", "keywords": [] },
///   "layers": [ { "name": "a" }, { "name": "b", "group": "a" } ] }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescription {
    /// Whole-tree flags.
    #[serde(default)]
    pub config: TreeConfig,
    /// Fields of a synthesized top layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<LayerAttributes>,
    /// The layers.
    pub layers: LayerInput,
}

impl ServiceDescription {
    /// Evaluates the described layers against the described flags.
    ///
    /// # Errors
    ///
    /// See [`evaluate`].
    pub fn evaluate(self, tracer: &mut Tracer<'_>) -> Result<Evaluation, StructuralError> {
        evaluate_with_top(self.layers, self.top, &self.config, tracer)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::bbox::{BoundingBox, Crs};
    use crate::data::{DataBinding, Raster};
    use crate::layer::{BoxSource, LayerRole};
    use crate::spec::FlatLayerSpec;
    use crate::validate::Rule;

    use super::*;

    fn described(name: &str) -> LayerAttributes {
        let mut attrs = LayerAttributes::named(name);
        attrs.title = Some(name.into());
        attrs.abstract_ = Some(name.into());
        attrs.keywords = Some(vec![]);
        attrs
    }

    fn data(name: &str) -> LayerAttributes {
        let mut attrs = described(name);
        attrs.data = Some(DataBinding::Raster(Raster::default()));
        attrs
    }

    fn flat() -> Vec<FlatLayerSpec> {
        let mut b = described("B");
        b.bounding_boxes = vec![BoundingBox::new("EPSG:4326", 4.0, 51.0, 6.0, 53.0)];
        vec![
            FlatLayerSpec::root(described("A")),
            FlatLayerSpec::root(b),
            FlatLayerSpec::child_of("B", data("C")),
            FlatLayerSpec::child_of("A", data("D")),
        ]
    }

    #[test]
    fn flat_input_end_to_end() {
        let top = described("ignored");
        let eval = evaluate_with_top(
            flat().into(),
            Some(top),
            &TreeConfig::default(),
            &mut Tracer::none(),
        )
        .unwrap();
        assert!(eval.is_accepted(), "{:?}", eval.report);

        let tree = &eval.tree;
        assert_eq!(tree.name(tree.root()), None, "synthesized top is unnamed");
        assert_eq!(tree.attributes(tree.root()).title.as_deref(), Some("ignored"));
        let kids: Vec<_> = tree
            .children(tree.root())
            .map(|id| tree.name(id).unwrap())
            .collect();
        assert_eq!(kids, vec!["A", "B"]);

        let b = tree.find_by_name("B").unwrap();
        let c = tree.find_by_name("C").unwrap();
        assert_eq!(tree.role(c), LayerRole::Data);
        let eff = tree
            .effective_bounding_box(c, &Crs::new("EPSG:4326"))
            .unwrap();
        assert_eq!(eff.source, BoxSource::Inherited(b));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let config = TreeConfig::default();
        let first = evaluate(flat().into(), &config, &mut Tracer::none()).unwrap();
        let second = evaluate(flat().into(), &config, &mut Tracer::none()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn structural_errors_short_circuit() {
        let input = vec![
            FlatLayerSpec::root(described("A")),
            FlatLayerSpec::child_of("missing", data("B")),
        ];
        let err = evaluate(input.into(), &TreeConfig::default(), &mut Tracer::none()).unwrap_err();
        assert!(matches!(err, StructuralError::DanglingParent { .. }));
    }

    #[test]
    fn rejected_tree_is_not_published() {
        let mut bad = data("D");
        bad.title = None;
        let input = vec![FlatLayerSpec::root(described("A")), FlatLayerSpec::child_of("A", bad)];
        let eval = evaluate(input.into(), &TreeConfig::default(), &mut Tracer::none()).unwrap();
        assert_eq!(
            eval.report.iter().map(|f| f.rule).collect::<Vec<_>>(),
            vec![Rule::RequiredWhenVisible]
        );

        let mut ran = false;
        let mut consumer = |_: &LayerTree| ran = true;
        let dyn_consumer: &mut dyn TreeConsumer = &mut consumer;
        assert!(!eval.publish(&mut [dyn_consumer]));
        assert!(!ran);
    }

    #[test]
    fn accepted_tree_is_published() {
        let input = vec![
            FlatLayerSpec::root(described("A")),
            FlatLayerSpec::child_of("A", data("D")),
        ];
        let eval = evaluate(input.into(), &TreeConfig::default(), &mut Tracer::none()).unwrap();
        let mut seen = 0;
        let mut consumer = |tree: &LayerTree| seen = tree.len();
        let dyn_consumer: &mut dyn TreeConsumer = &mut consumer;
        assert!(eval.publish(&mut [dyn_consumer]));
        assert_eq!(seen, 2);
    }

    #[test]
    fn service_description_from_json() {
        let json = r#"{
            "config": {"primaryCrs": "EPSG:4326"},
            "layers": {"name": "top", "title": "t", "abstract": "a", "keywords": [],
                       "layers": [{"name": "d", "title": "d", "abstract": "d",
                                   "keywords": [], "data": {"tif": {"blobKey": "d.tif"}}}]}
        }"#;
        let description: ServiceDescription = serde_json::from_str(json).unwrap();
        let eval = description.evaluate(&mut Tracer::none()).unwrap();
        // No box declared for the non-default primary coordinate system.
        assert_eq!(eval.report.errors.len(), 2);
        assert!(
            eval.report
                .iter()
                .all(|f| f.rule == Rule::BoundingBoxRequired)
        );
    }

    #[cfg(feature = "trace")]
    #[test]
    fn stages_are_traced_in_order() {
        use crate::trace::{StageBeginEvent, StageEndEvent, TraceSink, TreeBuiltEvent};

        #[derive(Default)]
        struct Log {
            events: Vec<(Stage, bool)>,
            built: Option<TreeBuiltEvent>,
        }
        impl TraceSink for Log {
            fn on_stage_begin(&mut self, e: &StageBeginEvent) {
                self.events.push((e.stage, true));
            }
            fn on_stage_end(&mut self, e: &StageEndEvent) {
                self.events.push((e.stage, false));
            }
            fn on_tree_built(&mut self, e: &TreeBuiltEvent) {
                self.built = Some(*e);
            }
        }

        let mut log = Log::default();
        let mut tracer = Tracer::new(&mut log);
        evaluate(flat().into(), &TreeConfig::default(), &mut tracer).unwrap();
        drop(tracer);
        let expected: Vec<_> = Stage::ALL
            .iter()
            .flat_map(|&s| [(s, true), (s, false)])
            .collect();
        assert_eq!(log.events, expected);
        assert_eq!(log.built.unwrap().layers, 5);
    }
}
