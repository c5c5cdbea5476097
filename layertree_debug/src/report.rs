// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON validation reports.
//!
//! [`export`] writes the findings of an [`Evaluation`] as one JSON object:
//!
//! ```json
//! {
//!   "accepted": false,
//!   "errors": [
//!     { "code": "LT018", "rule": "styleNameCollision", "severity": "error",
//!       "layer": 2, "layerName": "Q", "style": "s2", "related": 1,
//!       "relatedName": "P", "message": "..." }
//!   ],
//!   "warnings": []
//! }
//! ```
//!
//! Absent fields are omitted. Layer numbers are pre-order positions.

use std::io::{self, Write};

use serde_json::{Map, Value, json};

use layertree_core::layer::LayerTree;
use layertree_core::pipeline::Evaluation;
use layertree_core::validate::{Finding, Report};

/// Writes the report of `evaluation` as pretty-printed JSON.
pub fn export(evaluation: &Evaluation, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, &to_value(&evaluation.report, &evaluation.tree))?;
    Ok(())
}

/// Converts a report to JSON, resolving related layers to names via `tree`.
#[must_use]
pub fn to_value(report: &Report, tree: &LayerTree) -> Value {
    let convert = |list: &[Finding]| -> Vec<Value> {
        list.iter().map(|f| finding_value(f, tree)).collect()
    };
    json!({
        "accepted": report.is_accepted(),
        "errors": convert(&report.errors),
        "warnings": convert(&report.warnings),
    })
}

fn finding_value(f: &Finding, tree: &LayerTree) -> Value {
    let mut obj = Map::new();
    obj.insert("code".into(), json!(f.rule.code()));
    obj.insert("rule".into(), json!(f.rule));
    obj.insert("severity".into(), json!(f.severity));
    if let Some(layer) = f.layer {
        obj.insert("layer".into(), json!(layer));
    }
    if let Some(name) = &f.layer_name {
        obj.insert("layerName".into(), json!(name));
    }
    if let Some(style) = &f.style {
        obj.insert("style".into(), json!(style));
    }
    if let Some(field) = f.field {
        obj.insert("field".into(), json!(field.as_str()));
    }
    if let Some(related) = f.related {
        obj.insert("related".into(), json!(related));
        if let Some(name) = tree.name(related) {
            obj.insert("relatedName".into(), json!(name));
        }
    }
    if let Some(detail) = &f.detail {
        obj.insert("detail".into(), json!(detail));
    }
    obj.insert("message".into(), json!(f.message()));
    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use layertree_core::bbox::Crs;
    use layertree_core::config::TreeConfig;
    use layertree_core::pipeline::evaluate;
    use layertree_core::spec::{LayerAttributes, LayerSpec};
    use layertree_core::style::Style;
    use layertree_core::trace::Tracer;

    use super::*;

    fn described(name: &str, styles: &[&str]) -> LayerAttributes {
        let mut attrs = LayerAttributes::named(name);
        attrs.title = Some(name.into());
        attrs.abstract_ = Some(name.into());
        attrs.keywords = Some(vec![]);
        attrs.styles = styles
            .iter()
            .map(|s| Style {
                title: Some((*s).into()),
                ..Style::named(*s)
            })
            .collect();
        attrs
    }

    #[test]
    fn export_collision_report() {
        // P {s1, s2} -> Q {s2}; Q has no data binding.
        let spec = LayerSpec::group(
            described("P", &["s1", "s2"]),
            vec![LayerSpec::leaf(described("Q", &["s2"]))],
        );
        let eval = evaluate(spec.into(), &TreeConfig::default(), &mut Tracer::none()).unwrap();

        let mut out = Vec::new();
        export(&eval, &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(parsed["accepted"], false);
        let errors = parsed["errors"].as_array().unwrap();
        let codes: Vec<_> = errors.iter().map(|e| e["code"].as_str().unwrap()).collect();
        // Visualization missing, data missing, then the collision.
        assert_eq!(codes, vec!["LT008", "LT011", "LT018"]);

        let collision = &errors[2];
        assert_eq!(collision["rule"], "styleNameCollision");
        assert_eq!(collision["layer"], 1);
        assert_eq!(collision["layerName"], "Q");
        assert_eq!(collision["style"], "s2");
        assert_eq!(collision["related"], 0);
        assert_eq!(collision["relatedName"], "P");
        assert!(collision.get("detail").is_none());
        assert!(parsed["warnings"].as_array().unwrap().is_empty());
    }

    #[test]
    fn empty_report_is_accepted() {
        let value = to_value(
            &Report::default(),
            &LayerTree::from_spec(LayerSpec::default(), Crs::system_default()),
        );
        assert_eq!(
            value,
            json!({"accepted": true, "errors": [], "warnings": []})
        );
    }
}
