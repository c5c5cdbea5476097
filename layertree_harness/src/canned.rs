// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canned service trees.
//!
//! [`service_tree`] and [`service_flat`] describe the same topographic
//! service in the two input shapes:
//!
//! ```text
//! (unnamed top) "Topography"
//! ├── roads        group, style roads (legend)
//! │   ├── highways postgis
//! │   └── paths    gpkg, legend
//! ├── water        group, style water
//! │   ├── rivers   gpkg
//! │   └── archive  postgis, hidden
//! └── elevation    tif, declares EPSG:3857
//! ```
//!
//! Under the default configuration the service is accepted with a single
//! warning (the hidden `archive` layer's style title is never published).

use alloc::vec::Vec;

use layertree_core::spec::{FlatLayerSpec, LayerAttributes, LayerSpec};

use crate::{FlatListBuilder, LayerBuilder};

fn top() -> LayerBuilder {
    LayerBuilder::unnamed()
        .describe("Topography")
        .bbox("EPSG:4326", 3.2, 50.7, 7.3, 53.6)
}

fn roads() -> LayerBuilder {
    LayerBuilder::described("roads")
        .style("roads")
        .with_legend("legend/roads.png")
}

fn highways() -> LayerBuilder {
    LayerBuilder::described("highways")
        .styled("highways", "highways.style")
        .postgis("highways", &["id", "number", "lanes"])
}

fn paths() -> LayerBuilder {
    LayerBuilder::described("paths")
        .styled("paths", "paths.style")
        .with_legend("legend/paths.png")
        .gpkg("data/paths.gpkg", "paths", &["id", "surface"])
}

fn water() -> LayerBuilder {
    LayerBuilder::described("water").style("water")
}

fn rivers() -> LayerBuilder {
    LayerBuilder::described("rivers")
        .styled("rivers", "rivers.style")
        .gpkg("data/water.gpkg", "rivers", &["id", "name"])
}

fn archive() -> LayerBuilder {
    LayerBuilder::new("archive")
        .hidden()
        .styled("archive", "archive.style")
        .postgis("water_archive", &["id"])
}

fn elevation() -> LayerBuilder {
    LayerBuilder::described("elevation")
        .styled("elevation", "elevation.style")
        .tif("data/elevation.tif")
        .bbox("EPSG:3857", 360_000.0, 6_580_000.0, 810_000.0, 7_080_000.0)
}

/// Returns the attributes of the service's unnamed top layer.
#[must_use]
pub fn service_top() -> LayerAttributes {
    top().attributes().clone()
}

/// Returns the topographic service in the nested shape.
#[must_use]
pub fn service_tree() -> LayerSpec {
    top()
        .child(roads().child(highways()).child(paths()))
        .child(water().child(rivers()).child(archive()))
        .child(elevation())
        .build()
}

/// Returns the topographic service in the flat shape, without its top
/// layer. Use [`service_top`] for the synthesized top.
#[must_use]
pub fn service_flat() -> Vec<FlatLayerSpec> {
    FlatListBuilder::new()
        .root(roads())
        .child_of("roads", highways())
        .child_of("roads", paths())
        .root(water())
        .child_of("water", rivers())
        .child_of("water", archive())
        .root(elevation())
        .build()
}

/// Returns `P {s1, s2} -> Q {s2, s3} -> R {s3}`.
///
/// `Q` collides with `P` on `s2`, and `R` with `Q` on `s3`.
#[must_use]
pub fn collision_tree() -> LayerSpec {
    LayerBuilder::described("P")
        .style("s1")
        .style("s2")
        .child(
            LayerBuilder::described("Q")
                .style("s2")
                .style("s3")
                .child(
                    LayerBuilder::described("R")
                        .styled("s3", "r.style")
                        .postgis("r", &["id"]),
                ),
        )
        .build()
}

/// Returns `top -> G -> [D1, D2, G2 -> [D3]]`.
#[must_use]
pub fn routing_tree() -> LayerSpec {
    let data = |name: &str| LayerBuilder::described(name).postgis(name, &["id"]);
    LayerBuilder::described("top")
        .child(
            LayerBuilder::described("G")
                .child(data("D1"))
                .child(data("D2"))
                .child(LayerBuilder::described("G2").child(data("D3"))),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use layertree_core::build::TreeBuilder;
    use layertree_core::config::TreeConfig;
    use layertree_core::pipeline::evaluate;
    use layertree_core::trace::Tracer;
    use layertree_core::validate::Rule;

    use super::*;

    #[test]
    fn service_is_accepted_with_one_warning() {
        let eval = evaluate(
            service_tree().into(),
            &TreeConfig::default(),
            &mut Tracer::none(),
        )
        .unwrap();
        assert!(eval.is_accepted(), "{:?}", eval.report.errors);
        assert_eq!(eval.report.warnings.len(), 1);
        let warning = &eval.report.warnings[0];
        assert_eq!(warning.rule, Rule::UnusedWhenHidden);
        assert_eq!(warning.layer_name.as_deref(), Some("archive"));
    }

    #[test]
    fn flat_and_nested_shapes_agree() {
        let built = TreeBuilder::new(service_flat())
            .with_top_attributes(service_top())
            .build()
            .unwrap();
        assert_eq!(built, service_tree());
    }

    #[test]
    fn collision_tree_reports_both_edges() {
        let eval = evaluate(
            collision_tree().into(),
            &TreeConfig::default(),
            &mut Tracer::none(),
        )
        .unwrap();
        let hits: Vec<_> = eval
            .report
            .with_rule(Rule::StyleNameCollision)
            .map(|f| (f.layer_name.as_deref(), f.style.as_deref()))
            .collect();
        assert_eq!(hits, vec![(Some("Q"), Some("s2")), (Some("R"), Some("s3"))]);
    }

    #[test]
    fn routing_tree_is_clean() {
        let eval = evaluate(
            routing_tree().into(),
            &TreeConfig::default(),
            &mut Tracer::none(),
        )
        .unwrap();
        assert!(eval.report.is_empty(), "{:?}", eval.report);
        let table = eval.tree.group_to_data_leaf_names();
        assert_eq!(table["G"], vec!["D1", "D2"]);
    }
}
