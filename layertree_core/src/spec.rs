// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative input records.
//!
//! Two input shapes describe the same layer hierarchy:
//!
//! - **Nested** — a [`LayerSpec`] carries its children in `layers`.
//! - **Flat** — an ordered list of [`FlatLayerSpec`], each naming its parent
//!   in `group`. [`TreeBuilder`](crate::build::TreeBuilder) turns this into
//!   the nested shape.
//!
//! Both share [`LayerAttributes`]. Optional fields are `Option`s throughout:
//! the validator distinguishes "not set" from "set", e.g. to warn about
//! fields that a hidden layer never publishes.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::data::DataBinding;
use crate::style::Style;

/// User-settable fields of a layer node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayerAttributes {
    /// Identifier, required on every node except an unnamed top layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer description.
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<String>,
    /// Search keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Bounding boxes declared on this node, at most one per coordinate system.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bounding_boxes: Vec<BoundingBox>,
    /// Visibility. Unset counts as visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Authority that issued the dataset identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<Authority>,
    /// Reference to the dataset metadata record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_metadata_url: Option<MetadataReference>,
    /// Minimum scale denominator at which the layer renders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_scale: Option<f64>,
    /// Maximum scale denominator at which the layer renders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f64>,
    /// Rendering variants, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<Style>,
    /// Data source; only legal on data layers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<DataBinding>,
}

impl LayerAttributes {
    /// Creates attributes with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns whether the layer is visible, treating unset as visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    /// Returns whether the layer is explicitly hidden.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.visible == Some(false)
    }

    /// Returns the style called `name`, if any.
    #[must_use]
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.name == name)
    }
}

/// Authority issuing a dataset identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authority {
    /// Authority name.
    pub name: String,
    /// Authority URL.
    pub url: String,
    /// Identifier of the dataset at this authority.
    pub spatial_dataset_identifier: String,
}

/// Reference to a metadata record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataReference {
    /// Identifier of the record in the metadata catalogue.
    pub metadata_identifier: String,
}

/// A layer in the nested input shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Fields of this node.
    #[serde(flatten)]
    pub attributes: LayerAttributes,
    /// Child layers, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<LayerSpec>,
}

impl LayerSpec {
    /// Creates a childless layer.
    #[must_use]
    pub fn leaf(attributes: LayerAttributes) -> Self {
        Self {
            attributes,
            layers: Vec::new(),
        }
    }

    /// Creates a layer with the given children.
    #[must_use]
    pub fn group(attributes: LayerAttributes, layers: Vec<Self>) -> Self {
        Self { attributes, layers }
    }

    /// Returns the number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut stack = alloc::vec![self];
        while let Some(spec) = stack.pop() {
            count += 1;
            stack.extend(&spec.layers);
        }
        count
    }
}

impl Drop for LayerSpec {
    fn drop(&mut self) {
        // Detach descendants level by level so a long chain drops without
        // recursing once per level.
        let mut pending = core::mem::take(&mut self.layers);
        while let Some(mut spec) = pending.pop() {
            pending.append(&mut spec.layers);
        }
    }
}

/// A layer in the flat input shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatLayerSpec {
    /// Fields of this node.
    #[serde(flatten)]
    pub attributes: LayerAttributes,
    /// Name of the parent layer; unset for root candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl FlatLayerSpec {
    /// Creates a record without a parent reference.
    #[must_use]
    pub fn root(attributes: LayerAttributes) -> Self {
        Self {
            attributes,
            group: None,
        }
    }

    /// Creates a record attached to the layer called `group`.
    #[must_use]
    pub fn child_of(group: impl Into<String>, attributes: LayerAttributes) -> Self {
        Self {
            attributes,
            group: Some(group.into()),
        }
    }
}

/// Either input shape.
///
/// Deserializes untagged: a JSON array is the flat shape, an object the
/// nested shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayerInput {
    /// Legacy flat list with parent references.
    Flat(Vec<FlatLayerSpec>),
    /// Nested tree.
    Nested(LayerSpec),
}

impl From<LayerSpec> for LayerInput {
    fn from(spec: LayerSpec) -> Self {
        Self::Nested(spec)
    }
}

impl From<Vec<FlatLayerSpec>> for LayerInput {
    fn from(list: Vec<FlatLayerSpec>) -> Self {
        Self::Flat(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_input_shapes() {
        let flat: LayerInput =
            serde_json::from_str(r#"[{"name":"a"},{"name":"b","group":"a"}]"#).unwrap();
        let LayerInput::Flat(list) = flat else {
            panic!("array input must be flat");
        };
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].group.as_deref(), Some("a"));

        let nested: LayerInput =
            serde_json::from_str(r#"{"name":"a","layers":[{"name":"b"}]}"#).unwrap();
        let LayerInput::Nested(spec) = nested else {
            panic!("object input must be nested");
        };
        assert_eq!(spec.count(), 2);
        assert_eq!(spec.layers[0].attributes.name.as_deref(), Some("b"));
    }

    #[test]
    fn visibility_is_tri_state() {
        let mut attrs = LayerAttributes::named("a");
        assert!(attrs.is_visible());
        assert!(!attrs.is_hidden());
        attrs.visible = Some(false);
        assert!(!attrs.is_visible());
        assert!(attrs.is_hidden());
    }

    #[test]
    fn attribute_keys_are_camel_case() {
        let json = r#"{
            "name": "roads",
            "abstract": "All roads",
            "datasetMetadataUrl": {"metadataIdentifier": "abc"},
            "minScale": 1000.0,
            "styles": [{"name": "default", "visualization": "roads.style"}],
            "data": {"gpkg": {"blobKey": "k", "tableName": "t", "geometryType": "Point"}}
        }"#;
        let spec: LayerSpec = serde_json::from_str(json).unwrap();
        let attrs = &spec.attributes;
        assert_eq!(attrs.abstract_.as_deref(), Some("All roads"));
        assert_eq!(attrs.min_scale, Some(1000.0));
        assert!(attrs.dataset_metadata_url.is_some());
        assert_eq!(
            attrs.style("default").and_then(|s| s.visualization.as_deref()),
            Some("roads.style")
        );
        assert!(attrs.data.is_some());
        assert!(spec.layers.is_empty());
    }

    #[test]
    fn deep_nesting_counts_and_drops() {
        let mut spec = LayerSpec::leaf(LayerAttributes::named("leaf"));
        for _ in 0..100_000 {
            spec = LayerSpec::group(LayerAttributes::default(), alloc::vec![spec]);
        }
        assert_eq!(spec.count(), 100_001);
        drop(spec);
    }
}
