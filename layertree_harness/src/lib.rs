// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fluent layer-input builders and canned service trees.
//!
//! [`LayerBuilder`] describes one layer; it produces either a nested
//! [`LayerSpec`] (with [`child`](LayerBuilder::child)ren) or a flat record
//! via [`FlatListBuilder`]. The [`canned`] module holds complete service
//! trees used by tests and the demo.

#![no_std]

extern crate alloc;

pub mod canned;

use alloc::string::String;
use alloc::vec::Vec;

use layertree_core::bbox::BoundingBox;
use layertree_core::data::{Column, DataBinding, Raster, VectorDatabase, VectorFile};
use layertree_core::spec::{FlatLayerSpec, LayerAttributes, LayerSpec, MetadataReference};
use layertree_core::style::{Legend, Style};

/// Builds one layer and, for the nested shape, its children.
#[derive(Clone, Debug, Default)]
pub struct LayerBuilder {
    attributes: LayerAttributes,
    children: Vec<LayerBuilder>,
}

impl LayerBuilder {
    /// Starts a layer called `name` with nothing else set.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            attributes: LayerAttributes::named(name),
            children: Vec::new(),
        }
    }

    /// Starts an unnamed layer, as used for a top layer.
    #[must_use]
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Starts a layer called `name` whose title, abstract and keywords are
    /// all set, so it passes the visible-layer requirements.
    #[must_use]
    pub fn described(name: &str) -> Self {
        Self::new(name).describe(name)
    }

    /// Sets title, abstract and a single keyword derived from `text`.
    #[must_use]
    pub fn describe(mut self, text: &str) -> Self {
        self.attributes.title = Some(String::from(text));
        self.attributes.abstract_ = Some(alloc::format!("About {text}"));
        self.attributes.keywords = Some(alloc::vec![String::from(text)]);
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.attributes.title = Some(String::from(title));
        self
    }

    /// Clears title, abstract and keywords.
    #[must_use]
    pub fn undescribed(mut self) -> Self {
        self.attributes.title = None;
        self.attributes.abstract_ = None;
        self.attributes.keywords = None;
        self
    }

    /// Sets explicit visibility.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.attributes.visible = Some(visible);
        self
    }

    /// Marks the layer explicitly hidden.
    #[must_use]
    pub fn hidden(self) -> Self {
        self.visible(false)
    }

    /// Sets the dataset metadata reference.
    #[must_use]
    pub fn metadata(mut self, identifier: &str) -> Self {
        self.attributes.dataset_metadata_url = Some(MetadataReference {
            metadata_identifier: String::from(identifier),
        });
        self
    }

    /// Sets the scale bounds.
    #[must_use]
    pub fn scales(mut self, min: f64, max: f64) -> Self {
        self.attributes.min_scale = Some(min);
        self.attributes.max_scale = Some(max);
        self
    }

    /// Declares a bounding box.
    #[must_use]
    pub fn bbox(mut self, crs: &str, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        self.attributes
            .bounding_boxes
            .push(BoundingBox::new(crs, min_x, min_y, max_x, max_y));
        self
    }

    /// Adds a titled style without a visualization, as group layers carry.
    #[must_use]
    pub fn style(mut self, name: &str) -> Self {
        self.attributes.styles.push(Style {
            title: Some(String::from(name)),
            ..Style::named(name)
        });
        self
    }

    /// Adds a titled style rendered by `visualization`, as data layers carry.
    #[must_use]
    pub fn styled(mut self, name: &str, visualization: &str) -> Self {
        self.attributes.styles.push(Style {
            title: Some(String::from(name)),
            visualization: Some(String::from(visualization)),
            ..Style::named(name)
        });
        self
    }

    /// Attaches a PNG legend asset to the most recently added style.
    ///
    /// Does nothing if no style was added yet.
    #[must_use]
    pub fn with_legend(mut self, blob_key: &str) -> Self {
        if let Some(style) = self.attributes.styles.last_mut() {
            style.legend = Some(Legend {
                width: 20,
                height: 20,
                format: String::from("image/png"),
                blob_key: String::from(blob_key),
            });
        }
        self
    }

    /// Binds a database table with the given columns.
    #[must_use]
    pub fn postgis(mut self, table: &str, columns: &[&str]) -> Self {
        self.attributes.data = Some(DataBinding::VectorDatabase(VectorDatabase {
            table_name: String::from(table),
            geometry_type: String::from("MultiPolygon"),
            columns: columns_of(columns),
        }));
        self
    }

    /// Binds a table in a file asset with the given columns.
    #[must_use]
    pub fn gpkg(mut self, blob_key: &str, table: &str, columns: &[&str]) -> Self {
        self.attributes.data = Some(DataBinding::VectorFile(VectorFile {
            blob_key: String::from(blob_key),
            table_name: String::from(table),
            geometry_type: String::from("Point"),
            columns: columns_of(columns),
        }));
        self
    }

    /// Binds a raster asset.
    #[must_use]
    pub fn tif(mut self, blob_key: &str) -> Self {
        self.attributes.data = Some(DataBinding::Raster(Raster {
            blob_key: String::from(blob_key),
            ..Raster::default()
        }));
        self
    }

    /// Appends a child layer.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the attributes of this layer alone.
    #[must_use]
    pub fn attributes(&self) -> &LayerAttributes {
        &self.attributes
    }

    /// Builds the nested shape.
    #[must_use]
    pub fn build(self) -> LayerSpec {
        LayerSpec::group(
            self.attributes,
            self.children.into_iter().map(Self::build).collect(),
        )
    }
}

fn columns_of(names: &[&str]) -> Vec<Column> {
    names
        .iter()
        .map(|&name| Column {
            name: String::from(name),
            alias: None,
        })
        .collect()
}

/// Builds the flat input shape, one record at a time.
///
/// Children added to a [`LayerBuilder`] are ignored here; parents are named
/// explicitly instead.
#[derive(Clone, Debug, Default)]
pub struct FlatListBuilder {
    records: Vec<FlatLayerSpec>,
}

impl FlatListBuilder {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record without a parent reference.
    #[must_use]
    pub fn root(mut self, layer: LayerBuilder) -> Self {
        self.records.push(FlatLayerSpec::root(layer.attributes));
        self
    }

    /// Appends a record attached to the layer called `parent`.
    #[must_use]
    pub fn child_of(mut self, parent: &str, layer: LayerBuilder) -> Self {
        self.records
            .push(FlatLayerSpec::child_of(parent, layer.attributes));
        self
    }

    /// Returns the records in insertion order.
    #[must_use]
    pub fn build(self) -> Vec<FlatLayerSpec> {
        self.records
    }
}
