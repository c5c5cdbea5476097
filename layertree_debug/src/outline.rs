// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indented text rendering of an evaluated tree.
//!
//! One line per layer, in pre-order, indented by depth:
//!
//! ```text
//! (unnamed) [top]
//!   roads [group] styles=default
//!     highways [data] data=postgis:highways bbox=EPSG:4326<-roads
//! ```
//!
//! Effective boxes are listed per coordinate system with their source:
//! `<-name` for inherited, `*` for the built-in default, nothing for
//! declared.

use std::fmt::Write as _;

use layertree_core::consumer::TreeConsumer;
use layertree_core::data::DataBinding;
use layertree_core::layer::{BoxSource, LayerId, LayerTree};

/// A [`TreeConsumer`] that renders the tree as indented text.
#[derive(Clone, Debug, Default)]
pub struct Outline {
    text: String,
    show_boxes: bool,
}

impl Outline {
    /// Creates an outline that omits effective bounding boxes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether effective bounding boxes are listed.
    #[must_use]
    pub fn with_boxes(mut self, on: bool) -> Self {
        self.show_boxes = on;
        self
    }

    /// Returns the text of the last consumed tree.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn line(&mut self, tree: &LayerTree, id: LayerId) {
        let attrs = tree.attributes(id);
        let indent = tree.depth(id) * 2;
        let name = tree.name(id).unwrap_or("(unnamed)");
        let _ = write!(
            self.text,
            "{:indent$}{name} [{}]",
            "",
            tree.role(id).as_str()
        );
        if attrs.is_hidden() {
            self.text.push_str(" hidden");
        }
        if !attrs.styles.is_empty() {
            let styles: Vec<_> = attrs.styles.iter().map(|s| s.name.as_str()).collect();
            let _ = write!(self.text, " styles={}", styles.join(","));
        }
        if let Some(data) = &attrs.data {
            let _ = write!(self.text, " data={}", binding_label(data));
        }
        if self.show_boxes {
            let boxes: Vec<_> = tree
                .effective_bounding_boxes(id)
                .iter()
                .map(|(crs, eff)| match eff.source {
                    BoxSource::Declared => crs.to_string(),
                    BoxSource::Inherited(from) => {
                        format!("{crs}<-{}", tree.name(from).unwrap_or("(unnamed)"))
                    }
                    BoxSource::Default => format!("{crs}*"),
                })
                .collect();
            if !boxes.is_empty() {
                let _ = write!(self.text, " bbox={}", boxes.join(","));
            }
        }
        self.text.push('\n');
    }
}

fn binding_label(data: &DataBinding) -> String {
    match data {
        DataBinding::VectorFile(v) => format!("gpkg:{}", v.table_name),
        DataBinding::VectorDatabase(v) => format!("postgis:{}", v.table_name),
        DataBinding::Raster(r) => format!("tif:{}", r.blob_key),
    }
}

impl TreeConsumer for Outline {
    fn consume(&mut self, tree: &LayerTree) {
        self.text.clear();
        for id in tree.flatten() {
            self.line(tree, id);
        }
    }
}

/// Renders `tree` with effective bounding boxes.
#[must_use]
pub fn render(tree: &LayerTree) -> String {
    let mut outline = Outline::new().with_boxes(true);
    outline.consume(tree);
    outline.text
}
