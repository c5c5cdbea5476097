// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rule walk.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;

use crate::config::TreeConfig;
use crate::layer::{BoxSource, LayerId, LayerRole, LayerTree};
use crate::service::ServiceCapabilities;
use crate::spec::LayerAttributes;

use super::{Field, Finding, Report, Rule};

/// Checks every rule against `tree` and returns all findings.
///
/// The walk is a pure function of `tree` and `config`: running it twice
/// yields identical reports in identical order.
#[must_use]
pub fn validate(tree: &LayerTree, config: &TreeConfig) -> Report {
    Validator::new(tree, config).run()
}

struct Validator<'a> {
    tree: &'a LayerTree,
    config: &'a TreeConfig,
    report: Report,
    /// First holder of each name seen so far.
    names: BTreeMap<&'a str, LayerId>,
    /// Per-child style names shared with the parent, when they are errors.
    collisions: BTreeMap<LayerId, Vec<String>>,
}

impl<'a> Validator<'a> {
    fn new(tree: &'a LayerTree, config: &'a TreeConfig) -> Self {
        let collisions = if config.collisions_are_errors() {
            tree.style_name_collisions()
        } else {
            BTreeMap::new()
        };
        Self {
            tree,
            config,
            report: Report::default(),
            names: BTreeMap::new(),
            collisions,
        }
    }

    fn run(mut self) -> Report {
        let tree = self.tree;
        for id in tree.flatten() {
            let attrs = tree.attributes(id);
            let role = tree.role(id);
            self.check_name(id, attrs, role);
            self.check_visibility(id, attrs, role);
            self.check_styles(id, attrs, role);
            self.check_data(id, attrs, role);
            self.check_scale(id, attrs);
            self.check_bounding_boxes(id, attrs);
            self.check_parent_styles(id, attrs);
        }
        if !tree.flatten().any(|id| tree.attributes(id).is_visible()) {
            self.report.push(Finding::new(Rule::NoVisibleLayer));
        }
        self.report
    }

    fn emit(&mut self, id: LayerId, attrs: &LayerAttributes, finding: Finding) {
        self.report.push(finding.at(id, attrs.name.as_deref()));
    }

    fn check_name(&mut self, id: LayerId, attrs: &'a LayerAttributes, role: LayerRole) {
        match attrs.name.as_deref().filter(|n| !n.is_empty()) {
            None if role != LayerRole::Top => {
                self.emit(id, attrs, Finding::new(Rule::MissingName).field(Field::Name));
            }
            None => {}
            Some(name) => {
                if let Some(&first) = self.names.get(name) {
                    let finding = Finding::new(Rule::DuplicateName)
                        .field(Field::Name)
                        .related(first);
                    self.emit(id, attrs, finding);
                } else {
                    self.names.insert(name, id);
                }
            }
        }
    }

    fn check_visibility(&mut self, id: LayerId, attrs: &LayerAttributes, role: LayerRole) {
        if attrs.is_hidden() {
            if role != LayerRole::Data {
                let finding = Finding::new(Rule::GroupHidden);
                self.emit(id, attrs, finding);
            }
            let unused = [
                (attrs.title.is_some(), Field::Title),
                (attrs.abstract_.is_some(), Field::Abstract),
                (attrs.keywords.is_some(), Field::Keywords),
                (
                    attrs.dataset_metadata_url.is_some(),
                    Field::DatasetMetadataUrl,
                ),
            ];
            for (_, field) in unused.into_iter().filter(|(set, _)| *set) {
                self.emit(id, attrs, Finding::new(Rule::UnusedWhenHidden).field(field));
            }
            for style in &attrs.styles {
                if style.title.is_some() {
                    let finding = Finding::new(Rule::UnusedWhenHidden)
                        .style(&style.name)
                        .field(Field::StyleTitle);
                    self.emit(id, attrs, finding);
                }
                if style.abstract_.is_some() {
                    let finding = Finding::new(Rule::UnusedWhenHidden)
                        .style(&style.name)
                        .field(Field::StyleAbstract);
                    self.emit(id, attrs, finding);
                }
            }
        } else {
            let required = [
                (attrs.title.is_none(), Field::Title),
                (attrs.abstract_.is_none(), Field::Abstract),
                (attrs.keywords.is_none(), Field::Keywords),
            ];
            for (_, field) in required.into_iter().filter(|(missing, _)| *missing) {
                self.emit(
                    id,
                    attrs,
                    Finding::new(Rule::RequiredWhenVisible).field(field),
                );
            }
            for style in attrs.styles.iter().filter(|s| s.title.is_none()) {
                let finding = Finding::new(Rule::RequiredWhenVisible)
                    .style(&style.name)
                    .field(Field::StyleTitle);
                self.emit(id, attrs, finding);
            }
        }
    }

    fn check_styles(&mut self, id: LayerId, attrs: &LayerAttributes, role: LayerRole) {
        let mut seen = BTreeSet::new();
        for style in &attrs.styles {
            if !seen.insert(style.name.as_str()) {
                let finding = Finding::new(Rule::DuplicateStyleName)
                    .style(&style.name)
                    .field(Field::Styles);
                self.emit(id, attrs, finding);
            }
        }

        if !self.config.service_kind.supports_styles() {
            if !attrs.styles.is_empty() {
                let finding = Finding::new(Rule::StylesUnsupported)
                    .field(Field::Styles)
                    .detail(self.config.service_kind.as_str());
                self.emit(id, attrs, finding);
            }
            return;
        }

        for style in &attrs.styles {
            let has_visualization = style.visualization.is_some();
            let rule = match (role, self.config.static_config) {
                (LayerRole::Data, false) if !has_visualization => Rule::VisualizationRequired,
                (LayerRole::Data, false) => continue,
                _ if has_visualization => Rule::VisualizationForbidden,
                _ => continue,
            };
            let finding = Finding::new(rule)
                .style(&style.name)
                .field(Field::Visualization);
            self.emit(id, attrs, finding);
        }
    }

    fn check_data(&mut self, id: LayerId, attrs: &LayerAttributes, role: LayerRole) {
        let Some(data) = &attrs.data else {
            if role == LayerRole::Data {
                self.emit(id, attrs, Finding::new(Rule::DataRequired).field(Field::Data));
            }
            return;
        };
        if role != LayerRole::Data {
            self.emit(id, attrs, Finding::new(Rule::DataOnGroup).field(Field::Data));
        }
        if data.is_raster() && !self.config.service_kind.supports_raster() {
            let finding = Finding::new(Rule::RasterUnsupported)
                .field(Field::Data)
                .detail(self.config.service_kind.as_str());
            self.emit(id, attrs, finding);
        }
        let mut seen = BTreeSet::new();
        for column in data.columns() {
            if !seen.insert(column.name.as_str()) {
                let finding = Finding::new(Rule::DuplicateColumn)
                    .field(Field::Columns)
                    .detail(column.name.as_str());
                self.emit(id, attrs, finding);
            }
        }
    }

    fn check_scale(&mut self, id: LayerId, attrs: &LayerAttributes) {
        if let (Some(min), Some(max)) = (attrs.min_scale, attrs.max_scale)
            && min >= max
        {
            self.emit(id, attrs, Finding::new(Rule::ScaleRange).field(Field::Scale));
        }
    }

    fn check_bounding_boxes(&mut self, id: LayerId, attrs: &LayerAttributes) {
        let mut seen = BTreeSet::new();
        for declared in &attrs.bounding_boxes {
            if !seen.insert(&declared.crs) {
                let finding = Finding::new(Rule::DuplicateBoundingBox)
                    .field(Field::BoundingBoxes)
                    .detail(declared.crs.as_str());
                self.emit(id, attrs, finding);
                continue;
            }
            let Some(inherited) = self.tree.inherited_bounding_box(id, &declared.crs) else {
                continue;
            };
            if inherited.rect == declared.rect {
                let mut finding = Finding::new(Rule::RedundantBoundingBox)
                    .field(Field::BoundingBoxes)
                    .detail(declared.crs.as_str());
                if let BoxSource::Inherited(origin) = inherited.source {
                    finding = finding.related(origin);
                }
                self.emit(id, attrs, finding);
            }
        }

        let primary = &self.config.primary_crs;
        if !primary.is_system_default() {
            let explicit = self
                .tree
                .effective_bounding_box(id, primary)
                .is_some_and(|b| b.is_explicit());
            if !explicit {
                let finding = Finding::new(Rule::BoundingBoxRequired)
                    .field(Field::BoundingBoxes)
                    .detail(primary.as_str());
                self.emit(id, attrs, finding);
            }
        }
    }

    fn check_parent_styles(&mut self, id: LayerId, attrs: &LayerAttributes) {
        if !attrs.is_visible() {
            return;
        }
        let Some(names) = self.collisions.remove(&id) else {
            return;
        };
        let parent = self.tree.parent(id);
        for name in names {
            let mut finding = Finding::new(Rule::StyleNameCollision).style(&name);
            if let Some(parent) = parent {
                finding = finding.related(parent);
            }
            self.emit(id, attrs, finding);
        }
    }
}
