// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch rule engine.
//!
//! [`validate`] walks a classified, resolved [`LayerTree`](crate::layer::LayerTree)
//! once and collects every violated rule instance into a [`Report`]. Nothing
//! short-circuits: an admission check wants complete feedback in one round
//! trip.
//!
//! # Ordering
//!
//! Findings are order-stable. Layers are visited in pre-order; per layer the
//! rule groups run in a fixed order (names, visibility, styles, data, scale,
//! bounding boxes, parent style collisions). Tree-level rules come last.
//!
//! Each rule carries a stable [`Rule::code`] so callers can match on findings
//! without parsing messages.

mod rules;

pub use rules::validate;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::Serialize;

use crate::layer::LayerId;

/// How serious a finding is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    /// Informational; never blocks acceptance.
    Warning,
    /// Blocks acceptance.
    Error,
}

impl Severity {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A validation rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    /// A name is used by more than one layer.
    DuplicateName,
    /// A non-top layer has no name.
    MissingName,
    /// A visible layer lacks a descriptive field.
    RequiredWhenVisible,
    /// A hidden layer carries fields nobody publishes.
    UnusedWhenHidden,
    /// A group or top layer is explicitly hidden.
    GroupHidden,
    /// Two styles on one layer share a name.
    DuplicateStyleName,
    /// The service kind cannot publish styles.
    StylesUnsupported,
    /// A data-layer style has no visualization outside static-config mode.
    VisualizationRequired,
    /// A style sets a visualization where none is allowed.
    VisualizationForbidden,
    /// A group or top layer has a data binding.
    DataOnGroup,
    /// A data layer has no data binding.
    DataRequired,
    /// The service kind cannot publish raster data.
    RasterUnsupported,
    /// Two columns of one data binding share a name.
    DuplicateColumn,
    /// The minimum scale is not below the maximum scale.
    ScaleRange,
    /// Two declared boxes on one layer share a coordinate system.
    DuplicateBoundingBox,
    /// No declared or inherited box exists for the primary coordinate system.
    BoundingBoxRequired,
    /// A declared box repeats the box an ancestor already provides.
    RedundantBoundingBox,
    /// A child style reuses the name of one of its parent's styles.
    StyleNameCollision,
    /// No layer in the tree is visible.
    NoVisibleLayer,
}

impl Rule {
    /// Returns the stable identifier of this rule.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DuplicateName => "LT001",
            Self::MissingName => "LT002",
            Self::RequiredWhenVisible => "LT003",
            Self::UnusedWhenHidden => "LT004",
            Self::GroupHidden => "LT005",
            Self::DuplicateStyleName => "LT006",
            Self::StylesUnsupported => "LT007",
            Self::VisualizationRequired => "LT008",
            Self::VisualizationForbidden => "LT009",
            Self::DataOnGroup => "LT010",
            Self::DataRequired => "LT011",
            Self::RasterUnsupported => "LT012",
            Self::DuplicateColumn => "LT013",
            Self::ScaleRange => "LT014",
            Self::DuplicateBoundingBox => "LT015",
            Self::BoundingBoxRequired => "LT016",
            Self::RedundantBoundingBox => "LT017",
            Self::StyleNameCollision => "LT018",
            Self::NoVisibleLayer => "LT019",
        }
    }

    /// Returns the severity findings of this rule carry.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::UnusedWhenHidden | Self::RedundantBoundingBox => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// The layer or style field a finding is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Layer name.
    Name,
    /// Layer title.
    Title,
    /// Layer abstract.
    Abstract,
    /// Layer keywords.
    Keywords,
    /// Dataset metadata reference.
    DatasetMetadataUrl,
    /// Title of a style.
    StyleTitle,
    /// Abstract of a style.
    StyleAbstract,
    /// Visualization reference of a style.
    Visualization,
    /// Data binding.
    Data,
    /// Declared bounding boxes.
    BoundingBoxes,
    /// Scale bounds.
    Scale,
    /// Data-binding columns.
    Columns,
    /// Style list.
    Styles,
}

impl Field {
    /// Returns the input key of this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Title | Self::StyleTitle => "title",
            Self::Abstract | Self::StyleAbstract => "abstract",
            Self::Keywords => "keywords",
            Self::DatasetMetadataUrl => "datasetMetadataUrl",
            Self::Visualization => "visualization",
            Self::Data => "data",
            Self::BoundingBoxes => "boundingBoxes",
            Self::Scale => "minScale",
            Self::Columns => "columns",
            Self::Styles => "styles",
        }
    }
}

/// One violated rule instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Error or warning.
    pub severity: Severity,
    /// The violated rule.
    pub rule: Rule,
    /// The offending layer; `None` for tree-level findings.
    pub layer: Option<LayerId>,
    /// Name of the offending layer, if it has one.
    pub layer_name: Option<String>,
    /// The offending style, for style-scoped findings.
    pub style: Option<String>,
    /// The offending field.
    pub field: Option<Field>,
    /// A second layer involved: the first holder of a duplicate name, the
    /// parent of a colliding style, or the ancestor providing a redundant
    /// box.
    pub related: Option<LayerId>,
    /// The coordinate system or column the finding concerns.
    pub detail: Option<String>,
}

impl Finding {
    /// Creates a finding for `rule`, taking the severity from the rule.
    #[must_use]
    pub fn new(rule: Rule) -> Self {
        Self {
            severity: rule.severity(),
            rule,
            layer: None,
            layer_name: None,
            style: None,
            field: None,
            related: None,
            detail: None,
        }
    }

    /// Sets the offending layer and its name.
    #[must_use]
    pub fn at(mut self, layer: LayerId, name: Option<&str>) -> Self {
        self.layer = Some(layer);
        self.layer_name = name.map(String::from);
        self
    }

    /// Sets the offending style.
    #[must_use]
    pub fn style(mut self, style: &str) -> Self {
        self.style = Some(String::from(style));
        self
    }

    /// Sets the offending field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.field = Some(field);
        self
    }

    /// Sets the related layer.
    #[must_use]
    pub fn related(mut self, layer: LayerId) -> Self {
        self.related = Some(layer);
        self
    }

    /// Sets the detail text.
    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Returns a human-readable description, without location.
    #[must_use]
    pub fn message(&self) -> String {
        let style = self.style.as_deref().unwrap_or_default();
        let detail = self.detail.as_deref().unwrap_or_default();
        let field = self.field.map(Field::as_str).unwrap_or_default();
        match self.rule {
            Rule::DuplicateName => String::from("layer name must be unique"),
            Rule::MissingName => String::from("layer must have a name"),
            Rule::RequiredWhenVisible if self.style.is_some() => {
                format!("style `{style}` must have a {field} when the layer is visible")
            }
            Rule::RequiredWhenVisible => format!("{field} is required when the layer is visible"),
            Rule::UnusedWhenHidden if self.style.is_some() => {
                format!("{field} of style `{style}` is unused because the layer is not visible")
            }
            Rule::UnusedWhenHidden => format!("{field} is unused because the layer is not visible"),
            Rule::GroupHidden => String::from("group layers must be visible"),
            Rule::DuplicateStyleName => format!("style name `{style}` is used more than once"),
            Rule::StylesUnsupported => String::from("this service kind does not publish styles"),
            Rule::VisualizationRequired => {
                format!("style `{style}` of a data layer must set a visualization")
            }
            Rule::VisualizationForbidden => {
                format!("style `{style}` must not set a visualization here")
            }
            Rule::DataOnGroup => String::from("group layers must not have a data binding"),
            Rule::DataRequired => String::from("data layers must have a data binding"),
            Rule::RasterUnsupported => {
                String::from("this service kind does not publish raster data")
            }
            Rule::DuplicateColumn => format!("column `{detail}` is listed more than once"),
            Rule::ScaleRange => String::from("minScale must be smaller than maxScale"),
            Rule::DuplicateBoundingBox => {
                format!("more than one bounding box declared for {detail}")
            }
            Rule::BoundingBoxRequired => {
                format!("no declared or inherited bounding box for {detail}")
            }
            Rule::RedundantBoundingBox => {
                format!("bounding box for {detail} equals the inherited one")
            }
            Rule::StyleNameCollision => format!(
                "style name `{style}` from parent layer must not be set on a child layer"
            ),
            Rule::NoVisibleLayer => String::from("at least one layer must be visible"),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.severity.as_str(), self.rule.code())?;
        match (&self.layer, &self.layer_name) {
            (_, Some(name)) => write!(f, " layer `{name}`")?,
            (Some(id), None) => write!(f, " layer #{}", id.index())?,
            (None, None) => {}
        }
        write!(f, ": {}", self.message())
    }
}

/// Every finding of one validation pass, split by severity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Findings that block acceptance, in report order.
    pub errors: Vec<Finding>,
    /// Non-blocking findings, in report order.
    pub warnings: Vec<Finding>,
}

impl Report {
    /// Appends a finding to the list matching its severity.
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
        }
    }

    /// Returns whether there are no errors.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns whether there are no findings at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Returns the total number of findings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Returns errors followed by warnings.
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(&self.warnings)
    }

    /// Returns every finding of `rule`.
    pub fn with_rule(&self, rule: Rule) -> impl Iterator<Item = &Finding> {
        self.iter().filter(move |f| f.rule == rule)
    }

    /// Returns every finding against `layer`.
    pub fn for_layer(&self, layer: LayerId) -> impl Iterator<Item = &Finding> {
        self.iter().filter(move |f| f.layer == Some(layer))
    }
}
