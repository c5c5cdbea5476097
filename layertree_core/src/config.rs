// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-tree configuration flags.

use serde::{Deserialize, Serialize};

use crate::bbox::Crs;
use crate::service::ServiceKind;

/// Flags that apply to a whole tree during one evaluation.
///
/// Deserializes from camelCase keys; every key is optional:
///
/// ```
/// use layertree_core::config::TreeConfig;
///
/// let config: TreeConfig = serde_json::from_str(r#"{"staticConfig": true}"#).unwrap();
/// assert!(config.static_config);
/// assert!(config.validate_child_style_name_equal);
/// assert!(config.primary_crs.is_system_default());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeConfig {
    /// Coordinate system every layer must have an effective box for.
    pub primary_crs: Crs,
    /// Rendering configuration is supplied as a pre-authored artifact, so
    /// styles must not reference visualizations of their own.
    pub static_config: bool,
    /// A downstream proxy expands group requests into their data layers.
    pub rewrite_group_to_data_layers: bool,
    /// Check child styles for names already used by their parent.
    pub validate_child_style_name_equal: bool,
    /// What the target service can publish.
    pub service_kind: ServiceKind,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            primary_crs: Crs::system_default(),
            static_config: false,
            rewrite_group_to_data_layers: false,
            validate_child_style_name_equal: true,
            service_kind: ServiceKind::default(),
        }
    }
}

impl TreeConfig {
    /// Sets the primary coordinate system.
    #[must_use]
    pub fn with_primary_crs(mut self, crs: impl Into<Crs>) -> Self {
        self.primary_crs = crs.into();
        self
    }

    /// Sets static-config mode.
    #[must_use]
    pub fn with_static_config(mut self, on: bool) -> Self {
        self.static_config = on;
        self
    }

    /// Sets group-to-data-layer rewriting.
    #[must_use]
    pub fn with_rewrite_group_to_data_layers(mut self, on: bool) -> Self {
        self.rewrite_group_to_data_layers = on;
        self
    }

    /// Sets the parent/child style-name check.
    #[must_use]
    pub fn with_validate_child_style_name_equal(mut self, on: bool) -> Self {
        self.validate_child_style_name_equal = on;
        self
    }

    /// Sets the service kind.
    #[must_use]
    pub fn with_service_kind(mut self, kind: ServiceKind) -> Self {
        self.service_kind = kind;
        self
    }

    /// Returns whether parent/child style collisions are validation errors.
    ///
    /// With rewriting on they feed
    /// [`legend_reference_cleanup`](crate::layer::LayerTree::legend_reference_cleanup)
    /// instead.
    #[must_use]
    pub fn collisions_are_errors(&self) -> bool {
        self.validate_child_style_name_equal && !self.rewrite_group_to_data_layers
    }

    /// Returns whether parent/child style collisions feed legend reference
    /// cleanup.
    #[must_use]
    pub fn collisions_need_cleanup(&self) -> bool {
        self.validate_child_style_name_equal && self.rewrite_group_to_data_layers
    }
}
