// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style and legend value types.

use alloc::string::String;

use serde::{Deserialize, Serialize};

/// A named rendering variant attached to a layer.
///
/// Names are scoped to the owning layer. A style without a
/// [`visualization`](Self::visualization) is legal on group layers and in
/// static-config mode; elsewhere the validator requires one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    /// Style name, unique within the owning layer.
    pub name: String,
    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer description.
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_: Option<String>,
    /// Reference to the rendering definition used to draw this style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<String>,
    /// Pre-rendered legend image, if one is supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl Style {
    /// Creates a style with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns whether a legend asset is supplied for this style.
    #[must_use]
    pub fn has_legend(&self) -> bool {
        self.legend.is_some()
    }
}

/// A legend image stored as an external asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// MIME type, e.g. `image/png`.
    pub format: String,
    /// Key of the asset holding the image.
    pub blob_key: String,
}
