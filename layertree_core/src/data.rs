// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data bindings of data layers.
//!
//! A [`DataBinding`] is an exclusive choice between three sources. On the
//! wire it is externally tagged: `{ "gpkg": { .. } }`, `{ "postgis": { .. } }`
//! or `{ "tif": { .. } }`.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// The source of renderable data for a data layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DataBinding {
    /// Vector features read from a file asset.
    #[serde(rename = "gpkg")]
    VectorFile(VectorFile),
    /// Vector features read from a database table.
    #[serde(rename = "postgis")]
    VectorDatabase(VectorDatabase),
    /// A raster image.
    #[serde(rename = "tif")]
    Raster(Raster),
}

impl DataBinding {
    /// Returns the attribute columns exposed for feature info.
    ///
    /// Raster bindings expose no columns.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        match self {
            Self::VectorFile(v) => &v.columns,
            Self::VectorDatabase(v) => &v.columns,
            Self::Raster(_) => &[],
        }
    }

    /// Returns whether this is a raster binding.
    #[must_use]
    pub const fn is_raster(&self) -> bool {
        matches!(self, Self::Raster(_))
    }

    /// Returns the table name for vector bindings.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        match self {
            Self::VectorFile(v) => Some(&v.table_name),
            Self::VectorDatabase(v) => Some(&v.table_name),
            Self::Raster(_) => None,
        }
    }
}

/// Vector data stored in a file asset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorFile {
    /// Key of the asset holding the file.
    pub blob_key: String,
    /// Table within the file.
    pub table_name: String,
    /// Geometry type of the features.
    pub geometry_type: String,
    /// Attribute columns.
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// Vector data read from a database table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorDatabase {
    /// Table name.
    pub table_name: String,
    /// Geometry type of the features.
    pub geometry_type: String,
    /// Attribute columns.
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// Raster data stored in a file asset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Raster {
    /// Key of the asset holding the image.
    pub blob_key: String,
    /// Resampling method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resample: Option<String>,
    /// Color treated as transparent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offsite: Option<String>,
    /// Whether feature info reports the pixel class.
    pub get_feature_info_includes_class: bool,
}

/// An attribute column, optionally published under an alias.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name in the source.
    pub name: String,
    /// Published name, if different.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Column {
    /// Returns the name the column is published under.
    #[must_use]
    pub fn published_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}
