// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Service kinds and what each can publish.
//!
//! The kind is fixed once per evaluation in
//! [`TreeConfig`](crate::config::TreeConfig); rules that depend on it ask the
//! [`ServiceCapabilities`] trait instead of matching on the kind.

use serde::{Deserialize, Serialize};

/// What a deployed map service is able to serve.
pub trait ServiceCapabilities {
    /// Returns whether raster data bindings can be published.
    fn supports_raster(&self) -> bool;

    /// Returns whether layers may carry styles.
    fn supports_styles(&self) -> bool;
}

/// The kind of map service a layer tree is deployed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceKind {
    /// Serves vector features only, without styling.
    VectorOnly,
    /// Renders styled maps from vector and raster data.
    #[default]
    RasterCapable,
}

impl ServiceKind {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VectorOnly => "vector-only",
            Self::RasterCapable => "raster-capable",
        }
    }
}

impl ServiceCapabilities for ServiceKind {
    fn supports_raster(&self) -> bool {
        matches!(self, Self::RasterCapable)
    }

    fn supports_styles(&self) -> bool {
        matches!(self, Self::RasterCapable)
    }
}
