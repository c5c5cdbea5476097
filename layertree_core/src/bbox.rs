// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate systems and bounding boxes.
//!
//! A [`BoundingBox`] pairs a coordinate-system identifier ([`Crs`]) with an
//! axis-aligned [`kurbo::Rect`]. Boxes declared on a layer are kept as-is;
//! the *effective* box per coordinate system is computed by the resolver (see
//! [`LayerTree::effective_bounding_box`](crate::layer::LayerTree::effective_bounding_box)).
//!
//! When nothing in the tree declares a box for the primary coordinate system,
//! the resolver falls back to [`default_extent`], a fixed table covering the
//! default service area.

use alloc::string::String;
use core::fmt;

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Identifier of the system-wide default coordinate system.
pub const DEFAULT_CRS: &str = "EPSG:28992";

/// A coordinate-system identifier such as `EPSG:28992`.
///
/// Identifiers compare by exact string match; no normalisation of authority
/// prefixes is attempted.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Crs(String);

impl Crs {
    /// Creates a coordinate-system identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the system-wide default coordinate system.
    #[must_use]
    pub fn system_default() -> Self {
        Self::new(DEFAULT_CRS)
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this is the system-wide default coordinate system.
    #[must_use]
    pub fn is_system_default(&self) -> bool {
        self.0 == DEFAULT_CRS
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::system_default()
    }
}

impl From<&str> for Crs {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crs({})", self.0)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rectangle in a specific coordinate system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBoundingBox", into = "RawBoundingBox")]
pub struct BoundingBox {
    /// Coordinate system the rectangle is expressed in.
    pub crs: Crs,
    /// The four edges, `x0`/`y0` being the minimum corner.
    pub rect: Rect,
}

impl BoundingBox {
    /// Creates a bounding box from its minimum and maximum corners.
    #[must_use]
    pub fn new(crs: impl Into<Crs>, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            crs: crs.into(),
            rect: Rect::new(min_x, min_y, max_x, max_y),
        }
    }
}

/// Wire shape: `{ "crs": "...", "bbox": { "minx": .., "miny": .., "maxx": .., "maxy": .. } }`.
#[derive(Clone, Serialize, Deserialize)]
struct RawBoundingBox {
    crs: Crs,
    bbox: RawExtent,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawExtent {
    minx: f64,
    miny: f64,
    maxx: f64,
    maxy: f64,
}

impl From<RawBoundingBox> for BoundingBox {
    fn from(raw: RawBoundingBox) -> Self {
        Self {
            crs: raw.crs,
            rect: Rect::new(raw.bbox.minx, raw.bbox.miny, raw.bbox.maxx, raw.bbox.maxy),
        }
    }
}

impl From<BoundingBox> for RawBoundingBox {
    fn from(b: BoundingBox) -> Self {
        Self {
            crs: b.crs,
            bbox: RawExtent {
                minx: b.rect.x0,
                miny: b.rect.y0,
                maxx: b.rect.x1,
                maxy: b.rect.y1,
            },
        }
    }
}

/// Fallback extents of the default service area, keyed by coordinate system.
const DEFAULT_EXTENTS: &[(&str, [f64; 4])] = &[
    ("EPSG:28992", [-25_000.0, 250_000.0, 280_000.0, 860_000.0]),
    ("EPSG:25831", [470_000.0, 5_570_000.0, 810_000.0, 6_130_000.0]),
    ("EPSG:25832", [80_000.0, 5_570_000.0, 410_000.0, 6_130_000.0]),
    ("EPSG:3034", [3_450_000.0, 2_650_000.0, 3_800_000.0, 3_150_000.0]),
    ("EPSG:3035", [3_850_000.0, 3_000_000.0, 4_200_000.0, 3_500_000.0]),
    ("EPSG:3857", [290_000.0, 6_540_000.0, 850_000.0, 7_570_000.0]),
    ("EPSG:4258", [2.5, 50.5, 7.7, 55.9]),
    ("EPSG:4326", [2.5, 50.5, 7.7, 55.9]),
    ("CRS:84", [2.5, 50.5, 7.7, 55.9]),
];

/// Returns the built-in fallback extent for `crs`, if the table has one.
#[must_use]
pub fn default_extent(crs: &Crs) -> Option<Rect> {
    DEFAULT_EXTENTS
        .iter()
        .find(|(id, _)| *id == crs.as_str())
        .map(|(_, [x0, y0, x1, y1])| Rect::new(*x0, *y0, *x1, *y1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_crs_has_default_extent() {
        let crs = Crs::system_default();
        assert!(crs.is_system_default());
        assert_eq!(
            default_extent(&crs),
            Some(Rect::new(-25_000.0, 250_000.0, 280_000.0, 860_000.0))
        );
    }

    #[test]
    fn unknown_crs_has_no_default_extent() {
        assert_eq!(default_extent(&Crs::new("EPSG:2056")), None);
    }

    #[test]
    fn bounding_box_wire_shape() {
        let json = r#"{"crs":"EPSG:4326","bbox":{"minx":3.0,"miny":50.0,"maxx":7.0,"maxy":54.0}}"#;
        let b: BoundingBox = serde_json::from_str(json).unwrap();
        assert_eq!(b, BoundingBox::new("EPSG:4326", 3.0, 50.0, 7.0, 54.0));
        assert_eq!(serde_json::to_string(&b).unwrap(), json);
    }
}
