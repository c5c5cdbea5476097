// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effective bounding-box resolution.
//!
//! Resolution walks the slots in order. Because slots are pre-order, each
//! parent's effective boxes are final before its children are visited, so a
//! child only ever looks one level up:
//!
//! 1. a box declared on the layer itself → [`BoxSource::Declared`];
//! 2. else the parent's effective box, unless that came from the default
//!    table → [`BoxSource::Inherited`] (naming the declaring ancestor);
//! 3. else, for the primary coordinate system only, the built-in
//!    [`default_extent`] → [`BoxSource::Default`];
//! 4. else nothing.
//!
//! Declared boxes are never rewritten; effective boxes live in their own
//! array.

use alloc::collections::{BTreeMap, BTreeSet};

use kurbo::Rect;
use serde::Serialize;

use crate::bbox::{Crs, default_extent};

use super::id::{INVALID, LayerId};
use super::tree::LayerTree;

/// Where an effective bounding box came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BoxSource {
    /// Declared on the layer itself.
    Declared,
    /// Declared on the given ancestor.
    Inherited(LayerId),
    /// Taken from the built-in default table.
    Default,
}

/// The bounding box actually used for a layer and coordinate system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EffectiveBox {
    /// The rectangle.
    #[serde(serialize_with = "serialize_rect")]
    pub rect: Rect,
    /// Where it came from.
    pub source: BoxSource,
}

fn serialize_rect<S: serde::Serializer>(r: &Rect, s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeTuple;
    let mut t = s.serialize_tuple(4)?;
    t.serialize_element(&r.x0)?;
    t.serialize_element(&r.y0)?;
    t.serialize_element(&r.x1)?;
    t.serialize_element(&r.y1)?;
    t.end()
}

impl EffectiveBox {
    /// Returns whether the box is declared or inherited, as opposed to
    /// coming from the default table.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        !matches!(self.source, BoxSource::Default)
    }
}

impl LayerTree {
    /// Computes effective boxes for every layer and every referenced
    /// coordinate system.
    pub(crate) fn resolve_bounding_boxes(&mut self) {
        let mut referenced: BTreeSet<Crs> = BTreeSet::new();
        referenced.insert(self.primary_crs.clone());
        for attrs in &self.attributes {
            referenced.extend(attrs.bounding_boxes.iter().map(|b| b.crs.clone()));
        }
        self.referenced_crs = referenced.into_iter().collect();

        for idx in 0..self.len as usize {
            let parent = self.parent[idx];
            debug_assert!(
                parent == INVALID || (parent as usize) < idx,
                "slots must be in pre-order"
            );
            let mut resolved = BTreeMap::new();
            for crs in &self.referenced_crs {
                let declared = self.attributes[idx]
                    .bounding_boxes
                    .iter()
                    .find(|b| &b.crs == crs)
                    .map(|b| EffectiveBox {
                        rect: b.rect,
                        source: BoxSource::Declared,
                    });
                let effective = declared
                    .or_else(|| self.inherit_from(parent, crs))
                    .or_else(|| {
                        (crs == &self.primary_crs)
                            .then(|| default_extent(crs))
                            .flatten()
                            .map(|rect| EffectiveBox {
                                rect,
                                source: BoxSource::Default,
                            })
                    });
                if let Some(effective) = effective {
                    resolved.insert(crs.clone(), effective);
                }
            }
            self.effective_boxes[idx] = resolved;
        }
    }

    /// Returns the box a child of `parent` inherits for `crs`.
    fn inherit_from(&self, parent: u32, crs: &Crs) -> Option<EffectiveBox> {
        if parent == INVALID {
            return None;
        }
        let found = self.effective_boxes[parent as usize].get(crs)?;
        let origin = match found.source {
            BoxSource::Declared => LayerId(parent),
            BoxSource::Inherited(ancestor) => ancestor,
            BoxSource::Default => return None,
        };
        Some(EffectiveBox {
            rect: found.rect,
            source: BoxSource::Inherited(origin),
        })
    }

    /// Returns the effective box of a layer for `crs`, if any.
    #[must_use]
    pub fn effective_bounding_box(&self, id: LayerId, crs: &Crs) -> Option<&EffectiveBox> {
        self.validate(id);
        self.effective_boxes[id.0 as usize].get(crs)
    }

    /// Returns all effective boxes of a layer, keyed by coordinate system.
    #[must_use]
    pub fn effective_bounding_boxes(&self, id: LayerId) -> &BTreeMap<Crs, EffectiveBox> {
        self.validate(id);
        &self.effective_boxes[id.0 as usize]
    }

    /// Returns the box the layer would inherit for `crs` if it declared none.
    ///
    /// The default table is not consulted.
    #[must_use]
    pub fn inherited_bounding_box(&self, id: LayerId, crs: &Crs) -> Option<EffectiveBox> {
        self.validate(id);
        self.inherit_from(self.parent[id.0 as usize], crs)
    }
}
