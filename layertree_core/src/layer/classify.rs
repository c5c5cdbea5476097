// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Role classification.

use serde::Serialize;

use super::id::{INVALID, LayerId};
use super::tree::LayerTree;

/// The structural role of a layer, derived from tree shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerRole {
    /// The single root.
    Top,
    /// A non-root layer with children.
    Group,
    /// A non-root leaf that renders data.
    Data,
}

impl LayerRole {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Group => "group",
            Self::Data => "data",
        }
    }
}

impl LayerTree {
    /// Assigns a role to every layer. The root test comes first, so a
    /// single-layer tree is [`LayerRole::Top`], not [`LayerRole::Data`].
    pub(crate) fn classify(&mut self) {
        for idx in 0..self.len as usize {
            self.role[idx] = if self.parent[idx] == INVALID {
                LayerRole::Top
            } else if self.first_child[idx] != INVALID {
                LayerRole::Group
            } else {
                LayerRole::Data
            };
        }
    }

    /// Returns the role of a layer.
    #[must_use]
    pub fn role(&self, id: LayerId) -> LayerRole {
        self.validate(id);
        self.role[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::bbox::Crs;
    use crate::spec::{LayerAttributes, LayerSpec};

    use super::*;

    #[test]
    fn roles_follow_shape() {
        let spec = LayerSpec::group(
            LayerAttributes::named("top"),
            vec![
                LayerSpec::group(
                    LayerAttributes::named("g"),
                    vec![LayerSpec::leaf(LayerAttributes::named("d1"))],
                ),
                LayerSpec::leaf(LayerAttributes::named("d2")),
            ],
        );
        let tree = LayerTree::from_spec(spec, Crs::system_default());
        let role = |name| tree.role(tree.find_by_name(name).unwrap());
        assert_eq!(role("top"), LayerRole::Top);
        assert_eq!(role("g"), LayerRole::Group);
        assert_eq!(role("d1"), LayerRole::Data);
        assert_eq!(role("d2"), LayerRole::Data);
    }

    #[test]
    fn single_layer_is_top() {
        let tree = LayerTree::from_spec(
            LayerSpec::leaf(LayerAttributes::named("only")),
            Crs::system_default(),
        );
        assert_eq!(tree.role(tree.root()), LayerRole::Top);
    }
}
