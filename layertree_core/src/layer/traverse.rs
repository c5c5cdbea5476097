// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, LayerId};
use super::tree::LayerTree;

/// An iterator over the direct children of a layer.
///
/// Created by [`LayerTree::children`].
#[derive(Clone, Debug)]
pub struct Children<'a> {
    tree: &'a LayerTree,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a LayerTree, first: u32) -> Self {
        Self {
            tree,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.tree.next_sibling[idx as usize];
        Some(LayerId(idx))
    }
}

/// A depth-first pre-order walk over a subtree.
///
/// Created by [`LayerTree::flatten`] and [`LayerTree::descendants`]. The walk
/// follows sibling and parent links, so it holds no stack; cloning it
/// restarts from the same position.
#[derive(Clone, Debug)]
pub struct PreOrder<'a> {
    tree: &'a LayerTree,
    start: u32,
    next: u32,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(tree: &'a LayerTree, start: u32) -> Self {
        Self {
            tree,
            start,
            next: start,
        }
    }

    /// Returns the slot after `idx` in pre-order, staying inside the subtree
    /// rooted at `self.start`.
    fn advance(&self, idx: u32) -> u32 {
        let tree = self.tree;
        let child = tree.first_child[idx as usize];
        if child != INVALID {
            return child;
        }
        let mut cur = idx;
        while cur != self.start {
            let sibling = tree.next_sibling[cur as usize];
            if sibling != INVALID {
                return sibling;
            }
            cur = tree.parent[cur as usize];
        }
        INVALID
    }
}

impl Iterator for PreOrder<'_> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.next == INVALID {
            return None;
        }
        let idx = self.next;
        self.next = self.advance(idx);
        Some(LayerId(idx))
    }
}

impl LayerTree {
    /// Returns every layer in depth-first pre-order: the top layer first,
    /// then each child subtree left to right.
    #[must_use]
    pub fn flatten(&self) -> PreOrder<'_> {
        PreOrder::new(self, 0)
    }

    /// Returns `id` and all of its descendants in pre-order.
    #[must_use]
    pub fn descendants(&self, id: LayerId) -> PreOrder<'_> {
        self.validate(id);
        PreOrder::new(self, id.0)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::bbox::Crs;
    use crate::spec::{LayerAttributes, LayerSpec};

    use super::*;

    fn named(tree: &LayerTree, ids: impl Iterator<Item = LayerId>) -> Vec<&str> {
        ids.map(|id| tree.name(id).unwrap()).collect()
    }

    fn sample() -> LayerTree {
        // top -> [b -> [d], c]
        LayerTree::from_spec(
            LayerSpec::group(
                LayerAttributes::named("top"),
                vec![
                    LayerSpec::group(
                        LayerAttributes::named("b"),
                        vec![LayerSpec::leaf(LayerAttributes::named("d"))],
                    ),
                    LayerSpec::leaf(LayerAttributes::named("c")),
                ],
            ),
            Crs::system_default(),
        )
    }

    #[test]
    fn flatten_is_depth_first() {
        let tree = sample();
        assert_eq!(named(&tree, tree.flatten()), vec!["top", "b", "d", "c"]);
    }

    #[test]
    fn flatten_is_restartable() {
        let tree = sample();
        let mut walk = tree.flatten();
        let _ = walk.next();
        let resumed = walk.clone();
        assert_eq!(named(&tree, walk), vec!["b", "d", "c"]);
        assert_eq!(named(&tree, resumed), vec!["b", "d", "c"]);
        assert_eq!(tree.flatten().count(), 4);
    }

    #[test]
    fn descendants_stay_inside_subtree() {
        let tree = sample();
        let b = tree.find_by_name("b").unwrap();
        assert_eq!(named(&tree, tree.descendants(b)), vec!["b", "d"]);
        let c = tree.find_by_name("c").unwrap();
        assert_eq!(named(&tree, tree.descendants(c)), vec!["c"]);
    }

    #[test]
    fn single_layer_flattens_to_itself() {
        let tree = LayerTree::from_spec(
            LayerSpec::leaf(LayerAttributes::named("only")),
            Crs::system_default(),
        );
        assert_eq!(named(&tree, tree.flatten()), vec!["only"]);
    }
}
