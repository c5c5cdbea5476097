// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with topology and attribute access.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::mem;

use crate::bbox::Crs;
use crate::spec::{LayerAttributes, LayerSpec};

use super::classify::LayerRole;
use super::id::{INVALID, LayerId};
use super::resolve::EffectiveBox;
use super::traverse::Children;

/// Struct-of-arrays storage for one evaluated layer tree.
///
/// Layers are addressed by [`LayerId`] handles. Slots are filled in
/// pre-order, so slot 0 is the root and parents precede their children.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerTree {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,

    // -- Declared properties (from the input) --
    pub(crate) attributes: Vec<LayerAttributes>,

    // -- Computed properties (written by classify / resolve) --
    pub(crate) role: Vec<LayerRole>,
    pub(crate) effective_boxes: Vec<BTreeMap<Crs, EffectiveBox>>,

    // -- Whole-tree --
    pub(crate) primary_crs: Crs,
    pub(crate) referenced_crs: Vec<Crs>,
    pub(crate) len: u32,
}

impl LayerTree {
    /// Builds the tree for `spec`, classifying every layer and resolving
    /// effective bounding boxes against `primary_crs`.
    #[must_use]
    pub fn from_spec(spec: LayerSpec, primary_crs: Crs) -> Self {
        let mut tree = Self::assemble(spec, primary_crs);
        tree.classify();
        tree.resolve_bounding_boxes();
        tree
    }

    /// Lays out `spec` in pre-order. Roles and effective boxes are left at
    /// their defaults until [`classify`](Self::classify) and
    /// [`resolve_bounding_boxes`](Self::resolve_bounding_boxes) run.
    pub(crate) fn assemble(spec: LayerSpec, primary_crs: Crs) -> Self {
        let capacity = spec.count();
        let mut tree = Self {
            parent: Vec::with_capacity(capacity),
            first_child: Vec::with_capacity(capacity),
            next_sibling: Vec::with_capacity(capacity),
            attributes: Vec::with_capacity(capacity),
            role: Vec::with_capacity(capacity),
            effective_boxes: Vec::with_capacity(capacity),
            primary_crs,
            referenced_crs: Vec::new(),
            len: 0,
        };
        tree.push_subtree(spec);
        tree
    }

    /// Appends `spec` and its descendants in pre-order.
    ///
    /// Children go on the stack in reverse so they pop, and take slots, in
    /// document order.
    fn push_subtree(&mut self, spec: LayerSpec) {
        let mut last_child: Vec<u32> = Vec::with_capacity(self.parent.capacity());
        let mut stack = vec![(spec, INVALID)];
        while let Some((mut spec, parent)) = stack.pop() {
            let idx = self.len;
            self.len += 1;
            self.parent.push(parent);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.attributes.push(mem::take(&mut spec.attributes));
            self.role.push(LayerRole::Data);
            self.effective_boxes.push(BTreeMap::new());
            last_child.push(INVALID);

            if parent != INVALID {
                let p = parent as usize;
                match last_child[p] {
                    INVALID => self.first_child[p] = idx,
                    prev => self.next_sibling[prev as usize] = idx,
                }
                last_child[p] = idx;
            }
            let children = mem::take(&mut spec.layers);
            stack.extend(children.into_iter().rev().map(|child| (child, idx)));
        }
    }

    // -- Topology API --

    /// Returns the number of layers in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns whether the tree has no layers. Never true for a built tree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the top layer.
    #[must_use]
    pub fn root(&self) -> LayerId {
        LayerId(0)
    }

    /// Returns the parent of a layer, or `None` for the top layer.
    #[must_use]
    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.validate(id);
        let p = self.parent[id.0 as usize];
        (p != INVALID).then_some(LayerId(p))
    }

    /// Returns an iterator over the direct children of a layer.
    #[must_use]
    pub fn children(&self, id: LayerId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.0 as usize])
    }

    /// Returns whether the layer has no children.
    #[must_use]
    pub fn is_leaf(&self, id: LayerId) -> bool {
        self.validate(id);
        self.first_child[id.0 as usize] == INVALID
    }

    /// Returns the number of edges between the top layer and `id`.
    #[must_use]
    pub fn depth(&self, id: LayerId) -> usize {
        let mut depth = 0;
        let mut cur = id;
        while let Some(p) = self.parent(cur) {
            depth += 1;
            cur = p;
        }
        depth
    }

    // -- Property getters --

    /// Returns the declared attributes of a layer.
    #[must_use]
    pub fn attributes(&self, id: LayerId) -> &LayerAttributes {
        self.validate(id);
        &self.attributes[id.0 as usize]
    }

    /// Returns the name of a layer, if it has one.
    #[must_use]
    pub fn name(&self, id: LayerId) -> Option<&str> {
        self.attributes(id).name.as_deref()
    }

    /// Returns the layer called `name`, searching in pre-order.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "slot count is bounded by `len: u32`"
    )]
    pub fn find_by_name(&self, name: &str) -> Option<LayerId> {
        self.attributes
            .iter()
            .position(|a| a.name.as_deref() == Some(name))
            .map(|idx| LayerId(idx as u32))
    }

    /// Returns the coordinate system the tree is resolved against.
    #[must_use]
    pub fn primary_crs(&self) -> &Crs {
        &self.primary_crs
    }

    /// Returns every coordinate system that has effective boxes: the primary
    /// one plus all declared anywhere in the tree, in sorted order.
    #[must_use]
    pub fn referenced_crs(&self) -> &[Crs] {
        &self.referenced_crs
    }

    // -- Internal helpers --

    /// Panics if the handle does not belong to this tree.
    pub(crate) fn validate(&self, id: LayerId) {
        assert!(
            id.0 < self.len,
            "LayerId {id:?} out of range (len {})",
            self.len
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn sample() -> LayerSpec {
        // top -> [a -> [a1, a2], b]
        LayerSpec::group(
            LayerAttributes::named("top"),
            vec![
                LayerSpec::group(
                    LayerAttributes::named("a"),
                    vec![
                        LayerSpec::leaf(LayerAttributes::named("a1")),
                        LayerSpec::leaf(LayerAttributes::named("a2")),
                    ],
                ),
                LayerSpec::leaf(LayerAttributes::named("b")),
            ],
        )
    }

    #[test]
    fn slots_are_pre_order() {
        let tree = LayerTree::from_spec(sample(), Crs::system_default());
        let names: Vec<_> = (0..tree.len() as u32)
            .map(|i| tree.name(LayerId(i)).unwrap())
            .collect();
        assert_eq!(names, vec!["top", "a", "a1", "a2", "b"]);
    }

    #[test]
    fn topology_queries() {
        let tree = LayerTree::from_spec(sample(), Crs::system_default());
        let a = tree.find_by_name("a").unwrap();
        let a2 = tree.find_by_name("a2").unwrap();
        let b = tree.find_by_name("b").unwrap();

        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.parent(a2), Some(a));
        let kids: Vec<_> = tree.children(tree.root()).collect();
        assert_eq!(kids, vec![a, b]);
        assert!(tree.is_leaf(b));
        assert!(!tree.is_leaf(a));
        assert_eq!(tree.depth(a2), 2);
        assert_eq!(tree.depth(tree.root()), 0);
        assert!(!tree.is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn foreign_handle_panics() {
        let tree = LayerTree::from_spec(LayerSpec::default(), Crs::system_default());
        let _ = tree.attributes(LayerId(3));
    }
}
