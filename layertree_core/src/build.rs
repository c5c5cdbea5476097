// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat-to-nested tree construction.
//!
//! The legacy flat shape links each record to its parent by name. The builder
//! resolves those names once, through a name-keyed index over the flat list,
//! into owned child lists; no name-based link survives in the produced
//! [`LayerSpec`].
//!
//! Root selection:
//!
//! - exactly one record without a parent reference becomes the top layer;
//! - several such records are wrapped in a synthesized, unnamed top layer,
//!   in input order;
//! - none at all is a [`StructuralError::NoRoot`].

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::StructuralError;
use crate::spec::{FlatLayerSpec, LayerAttributes, LayerInput, LayerSpec};

/// Builds a nested layer tree from the flat input shape.
#[derive(Clone, Debug, Default)]
pub struct TreeBuilder {
    layers: Vec<FlatLayerSpec>,
    top: Option<LayerAttributes>,
}

impl TreeBuilder {
    /// Creates a builder over the given records, in input order.
    #[must_use]
    pub fn new(layers: Vec<FlatLayerSpec>) -> Self {
        Self { layers, top: None }
    }

    /// Sets the fields of the top layer synthesized when several records lack
    /// a parent reference. The name is always cleared.
    ///
    /// Service-level title, abstract and keywords usually go here, since the
    /// synthesized layer is published like any other visible layer.
    #[must_use]
    pub fn with_top_attributes(mut self, attributes: LayerAttributes) -> Self {
        self.top = Some(attributes);
        self
    }

    /// Resolves parent references and returns the nested tree.
    pub fn build(self) -> Result<LayerSpec, StructuralError> {
        if self.layers.is_empty() {
            return Err(StructuralError::Empty);
        }
        let n = self.layers.len();

        let mut by_name: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (idx, layer) in self.layers.iter().enumerate() {
            if let Some(name) = layer.attributes.name.as_deref() {
                by_name.entry(name).or_default().push(idx);
            }
        }

        let mut roots = Vec::new();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (idx, layer) in self.layers.iter().enumerate() {
            let Some(parent) = layer.group.as_deref() else {
                roots.push(idx);
                continue;
            };
            match by_name.get(parent).map(Vec::as_slice) {
                None | Some([]) => {
                    return Err(StructuralError::DanglingParent {
                        layer: self.display_name(idx),
                        parent: parent.into(),
                    });
                }
                Some([p]) => children[*p].push(idx),
                Some(_) => {
                    return Err(StructuralError::AmbiguousParent {
                        parent: parent.into(),
                    });
                }
            }
        }

        if roots.is_empty() {
            return Err(StructuralError::NoRoot);
        }

        // Each record has at most one parent, so anything unreachable from a
        // root sits on or below a cycle.
        let mut reached = vec![false; n];
        let mut stack = roots.clone();
        while let Some(idx) = stack.pop() {
            reached[idx] = true;
            stack.extend(children[idx].iter().copied());
        }
        if let Some(idx) = reached.iter().position(|r| !r) {
            return Err(StructuralError::Cycle {
                layer: self.display_name(idx),
            });
        }

        let mut slots: Vec<Option<LayerAttributes>> = self
            .layers
            .into_iter()
            .map(|l| Some(l.attributes))
            .collect();

        if let [root] = roots.as_slice() {
            Ok(assemble(*root, &mut slots, &children))
        } else {
            let mut top = self.top.unwrap_or_default();
            top.name = None;
            let layers = roots
                .iter()
                .map(|&idx| assemble(idx, &mut slots, &children))
                .collect();
            Ok(LayerSpec::group(top, layers))
        }
    }

    fn display_name(&self, idx: usize) -> String {
        match self.layers[idx].attributes.name.as_deref() {
            Some(name) => name.into(),
            None => format!("#{idx}"),
        }
    }
}

/// Moves the record at `root` and its descendants out of `slots`.
///
/// Each frame holds a record and the children finished so far; a record is
/// closed once all its children are.
fn assemble(
    root: usize,
    slots: &mut [Option<LayerAttributes>],
    children: &[Vec<usize>],
) -> LayerSpec {
    let mut frames: Vec<(usize, Vec<LayerSpec>)> = vec![(root, Vec::new())];
    let mut assembled = LayerSpec::default();
    while let Some((idx, done)) = frames.last() {
        let next = children[*idx].get(done.len()).copied();
        if let Some(child) = next {
            frames.push((child, Vec::with_capacity(children[child].len())));
            continue;
        }
        let Some((idx, layers)) = frames.pop() else {
            break;
        };
        let spec = LayerSpec::group(slots[idx].take().unwrap_or_default(), layers);
        match frames.last_mut() {
            Some((_, siblings)) => siblings.push(spec),
            None => assembled = spec,
        }
    }
    assembled
}

impl LayerInput {
    /// Returns the nested tree, building it first if the input is flat.
    ///
    /// `top` is only used when a flat list needs a synthesized top layer.
    pub fn into_nested(self, top: Option<LayerAttributes>) -> Result<LayerSpec, StructuralError> {
        match self {
            Self::Nested(spec) => Ok(spec),
            Self::Flat(layers) => {
                let builder = TreeBuilder::new(layers);
                match top {
                    Some(top) => builder.with_top_attributes(top),
                    None => builder,
                }
                .build()
            }
        }
    }
}
