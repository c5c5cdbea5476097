// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract between an evaluated tree and downstream generators.

use crate::layer::LayerTree;

/// A downstream artifact generator (capabilities document, legends,
/// feature-info schema, proxy routing table, ...).
///
/// Consumers only read: they receive a shared borrow of a tree that has
/// already been classified, resolved and accepted by validation.
pub trait TreeConsumer {
    /// Reads whatever the generator needs from `tree`.
    fn consume(&mut self, tree: &LayerTree);
}

impl<F: FnMut(&LayerTree)> TreeConsumer for F {
    fn consume(&mut self, tree: &LayerTree) {
        self(tree);
    }
}
