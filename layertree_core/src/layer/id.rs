// Copyright 2026 the Layertree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer identity type.

use core::fmt;

use serde::{Serialize, Serializer};

/// Sentinel value indicating "no layer" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a layer in a [`LayerTree`](super::LayerTree).
///
/// Handles are plain slot indices. Trees are immutable once built, so a
/// handle stays valid for the lifetime of the tree that issued it; using it
/// with another tree is a logic error.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub(crate) u32);

impl LayerId {
    /// Returns the raw slot index, which is also the pre-order position.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerId({})", self.0)
    }
}

impl Serialize for LayerId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u32(self.0)
    }
}
