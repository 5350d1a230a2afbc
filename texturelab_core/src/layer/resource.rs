// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Catalog resource references.

use alloc::string::String;
use core::fmt;

/// A path to an image resource as written in the catalog.
///
/// Resolving a reference to a concrete locator is the catalog's job; the core
/// only normalizes the path.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ResourceRef(String);

impl ResourceRef {
    /// Wraps a catalog path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path exactly as written in the catalog.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the path relative to the asset root.
    ///
    /// Strips one leading `./`, or else every leading `/`.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        match self.0.strip_prefix("./") {
            Some(rest) => rest,
            None => self.0.trim_start_matches('/'),
        }
    }
}

impl fmt::Debug for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceRef({:?})", self.0)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ResourceRef {
    fn from(path: String) -> Self {
        Self(path)
    }
}
