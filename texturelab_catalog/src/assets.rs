// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resource locators.

use std::fmt;

use texturelab_core::layer::ResourceRef;

/// File name of the catalog inside the asset root.
pub const CATALOG_FILE: &str = "meta.json";

/// Base under which every catalog resource lives.
///
/// Resource paths in the catalog are relative to this root, whether they are
/// written as `./a.png`, `/a.png`, or `a.png`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AssetRoot(String);

impl AssetRoot {
    /// Creates a root; trailing slashes are dropped.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        let mut root = root.into();
        let trimmed = root.trim_end_matches('/').len();
        root.truncate(trimmed);
        Self(root)
    }

    /// Returns the root without a trailing slash (empty for `/`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins `resource` onto the root.
    #[must_use]
    pub fn resolve(&self, resource: &ResourceRef) -> String {
        self.join(resource.relative_path())
    }

    /// Locator of the catalog file.
    #[must_use]
    pub fn catalog_locator(&self) -> String {
        self.join(CATALOG_FILE)
    }

    fn join(&self, relative: &str) -> String {
        format!("{}/{relative}", self.0)
    }
}

impl Default for AssetRoot {
    fn default() -> Self {
        Self::new("/textures")
    }
}

impl fmt::Debug for AssetRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetRoot({:?})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_spelling_to_the_same_locator() {
        let root = AssetRoot::default();
        for path in ["./t01/a.png", "/t01/a.png", "//t01/a.png", "t01/a.png"] {
            assert_eq!(root.resolve(&ResourceRef::new(path)), "/textures/t01/a.png");
        }
    }

    #[test]
    fn trailing_slashes_are_dropped() {
        let root = AssetRoot::new("https://cdn.example.com/tex///");
        assert_eq!(root.as_str(), "https://cdn.example.com/tex");
        assert_eq!(
            root.catalog_locator(),
            "https://cdn.example.com/tex/meta.json"
        );
    }

    #[test]
    fn bare_slash_root() {
        let root = AssetRoot::new("/");
        assert_eq!(root.resolve(&ResourceRef::new("./x.png")), "/x.png");
    }
}
