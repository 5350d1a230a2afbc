// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The loaded texture catalog.

use std::collections::HashSet;

use texturelab_core::texture::TextureRecord;

use crate::assets::AssetRoot;
use crate::error::{CatalogError, TextureNotFound};
use crate::provider::CatalogProvider;

/// Load state of a [`Catalog`].
#[derive(Debug)]
pub enum CatalogState {
    /// No load attempt has finished yet.
    Loading,
    /// The catalog loaded; records are in catalog order.
    Ready(Vec<TextureRecord>),
    /// The last load attempt failed.
    Failed(CatalogError),
}

/// One thumbnail of the gallery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryEntry<'a> {
    /// Texture id.
    pub id: &'a str,
    /// Texture title (alt text).
    pub title: &'a str,
    /// Resolved thumbnail locator.
    pub thumbnail: String,
}

/// The full, ordered set of texture records.
///
/// A catalog that failed to load is indistinguishable from one that is still
/// loading as far as [`records`](Self::records) and
/// [`is_loading`](Self::is_loading) are concerned; the failure is available
/// from [`error`](Self::error). Nothing retries on its own.
#[derive(Debug)]
pub struct Catalog {
    state: CatalogState,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Creates a catalog in the [`Loading`](CatalogState::Loading) state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CatalogState::Loading,
        }
    }

    /// Builds a ready catalog from records, rejecting duplicate ids.
    pub fn from_records(records: Vec<TextureRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(CatalogError::DuplicateId(record.id().to_owned()));
            }
        }
        Ok(Self {
            state: CatalogState::Ready(records),
        })
    }

    /// Makes a single load attempt from `provider`.
    #[must_use]
    pub fn load(provider: &impl CatalogProvider) -> Self {
        let mut catalog = Self::new();
        catalog.reload(provider);
        catalog
    }

    /// Discards the current state and makes a fresh load attempt.
    ///
    /// Returns `true` if the catalog is ready afterwards.
    pub fn reload(&mut self, provider: &impl CatalogProvider) -> bool {
        self.state = match provider.load_catalog().and_then(Self::from_records) {
            Ok(catalog) => catalog.state,
            Err(err) => CatalogState::Failed(err),
        };
        self.is_ready()
    }

    /// Returns the load state.
    #[must_use]
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Returns `true` unless the catalog loaded successfully.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.is_ready()
    }

    /// Returns `true` if the catalog loaded successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, CatalogState::Ready(_))
    }

    /// Returns the failure of the last load attempt, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&CatalogError> {
        match &self.state {
            CatalogState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Records in catalog order; empty unless ready.
    #[must_use]
    pub fn records(&self) -> &[TextureRecord] {
        match &self.state {
            CatalogState::Ready(records) => records,
            _ => &[],
        }
    }

    /// Number of available records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// Returns `true` if no record is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Returns the record at catalog position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TextureRecord> {
        self.records().get(index)
    }

    /// Looks up a record by id.
    pub fn find(&self, id: &str) -> Result<&TextureRecord, TextureNotFound> {
        self.records()
            .iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| TextureNotFound { id: id.to_owned() })
    }

    /// Returns the catalog position of `id`.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.records().iter().position(|record| record.id() == id)
    }

    /// Lists every texture's id, title, and thumbnail locator, in catalog
    /// order.
    #[must_use]
    pub fn gallery(&self, root: &AssetRoot) -> Vec<GalleryEntry<'_>> {
        self.records()
            .iter()
            .map(|record| GalleryEntry {
                id: record.id(),
                title: record.title(),
                thumbnail: root.resolve(record.thumbnail()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::JsonCatalog;

    const TWO: &str = r#"{"textures": [
        {"id": "t01", "title": "Paper", "size": [10, 10], "thumbnail": "./t01/thumb.jpg"},
        {"id": "t02", "title": "Stone", "size": [10, 10], "thumbnail": "/t02/thumb.jpg"}
    ]}"#;

    #[test]
    fn starts_loading_and_empty() {
        let catalog = Catalog::new();
        assert!(catalog.is_loading());
        assert!(catalog.is_empty());
        assert!(catalog.error().is_none());
    }

    #[test]
    fn loads_in_order() {
        let catalog = Catalog::load(&JsonCatalog::new(TWO));
        assert!(catalog.is_ready());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).map(TextureRecord::id), Some("t02"));
        assert_eq!(catalog.position("t02"), Some(1));
    }

    #[test]
    fn find_reports_missing_id() {
        let catalog = Catalog::load(&JsonCatalog::new(TWO));
        assert_eq!(catalog.find("t01").unwrap().title(), "Paper");
        assert_eq!(
            catalog.find("t99").unwrap_err(),
            TextureNotFound { id: "t99".into() }
        );
    }

    #[test]
    fn failure_looks_like_loading_forever() {
        let catalog = Catalog::load(&JsonCatalog::new("{ not json"));
        assert!(catalog.is_loading());
        assert!(catalog.is_empty());
        assert!(matches!(catalog.error(), Some(CatalogError::Parse(_))));
        assert!(catalog.find("t01").is_err());
    }

    #[test]
    fn reload_is_a_fresh_attempt() {
        let mut catalog = Catalog::load(&JsonCatalog::new("[]"));
        assert!(catalog.error().is_some());
        assert!(catalog.reload(&JsonCatalog::new(TWO)));
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.reload(&JsonCatalog::new("")));
        assert!(catalog.is_empty());
    }

    #[test]
    fn duplicate_ids_reject_catalog() {
        let text = r#"{"textures": [
            {"id": "x", "size": [1, 1]},
            {"id": "x", "size": [2, 2]}
        ]}"#;
        let catalog = Catalog::load(&JsonCatalog::new(text));
        assert!(matches!(
            catalog.error(),
            Some(CatalogError::DuplicateId(id)) if id == "x"
        ));
    }

    #[test]
    fn gallery_resolves_thumbnails() {
        let catalog = Catalog::load(&JsonCatalog::new(TWO));
        let gallery = catalog.gallery(&AssetRoot::default());
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery[0].thumbnail, "/textures/t01/thumb.jpg");
        assert_eq!(gallery[1].thumbnail, "/textures/t02/thumb.jpg");
        assert_eq!(gallery[1].title, "Stone");
    }
}
