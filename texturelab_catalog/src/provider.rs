// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Catalog sources.

use std::fs;
use std::path::{Path, PathBuf};

use texturelab_core::texture::TextureRecord;

use crate::assets::CATALOG_FILE;
use crate::error::CatalogError;
use crate::schema::parse_catalog;

/// Something that can produce the full list of texture records.
///
/// Implementations make one attempt per call. Retrying is the caller's
/// decision (see [`Catalog::reload`](crate::Catalog::reload)).
pub trait CatalogProvider {
    /// Loads every texture record, in catalog order.
    fn load_catalog(&self) -> Result<Vec<TextureRecord>, CatalogError>;
}

/// A catalog held in memory as JSON text.
#[derive(Clone, Debug)]
pub struct JsonCatalog {
    text: String,
}

impl JsonCatalog {
    /// Wraps catalog JSON.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl CatalogProvider for JsonCatalog {
    fn load_catalog(&self) -> Result<Vec<TextureRecord>, CatalogError> {
        parse_catalog(&self.text)
    }
}

/// A catalog read from a JSON file on every load.
#[derive(Clone, Debug)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Reads the catalog from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads `meta.json` inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CATALOG_FILE))
    }

    /// Path of the catalog file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogProvider for FileCatalog {
    fn load_catalog(&self) -> Result<Vec<TextureRecord>, CatalogError> {
        let text = fs::read_to_string(&self.path)?;
        parse_catalog(&text)
    }
}

impl<P: CatalogProvider + ?Sized> CatalogProvider for &P {
    fn load_catalog(&self) -> Result<Vec<TextureRecord>, CatalogError> {
        (**self).load_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_catalog_parses_text() {
        let provider = JsonCatalog::new(r#"{"textures": [{"id": "a", "size": [2, 2]}]}"#);
        let records = provider.load_catalog().unwrap();
        assert_eq!(records[0].id(), "a");
    }

    #[test]
    fn missing_file_is_io_error() {
        let provider = FileCatalog::in_dir("/nonexistent/texturelab");
        assert!(provider.path().ends_with("meta.json"));
        assert!(matches!(provider.load_catalog(), Err(CatalogError::Io(_))));
    }

    #[test]
    fn file_catalog_reads_from_disk() {
        let dir = std::env::temp_dir().join(format!("texturelab-catalog-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(CATALOG_FILE),
            r#"{"textures": [{"id": "disk", "size": [4, 4]}]}"#,
        )
        .unwrap();

        let records = FileCatalog::in_dir(&dir).load_catalog().unwrap();
        assert_eq!(records[0].id(), "disk");
        fs::remove_dir_all(&dir).unwrap();
    }
}
