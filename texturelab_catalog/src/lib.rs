// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture catalog loading, lookup, and navigation.
//!
//! The catalog is a single JSON document (`meta.json` under the asset root)
//! listing every texture and its layer stack. This crate turns it into
//! [`TextureRecord`](texturelab_core::texture::TextureRecord)s and answers the
//! questions the gallery and texture views ask:
//!
//! - [`Catalog`]: load state, lookup by id, and the gallery listing.
//! - [`CatalogProvider`]: where the JSON comes from ([`JsonCatalog`],
//!   [`FileCatalog`]).
//! - [`Navigator`]: the selected texture id and previous/next stepping.
//! - [`AssetRoot`]: turns catalog resource paths into locators.
//!
//! ```
//! use texturelab_catalog::{AssetRoot, Catalog, JsonCatalog, Navigator, Selection};
//!
//! let catalog = Catalog::load(&JsonCatalog::new(
//!     r#"{"textures": [{"id": "t01", "size": [800, 600], "layers": []}]}"#,
//! ));
//! let mut nav = Navigator::new();
//! nav.select("t01");
//! assert!(matches!(nav.resolve(&catalog), Selection::Texture(_)));
//! assert_eq!(catalog.gallery(&AssetRoot::default()).len(), 1);
//! ```

mod assets;
mod catalog;
mod error;
mod navigation;
mod provider;
mod schema;

pub use assets::{AssetRoot, CATALOG_FILE};
pub use catalog::{Catalog, CatalogState, GalleryEntry};
pub use error::{CatalogError, TextureNotFound};
pub use navigation::{Navigator, Selection};
pub use provider::{CatalogProvider, FileCatalog, JsonCatalog};
pub use schema::parse_catalog;
