// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Catalog errors.

use std::fmt;
use std::io;

use texturelab_core::color::ColorParseError;
use texturelab_core::layer::InvalidLayerData;
use texturelab_core::texture::InvalidTextureData;

/// A catalog could not be loaded.
///
/// Any error rejects the whole catalog; there are no partially loaded
/// catalogs.
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog source could not be read.
    Io(io::Error),
    /// The catalog text is not valid catalog JSON.
    Parse(serde_json::Error),
    /// A texture entry has an empty id or a bad canvas size.
    InvalidTexture {
        /// Id of the offending entry (may be empty).
        texture_id: String,
        /// What was wrong with it.
        source: InvalidTextureData,
    },
    /// A texture entry declares a background color that does not parse.
    InvalidBaseColor {
        /// Id of the offending entry.
        texture_id: String,
        /// Why the color was rejected.
        source: ColorParseError,
    },
    /// A layer of a texture entry is malformed.
    InvalidLayer {
        /// Id of the texture the layer belongs to.
        texture_id: String,
        /// Stack position of the layer.
        layer_index: usize,
        /// What was wrong with it.
        source: InvalidLayerData,
    },
    /// Two entries share an id.
    DuplicateId(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read catalog: {err}"),
            Self::Parse(err) => write!(f, "malformed catalog: {err}"),
            Self::InvalidTexture { texture_id, source } => {
                write!(f, "texture `{texture_id}`: {source}")
            }
            Self::InvalidBaseColor { texture_id, source } => {
                write!(f, "texture `{texture_id}`: bad base color: {source}")
            }
            Self::InvalidLayer {
                texture_id,
                layer_index,
                source,
            } => write!(f, "texture `{texture_id}`, layer {layer_index}: {source}"),
            Self::DuplicateId(id) => write!(f, "duplicate texture id `{id}`"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidTexture { source, .. } => Some(source),
            Self::InvalidBaseColor { source, .. } => Some(source),
            Self::InvalidLayer { source, .. } => Some(source),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<io::Error> for CatalogError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// No texture with the requested id is available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureNotFound {
    /// The id that was looked up.
    pub id: String,
}

impl fmt::Display for TextureNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture `{}` not found", self.id)
    }
}

impl std::error::Error for TextureNotFound {}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn invalid_layer_names_texture_and_index() {
        let err = CatalogError::InvalidLayer {
            texture_id: "t01".into(),
            layer_index: 2,
            source: InvalidLayerData::MissingSource,
        };
        let text = err.to_string();
        assert!(text.contains("t01"));
        assert!(text.contains("layer 2"));
        assert!(err.source().is_some());
    }

    #[test]
    fn not_found_display() {
        let err = TextureNotFound { id: "zz".into() };
        assert_eq!(err.to_string(), "texture `zz` not found");
    }
}
