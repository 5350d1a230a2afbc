// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! On-disk catalog format.
//!
//! ```json
//! {
//!   "textures": [{
//!     "id": "t01",
//!     "title": "Crumpled paper",
//!     "description": "...",
//!     "size": [1200, 800],
//!     "baseColor": "#f4f1ea",
//!     "thumbnail": "./t01/thumb.jpg",
//!     "layers": [
//!       { "type": "color", "baseColor": "#f4f1ea" },
//!       { "type": "img", "src": "./t01/fold.png", "name": "fold",
//!         "blendMode": "multiply", "opacity": 0.8 }
//!     ]
//!   }]
//! }
//! ```

use serde::Deserialize;
use texturelab_core::color::Color;
use texturelab_core::kurbo::Size;
use texturelab_core::layer::{InvalidLayerData, Layer};
use texturelab_core::texture::TextureRecord;

use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogDoc {
    pub(crate) textures: Vec<TextureDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TextureDoc {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    size: [f64; 2],
    #[serde(default)]
    base_color: Option<String>,
    #[serde(default)]
    thumbnail: String,
    #[serde(default)]
    layers: Vec<LayerDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum LayerDoc {
    #[serde(rename = "img")]
    Image {
        src: String,
        #[serde(default)]
        name: String,
        #[serde(default, rename = "blendMode")]
        blend_mode: Option<String>,
        #[serde(default)]
        opacity: Option<f64>,
    },
    #[serde(rename = "color")]
    Color {
        #[serde(rename = "baseColor")]
        base_color: String,
    },
}

/// Parses catalog JSON into texture records, in file order.
///
/// Duplicate ids are not checked here; see
/// [`Catalog::from_records`](crate::Catalog::from_records).
pub fn parse_catalog(text: &str) -> Result<Vec<TextureRecord>, CatalogError> {
    let doc: CatalogDoc = serde_json::from_str(text)?;
    doc.textures.into_iter().map(TextureDoc::into_record).collect()
}

impl TextureDoc {
    fn into_record(self) -> Result<TextureRecord, CatalogError> {
        let texture_id = self.id;
        let layers = self
            .layers
            .into_iter()
            .enumerate()
            .map(|(layer_index, layer)| {
                layer.into_layer().map_err(|source| CatalogError::InvalidLayer {
                    texture_id: texture_id.clone(),
                    layer_index,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let base_color = self
            .base_color
            .as_deref()
            .map(Color::parse)
            .transpose()
            .map_err(|source| CatalogError::InvalidBaseColor {
                texture_id: texture_id.clone(),
                source,
            })?;

        let [width, height] = self.size;
        let record = TextureRecord::new(texture_id.clone(), Size::new(width, height), layers)
            .map_err(|source| CatalogError::InvalidTexture { texture_id, source })?
            .with_title(self.title)
            .with_description(self.description)
            .with_thumbnail(self.thumbnail);
        Ok(match base_color {
            Some(color) => record.with_base_color(color),
            None => record,
        })
    }
}

impl LayerDoc {
    fn into_layer(self) -> Result<Layer, InvalidLayerData> {
        match self {
            Self::Image {
                src,
                name,
                blend_mode,
                opacity,
            } => Layer::image(src, name, blend_mode.as_deref(), opacity),
            Self::Color { base_color } => Layer::color(&base_color),
        }
    }
}

#[cfg(test)]
mod tests {
    use texturelab_core::layer::BlendMode;

    use super::*;

    const ONE: &str = r##"{
        "textures": [{
            "id": "t01",
            "title": "Crumpled paper",
            "description": "Folds over warm paper",
            "size": [1200, 800],
            "baseColor": "#f4f1ea",
            "thumbnail": "./t01/thumb.jpg",
            "layers": [
                { "type": "color", "baseColor": "#f4f1ea" },
                { "type": "img", "src": "./t01/fold.png", "name": "fold",
                  "blendMode": "multiply", "opacity": 0.8 },
                { "type": "img", "src": "/t01/dust.png", "name": "dust" }
            ]
        }]
    }"##;

    #[test]
    fn parses_full_entry() {
        let records = parse_catalog(ONE).unwrap();
        assert_eq!(records.len(), 1);
        let t = &records[0];
        assert_eq!(t.id(), "t01");
        assert_eq!(t.title(), "Crumpled paper");
        assert_eq!(t.canvas_size(), Size::new(1200.0, 800.0));
        assert_eq!(t.base_color(), Color::rgb(0xf4, 0xf1, 0xea));
        assert_eq!(t.layer_count(), 3);
        assert_eq!(t.layers()[1].blend_mode(), BlendMode::Multiply);
        assert!((t.layers()[1].opacity().get() - 0.8).abs() < 1e-6);
        // Missing blend mode and opacity take their defaults.
        assert_eq!(t.layers()[2].blend_mode(), BlendMode::Normal);
        assert_eq!(t.layers()[2].opacity().get(), 1.0);
    }

    #[test]
    fn missing_base_color_falls_back_to_white() {
        let text = r#"{"textures": [{"id": "a", "size": [1, 1], "layers": []}]}"#;
        let records = parse_catalog(text).unwrap();
        assert_eq!(records[0].declared_base_color(), None);
        assert_eq!(records[0].base_color(), Color::WHITE);
    }

    #[test]
    fn css_color_values_load() {
        let text = r#"{"textures": [{"id": "a", "size": [1, 1], "baseColor": "beige",
            "layers": [{ "type": "color", "baseColor": "rgba(0, 0, 0, 0.5)" }]}]}"#;
        let records = parse_catalog(text).unwrap();
        assert_eq!(records[0].base_color(), Color::rgb(0xf5, 0xf5, 0xdc));
        assert_eq!(
            Layer::color("rgba(0, 0, 0, 0.5)").unwrap(),
            records[0].layers()[0]
        );
    }

    #[test]
    fn bad_layer_reports_texture_and_index() {
        let text = r##"{"textures": [{"id": "a", "size": [1, 1], "layers": [
            { "type": "color", "baseColor": "#000" },
            { "type": "color", "baseColor": "not-a-color" }
        ]}]}"##;
        match parse_catalog(text) {
            Err(CatalogError::InvalidLayer {
                texture_id,
                layer_index,
                source: InvalidLayerData::Color(_),
            }) => {
                assert_eq!(texture_id, "a");
                assert_eq!(layer_index, 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unknown_layer_type_is_a_parse_error() {
        let text = r#"{"textures": [{"id": "a", "size": [1, 1], "layers": [
            { "type": "video", "src": "x.mp4" }
        ]}]}"#;
        assert!(matches!(parse_catalog(text), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn empty_id_is_rejected() {
        let text = r#"{"textures": [{"id": "", "size": [1, 1]}]}"#;
        assert!(matches!(
            parse_catalog(text),
            Err(CatalogError::InvalidTexture { .. })
        ));
    }

    #[test]
    fn bad_base_color_is_rejected() {
        let text = r##"{"textures": [{"id": "a", "size": [1, 1], "baseColor": "#12"}]}"##;
        assert!(matches!(
            parse_catalog(text),
            Err(CatalogError::InvalidBaseColor { .. })
        ));
    }
}
