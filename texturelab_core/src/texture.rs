// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture records: an ordered layer stack plus canvas metadata.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;

use crate::color::Color;
use crate::layer::{ImageLayer, Layer, LayerCaption, ResourceRef};

/// A named, ordered stack of layers.
///
/// Index 0 is the back of the stack; later layers paint above earlier ones.
/// Records are read-only once built. Lookup by id belongs to the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureRecord {
    id: String,
    title: String,
    description: String,
    canvas_size: Size,
    base_color: Option<Color>,
    thumbnail: ResourceRef,
    layers: Vec<Layer>,
}

impl TextureRecord {
    /// Creates a record with an empty title, description, and thumbnail.
    ///
    /// Fails if `id` is empty or `canvas_size` is negative or not finite.
    pub fn new(
        id: impl Into<String>,
        canvas_size: Size,
        layers: Vec<Layer>,
    ) -> Result<Self, InvalidTextureData> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvalidTextureData::EmptyId);
        }
        if !(canvas_size.is_finite() && canvas_size.width >= 0.0 && canvas_size.height >= 0.0) {
            return Err(InvalidTextureData::CanvasSize);
        }
        Ok(Self {
            id,
            title: String::new(),
            description: String::new(),
            canvas_size,
            base_color: None,
            thumbnail: ResourceRef::default(),
            layers,
        })
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the canvas background color.
    #[must_use]
    pub fn with_base_color(mut self, base_color: Color) -> Self {
        self.base_color = Some(base_color);
        self
    }

    /// Sets the thumbnail resource.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<ResourceRef>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    /// Unique key of this record.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Canvas size in device-independent pixels.
    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Canvas background, falling back to opaque white.
    #[must_use]
    pub fn base_color(&self) -> Color {
        self.base_color.unwrap_or(Color::WHITE)
    }

    /// Canvas background exactly as declared.
    #[must_use]
    pub fn declared_base_color(&self) -> Option<Color> {
        self.base_color
    }

    /// Thumbnail resource.
    #[must_use]
    pub fn thumbnail(&self) -> &ResourceRef {
        &self.thumbnail
    }

    /// Layers, back to front.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Highest valid reveal index (`layer_count - 1`, or 0 for an empty
    /// stack).
    #[must_use]
    pub fn max_reveal_index(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    /// Iterates image layers together with their stack index.
    pub fn image_layers(&self) -> impl Iterator<Item = (usize, &ImageLayer)> + '_ {
        self.layers
            .iter()
            .enumerate()
            .filter_map(|(i, layer)| match layer {
                Layer::Image(image) => Some((i, image)),
                Layer::Color(_) => None,
            })
    }

    /// Iterates the caption of every layer, back to front.
    pub fn captions(&self) -> impl Iterator<Item = LayerCaption<'_>> + '_ {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, layer)| layer.caption(i))
    }
}

/// A texture record could not be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidTextureData {
    /// The id was empty.
    EmptyId,
    /// The canvas size was negative or not finite.
    CanvasSize,
}

impl fmt::Display for InvalidTextureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => f.write_str("texture id is empty"),
            Self::CanvasSize => f.write_str("canvas size must be finite and non-negative"),
        }
    }
}

impl core::error::Error for InvalidTextureData {}
