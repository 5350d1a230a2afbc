// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer data model.
//!
//! A *layer* is one visual contribution to a texture. There are exactly two
//! kinds:
//!
//! - [`ColorLayer`]: a flat fill covering the whole canvas. It carries no
//!   blend mode or opacity and always paints opaque with
//!   [`BlendMode::Normal`]. It is conventionally the first layer and acts as
//!   the background, but nothing relies on that position.
//! - [`ImageLayer`]: an image resource with a [`BlendMode`] and an
//!   [`Opacity`].
//!
//! Layers are validated once when constructed and are immutable afterwards.

mod blend;
mod opacity;
mod resource;

use alloc::string::String;
use core::fmt;

use crate::color::{Color, ColorParseError};

pub use blend::BlendMode;
pub use opacity::Opacity;
pub use resource::ResourceRef;

/// A flat fill occupying the full canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorLayer {
    /// Fill color.
    pub base_color: Color,
}

/// An image composited with a blend mode and opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageLayer {
    /// Image resource.
    pub source: ResourceRef,
    /// Display name used in captions.
    pub name: String,
    /// How the image merges with the layers beneath it.
    pub blend_mode: BlendMode,
    /// Declared opacity.
    pub opacity: Opacity,
}

/// One layer of a texture.
#[derive(Clone, Debug, PartialEq)]
pub enum Layer {
    /// Flat color fill.
    Color(ColorLayer),
    /// Blended image.
    Image(ImageLayer),
}

impl Layer {
    /// Creates a color layer from a CSS color string.
    pub fn color(base_color: &str) -> Result<Self, InvalidLayerData> {
        let base_color = Color::parse(base_color).map_err(InvalidLayerData::Color)?;
        Ok(Self::Color(ColorLayer { base_color }))
    }

    /// Creates an image layer from catalog values.
    ///
    /// `blend_mode` falls back to [`BlendMode::Normal`] when absent or
    /// unrecognized, and `opacity` defaults to 1 when absent and is clamped
    /// into `0.0..=1.0` otherwise.
    pub fn image(
        source: impl Into<ResourceRef>,
        name: impl Into<String>,
        blend_mode: Option<&str>,
        opacity: Option<f64>,
    ) -> Result<Self, InvalidLayerData> {
        let source = source.into();
        if source.is_empty() {
            return Err(InvalidLayerData::MissingSource);
        }
        let opacity = match opacity {
            Some(value) => Opacity::new(value).ok_or(InvalidLayerData::Opacity)?,
            None => Opacity::OPAQUE,
        };
        Ok(Self::Image(ImageLayer {
            source,
            name: name.into(),
            blend_mode: BlendMode::parse(blend_mode),
            opacity,
        }))
    }

    /// Returns the blend mode used to composite this layer.
    #[must_use]
    pub fn blend_mode(&self) -> BlendMode {
        match self {
            Self::Color(_) => BlendMode::Normal,
            Self::Image(image) => image.blend_mode,
        }
    }

    /// Returns the declared opacity (always opaque for color layers).
    #[must_use]
    pub fn opacity(&self) -> Opacity {
        match self {
            Self::Color(_) => Opacity::OPAQUE,
            Self::Image(image) => image.opacity,
        }
    }

    /// Returns the caption shown for this layer at stack position `index`.
    #[must_use]
    pub fn caption(&self, index: usize) -> LayerCaption<'_> {
        match self {
            Self::Color(color) => LayerCaption::BaseColor(color.base_color),
            Self::Image(image) => LayerCaption::Image {
                index,
                name: &image.name,
                blend_mode: image.blend_mode,
            },
        }
    }
}

/// Caption text for one entry of the layer list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayerCaption<'a> {
    /// A color layer; presenters draw a swatch of the color next to the text.
    BaseColor(Color),
    /// An image layer.
    Image {
        /// Stack position.
        index: usize,
        /// Layer name.
        name: &'a str,
        /// Blend mode, shown with its [`label`](BlendMode::label).
        blend_mode: BlendMode,
    },
}

impl fmt::Display for LayerCaption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseColor(_) => f.write_str("base color"),
            Self::Image {
                index,
                name,
                blend_mode,
            } => write!(f, "{index} {name} {}", blend_mode.label()),
        }
    }
}

/// A layer could not be built from catalog data.
///
/// The containing record is rejected rather than rendered with a missing
/// member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidLayerData {
    /// The color of a color layer did not parse.
    Color(ColorParseError),
    /// The opacity of an image layer was NaN or infinite.
    Opacity,
    /// An image layer had an empty source path.
    MissingSource,
}

impl fmt::Display for InvalidLayerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(err) => write!(f, "invalid layer color: {err}"),
            Self::Opacity => f.write_str("layer opacity is not a finite number"),
            Self::MissingSource => f.write_str("image layer has no source"),
        }
    }
}

impl core::error::Error for InvalidLayerData {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Color(err) => Some(err),
            Self::Opacity | Self::MissingSource => None,
        }
    }
}
