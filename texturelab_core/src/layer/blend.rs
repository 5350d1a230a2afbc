// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blend modes for compositing a layer over the layers beneath it.

use core::fmt;

/// Blend mode for compositing a layer.
///
/// The set is closed and matches the CSS `mix-blend-mode` keywords, so a
/// DOM presenter can forward [`as_css`](Self::as_css) unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Standard source-over alpha compositing.
    #[default]
    Normal,
    /// Multiply blend.
    Multiply,
    /// Screen blend.
    Screen,
    /// Overlay blend.
    Overlay,
    /// Darken blend.
    Darken,
    /// Lighten blend.
    Lighten,
    /// Color-dodge blend.
    ColorDodge,
    /// Color-burn blend.
    ColorBurn,
    /// Hard-light blend.
    HardLight,
    /// Soft-light blend.
    SoftLight,
    /// Difference blend.
    Difference,
    /// Exclusion blend.
    Exclusion,
    /// Hue blend.
    Hue,
    /// Saturation blend.
    Saturation,
    /// Color blend.
    Color,
    /// Luminosity blend.
    Luminosity,
}

impl BlendMode {
    /// Every blend mode, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Normal,
        Self::Multiply,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
        Self::Difference,
        Self::Exclusion,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
    ];

    /// Returns the CSS keyword for this mode.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }

    /// Returns the human-readable caption label (`"color dodge"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ColorDodge => "color dodge",
            Self::ColorBurn => "color burn",
            Self::HardLight => "hard light",
            Self::SoftLight => "soft light",
            other => other.as_css(),
        }
    }

    /// Looks up a CSS keyword, ignoring ASCII case and surrounding whitespace.
    #[must_use]
    pub fn from_css(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_css().eq_ignore_ascii_case(keyword))
    }

    /// Resolves an optional catalog keyword.
    ///
    /// An absent or unrecognized keyword falls back to [`Normal`](Self::Normal).
    #[must_use]
    pub fn parse(keyword: Option<&str>) -> Self {
        keyword.and_then(Self::from_css).unwrap_or_default()
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}
