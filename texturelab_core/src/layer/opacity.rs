// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clamped layer opacity.

/// A layer opacity, always within `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Opacity(f32);

impl Opacity {
    /// Fully opaque.
    pub const OPAQUE: Self = Self(1.0);

    /// Fully transparent.
    pub const TRANSPARENT: Self = Self(0.0);

    /// Clamps `value` into `0.0..=1.0`.
    ///
    /// Returns `None` for NaN or infinite input, which cannot be clamped
    /// meaningfully.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "value is clamped to 0.0..=1.0 before narrowing"
        )]
        let clamped = value.clamp(0.0, 1.0) as f32;
        Some(Self(clamped))
    }

    /// Returns the opacity as an `f32`.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl Default for Opacity {
    #[inline]
    fn default() -> Self {
        Self::OPAQUE
    }
}
