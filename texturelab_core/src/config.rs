// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables shared by the compositor and the reveal/viewer state machine.

use core::fmt;

use kurbo::Vec2;

/// Configuration for [`ViewerMachine`](crate::viewer::ViewerMachine) and the
/// [compositor](crate::compositor).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerConfig {
    /// Scroll distance that reveals one more layer.
    pub step_height: f64,
    /// Extra scroll distance past the last layer before viewer mode starts.
    pub trigger_offset: f64,
    /// Scrollable distance past the last reveal step.
    pub tail_height: f64,
    /// Translation per unit of `index * offset` in viewer mode.
    pub spread_factor: f64,
    /// Direction of the viewer-mode spread.
    pub spread_direction: Vec2,
    /// Blur radius per unit of `index * offset` in viewer mode.
    pub blur_factor: f64,
    /// Upper bound of the interaction offset slider.
    pub offset_max: f64,
}

impl ViewerConfig {
    /// The standard layout: 600px steps, a 100px trigger margin, and a
    /// horizontal spread of 5px per step on a `0..=20` slider.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            step_height: 600.0,
            trigger_offset: 100.0,
            tail_height: 1000.0,
            spread_factor: 5.0,
            spread_direction: Vec2::new(1.0, 0.0),
            blur_factor: 0.03,
            offset_max: 20.0,
        }
    }

    /// Scroll position at which the machine switches between reveal and
    /// viewer mode.
    #[must_use]
    pub fn viewer_trigger_point(&self, layer_count: usize) -> f64 {
        self.step_height * layer_count as f64 + self.trigger_offset
    }

    /// Total scrollable height of a texture page.
    #[must_use]
    pub fn scroll_extent(&self, layer_count: usize) -> f64 {
        self.step_height * layer_count as f64 + self.tail_height
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step_height.is_finite() && self.step_height > 0.0) {
            return Err(ConfigError::StepHeight);
        }
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !non_negative(self.trigger_offset) || !non_negative(self.tail_height) {
            return Err(ConfigError::Margin);
        }
        if !non_negative(self.spread_factor)
            || !non_negative(self.blur_factor)
            || !self.spread_direction.is_finite()
        {
            return Err(ConfigError::Factor);
        }
        if !(self.offset_max.is_finite() && self.offset_max > 0.0) {
            return Err(ConfigError::OffsetMax);
        }
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// A [`ViewerConfig`] field is out of range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `step_height` must be finite and positive.
    StepHeight,
    /// `trigger_offset` and `tail_height` must be finite and non-negative.
    Margin,
    /// Spread and blur factors must be finite and non-negative.
    Factor,
    /// `offset_max` must be finite and positive.
    OffsetMax,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepHeight => f.write_str("step height must be finite and positive"),
            Self::Margin => f.write_str("trigger offset and tail height must be non-negative"),
            Self::Factor => f.write_str("spread and blur factors must be finite and non-negative"),
            Self::OffsetMax => f.write_str("offset maximum must be finite and positive"),
        }
    }
}

impl core::error::Error for ConfigError {}
