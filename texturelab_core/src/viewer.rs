// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal/viewer state machine.
//!
//! [`ViewerMachine`] turns scroll samples and slider changes into a
//! [`ViewerState`]. It never reads ambient state: the caller passes each new
//! scroll position into [`on_scroll`](ViewerMachine::on_scroll), and every
//! decision is a pure function of that value and the current mode.
//!
//! # Transitions
//!
//! Both directions are checked against one shared threshold,
//! `step_height * layer_count + trigger_offset`:
//!
//! - `Reveal → Viewer` when `scroll_top >= trigger`.
//! - `Viewer → Reveal` when `scroll_top < trigger`.
//!
//! There is no deadband, so jitter right at the threshold flips the mode on
//! every sample.
//!
//! While in reveal mode the reveal index is recomputed on every sample as
//! `min(floor(scroll_top / step_height), layer_count - 1)`. In viewer mode it
//! is frozen and the interaction offset follows the slider instead. Leaving
//! viewer mode resets the offset to 0.

use crate::compositor::Mode;
use crate::config::ViewerConfig;

/// Discrete mode of the machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModeKind {
    /// Scroll-driven progressive reveal (initial state).
    #[default]
    Reveal,
    /// Slider-driven spread of the whole stack.
    Viewer,
}

/// State derived from input so far.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewerState {
    /// Current mode.
    pub mode: ModeKind,
    /// Highest revealed layer, in `0..layer_count` (0 for an empty stack).
    pub reveal_index: usize,
    /// Slider value, in `0.0..=offset_max`.
    pub interaction_offset: f64,
}

impl ViewerState {
    /// The state every texture starts in.
    pub const INITIAL: Self = Self {
        mode: ModeKind::Reveal,
        reveal_index: 0,
        interaction_offset: 0.0,
    };

    /// Returns the compositor mode for this state.
    #[must_use]
    pub const fn compositor_mode(&self) -> Mode {
        match self.mode {
            ModeKind::Reveal => Mode::Reveal {
                reveal_index: self.reveal_index,
            },
            ModeKind::Viewer => Mode::Viewer,
        }
    }
}

/// A mode switch caused by a scroll sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Reveal → Viewer.
    EnteredViewer,
    /// Viewer → Reveal.
    ReturnedToReveal,
}

/// Result of feeding one scroll sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollOutcome {
    /// Mode switch, if one fired.
    pub transition: Option<Transition>,
    /// Whether the reveal index changed.
    pub reveal_changed: bool,
}

impl ScrollOutcome {
    /// Returns `true` if the sample changed any observable state.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.transition.is_some() || self.reveal_changed
    }
}

/// Level-triggered reveal/viewer state machine for one displayed texture.
///
/// The machine has no terminal state. It stops responding only once
/// [`detach`](Self::detach) is called.
#[derive(Clone, Debug)]
pub struct ViewerMachine {
    config: ViewerConfig,
    layer_count: usize,
    trigger_point: f64,
    state: ViewerState,
    attached: bool,
}

impl ViewerMachine {
    /// Creates a machine for a texture with `layer_count` layers.
    #[must_use]
    pub fn new(config: ViewerConfig, layer_count: usize) -> Self {
        Self {
            config,
            layer_count,
            trigger_point: config.viewer_trigger_point(layer_count),
            state: ViewerState::INITIAL,
            attached: true,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> ViewerState {
        self.state
    }

    /// Returns the layer count of the current texture.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Returns the shared reveal/viewer threshold.
    #[must_use]
    pub fn trigger_point(&self) -> f64 {
        self.trigger_point
    }

    /// Returns `false` once the machine has been detached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Feeds one scroll sample.
    ///
    /// Negative or non-finite positions are treated as 0. A detached machine
    /// ignores the sample.
    pub fn on_scroll(&mut self, scroll_top: f64) -> ScrollOutcome {
        if !self.attached {
            return ScrollOutcome::default();
        }
        let scroll_top = if scroll_top.is_finite() { scroll_top.max(0.0) } else { 0.0 };
        let past_trigger = scroll_top >= self.trigger_point;

        let transition = match (self.state.mode, past_trigger) {
            (ModeKind::Reveal, true) => {
                self.state.mode = ModeKind::Viewer;
                Some(Transition::EnteredViewer)
            }
            (ModeKind::Viewer, false) => {
                self.state.mode = ModeKind::Reveal;
                self.state.interaction_offset = 0.0;
                Some(Transition::ReturnedToReveal)
            }
            _ => None,
        };

        let mut reveal_changed = false;
        if self.state.mode == ModeKind::Reveal {
            let index = self.reveal_index_at(scroll_top);
            reveal_changed = index != self.state.reveal_index;
            self.state.reveal_index = index;
        }

        ScrollOutcome {
            transition,
            reveal_changed,
        }
    }

    /// Sets the interaction offset from the slider.
    ///
    /// Only takes effect in viewer mode. The value is clamped to
    /// `0.0..=offset_max` (NaN counts as 0) and returned; `None` means the
    /// input was ignored.
    pub fn set_offset(&mut self, value: f64) -> Option<f64> {
        if !self.attached || self.state.mode != ModeKind::Viewer {
            return None;
        }
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, self.config.offset_max) };
        self.state.interaction_offset = value;
        Some(value)
    }

    /// Returns to the initial state for a newly selected texture.
    ///
    /// The trigger point is re-derived from the new layer count. Resetting
    /// does not re-attach a detached machine.
    ///
    /// Returns [`Transition::ReturnedToReveal`] if the machine was in viewer
    /// mode, since the reset leaves it.
    pub fn reset(&mut self, layer_count: usize) -> Option<Transition> {
        let left_viewer = self.state.mode == ModeKind::Viewer;
        self.layer_count = layer_count;
        self.trigger_point = self.config.viewer_trigger_point(layer_count);
        self.state = ViewerState::INITIAL;
        left_viewer.then_some(Transition::ReturnedToReveal)
    }

    /// Stops responding to input.
    ///
    /// Returns `true` the first time and `false` on every later call.
    pub fn detach(&mut self) -> bool {
        core::mem::replace(&mut self.attached, false)
    }

    fn reveal_index_at(&self, scroll_top: f64) -> usize {
        let max_index = self.layer_count.saturating_sub(1);
        let steps = scroll_top / self.config.step_height;
        if steps >= max_index as f64 {
            return max_index;
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "steps is non-negative and below max_index, so truncation is floor"
        )]
        let index = steps as usize;
        index
    }
}
