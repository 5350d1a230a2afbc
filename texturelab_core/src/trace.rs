// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for texture sessions.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that a
//! [`TextureSession`](crate::session::TextureSession) calls while it handles
//! input. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Events carry a `sample_index`: a per-session counter incremented for every
//! handled input (mount, scroll sample, slider change, texture switch).

use crate::viewer::{ModeKind, Transition};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// What happened to the mounted texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MountKind {
    /// A texture view was mounted.
    Mount,
    /// The view switched to another texture and reset.
    Switch,
    /// The view was torn down and its listeners detached.
    Unmount,
}

/// Emitted when a texture is mounted, switched, or unmounted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureMountEvent {
    /// Session input counter.
    pub sample_index: u64,
    /// Kind of lifecycle change.
    pub kind: MountKind,
    /// Layer count of the (new) texture.
    pub layer_count: usize,
    /// Reveal/viewer threshold derived from the layer count.
    pub trigger_point: f64,
}

/// Emitted for every scroll sample the session handles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSampleEvent {
    /// Session input counter.
    pub sample_index: u64,
    /// Scroll position as received.
    pub scroll_top: f64,
    /// Mode after the sample.
    pub mode: ModeKind,
    /// Reveal index after the sample.
    pub reveal_index: usize,
}

/// Emitted when a scroll sample switches the mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeChangeEvent {
    /// Session input counter.
    pub sample_index: u64,
    /// Direction of the switch.
    pub transition: Transition,
    /// Scroll position that caused it; 0 when a texture switch forced it.
    pub scroll_top: f64,
    /// Threshold it was compared against.
    pub trigger_point: f64,
}

/// Emitted when the reveal index moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealStepEvent {
    /// Session input counter.
    pub sample_index: u64,
    /// Previous reveal index.
    pub from: usize,
    /// New reveal index.
    pub to: usize,
}

/// Emitted for every slider change the session handles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetChangeEvent {
    /// Session input counter.
    pub sample_index: u64,
    /// Value received from the slider.
    pub requested: f64,
    /// Value applied after clamping, or `None` if ignored (reveal mode).
    pub applied: Option<f64>,
}

/// Emitted after directives are recomputed and diffed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositeEvent {
    /// Session input counter.
    pub sample_index: u64,
    /// Mode the directives were computed for.
    pub mode: ModeKind,
    /// Number of directives.
    pub directive_count: usize,
    /// Number of visible directives.
    pub visible_count: usize,
    /// Number of distinct slots listed in the frame changes.
    pub changed_slots: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a texture session.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a texture is mounted, switched, or unmounted.
    fn on_texture_mount(&mut self, e: &TextureMountEvent) {
        _ = e;
    }

    /// Called for every handled scroll sample.
    fn on_scroll_sample(&mut self, e: &ScrollSampleEvent) {
        _ = e;
    }

    /// Called when the mode switches.
    fn on_mode_change(&mut self, e: &ModeChangeEvent) {
        _ = e;
    }

    /// Called when the reveal index moves.
    fn on_reveal_step(&mut self, e: &RevealStepEvent) {
        _ = e;
    }

    /// Called for every handled slider change.
    fn on_offset_change(&mut self, e: &OffsetChangeEvent) {
        _ = e;
    }

    /// Called after directives are recomputed.
    fn on_composite(&mut self, e: &CompositeEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`TextureMountEvent`].
    #[inline]
    pub fn texture_mount(&mut self, e: &TextureMountEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_texture_mount(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ScrollSampleEvent`].
    #[inline]
    pub fn scroll_sample(&mut self, e: &ScrollSampleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_scroll_sample(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ModeChangeEvent`].
    #[inline]
    pub fn mode_change(&mut self, e: &ModeChangeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_mode_change(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RevealStepEvent`].
    #[inline]
    pub fn reveal_step(&mut self, e: &RevealStepEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reveal_step(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`OffsetChangeEvent`].
    #[inline]
    pub fn offset_change(&mut self, e: &OffsetChangeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_offset_change(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CompositeEvent`].
    #[inline]
    pub fn composite(&mut self, e: &CompositeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_composite(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(all(test, feature = "trace"))]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        scrolls: u32,
        modes: u32,
    }

    impl TraceSink for Counter {
        fn on_scroll_sample(&mut self, _: &ScrollSampleEvent) {
            self.scrolls += 1;
        }

        fn on_mode_change(&mut self, _: &ModeChangeEvent) {
            self.modes += 1;
        }
    }

    #[test]
    fn tracer_dispatches_to_sink() {
        let mut counter = Counter::default();
        {
            let mut tracer = Tracer::new(&mut counter);
            tracer.scroll_sample(&ScrollSampleEvent {
                sample_index: 0,
                scroll_top: 10.0,
                mode: ModeKind::Reveal,
                reveal_index: 0,
            });
            tracer.mode_change(&ModeChangeEvent {
                sample_index: 1,
                transition: Transition::EnteredViewer,
                scroll_top: 1900.0,
                trigger_point: 1900.0,
            });
            // Default no-op method.
            tracer.reveal_step(&RevealStepEvent {
                sample_index: 2,
                from: 0,
                to: 1,
            });
        }
        assert_eq!(counter.scrolls, 1);
        assert_eq!(counter.modes, 1);
    }

    #[test]
    fn none_tracer_is_silent() {
        let mut tracer = Tracer::none();
        tracer.offset_change(&OffsetChangeEvent {
            sample_index: 0,
            requested: 1.0,
            applied: None,
        });
    }
}
