// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One mounted texture view.
//!
//! A [`TextureSession`] owns everything that lives exactly as long as a
//! texture is on screen: the [`ViewerMachine`], the current directive list,
//! and the [`Stage`] that diffs successive frames. Each handled input runs to
//! completion (transition, recomposite, diff) before the next one, and
//! returns the [`FrameChanges`] a [`Presenter`](crate::backend::Presenter)
//! should apply.

use alloc::vec::Vec;

use crate::compositor::{RenderDirective, composite_into};
use crate::config::ViewerConfig;
use crate::stage::{FrameChanges, Stage};
use crate::texture::TextureRecord;
use crate::trace::{
    CompositeEvent, ModeChangeEvent, MountKind, OffsetChangeEvent, RevealStepEvent,
    ScrollSampleEvent, TextureMountEvent, Tracer,
};
use crate::viewer::{ViewerMachine, ViewerState};

/// The interactive view of a single texture.
#[derive(Debug)]
pub struct TextureSession<'t> {
    texture: &'t TextureRecord,
    machine: ViewerMachine,
    directives: Vec<RenderDirective>,
    stage: Stage,
    sample_index: u64,
}

impl<'t> TextureSession<'t> {
    /// Mounts `texture` in the initial reveal state.
    ///
    /// The first frame is staged immediately; fetch it with
    /// [`take_changes`](Self::take_changes).
    pub fn mount(
        config: ViewerConfig,
        texture: &'t TextureRecord,
        tracer: &mut Tracer<'_>,
    ) -> Self {
        let mut session = Self {
            texture,
            machine: ViewerMachine::new(config, texture.layer_count()),
            directives: Vec::with_capacity(texture.layer_count()),
            stage: Stage::new(),
            sample_index: 0,
        };
        let sample_index = session.next_sample();
        session.emit_mount(sample_index, MountKind::Mount, tracer);
        session.recompose();
        session
    }

    /// Returns the mounted texture.
    #[must_use]
    pub fn texture(&self) -> &'t TextureRecord {
        self.texture
    }

    /// Returns the current machine state.
    #[must_use]
    pub fn state(&self) -> ViewerState {
        self.machine.state()
    }

    /// Returns the state machine.
    #[must_use]
    pub fn machine(&self) -> &ViewerMachine {
        &self.machine
    }

    /// Returns the directives of the current frame.
    #[must_use]
    pub fn directives(&self) -> &[RenderDirective] {
        &self.directives
    }

    /// Returns the stage presenters read from.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Returns `false` once [`unmount`](Self::unmount) has run.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.machine.is_attached()
    }

    /// Drains whatever the stage has accumulated since the last call.
    pub fn take_changes(&mut self) -> FrameChanges {
        self.stage.evaluate()
    }

    /// Handles one scroll sample.
    pub fn scroll(&mut self, scroll_top: f64, tracer: &mut Tracer<'_>) -> FrameChanges {
        if !self.is_mounted() {
            return FrameChanges::default();
        }
        let sample_index = self.next_sample();
        let before = self.machine.state();
        let outcome = self.machine.on_scroll(scroll_top);
        let after = self.machine.state();

        tracer.scroll_sample(&ScrollSampleEvent {
            sample_index,
            scroll_top,
            mode: after.mode,
            reveal_index: after.reveal_index,
        });
        if let Some(transition) = outcome.transition {
            tracer.mode_change(&ModeChangeEvent {
                sample_index,
                transition,
                scroll_top,
                trigger_point: self.machine.trigger_point(),
            });
        }
        if outcome.reveal_changed {
            tracer.reveal_step(&RevealStepEvent {
                sample_index,
                from: before.reveal_index,
                to: after.reveal_index,
            });
        }
        self.present(sample_index, tracer)
    }

    /// Handles one slider change.
    pub fn set_offset(&mut self, value: f64, tracer: &mut Tracer<'_>) -> FrameChanges {
        if !self.is_mounted() {
            return FrameChanges::default();
        }
        let sample_index = self.next_sample();
        let applied = self.machine.set_offset(value);
        tracer.offset_change(&OffsetChangeEvent {
            sample_index,
            requested: value,
            applied,
        });
        self.present(sample_index, tracer)
    }

    /// Shows a different texture, resetting the machine to its initial state.
    ///
    /// Switching away from viewer mode reports the implied
    /// [`Transition::ReturnedToReveal`](crate::viewer::Transition) before the
    /// switch itself, so mode spans seen by trace sinks always close.
    pub fn switch_texture(
        &mut self,
        texture: &'t TextureRecord,
        tracer: &mut Tracer<'_>,
    ) -> FrameChanges {
        if !self.is_mounted() {
            return FrameChanges::default();
        }
        let sample_index = self.next_sample();
        let previous_trigger = self.machine.trigger_point();
        self.texture = texture;
        if let Some(transition) = self.machine.reset(texture.layer_count()) {
            tracer.mode_change(&ModeChangeEvent {
                sample_index,
                transition,
                scroll_top: 0.0,
                trigger_point: previous_trigger,
            });
        }
        self.emit_mount(sample_index, MountKind::Switch, tracer);
        self.present(sample_index, tracer)
    }

    /// Detaches the scroll and slider inputs.
    ///
    /// Returns `true` the first time; later calls do nothing and return
    /// `false`.
    pub fn unmount(&mut self, tracer: &mut Tracer<'_>) -> bool {
        if !self.machine.detach() {
            return false;
        }
        let sample_index = self.next_sample();
        self.emit_mount(sample_index, MountKind::Unmount, tracer);
        true
    }

    fn next_sample(&mut self) -> u64 {
        let index = self.sample_index;
        self.sample_index += 1;
        index
    }

    fn emit_mount(&self, sample_index: u64, kind: MountKind, tracer: &mut Tracer<'_>) {
        tracer.texture_mount(&TextureMountEvent {
            sample_index,
            kind,
            layer_count: self.texture.layer_count(),
            trigger_point: self.machine.trigger_point(),
        });
    }

    fn recompose(&mut self) {
        let state = self.machine.state();
        composite_into(
            self.machine.config(),
            self.texture,
            state.interaction_offset,
            state.compositor_mode(),
            &mut self.directives,
        );
        self.stage.update(&self.directives);
    }

    fn present(&mut self, sample_index: u64, tracer: &mut Tracer<'_>) -> FrameChanges {
        self.recompose();
        let changes = self.stage.evaluate();
        tracer.composite(&CompositeEvent {
            sample_index,
            mode: self.machine.state().mode,
            directive_count: self.directives.len(),
            visible_count: self.directives.iter().filter(|d| d.visible).count(),
            changed_slots: changed_slots(&changes),
        });
        changes
    }
}

fn changed_slots(changes: &FrameChanges) -> usize {
    let mut slots: Vec<u32> = [
        &changes.transforms,
        &changes.filters,
        &changes.opacities,
        &changes.blends,
        &changes.content,
        &changes.shown,
        &changes.hidden,
        &changes.added,
        &changes.removed,
    ]
    .into_iter()
    .flatten()
    .copied()
    .collect();
    slots.sort_unstable();
    slots.dedup();
    slots.len()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Size;

    use super::*;
    use crate::layer::Layer;
    use crate::viewer::ModeKind;

    fn texture(id: &str, images: usize) -> TextureRecord {
        let mut layers = vec![Layer::color("#fafafa").unwrap()];
        for i in 0..images {
            let blend = if i % 2 == 0 { "multiply" } else { "screen" };
            layers.push(Layer::image("img.png", "img", Some(blend), Some(0.9)).unwrap());
        }
        TextureRecord::new(id, Size::new(300.0, 200.0), layers).unwrap()
    }

    #[test]
    fn mount_stages_initial_frame() {
        let tex = texture("a", 2);
        let mut tracer = Tracer::none();
        let mut session = TextureSession::mount(ViewerConfig::standard(), &tex, &mut tracer);
        let changes = session.take_changes();
        assert_eq!(changes.added, [0, 1, 2]);
        assert_eq!(changes.shown, [0]);
        assert_eq!(session.state(), ViewerState::INITIAL);
    }

    #[test]
    fn scrolling_reveals_then_enters_viewer() {
        let tex = texture("a", 2);
        let mut tracer = Tracer::none();
        let mut session = TextureSession::mount(ViewerConfig::standard(), &tex, &mut tracer);
        let _ = session.take_changes();

        let changes = session.scroll(650.0, &mut tracer);
        assert_eq!(changes.shown, [1]);

        let changes = session.scroll(1250.0, &mut tracer);
        assert_eq!(changes.shown, [2]);

        let changes = session.scroll(1900.0, &mut tracer);
        assert_eq!(session.state().mode, ModeKind::Viewer);
        // Offset is still 0, so entering viewer mode moves nothing.
        assert!(changes.is_empty());

        let changes = session.set_offset(10.0, &mut tracer);
        assert_eq!(changes.transforms, [1, 2]);
        assert_eq!(changes.filters, [1, 2]);
    }

    #[test]
    fn returning_to_reveal_collapses_spread() {
        let tex = texture("a", 2);
        let mut tracer = Tracer::none();
        let mut session = TextureSession::mount(ViewerConfig::standard(), &tex, &mut tracer);
        let _ = session.scroll(3000.0, &mut tracer);
        let _ = session.set_offset(8.0, &mut tracer);

        let changes = session.scroll(100.0, &mut tracer);
        assert_eq!(session.state().mode, ModeKind::Reveal);
        assert_eq!(session.state().interaction_offset, 0.0);
        assert_eq!(changes.transforms, [1, 2]);
        assert_eq!(changes.hidden, [1, 2]);
    }

    #[test]
    fn switching_texture_resets_state() {
        let first = texture("a", 3);
        let second = texture("b", 1);
        let mut tracer = Tracer::none();
        let mut session = TextureSession::mount(ViewerConfig::standard(), &first, &mut tracer);
        let _ = session.scroll(5000.0, &mut tracer);
        let _ = session.set_offset(4.0, &mut tracer);

        let changes = session.switch_texture(&second, &mut tracer);
        assert_eq!(session.state(), ViewerState::INITIAL);
        assert_eq!(session.texture().id(), "b");
        assert_eq!(session.machine().trigger_point(), 1300.0);
        assert_eq!(changes.removed, [2, 3]);
        assert_eq!(session.directives().len(), 2);
    }

    #[test]
    fn switching_before_first_take_reports_only_live_slots() {
        let first = texture("a", 3);
        let second = texture("b", 1);
        let mut tracer = Tracer::none();
        let mut session = TextureSession::mount(ViewerConfig::standard(), &first, &mut tracer);

        let changes = session.switch_texture(&second, &mut tracer);
        assert_eq!(changes.added, [0, 1]);
        assert!(changes.removed.is_empty());
        assert_eq!(changes.shown, [0]);
        assert_eq!(changes.hidden, [1]);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn switching_out_of_viewer_closes_the_mode() {
        use crate::trace::{ModeChangeEvent, TraceSink};
        use crate::viewer::Transition;

        #[derive(Default)]
        struct Modes {
            entered: u32,
            returned: u32,
            mounts: u32,
        }

        impl TraceSink for Modes {
            fn on_texture_mount(&mut self, _: &TextureMountEvent) {
                self.mounts += 1;
            }

            fn on_mode_change(&mut self, e: &ModeChangeEvent) {
                // Every return must follow an enter.
                assert!(self.returned < self.entered || e.transition == Transition::EnteredViewer);
                match e.transition {
                    Transition::EnteredViewer => self.entered += 1,
                    Transition::ReturnedToReveal => self.returned += 1,
                }
            }
        }

        let first = texture("a", 2);
        let second = texture("b", 2);
        let mut modes = Modes::default();
        {
            let mut tracer = Tracer::new(&mut modes);
            let mut session =
                TextureSession::mount(ViewerConfig::standard(), &first, &mut tracer);
            let _ = session.scroll(5000.0, &mut tracer);
            let _ = session.switch_texture(&second, &mut tracer);
            // Reveal mode already: a second switch adds no mode change.
            let _ = session.switch_texture(&first, &mut tracer);
        }
        assert_eq!(modes.entered, 1);
        assert_eq!(modes.returned, 1);
        assert_eq!(modes.mounts, 3);
    }

    #[test]
    fn unmount_is_once_and_stops_input() {
        let tex = texture("a", 2);
        let mut tracer = Tracer::none();
        let mut session = TextureSession::mount(ViewerConfig::standard(), &tex, &mut tracer);
        let _ = session.take_changes();

        assert!(session.unmount(&mut tracer));
        assert!(!session.unmount(&mut tracer));
        assert!(session.scroll(900.0, &mut tracer).is_empty());
        assert_eq!(session.state().reveal_index, 0);
    }
}
