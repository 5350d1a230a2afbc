// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use texturelab_core::trace::{
    CompositeEvent, ModeChangeEvent, MountKind, OffsetChangeEvent, RevealStepEvent,
    ScrollSampleEvent, TextureMountEvent, TraceSink,
};
use texturelab_core::viewer::{ModeKind, Transition};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    /// Skip scroll samples that changed nothing.
    quiet: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("quiet", &self.quiet)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            quiet: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            quiet: false,
        }
    }

    /// Omits the per-sample `[scroll]` and `[composite]` lines when the
    /// sample produced no frame changes.
    #[must_use]
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn mode_name(mode: ModeKind) -> &'static str {
    match mode {
        ModeKind::Reveal => "reveal",
        ModeKind::Viewer => "viewer",
    }
}

fn mount_name(kind: MountKind) -> &'static str {
    match kind {
        MountKind::Mount => "mount",
        MountKind::Switch => "switch",
        MountKind::Unmount => "unmount",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_texture_mount(&mut self, e: &TextureMountEvent) {
        let _ = writeln!(
            self.writer,
            "[{}] sample={} layers={} trigger={:.0}px",
            mount_name(e.kind),
            e.sample_index,
            e.layer_count,
            e.trigger_point,
        );
    }

    fn on_scroll_sample(&mut self, e: &ScrollSampleEvent) {
        if self.quiet {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[scroll] sample={} top={:.0}px mode={} reveal={}",
            e.sample_index,
            e.scroll_top,
            mode_name(e.mode),
            e.reveal_index,
        );
    }

    fn on_mode_change(&mut self, e: &ModeChangeEvent) {
        let arrow = match e.transition {
            Transition::EnteredViewer => "reveal -> viewer",
            Transition::ReturnedToReveal => "viewer -> reveal",
        };
        let _ = writeln!(
            self.writer,
            "[mode] sample={} {arrow} at {:.0}px (trigger {:.0}px)",
            e.sample_index, e.scroll_top, e.trigger_point,
        );
    }

    fn on_reveal_step(&mut self, e: &RevealStepEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal] sample={} {} -> {}",
            e.sample_index, e.from, e.to,
        );
    }

    fn on_offset_change(&mut self, e: &OffsetChangeEvent) {
        let _ = match e.applied {
            Some(applied) => writeln!(
                self.writer,
                "[offset] sample={} requested={:.2} applied={applied:.2}",
                e.sample_index, e.requested,
            ),
            None => writeln!(
                self.writer,
                "[offset] sample={} requested={:.2} ignored",
                e.sample_index, e.requested,
            ),
        };
    }

    fn on_composite(&mut self, e: &CompositeEvent) {
        if self.quiet && e.changed_slots == 0 {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[composite] sample={} mode={} visible={}/{} changed={}",
            e.sample_index,
            mode_name(e.mode),
            e.visible_count,
            e.directive_count,
            e.changed_slots,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_mode_change() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_mode_change(&ModeChangeEvent {
            sample_index: 4,
            transition: Transition::EnteredViewer,
            scroll_top: 1900.0,
            trigger_point: 1900.0,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[mode]"), "got: {output}");
        assert!(output.contains("reveal -> viewer"), "got: {output}");
        assert!(output.contains("sample=4"), "got: {output}");
    }

    #[test]
    fn ignored_offset_is_marked() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_offset_change(&OffsetChangeEvent {
            sample_index: 1,
            requested: 3.0,
            applied: None,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("ignored"), "got: {output}");
    }

    #[test]
    fn quiet_skips_idle_samples() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new()).quiet(true);
        sink.on_scroll_sample(&ScrollSampleEvent {
            sample_index: 2,
            scroll_top: 10.0,
            mode: ModeKind::Reveal,
            reveal_index: 0,
        });
        sink.on_composite(&CompositeEvent {
            sample_index: 2,
            mode: ModeKind::Reveal,
            directive_count: 3,
            visible_count: 1,
            changed_slots: 0,
        });
        assert!(sink.into_inner().is_empty());
    }
}
