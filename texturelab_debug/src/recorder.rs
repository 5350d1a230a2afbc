// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Counts and indices are stored as `u32`; larger values saturate.

use texturelab_core::trace::{
    CompositeEvent, ModeChangeEvent, MountKind, OffsetChangeEvent, RevealStepEvent,
    ScrollSampleEvent, TextureMountEvent, TraceSink,
};
use texturelab_core::viewer::{ModeKind, Transition};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_TEXTURE_MOUNT: u8 = 1;
const TAG_SCROLL_SAMPLE: u8 = 2;
const TAG_MODE_CHANGE: u8 = 3;
const TAG_REVEAL_STEP: u8 = 4;
const TAG_OFFSET_CHANGE: u8 = 5;
const TAG_COMPOSITE: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_count(&mut self, v: usize) {
        self.write_u32(u32::try_from(v).unwrap_or(u32::MAX));
    }

    fn write_option_f64(&mut self, v: Option<f64>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_f64(val);
            }
            None => {
                self.write_u8(0);
                self.write_f64(0.0);
            }
        }
    }

    fn write_mode(&mut self, mode: ModeKind) {
        self.write_u8(match mode {
            ModeKind::Reveal => 0,
            ModeKind::Viewer => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_texture_mount(&mut self, e: &TextureMountEvent) {
        self.write_u8(TAG_TEXTURE_MOUNT);
        self.write_u64(e.sample_index);
        self.write_u8(match e.kind {
            MountKind::Mount => 0,
            MountKind::Switch => 1,
            MountKind::Unmount => 2,
        });
        self.write_count(e.layer_count);
        self.write_f64(e.trigger_point);
    }

    fn on_scroll_sample(&mut self, e: &ScrollSampleEvent) {
        self.write_u8(TAG_SCROLL_SAMPLE);
        self.write_u64(e.sample_index);
        self.write_f64(e.scroll_top);
        self.write_mode(e.mode);
        self.write_count(e.reveal_index);
    }

    fn on_mode_change(&mut self, e: &ModeChangeEvent) {
        self.write_u8(TAG_MODE_CHANGE);
        self.write_u64(e.sample_index);
        self.write_u8(match e.transition {
            Transition::EnteredViewer => 0,
            Transition::ReturnedToReveal => 1,
        });
        self.write_f64(e.scroll_top);
        self.write_f64(e.trigger_point);
    }

    fn on_reveal_step(&mut self, e: &RevealStepEvent) {
        self.write_u8(TAG_REVEAL_STEP);
        self.write_u64(e.sample_index);
        self.write_count(e.from);
        self.write_count(e.to);
    }

    fn on_offset_change(&mut self, e: &OffsetChangeEvent) {
        self.write_u8(TAG_OFFSET_CHANGE);
        self.write_u64(e.sample_index);
        self.write_f64(e.requested);
        self.write_option_f64(e.applied);
    }

    fn on_composite(&mut self, e: &CompositeEvent) {
        self.write_u8(TAG_COMPOSITE);
        self.write_u64(e.sample_index);
        self.write_mode(e.mode);
        self.write_count(e.directive_count);
        self.write_count(e.visible_count);
        self.write_count(e.changed_slots);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`TextureMountEvent`].
    TextureMount(TextureMountEvent),
    /// A [`ScrollSampleEvent`].
    ScrollSample(ScrollSampleEvent),
    /// A [`ModeChangeEvent`].
    ModeChange(ModeChangeEvent),
    /// A [`RevealStepEvent`].
    RevealStep(RevealStepEvent),
    /// An [`OffsetChangeEvent`].
    OffsetChange(OffsetChangeEvent),
    /// A [`CompositeEvent`].
    Composite(CompositeEvent),
}

impl RecordedEvent {
    /// Session input counter of the event.
    #[must_use]
    pub fn sample_index(&self) -> u64 {
        match self {
            Self::TextureMount(e) => e.sample_index,
            Self::ScrollSample(e) => e.sample_index,
            Self::ModeChange(e) => e.sample_index,
            Self::RevealStep(e) => e.sample_index,
            Self::OffsetChange(e) => e.sample_index,
            Self::Composite(e) => e.sample_index,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let bytes = self.data.get(self.pos..end)?.try_into().ok()?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_count(&mut self) -> Option<usize> {
        self.read_u32().and_then(|v| usize::try_from(v).ok())
    }

    fn read_option_f64(&mut self) -> Option<Option<f64>> {
        let present = self.read_u8()?;
        let val = self.read_f64()?;
        Some((present != 0).then_some(val))
    }

    fn read_mode(&mut self) -> Option<ModeKind> {
        Some(match self.read_u8()? {
            0 => ModeKind::Reveal,
            _ => ModeKind::Viewer,
        })
    }

    fn decode_texture_mount(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TextureMount(TextureMountEvent {
            sample_index: self.read_u64()?,
            kind: match self.read_u8()? {
                0 => MountKind::Mount,
                1 => MountKind::Switch,
                _ => MountKind::Unmount,
            },
            layer_count: self.read_count()?,
            trigger_point: self.read_f64()?,
        }))
    }

    fn decode_scroll_sample(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ScrollSample(ScrollSampleEvent {
            sample_index: self.read_u64()?,
            scroll_top: self.read_f64()?,
            mode: self.read_mode()?,
            reveal_index: self.read_count()?,
        }))
    }

    fn decode_mode_change(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ModeChange(ModeChangeEvent {
            sample_index: self.read_u64()?,
            transition: match self.read_u8()? {
                0 => Transition::EnteredViewer,
                _ => Transition::ReturnedToReveal,
            },
            scroll_top: self.read_f64()?,
            trigger_point: self.read_f64()?,
        }))
    }

    fn decode_reveal_step(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RevealStep(RevealStepEvent {
            sample_index: self.read_u64()?,
            from: self.read_count()?,
            to: self.read_count()?,
        }))
    }

    fn decode_offset_change(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::OffsetChange(OffsetChangeEvent {
            sample_index: self.read_u64()?,
            requested: self.read_f64()?,
            applied: self.read_option_f64()?,
        }))
    }

    fn decode_composite(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Composite(CompositeEvent {
            sample_index: self.read_u64()?,
            mode: self.read_mode()?,
            directive_count: self.read_count()?,
            visible_count: self.read_count()?,
            changed_slots: self.read_count()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_TEXTURE_MOUNT => self.decode_texture_mount(),
            TAG_SCROLL_SAMPLE => self.decode_scroll_sample(),
            TAG_MODE_CHANGE => self.decode_mode_change(),
            TAG_REVEAL_STEP => self.decode_reveal_step(),
            TAG_OFFSET_CHANGE => self.decode_offset_change(),
            TAG_COMPOSITE => self.decode_composite(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use texturelab_core::config::ViewerConfig;
    use texturelab_core::kurbo::Size;
    use texturelab_core::layer::Layer;
    use texturelab_core::session::TextureSession;
    use texturelab_core::texture::TextureRecord;
    use texturelab_core::trace::Tracer;

    use super::*;

    fn texture() -> TextureRecord {
        TextureRecord::new(
            "t",
            Size::new(100.0, 100.0),
            vec![
                Layer::color("#fff").unwrap(),
                Layer::image("a.png", "a", Some("multiply"), None).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn records_a_session() {
        let tex = texture();
        let mut rec = RecorderSink::new();
        {
            let mut tracer = Tracer::new(&mut rec);
            let mut session = TextureSession::mount(ViewerConfig::standard(), &tex, &mut tracer);
            let _ = session.scroll(700.0, &mut tracer);
            let _ = session.scroll(1300.0, &mut tracer);
            let _ = session.set_offset(6.0, &mut tracer);
            assert!(session.unmount(&mut tracer));
        }

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                RecordedEvent::TextureMount(_) => "mount",
                RecordedEvent::ScrollSample(_) => "scroll",
                RecordedEvent::ModeChange(_) => "mode",
                RecordedEvent::RevealStep(_) => "reveal",
                RecordedEvent::OffsetChange(_) => "offset",
                RecordedEvent::Composite(_) => "composite",
            })
            .collect();
        assert_eq!(
            kinds,
            [
                "mount",
                "scroll",
                "reveal",
                "composite",
                "scroll",
                "mode",
                "composite",
                "offset",
                "composite",
                "mount",
            ]
        );

        match &events[5] {
            RecordedEvent::ModeChange(e) => {
                assert_eq!(e.transition, Transition::EnteredViewer);
                assert_eq!(e.trigger_point, 1300.0);
            }
            other => panic!("expected ModeChange, got {other:?}"),
        }
        match &events[7] {
            RecordedEvent::OffsetChange(e) => assert_eq!(e.applied, Some(6.0)),
            other => panic!("expected OffsetChange, got {other:?}"),
        }
        assert!(events.windows(2).all(|w| w[0].sample_index() <= w[1].sample_index()));
    }

    #[test]
    fn decode_stops_on_unknown_tag() {
        assert_eq!(decode(&[0xff, 0, 0]).count(), 0);
    }

    #[test]
    fn decode_stops_on_truncated_record() {
        let mut rec = RecorderSink::new();
        rec.on_reveal_step(&RevealStepEvent {
            sample_index: 1,
            from: 0,
            to: 1,
        });
        let bytes = rec.into_bytes();
        assert_eq!(decode(&bytes).count(), 1);
        assert_eq!(decode(&bytes[..bytes.len() - 1]).count(), 0);
    }
}
