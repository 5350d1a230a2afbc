// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Session events carry no wall-clock time, so each sample index is placed
//! `sample_interval_us` microseconds after the previous one. Viewer mode
//! shows up as a duration span; scroll position, reveal index, and offset
//! are emitted as counter tracks.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use texturelab_core::trace::MountKind;
use texturelab_core::viewer::Transition;

use crate::recorder::{RecordedEvent, decode};

/// Sample spacing of a 60 Hz scroll source, in microseconds.
pub const SAMPLE_INTERVAL_60HZ_US: f64 = 16_666.667;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], sample_interval_us: f64, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let ts = |sample_index: u64| sample_index as f64 * sample_interval_us;
    // Sample index of the open Viewer span, if any.
    let mut viewer_open: Option<u64> = None;
    let mut last_sample = 0;

    for recorded in decode(bytes) {
        last_sample = recorded.sample_index();
        match recorded {
            RecordedEvent::TextureMount(e) => {
                if e.kind == MountKind::Unmount && viewer_open.take().is_some() {
                    events.push(end_viewer(ts(e.sample_index)));
                }
                let name = match e.kind {
                    MountKind::Mount => "Mount",
                    MountKind::Switch => "SwitchTexture",
                    MountKind::Unmount => "Unmount",
                };
                events.push(json!({
                    "ph": "i",
                    "name": name,
                    "cat": "Session",
                    "ts": ts(e.sample_index),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "sample_index": e.sample_index,
                        "layer_count": e.layer_count,
                        "trigger_point": e.trigger_point,
                    }
                }));
            }
            RecordedEvent::ScrollSample(e) => {
                events.push(json!({
                    "ph": "C",
                    "name": "scroll",
                    "cat": "Input",
                    "ts": ts(e.sample_index),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "scroll_top": e.scroll_top,
                        "reveal_index": e.reveal_index,
                    }
                }));
            }
            RecordedEvent::ModeChange(e) => {
                let ph = match e.transition {
                    Transition::EnteredViewer => {
                        if viewer_open.replace(e.sample_index).is_some() {
                            continue;
                        }
                        "B"
                    }
                    Transition::ReturnedToReveal => {
                        if viewer_open.take().is_none() {
                            continue;
                        }
                        "E"
                    }
                };
                events.push(json!({
                    "ph": ph,
                    "name": "Viewer",
                    "cat": "Mode",
                    "ts": ts(e.sample_index),
                    "pid": 0,
                    "tid": 1,
                    "args": {
                        "sample_index": e.sample_index,
                        "scroll_top": e.scroll_top,
                        "trigger_point": e.trigger_point,
                    }
                }));
            }
            RecordedEvent::RevealStep(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "RevealStep",
                    "cat": "Mode",
                    "ts": ts(e.sample_index),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "from": e.from,
                        "to": e.to,
                    }
                }));
            }
            RecordedEvent::OffsetChange(e) => {
                if let Some(applied) = e.applied {
                    events.push(json!({
                        "ph": "C",
                        "name": "offset",
                        "cat": "Input",
                        "ts": ts(e.sample_index),
                        "pid": 0,
                        "tid": 0,
                        "args": {
                            "offset": applied,
                        }
                    }));
                }
            }
            RecordedEvent::Composite(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Composite",
                    "cat": "Frame",
                    "ts": ts(e.sample_index),
                    "pid": 0,
                    "tid": 2,
                    "s": "t",
                    "args": {
                        "sample_index": e.sample_index,
                        "mode": format!("{:?}", e.mode),
                        "directives": e.directive_count,
                        "visible": e.visible_count,
                        "changed_slots": e.changed_slots,
                    }
                }));
            }
        }
    }

    if viewer_open.is_some() {
        events.push(end_viewer(ts(last_sample)));
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

/// Closes a Viewer span the recording never ended.
fn end_viewer(ts: f64) -> Value {
    json!({
        "ph": "E",
        "name": "Viewer",
        "cat": "Mode",
        "ts": ts,
        "pid": 0,
        "tid": 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use texturelab_core::trace::{
        ModeChangeEvent, OffsetChangeEvent, ScrollSampleEvent, TextureMountEvent, TraceSink,
    };
    use texturelab_core::config::ViewerConfig;
    use texturelab_core::kurbo::Size;
    use texturelab_core::layer::Layer;
    use texturelab_core::session::TextureSession;
    use texturelab_core::texture::TextureRecord;
    use texturelab_core::trace::Tracer;
    use texturelab_core::viewer::ModeKind;

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_texture_mount(&TextureMountEvent {
            sample_index: 0,
            kind: MountKind::Mount,
            layer_count: 3,
            trigger_point: 1900.0,
        });
        rec.on_scroll_sample(&ScrollSampleEvent {
            sample_index: 1,
            scroll_top: 1900.0,
            mode: ModeKind::Viewer,
            reveal_index: 0,
        });
        rec.on_mode_change(&ModeChangeEvent {
            sample_index: 1,
            transition: Transition::EnteredViewer,
            scroll_top: 1900.0,
            trigger_point: 1900.0,
        });
        rec.on_mode_change(&ModeChangeEvent {
            sample_index: 2,
            transition: Transition::ReturnedToReveal,
            scroll_top: 1000.0,
            trigger_point: 1900.0,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), 1000.0, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 4);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "Mount");

        assert_eq!(parsed[1]["ph"], "C");
        assert_eq!(parsed[1]["args"]["scroll_top"], 1900.0);

        // Viewer mode is a begin/end span.
        assert_eq!(parsed[2]["ph"], "B");
        assert_eq!(parsed[3]["ph"], "E");
        assert_eq!(parsed[3]["ts"], 2000.0);
    }

    #[test]
    fn viewer_spans_always_close() {
        let tex = TextureRecord::new(
            "t",
            Size::new(10.0, 10.0),
            vec![Layer::color("#000").unwrap(), Layer::color("#fff").unwrap()],
        )
        .unwrap();
        let mut rec = RecorderSink::new();
        {
            let mut tracer = Tracer::new(&mut rec);
            let mut session = TextureSession::mount(ViewerConfig::standard(), &tex, &mut tracer);
            let _ = session.scroll(5000.0, &mut tracer);
            let _ = session.switch_texture(&tex, &mut tracer);
            let _ = session.scroll(5000.0, &mut tracer);
            assert!(session.unmount(&mut tracer));
        }

        let mut out = Vec::new();
        export(rec.as_bytes(), 1000.0, &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        let phases: Vec<&str> = parsed
            .iter()
            .filter(|e| e["name"] == "Viewer")
            .filter_map(|e| e["ph"].as_str())
            .collect();
        assert_eq!(phases, ["B", "E", "B", "E"]);
    }

    #[test]
    fn truncated_recording_closes_open_span() {
        let mut rec = RecorderSink::new();
        rec.on_mode_change(&ModeChangeEvent {
            sample_index: 3,
            transition: Transition::EnteredViewer,
            scroll_top: 1900.0,
            trigger_point: 1900.0,
        });
        let mut out = Vec::new();
        export(rec.as_bytes(), 1000.0, &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1]["ph"], "E");
        assert_eq!(parsed[1]["ts"], 3000.0);
    }

    #[test]
    fn ignored_offsets_are_skipped() {
        let mut rec = RecorderSink::new();
        rec.on_offset_change(&OffsetChangeEvent {
            sample_index: 0,
            requested: 4.0,
            applied: None,
        });
        let mut out = Vec::new();
        export(rec.as_bytes(), SAMPLE_INTERVAL_60HZ_US, &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], SAMPLE_INTERVAL_60HZ_US, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
