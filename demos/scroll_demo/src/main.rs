// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated texture session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Loads a small embedded catalog, then scrolls through the first texture,
//! past the viewer threshold, drags the slider, scrolls back, and switches to
//! the next texture. Events go to both a
//! [`PrettyPrintSink`](texturelab_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](texturelab_debug::recorder::RecorderSink); the recording
//! is exported as a Chrome trace JSON file.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

use texturelab_catalog::{AssetRoot, Catalog, JsonCatalog, Navigator, Selection};
use texturelab_core::backend::Presenter;
use texturelab_core::compositor::DirectiveKind;
use texturelab_core::config::ViewerConfig;
use texturelab_core::session::TextureSession;
use texturelab_core::stage::{FrameChanges, Stage};
use texturelab_core::trace::{
    CompositeEvent, ModeChangeEvent, OffsetChangeEvent, RevealStepEvent, ScrollSampleEvent,
    TextureMountEvent, TraceSink, Tracer,
};

use texturelab_debug::chrome::{SAMPLE_INTERVAL_60HZ_US, export};
use texturelab_debug::pretty::PrettyPrintSink;
use texturelab_debug::recorder::RecorderSink;

const CATALOG: &str = r##"{
  "textures": [
    {
      "id": "t01",
      "title": "Crumpled paper",
      "description": "Folds and dust over warm paper",
      "size": [1200, 800],
      "baseColor": "#f4f1ea",
      "thumbnail": "./t01/thumb.jpg",
      "layers": [
        { "type": "color", "baseColor": "#f4f1ea" },
        { "type": "img", "src": "./t01/fold.png", "name": "fold",
          "blendMode": "multiply", "opacity": 0.85 },
        { "type": "img", "src": "./t01/dust.png", "name": "dust",
          "blendMode": "screen", "opacity": 0.6 }
      ]
    },
    {
      "id": "t02",
      "title": "Wet concrete",
      "description": "Stains on grey",
      "size": [1200, 800],
      "thumbnail": "/t02/thumb.jpg",
      "layers": [
        { "type": "color", "baseColor": "#8a8a8a" },
        { "type": "img", "src": "t02/stain.png", "name": "stain",
          "blendMode": "color-burn" }
      ]
    }
  ]
}"##;

const OUTPUT: &str = "scroll_trace.json";

fn main() -> Result<(), Box<dyn Error>> {
    let root = AssetRoot::default();
    let config = ViewerConfig::standard();
    config.validate()?;

    // -- catalog -----------------------------------------------------------
    let catalog = Catalog::load(&JsonCatalog::new(CATALOG));
    if let Some(err) = catalog.error() {
        return Err(format!("catalog failed to load: {err}").into());
    }
    for entry in catalog.gallery(&root) {
        println!("{}  {}  ({})", entry.id, entry.title, entry.thumbnail);
    }

    let mut nav = Navigator::new();
    let Some(first) = nav.next(&catalog).map(str::to_owned) else {
        return Err("catalog is empty".into());
    };
    let Selection::Texture(texture) = nav.resolve(&catalog) else {
        return Err(format!("texture `{first}` did not resolve").into());
    };
    for caption in texture.captions() {
        println!("  layer: {caption}");
    }

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout())).quiet(true);
    let mut recorder = RecorderSink::new();
    let mut tee = Tee {
        a: &mut pretty,
        b: &mut recorder,
    };
    let mut tracer = Tracer::new(&mut tee);
    let mut presenter = LogPresenter { root: &root };

    // -- session -----------------------------------------------------------
    let mut session = TextureSession::mount(config, texture, &mut tracer);
    let changes = session.take_changes();
    presenter.apply(session.stage(), &changes);

    let trigger = session.machine().trigger_point();
    let mut top = 0.0;
    while top <= trigger + 300.0 {
        let changes = session.scroll(top, &mut tracer);
        presenter.apply(session.stage(), &changes);
        top += 150.0;
    }

    let mut offset = 0.0;
    while offset <= config.offset_max {
        let changes = session.set_offset(offset, &mut tracer);
        presenter.apply(session.stage(), &changes);
        offset += 4.0;
    }

    // Back above the threshold: spread collapses and reveal resumes.
    for top in [trigger - 1.0, 700.0, 0.0] {
        let changes = session.scroll(top, &mut tracer);
        presenter.apply(session.stage(), &changes);
    }

    // Slider input in reveal mode is ignored.
    let changes = session.set_offset(10.0, &mut tracer);
    presenter.apply(session.stage(), &changes);

    // -- next texture ------------------------------------------------------
    if let Some(next_id) = nav.next(&catalog) {
        let next = catalog.find(next_id)?;
        let changes = session.switch_texture(next, &mut tracer);
        presenter.apply(session.stage(), &changes);

        let trigger = session.machine().trigger_point();
        for top in [300.0, 650.0, trigger] {
            let changes = session.scroll(top, &mut tracer);
            presenter.apply(session.stage(), &changes);
        }
    }
    session.unmount(&mut tracer);
    drop(tracer);

    // -- export Chrome trace -----------------------------------------------
    let file = File::create(OUTPUT)?;
    let mut writer = BufWriter::new(file);
    export(recorder.as_bytes(), SAMPLE_INTERVAL_60HZ_US, &mut writer)?;

    println!("Wrote {OUTPUT} (starting from `{first}`)");
    Ok(())
}

// -- sinks ---------------------------------------------------------------

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_texture_mount(&mut self, e: &TextureMountEvent) {
        self.a.on_texture_mount(e);
        self.b.on_texture_mount(e);
    }

    fn on_scroll_sample(&mut self, e: &ScrollSampleEvent) {
        self.a.on_scroll_sample(e);
        self.b.on_scroll_sample(e);
    }

    fn on_mode_change(&mut self, e: &ModeChangeEvent) {
        self.a.on_mode_change(e);
        self.b.on_mode_change(e);
    }

    fn on_reveal_step(&mut self, e: &RevealStepEvent) {
        self.a.on_reveal_step(e);
        self.b.on_reveal_step(e);
    }

    fn on_offset_change(&mut self, e: &OffsetChangeEvent) {
        self.a.on_offset_change(e);
        self.b.on_offset_change(e);
    }

    fn on_composite(&mut self, e: &CompositeEvent) {
        self.a.on_composite(e);
        self.b.on_composite(e);
    }
}

// -- presenter -----------------------------------------------------------

/// Prints the slots a real presenter would touch.
struct LogPresenter<'a> {
    root: &'a AssetRoot,
}

impl Presenter for LogPresenter<'_> {
    fn apply(&mut self, stage: &Stage, changes: &FrameChanges) {
        for &idx in &changes.added {
            let Some(d) = stage.directive_at(idx) else {
                continue;
            };
            match &d.kind {
                DirectiveKind::Fill(color) => println!("    + slot {idx}: fill {color}"),
                DirectiveKind::Image { source, name } => {
                    println!(
                        "    + slot {idx}: {name} <{}> {}",
                        self.root.resolve(source),
                        d.blend_mode,
                    );
                }
            }
        }
        for &idx in &changes.removed {
            println!("    - slot {idx}");
        }
        for &idx in &changes.transforms {
            if let Some(d) = stage.directive_at(idx) {
                println!(
                    "    ~ slot {idx}: translate ({:.1}, {:.1}) blur {:.2}px",
                    d.translation.x, d.translation.y, d.blur_radius,
                );
            }
        }
        for &idx in changes.shown.iter().chain(&changes.hidden) {
            if let Some(d) = stage.directive_at(idx) {
                println!(
                    "    ~ slot {idx}: {} opacity {:.2}",
                    if d.visible { "show" } else { "hide" },
                    d.opacity,
                );
            }
        }
    }
}
