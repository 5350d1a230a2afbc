// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render directives: a presentation-agnostic description of every layer for
//! one frame.
//!
//! [`composite`] maps a [`TextureRecord`], an interaction offset, and a
//! [`Mode`] to one [`RenderDirective`] per layer, in stack order. It is a pure
//! function; the same inputs always produce the same list.
//!
//! # Viewer mode
//!
//! Every layer is visible. Layer `i` is translated along the configured
//! spread direction by `i * offset * spread_factor` and blurred by
//! `i * offset * blur_factor`, so layer 0 never moves and the spread grows
//! with depth.
//!
//! # Reveal mode
//!
//! Every layer sits at the neutral, centered placement. Layers up to and
//! including the reveal index are visible with their declared opacity; the
//! rest stay in the list with opacity 0 so the z-order never shifts. A reveal
//! index past the end of the stack is clamped.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::color::Color;
use crate::config::ViewerConfig;
use crate::layer::{BlendMode, Layer, ResourceRef};
use crate::texture::TextureRecord;

/// Which law the compositor applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Progressive reveal up to and including `reveal_index`.
    Reveal {
        /// Highest visible layer index.
        reveal_index: usize,
    },
    /// All layers spread by the interaction offset.
    Viewer,
}

/// What a directive paints.
#[derive(Clone, Debug, PartialEq)]
pub enum DirectiveKind {
    /// A flat fill over the layer bounds.
    Fill(Color),
    /// An image stretched over the layer bounds.
    Image {
        /// Image resource.
        source: ResourceRef,
        /// Layer name (alt text).
        name: String,
    },
}

/// How to paint one layer for the current frame.
///
/// Directives are produced back to front; list position and
/// [`z_index`](Self::z_index) agree.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderDirective {
    /// Position in the texture's layer stack.
    pub index: usize,
    /// Stacking order (equal to `index`).
    pub z_index: usize,
    /// Fill or image content.
    pub kind: DirectiveKind,
    /// Untransformed layer bounds: the canvas, centered on the origin.
    pub bounds: Rect,
    /// Offset from the centered placement.
    pub translation: Vec2,
    /// Full transform (`translate(translation)`), for presenters that take
    /// matrices.
    pub transform: Affine,
    /// Gaussian blur radius in pixels.
    pub blur_radius: f64,
    /// Effective opacity (0.0–1.0).
    pub opacity: f32,
    /// Blend mode.
    pub blend_mode: BlendMode,
    /// Whether the layer contributes to the frame.
    pub visible: bool,
}

/// Composites `texture` with the [standard](ViewerConfig::standard)
/// configuration.
#[must_use]
pub fn composite(texture: &TextureRecord, offset: f64, mode: Mode) -> Vec<RenderDirective> {
    composite_with(&ViewerConfig::standard(), texture, offset, mode)
}

/// Composites `texture` with an explicit configuration.
#[must_use]
pub fn composite_with(
    config: &ViewerConfig,
    texture: &TextureRecord,
    offset: f64,
    mode: Mode,
) -> Vec<RenderDirective> {
    let mut out = Vec::with_capacity(texture.layer_count());
    composite_into(config, texture, offset, mode, &mut out);
    out
}

/// Like [`composite_with`], but reuses a caller-provided buffer.
pub fn composite_into(
    config: &ViewerConfig,
    texture: &TextureRecord,
    offset: f64,
    mode: Mode,
    out: &mut Vec<RenderDirective>,
) {
    out.clear();
    let bounds = centered_bounds(texture.canvas_size());
    let offset = sanitize_offset(offset);
    let mode = clamp_mode(mode, texture);

    for (i, layer) in texture.layers().iter().enumerate() {
        let placement = match mode {
            Mode::Viewer => viewer_placement(config, i, offset, layer),
            Mode::Reveal { reveal_index } => reveal_placement(i, reveal_index, layer),
        };
        out.push(RenderDirective {
            index: i,
            z_index: i,
            kind: directive_kind(layer),
            bounds,
            translation: placement.translation,
            transform: Affine::translate(placement.translation),
            blur_radius: placement.blur_radius,
            opacity: placement.opacity,
            blend_mode: layer.blend_mode(),
            visible: placement.visible,
        });
    }
}

/// Lays out the image layers side by side as plain tiles.
///
/// Color layers are skipped. Every tile is visible, untransformed, unblurred,
/// fully opaque, and uses [`BlendMode::Normal`], so each image can be judged
/// on its own.
#[must_use]
pub fn compose_sheet(texture: &TextureRecord) -> Vec<RenderDirective> {
    let bounds = centered_bounds(texture.canvas_size());
    texture
        .image_layers()
        .map(|(i, image)| RenderDirective {
            index: i,
            z_index: i,
            kind: DirectiveKind::Image {
                source: image.source.clone(),
                name: image.name.clone(),
            },
            bounds,
            translation: Vec2::ZERO,
            transform: Affine::IDENTITY,
            blur_radius: 0.0,
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
            visible: true,
        })
        .collect()
}

struct Placement {
    translation: Vec2,
    blur_radius: f64,
    opacity: f32,
    visible: bool,
}

fn viewer_placement(config: &ViewerConfig, i: usize, offset: f64, layer: &Layer) -> Placement {
    let spread = i as f64 * offset;
    Placement {
        translation: config.spread_direction * (spread * config.spread_factor),
        blur_radius: spread * config.blur_factor,
        opacity: layer.opacity().get(),
        visible: true,
    }
}

fn reveal_placement(i: usize, reveal_index: usize, layer: &Layer) -> Placement {
    let visible = i <= reveal_index;
    Placement {
        translation: Vec2::ZERO,
        blur_radius: 0.0,
        opacity: if visible { layer.opacity().get() } else { 0.0 },
        visible,
    }
}

fn directive_kind(layer: &Layer) -> DirectiveKind {
    match layer {
        Layer::Color(color) => DirectiveKind::Fill(color.base_color),
        Layer::Image(image) => DirectiveKind::Image {
            source: image.source.clone(),
            name: image.name.clone(),
        },
    }
}

fn centered_bounds(size: Size) -> Rect {
    Rect::from_center_size(Point::ORIGIN, size)
}

fn sanitize_offset(offset: f64) -> f64 {
    if offset.is_finite() { offset.max(0.0) } else { 0.0 }
}

fn clamp_mode(mode: Mode, texture: &TextureRecord) -> Mode {
    match mode {
        Mode::Reveal { reveal_index } => Mode::Reveal {
            reveal_index: reveal_index.min(texture.max_reveal_index()),
        },
        Mode::Viewer => Mode::Viewer,
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    const EPS: f64 = 1e-9;

    fn boundary_texture() -> TextureRecord {
        TextureRecord::new(
            "boundary",
            Size::new(200.0, 100.0),
            vec![
                Layer::color("#ffffff").unwrap(),
                Layer::image("a.png", "a", Some("multiply"), Some(0.8)).unwrap(),
                Layer::image("b.png", "b", Some("screen"), Some(1.0)).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn viewer_mode_spreads_and_blurs_by_depth() {
        let texture = boundary_texture();
        let config = ViewerConfig::standard();
        let out = composite(&texture, 10.0, Mode::Viewer);

        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|d| d.visible));

        assert_eq!(out[0].translation, Vec2::ZERO);
        assert_eq!(out[0].blur_radius, 0.0);

        let step = 10.0 * config.spread_factor;
        assert!((out[1].translation.x - step).abs() < EPS);
        assert!((out[2].translation.x - 2.0 * step).abs() < EPS);
        assert_eq!(out[1].translation.y, 0.0);

        assert!(out[1].blur_radius > 0.0);
        assert!((out[2].blur_radius - 2.0 * out[1].blur_radius).abs() < EPS);
    }

    #[test]
    fn viewer_mode_keeps_declared_attributes() {
        let out = composite(&boundary_texture(), 4.0, Mode::Viewer);
        assert_eq!(out[0].kind, DirectiveKind::Fill(Color::WHITE));
        assert_eq!(out[0].opacity, 1.0);
        assert_eq!(out[0].blend_mode, BlendMode::Normal);
        assert!((out[1].opacity - 0.8).abs() < 1e-6);
        assert_eq!(out[1].blend_mode, BlendMode::Multiply);
        assert_eq!(out[2].blend_mode, BlendMode::Screen);
    }

    #[test]
    fn viewer_mode_is_monotonic_in_index() {
        let layers = (0..6)
            .map(|i| Layer::image("x.png", "x", None, Some(f64::from(i) / 5.0)).unwrap())
            .collect();
        let texture = TextureRecord::new("deep", Size::new(10.0, 10.0), layers).unwrap();
        let out = composite(&texture, 3.5, Mode::Viewer);
        for pair in out.windows(2) {
            assert!(pair[0].translation.x <= pair[1].translation.x);
            assert!(pair[0].blur_radius <= pair[1].blur_radius);
        }
    }

    #[test]
    fn transform_matches_translation() {
        let out = composite(&boundary_texture(), 2.0, Mode::Viewer);
        for d in &out {
            assert_eq!(d.transform, Affine::translate(d.translation));
        }
    }

    #[test]
    fn reveal_mode_hides_layers_above_index() {
        let out = composite(&boundary_texture(), 10.0, Mode::Reveal { reveal_index: 1 });
        assert!(out[0].visible);
        assert_eq!(out[0].opacity, 1.0);
        assert!(out[1].visible);
        assert!((out[1].opacity - 0.8).abs() < 1e-6);
        assert!(!out[2].visible);
        assert_eq!(out[2].opacity, 0.0);

        for (i, d) in out.iter().enumerate() {
            assert_eq!(d.index, i);
            assert_eq!(d.z_index, i);
            assert_eq!(d.translation, Vec2::ZERO);
            assert_eq!(d.blur_radius, 0.0);
        }
    }

    #[test]
    fn reveal_index_is_clamped() {
        let texture = boundary_texture();
        let clamped = composite(&texture, 0.0, Mode::Reveal { reveal_index: 99 });
        let last = composite(&texture, 0.0, Mode::Reveal { reveal_index: 2 });
        assert_eq!(clamped, last);
    }

    #[test]
    fn composite_is_deterministic() {
        let texture = boundary_texture();
        let a = composite(&texture, 7.0, Mode::Viewer);
        let b = composite(&texture, 7.0, Mode::Viewer);
        assert_eq!(a, b);
    }

    #[test]
    fn negative_and_nan_offsets_act_as_zero() {
        let texture = boundary_texture();
        let zero = composite(&texture, 0.0, Mode::Viewer);
        assert_eq!(composite(&texture, -5.0, Mode::Viewer), zero);
        assert_eq!(composite(&texture, f64::NAN, Mode::Viewer), zero);
    }

    #[test]
    fn custom_spread_direction() {
        let mut config = ViewerConfig::standard();
        config.spread_direction = Vec2::new(0.0, 1.0);
        let out = composite_with(&config, &boundary_texture(), 1.0, Mode::Viewer);
        assert_eq!(out[2].translation.x, 0.0);
        assert!((out[2].translation.y - 2.0 * config.spread_factor).abs() < EPS);
    }

    #[test]
    fn bounds_are_centered_canvas() {
        let out = composite(&boundary_texture(), 0.0, Mode::Viewer);
        assert_eq!(out[0].bounds, Rect::new(-100.0, -50.0, 100.0, 50.0));
    }

    #[test]
    fn composite_into_reuses_buffer() {
        let texture = boundary_texture();
        let config = ViewerConfig::standard();
        let mut buf = Vec::new();
        composite_into(&config, &texture, 1.0, Mode::Viewer, &mut buf);
        assert_eq!(buf.len(), 3);
        composite_into(&config, &texture, 1.0, Mode::Reveal { reveal_index: 0 }, &mut buf);
        assert_eq!(buf.len(), 3);
        assert!(!buf[1].visible);
    }

    #[test]
    fn empty_texture_produces_no_directives() {
        let texture = TextureRecord::new("empty", Size::ZERO, Vec::new()).unwrap();
        assert!(composite(&texture, 1.0, Mode::Reveal { reveal_index: 3 }).is_empty());
    }

    #[test]
    fn sheet_skips_color_layers() {
        let sheet = compose_sheet(&boundary_texture());
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet[0].index, 1);
        assert!(sheet.iter().all(|d| d.visible
            && d.opacity == 1.0
            && d.blend_mode == BlendMode::Normal
            && d.blur_radius == 0.0));
    }
}
