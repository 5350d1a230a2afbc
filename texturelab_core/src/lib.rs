// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer model, compositor, and reveal/viewer state machine for layered
//! textures.
//!
//! A texture is an ordered stack of layers (a flat base color plus image
//! layers with their own blend mode and opacity). `texturelab_core` decides how
//! that stack is shown while the user scrolls: first revealing it one layer at
//! a time, then, past a threshold, spreading the whole stack apart under a
//! slider. It is `no_std` compatible (with `alloc`) and never touches a
//! presentation layer directly.
//!
//! # Architecture
//!
//! ```text
//!   scroll sample / slider value
//!       │
//!       ▼
//!   ViewerMachine ──► ViewerState ──► composite() ──► Vec<RenderDirective>
//!                                                         │
//!                 ┌───────────────────────────────────────┘
//!                 ▼
//!   Stage::update() ──► Stage::evaluate() ──► FrameChanges ──► Presenter::apply()
//! ```
//!
//! **[`texture`]**, **[`layer`]**, **[`color`]**: The immutable texture
//! record and its layers. Blend modes parse from CSS keywords, opacities are
//! clamped, colors parse from hex strings.
//!
//! **[`config`]**: [`ViewerConfig`](config::ViewerConfig), the step height,
//! trigger margin, and spread/blur factors every other module reads.
//!
//! **[`viewer`]**: [`ViewerMachine`](viewer::ViewerMachine), the
//! level-triggered reveal/viewer state machine.
//!
//! **[`compositor`]**: Pure mapping from texture, offset, and mode to render
//! directives.
//!
//! **[`stage`]**, **[`dirty`]**: Frame-to-frame diffing via
//! `understory_dirty`, producing [`FrameChanges`](stage::FrameChanges).
//!
//! **[`session`]**: [`TextureSession`](session::TextureSession) wires the
//! above together for one mounted texture.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait presentation
//! layers implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub use kurbo;

pub mod backend;
pub mod color;
pub mod compositor;
pub mod config;
pub mod dirty;
pub mod layer;
pub mod session;
pub mod stage;
pub mod texture;
pub mod trace;
pub mod viewer;
