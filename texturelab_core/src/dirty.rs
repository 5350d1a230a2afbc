// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The [`Stage`](crate::stage::Stage) marks one channel (via
//! [`understory_dirty`]) per directive field that changed between two
//! frames. Layers in a texture are flat siblings, so no channel propagates;
//! each marked slot appears in the drain output on its own.
//!
//! Callers never query dirty state directly.
//! [`Stage::evaluate`](crate::stage::Stage::evaluate) drains all channels
//! and surfaces the result as [`FrameChanges`](crate::stage::FrameChanges).

use understory_dirty::Channel;

/// Translation changed.
pub const TRANSFORM: Channel = Channel::new(0);

/// Blur radius changed.
pub const FILTER: Channel = Channel::new(1);

/// Opacity changed.
pub const OPACITY: Channel = Channel::new(2);

/// Blend mode changed.
pub const BLEND: Channel = Channel::new(3);

/// Visibility flipped.
pub const VISIBILITY: Channel = Channel::new(4);

/// Fill color, image source, or bounds changed.
pub const CONTENT: Channel = Channel::new(5);

/// Slots were added or removed.
pub const TOPOLOGY: Channel = Channel::new(6);
