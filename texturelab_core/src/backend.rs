// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract for presentation layers.
//!
//! The core stops at [`RenderDirective`](crate::compositor::RenderDirective)s.
//! Turning them into DOM elements, canvas draws, or GPU passes is the job of a
//! presenter, which receives only what changed since the previous frame.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_scroll(scroll_top: f64) {
//!     // Transition, recomposite, and diff against the last frame.
//!     let changes = session.scroll(scroll_top, &mut tracer);
//!
//!     // Present: apply incremental changes to the native tree.
//!     presenter.apply(session.stage(), &changes);
//! }
//! ```

use crate::stage::{FrameChanges, Stage};

/// Applies evaluated frame changes to a presentation tree.
///
/// DOM, canvas, and test presenters all implement this trait, enabling
/// generic event loops and test doubles.
pub trait Presenter {
    /// Applies the given [`FrameChanges`] to the backing presentation tree,
    /// reading current directive values from `stage` as needed.
    fn apply(&mut self, stage: &Stage, changes: &FrameChanges);
}
