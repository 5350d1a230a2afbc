// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental presentation state.
//!
//! A [`Stage`] remembers the directives of the last frame, one slot per layer
//! index. [`update`](Stage::update) compares a fresh directive list against
//! them and marks a dirty channel for each field that differs;
//! [`evaluate`](Stage::evaluate) drains every channel into a
//! [`FrameChanges`] that presenters apply incrementally.
//!
//! [`FrameChanges`] uses raw slot indices (`u32`) so presenters can index
//! their own element tables directly.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::compositor::RenderDirective;
use crate::dirty;

/// The set of changes produced by a single [`Stage::evaluate`] call.
///
/// Every list is sorted ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameChanges {
    /// Slots whose translation changed.
    pub transforms: Vec<u32>,
    /// Slots whose blur radius changed.
    pub filters: Vec<u32>,
    /// Slots whose opacity changed.
    pub opacities: Vec<u32>,
    /// Slots whose blend mode changed.
    pub blends: Vec<u32>,
    /// Slots whose content (fill, image, or bounds) changed.
    pub content: Vec<u32>,
    /// Slots that became visible.
    pub shown: Vec<u32>,
    /// Slots that became invisible.
    pub hidden: Vec<u32>,
    /// Slots added since the last evaluate.
    pub added: Vec<u32>,
    /// Slots removed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether any slot was added or removed.
    pub topology_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.transforms.clear();
        self.filters.clear();
        self.opacities.clear();
        self.blends.clear();
        self.content.clear();
        self.shown.clear();
        self.hidden.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.topology_changed
            && self.transforms.is_empty()
            && self.filters.is_empty()
            && self.opacities.is_empty()
            && self.blends.is_empty()
            && self.content.is_empty()
            && self.shown.is_empty()
            && self.hidden.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
    }
}

/// Last-frame directives plus per-slot dirty tracking.
#[derive(Debug)]
pub struct Stage {
    directives: Vec<RenderDirective>,
    dirty: DirtyTracker<u32>,
    pending_added: Vec<u32>,
    pending_removed: Vec<u32>,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    /// Creates an empty stage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    /// Returns the directives of the latest update, back to front.
    #[must_use]
    pub fn directives(&self) -> &[RenderDirective] {
        &self.directives
    }

    /// Returns the directive in slot `idx`, if any.
    #[must_use]
    pub fn directive_at(&self, idx: u32) -> Option<&RenderDirective> {
        self.directives.get(idx as usize)
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Returns `true` if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Replaces the stage contents with `next`, marking what changed.
    pub fn update(&mut self, next: &[RenderDirective]) {
        let shared = self.directives.len().min(next.len());
        for (i, (old, new)) in self.directives.iter().zip(next).enumerate() {
            let idx = slot(i);
            if old.translation != new.translation {
                self.dirty.mark(idx, dirty::TRANSFORM);
            }
            if old.blur_radius != new.blur_radius {
                self.dirty.mark(idx, dirty::FILTER);
            }
            if old.opacity != new.opacity {
                self.dirty.mark(idx, dirty::OPACITY);
            }
            if old.blend_mode != new.blend_mode {
                self.dirty.mark(idx, dirty::BLEND);
            }
            if old.visible != new.visible {
                self.dirty.mark(idx, dirty::VISIBILITY);
            }
            if old.kind != new.kind || old.bounds != new.bounds {
                self.dirty.mark(idx, dirty::CONTENT);
            }
        }
        self.directives[..shared].clone_from_slice(&next[..shared]);

        // Slots that no longer exist. A slot added since the last evaluate
        // was never presented, so it just drops out of the added list.
        for i in (shared..self.directives.len()).rev() {
            let idx = slot(i);
            self.dirty.remove_key(idx);
            if let Some(pos) = self.pending_added.iter().position(|&a| a == idx) {
                self.pending_added.swap_remove(pos);
            } else {
                self.pending_removed.push(idx);
            }
        }
        self.directives.truncate(shared);

        // New slots carry their full state. A slot removed since the last
        // evaluate is still on the presenter's side and is updated in place.
        for (i, directive) in next.iter().enumerate().skip(shared) {
            let idx = slot(i);
            self.directives.push(directive.clone());
            if let Some(pos) = self.pending_removed.iter().position(|&r| r == idx) {
                self.pending_removed.swap_remove(pos);
            } else {
                self.pending_added.push(idx);
            }
            for channel in [
                dirty::TRANSFORM,
                dirty::FILTER,
                dirty::OPACITY,
                dirty::BLEND,
                dirty::VISIBILITY,
                dirty::CONTENT,
                dirty::TOPOLOGY,
            ] {
                self.dirty.mark(idx, channel);
            }
        }
    }

    /// Drains all dirty channels and returns the set of changes.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        changes.clear();

        changes.transforms = self.drain(dirty::TRANSFORM);
        changes.filters = self.drain(dirty::FILTER);
        changes.opacities = self.drain(dirty::OPACITY);
        changes.blends = self.drain(dirty::BLEND);
        changes.content = self.drain(dirty::CONTENT);

        for idx in self.drain(dirty::VISIBILITY) {
            match self.directive_at(idx) {
                Some(d) if d.visible => changes.shown.push(idx),
                Some(_) => changes.hidden.push(idx),
                None => {}
            }
        }

        // Topology is structural; the lifecycle lists below carry it.
        let _ = self.drain(dirty::TOPOLOGY);

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
        changes.added.sort_unstable();
        changes.removed.sort_unstable();
        changes.topology_changed = !changes.added.is_empty() || !changes.removed.is_empty();
    }

    fn drain(&mut self, channel: understory_dirty::Channel) -> Vec<u32> {
        let len = self.directives.len();
        let mut out: Vec<u32> = self
            .dirty
            .drain(channel)
            .deterministic()
            .run()
            .filter(|&idx| (idx as usize) < len)
            .collect();
        out.sort_unstable();
        out
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "layer stacks are far smaller than u32::MAX"
)]
fn slot(i: usize) -> u32 {
    i as u32
}
