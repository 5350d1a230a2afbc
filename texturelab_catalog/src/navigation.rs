// Copyright 2026 the Texturelab Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which texture is on screen.

use texturelab_core::texture::TextureRecord;

use crate::catalog::Catalog;

/// What the texture view should show for the current selection.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<'a> {
    /// The catalog has not loaded (or failed to load).
    Loading,
    /// Nothing is selected.
    Unselected,
    /// The selected id is not in the catalog.
    NotFound {
        /// The selected id.
        id: String,
    },
    /// The selected texture.
    Texture(&'a TextureRecord),
}

/// Tracks the selected texture id and steps through the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Navigator {
    selected: Option<String>,
}

impl Navigator {
    /// Creates a navigator with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `id`, whether or not the catalog contains it.
    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Returns the selected id.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Resolves the selection against `catalog`.
    ///
    /// The result borrows only the catalog, so the navigator stays free to
    /// step while a resolved texture is on screen.
    #[must_use]
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Selection<'a> {
        if catalog.is_loading() {
            return Selection::Loading;
        }
        match self.selected_id() {
            None => Selection::Unselected,
            Some(id) => match catalog.find(id) {
                Ok(record) => Selection::Texture(record),
                Err(err) => Selection::NotFound { id: err.id },
            },
        }
    }

    /// Selects the texture after the current one, wrapping to the first.
    ///
    /// With nothing (or an unknown id) selected, selects the first texture.
    /// Returns the new id, or `None` if the catalog is empty.
    pub fn next(&mut self, catalog: &Catalog) -> Option<&str> {
        self.step(catalog, |pos, len| match pos {
            Some(pos) => (pos + 1) % len,
            None => 0,
        })
    }

    /// Selects the texture before the current one, wrapping to the last.
    ///
    /// With nothing (or an unknown id) selected, selects the last texture.
    /// Returns the new id, or `None` if the catalog is empty.
    pub fn previous(&mut self, catalog: &Catalog) -> Option<&str> {
        self.step(catalog, |pos, len| match pos {
            Some(pos) => (pos + len - 1) % len,
            None => len - 1,
        })
    }

    fn step(
        &mut self,
        catalog: &Catalog,
        advance: impl FnOnce(Option<usize>, usize) -> usize,
    ) -> Option<&str> {
        let len = catalog.len();
        if len == 0 {
            return None;
        }
        let current = self.selected_id().and_then(|id| catalog.position(id));
        let record = catalog.get(advance(current, len))?;
        self.select(record.id());
        self.selected_id()
    }
}
