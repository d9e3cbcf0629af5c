// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration shared by the controller and the host's renderer.

/// Geometry settings for a sortable tree.
///
/// The indentation width is the one value that affects behavior: it converts the
/// horizontal drag offset into depth changes. It should match the indentation the
/// host renders with. The remaining settings only feed the row layout helpers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SortableTreeConfig {
    /// Horizontal distance per depth level, in logical pixels. Defaults to `20.0`.
    pub indentation_width: f64,
    /// Vertical gap between rendered items, in logical pixels. Defaults to `10.0`.
    pub item_gap: f64,
    /// Whether nested rows draw a link decoration in place of their last indentation
    /// step. Defaults to `false`.
    pub link_icon: bool,
}

impl Default for SortableTreeConfig {
    fn default() -> Self {
        Self {
            indentation_width: 20.0,
            item_gap: 10.0,
            link_icon: false,
        }
    }
}

impl SortableTreeConfig {
    /// Sets the indentation width.
    #[must_use]
    pub fn with_indentation_width(mut self, indentation_width: f64) -> Self {
        self.indentation_width = indentation_width;
        self
    }

    /// Sets the vertical gap between items.
    #[must_use]
    pub fn with_item_gap(mut self, item_gap: f64) -> Self {
        self.item_gap = item_gap;
        self
    }

    /// Enables or disables the link decoration on nested rows.
    #[must_use]
    pub fn with_link_icon(mut self, link_icon: bool) -> Self {
        self.link_icon = link_icon;
        self
    }

    /// Leading indentation of a row at `depth`.
    ///
    /// With the link decoration enabled, one level of indentation is taken by the
    /// decoration itself.
    #[must_use]
    pub fn row_indent(&self, depth: usize) -> f64 {
        let levels = if self.link_icon {
            depth.saturating_sub(1)
        } else {
            depth
        };
        levels as f64 * self.indentation_width
    }

    /// Vertical offset of the drop indicator relative to the top of the dragged row.
    ///
    /// The indicator sits in the middle of the gap above the row.
    #[must_use]
    pub fn drop_indicator_offset(&self) -> f64 {
        -(self.item_gap / 2.0)
    }
}
