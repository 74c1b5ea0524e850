// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document coordinates and selections.

use serde::{Deserialize, Serialize};

/// A caret position inside a document.
///
/// Coordinates order lexicographically by section, paragraph, span and
/// character, which is also reading order. A coordinate with `char_index`
/// equal to the length of its span sits after the span's last character;
/// on an image child, `0` is before the image and `1` after it.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
pub struct DocCoord {
    /// Index of the section.
    pub section: usize,
    /// Index of the paragraph within the section.
    pub paragraph: usize,
    /// Index of the child within the paragraph.
    pub span: usize,
    /// Character offset within the child.
    pub char_index: usize,
}

impl DocCoord {
    /// Creates a coordinate in the first section.
    pub const fn new(paragraph: usize, span: usize, char_index: usize) -> Self {
        Self::in_section(0, paragraph, span, char_index)
    }

    /// Creates a coordinate in the given section.
    pub const fn in_section(
        section: usize,
        paragraph: usize,
        span: usize,
        char_index: usize,
    ) -> Self {
        Self {
            section,
            paragraph,
            span,
            char_index,
        }
    }

    /// The same coordinate with a different character offset.
    #[must_use]
    pub const fn with_char(self, char_index: usize) -> Self {
        Self { char_index, ..self }
    }

    /// Returns `true` if both coordinates are in the same paragraph.
    pub fn same_paragraph(&self, other: &Self) -> bool {
        self.section == other.section && self.paragraph == other.paragraph
    }
}

/// A selection defined by a fixed anchor and a moving head.
///
/// The head is where the caret is drawn. A selection whose anchor equals its
/// head is collapsed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Selection {
    /// The end that stays put while extending.
    pub anchor: DocCoord,
    /// The end that moves while extending.
    pub head: DocCoord,
}

impl Selection {
    /// Creates a selection.
    pub const fn new(anchor: DocCoord, head: DocCoord) -> Self {
        Self { anchor, head }
    }

    /// Creates a collapsed selection at `coord`.
    pub const fn collapsed(coord: DocCoord) -> Self {
        Self::new(coord, coord)
    }

    /// Returns `true` if anchor and head coincide.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// The earlier of anchor and head.
    pub fn start(&self) -> DocCoord {
        self.anchor.min(self.head)
    }

    /// The later of anchor and head.
    pub fn end(&self) -> DocCoord {
        self.anchor.max(self.head)
    }

    /// Returns `true` if the head comes before the anchor.
    pub fn is_backward(&self) -> bool {
        self.head < self.anchor
    }

    /// Moves the head, keeping the anchor.
    #[must_use]
    pub fn extend_to(&self, head: DocCoord) -> Self {
        Self::new(self.anchor, head)
    }

    /// Collapses the selection to its head.
    #[must_use]
    pub fn collapse(&self) -> Self {
        Self::collapsed(self.head)
    }
}
