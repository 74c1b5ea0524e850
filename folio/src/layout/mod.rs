// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paginated layout of a document.

pub(crate) mod alignment;
mod hit_test;
pub(crate) mod items;
pub(crate) mod line;
pub(crate) mod paginate;

use core::ops::Range;

use folio_document::{DocCoord, ImageId, ImageSource, Style};

use crate::config::PageConstraints;
use crate::geometry::BoundingBox;

pub use hit_test::CaretPosition;

/// What a glyph draws.
#[derive(Clone, PartialEq, Debug)]
pub enum GlyphKind {
    /// A character. List markers have no source.
    Text {
        /// The character.
        ch: char,
        /// Coordinate just before the character in the document.
        source: Option<DocCoord>,
        /// Style of the run the character belongs to.
        style: Style,
    },
    /// A ticked checklist box.
    CheckboxChecked {
        /// Start of the paragraph the box belongs to.
        paragraph: DocCoord,
    },
    /// An empty checklist box.
    CheckboxUnchecked {
        /// Start of the paragraph the box belongs to.
        paragraph: DocCoord,
    },
    /// An image.
    Image {
        /// Image identifier.
        id: ImageId,
        /// Where the pixels come from.
        source: ImageSource,
        /// Coordinate just before the image.
        coord: DocCoord,
        /// Whether the image is drawn at an explicit position rather than
        /// on its line.
        floating: bool,
    },
}

/// A positioned element of a page.
///
/// Positions are relative to the page's top left corner.
#[derive(Clone, PartialEq, Debug)]
pub struct Glyph {
    /// Left edge.
    pub x: f32,
    /// Baseline.
    pub baseline: f32,
    /// Horizontal advance, after justification.
    pub width: f32,
    /// Extent above the baseline.
    pub ascent: f32,
    /// Extent below the baseline, negative downwards.
    pub descent: f32,
    /// Font size for text, image height for images.
    pub size: f32,
    /// What to draw.
    pub kind: GlyphKind,
}

impl Glyph {
    /// The document coordinate just before this glyph, if it maps to
    /// content.
    pub fn source(&self) -> Option<DocCoord> {
        match &self.kind {
            GlyphKind::Text { source, .. } => *source,
            GlyphKind::Image { coord, .. } => Some(*coord),
            GlyphKind::CheckboxChecked { .. } | GlyphKind::CheckboxUnchecked { .. } => None,
        }
    }

    /// The area covered by the glyph.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.x,
            self.baseline - self.ascent,
            self.x + self.width,
            self.baseline - self.descent,
        )
    }

    /// Returns `true` for images drawn away from their line.
    pub fn is_floating(&self) -> bool {
        matches!(self.kind, GlyphKind::Image { floating: true, .. })
    }

    /// The point compared against pointer positions when hit testing.
    pub(crate) fn hit_point(&self) -> (f32, f32) {
        let y = match self.kind {
            GlyphKind::Image { .. } => self.baseline - self.ascent * 0.5,
            _ => self.baseline - self.size / 3.0,
        };
        (self.x + self.width * 0.5, y)
    }
}

/// A laid out line.
#[derive(Clone, PartialEq, Debug)]
pub struct LineBox {
    /// Coordinate of the first content on the line, or of the paragraph
    /// start for an empty paragraph.
    pub start: DocCoord,
    /// Left edge of the first item, after alignment.
    pub x: f32,
    /// Width of the content before justification, without a trailing
    /// space.
    pub width: f32,
    /// Baseline.
    pub baseline: f32,
    /// Largest ascent on the line.
    pub ascent: f32,
    /// Smallest descent on the line.
    pub descent: f32,
    /// Vertical advance to the next line.
    pub height: f32,
    /// Largest font size on the line.
    pub size: f32,
    /// Indices of the line's glyphs in [`Page::glyphs`], markers excluded.
    pub glyphs: Range<usize>,
}

impl LineBox {
    /// Top edge of the line.
    pub fn top(&self) -> f32 {
        self.baseline - self.ascent
    }
}

/// One page of output.
#[derive(Clone, PartialEq, Debug)]
pub struct Page {
    /// Position in the page sequence.
    pub index: usize,
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    /// Everything drawn on the page, in document order.
    pub glyphs: Vec<Glyph>,
    /// The lines placed on the page.
    pub lines: Vec<LineBox>,
}

impl Page {
    pub(crate) fn new(index: usize, constraints: &PageConstraints) -> Self {
        Self {
            index,
            width: constraints.width,
            height: constraints.height,
            glyphs: Vec::new(),
            lines: Vec::new(),
        }
    }
}

/// The result of laying out a document.
///
/// Pages are stacked vertically with a gap between them. Pointer positions
/// given to the query methods use that stacked coordinate space, while
/// glyph positions are relative to their page.
#[derive(Clone, PartialEq, Debug)]
pub struct Layout {
    pages: Vec<Page>,
    constraints: PageConstraints,
}

impl Layout {
    pub(crate) fn new(pages: Vec<Page>, constraints: PageConstraints) -> Self {
        Self { pages, constraints }
    }

    /// An empty layout, before anything was laid out.
    pub fn empty(constraints: PageConstraints) -> Self {
        Self::new(vec![Page::new(0, &constraints)], constraints)
    }

    /// The laid out pages. There is always at least one.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The constraints the pages were laid out with.
    pub fn constraints(&self) -> &PageConstraints {
        &self.constraints
    }

    /// Vertical position of the top of page `index` in the stacked space.
    pub fn page_origin(&self, index: usize) -> f32 {
        index as f32 * self.constraints.stride()
    }

    /// Total height of the stacked pages, gaps included.
    pub fn height(&self) -> f32 {
        self.page_origin(self.pages.len()) - self.constraints.page_gap
    }

    /// Iterates over every glyph with the index of its page.
    pub fn glyphs(&self) -> impl Iterator<Item = (usize, &Glyph)> + '_ {
        self.pages
            .iter()
            .flat_map(|page| page.glyphs.iter().map(move |glyph| (page.index, glyph)))
    }
}
