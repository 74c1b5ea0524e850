// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between pointer positions, document coordinates and geometry.

use folio_document::{DocCoord, ImageId, Selection};

use crate::geometry::BoundingBox;
use crate::layout::{Glyph, GlyphKind, Layout, LineBox, Page};

/// Where a caret is drawn.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CaretPosition {
    /// Page holding the caret.
    pub page: usize,
    /// Horizontal position, relative to the page.
    pub x: f32,
    /// Baseline, relative to the page.
    pub baseline: f32,
    /// Extent above the baseline.
    pub ascent: f32,
    /// Extent below the baseline, negative downwards.
    pub descent: f32,
    /// Font size at the caret.
    pub size: f32,
}

impl CaretPosition {
    /// A caret rectangle of the given width and height, centered on the
    /// ascent and descent at the caret.
    pub fn geometry(&self, width: f32, height: f32) -> BoundingBox {
        let middle = self.baseline - (self.ascent + self.descent) * 0.5;
        BoundingBox::new(
            self.x,
            middle - height * 0.5,
            self.x + width,
            middle + height * 0.5,
        )
    }

    fn at_glyph(page: usize, glyph: &Glyph, x: f32) -> Self {
        Self {
            page,
            x,
            baseline: glyph.baseline,
            ascent: glyph.ascent,
            descent: glyph.descent,
            size: glyph.size,
        }
    }

    fn at_line(page: usize, line: &LineBox) -> Self {
        Self {
            page,
            x: line.x,
            baseline: line.baseline,
            ascent: line.ascent,
            descent: line.descent,
            size: line.size,
        }
    }
}

fn distance_squared(a: (f32, f32), x: f32, y: f32) -> f32 {
    let dx = a.0 - x;
    let dy = a.1 - y;
    dx * dx + dy * dy
}

fn is_empty_line(page: &Page, line: &LineBox) -> bool {
    page.glyphs[line.glyphs.clone()]
        .iter()
        .all(|glyph| glyph.source().is_none() || glyph.is_floating())
}

impl Layout {
    /// Finds the page under a vertical position of the stacked space.
    ///
    /// Returns the page index and the position relative to that page, or
    /// `None` in the gap between pages and outside the stack.
    pub fn page_at(&self, y: f32) -> Option<(usize, f32)> {
        if y < 0.0 {
            return None;
        }
        let stride = self.constraints.stride();
        let mut origin = 0.0;
        for page in &self.pages {
            if y < origin + stride {
                let local = y - origin;
                return (local <= page.height).then_some((page.index, local));
            }
            origin += stride;
        }
        None
    }

    /// Maps a point of the stacked space to the nearest caret position.
    ///
    /// The nearest glyph wins, measured from a point slightly above the
    /// middle of its baseline. A point right of the glyph's center maps to
    /// the position after it. Empty lines take part through their start.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<DocCoord> {
        let (index, y) = self.page_at(y)?;
        let page = self.pages.get(index)?;
        let mut best: Option<(f32, DocCoord)> = None;
        let mut consider = |distance: f32, coord: DocCoord| {
            if best.is_none_or(|(nearest, _)| distance < nearest) {
                best = Some((distance, coord));
            }
        };
        for glyph in &page.glyphs {
            let Some(source) = glyph.source() else {
                continue;
            };
            let center = glyph.hit_point();
            let coord = if x > center.0 {
                source.with_char(source.char_index + 1)
            } else {
                source
            };
            consider(distance_squared(center, x, y), coord);
        }
        for line in page.lines.iter().filter(|line| is_empty_line(page, line)) {
            let anchor = (line.x, line.baseline - line.size / 3.0);
            consider(distance_squared(anchor, x, y), line.start);
        }
        best.map(|(_, coord)| coord)
    }

    /// The topmost glyph whose bounds contain a point of the stacked space.
    pub fn glyph_at(&self, x: f32, y: f32) -> Option<(usize, &Glyph)> {
        let (index, y) = self.page_at(y)?;
        let page = self.pages.get(index)?;
        page.glyphs
            .iter()
            .rev()
            .find(|glyph| glyph.bounds().contains(x, y))
            .map(|glyph| (index, glyph))
    }

    /// Where the caret for `coord` is drawn.
    ///
    /// A caret sits on the left edge of the glyph at `coord`, or else on the
    /// right edge of the last glyph before it in the same paragraph. Carets
    /// in empty paragraphs sit at the start of their line.
    pub fn caret_position(&self, coord: DocCoord) -> Option<CaretPosition> {
        let mut before = None;
        for page in &self.pages {
            for glyph in page.glyphs.iter().filter(|glyph| !glyph.is_floating()) {
                let Some(source) = glyph.source() else {
                    continue;
                };
                if !source.same_paragraph(&coord) {
                    continue;
                }
                if source == coord {
                    return Some(CaretPosition::at_glyph(page.index, glyph, glyph.x));
                }
                if source < coord {
                    before = Some(CaretPosition::at_glyph(
                        page.index,
                        glyph,
                        glyph.x + glyph.width,
                    ));
                }
            }
        }
        before.or_else(|| {
            self.pages.iter().find_map(|page| {
                page.lines
                    .iter()
                    .find(|line| line.start.same_paragraph(&coord))
                    .map(|line| CaretPosition::at_line(page.index, line))
            })
        })
    }

    /// Rectangles covering the selected content, one per line and page.
    pub fn selection_geometry(&self, selection: &Selection) -> Vec<(usize, BoundingBox)> {
        let mut rects = Vec::new();
        if selection.is_collapsed() {
            return rects;
        }
        let (start, end) = (selection.start(), selection.end());
        for page in &self.pages {
            for line in &page.lines {
                let mut extent: Option<(f32, f32)> = None;
                for glyph in &page.glyphs[line.glyphs.clone()] {
                    if glyph.is_floating() {
                        continue;
                    }
                    let Some(source) = glyph.source() else {
                        continue;
                    };
                    if source < start || source >= end {
                        continue;
                    }
                    let (x0, x1) = extent.get_or_insert((glyph.x, glyph.x + glyph.width));
                    *x0 = x0.min(glyph.x);
                    *x1 = x1.max(glyph.x + glyph.width);
                }
                if let Some((x0, x1)) = extent {
                    rects.push((
                        page.index,
                        BoundingBox::new(x0, line.top(), x1, line.baseline - line.descent),
                    ));
                }
            }
        }
        rects
    }

    /// The page and bounds of an image.
    pub fn image_bounds(&self, id: ImageId) -> Option<(usize, BoundingBox)> {
        self.glyphs().find_map(|(page, glyph)| match glyph.kind {
            GlyphKind::Image { id: glyph_id, .. } if glyph_id == id => {
                Some((page, glyph.bounds()))
            }
            _ => None,
        })
    }
}
