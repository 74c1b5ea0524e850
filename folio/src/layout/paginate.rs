// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of broken lines onto pages.

use folio_document::{DocCoord, ImagePlacement, Inline, ListKind, Paragraph, Style};

use crate::config::{EngineConfig, PageConstraints};
use crate::font::FontContext;
use crate::layout::alignment::align_line;
use crate::layout::items::{Content, Item};
use crate::layout::line::greedy::BreakLines;
use crate::layout::{Glyph, GlyphKind, LineBox, Page};
use crate::util::nearly_zero;

const BULLET: char = '\u{2022}';
const CHECKBOX_SCALE: f32 = 0.75;

/// Collects lines into pages, starting a new page when a line would cross
/// the bottom margin.
pub(crate) struct PageBuilder {
    constraints: PageConstraints,
    pages: Vec<Page>,
    page: Page,
    /// Top of the next line.
    y: f32,
}

impl PageBuilder {
    pub(crate) fn new(constraints: PageConstraints) -> Self {
        Self {
            pages: Vec::new(),
            page: Page::new(0, &constraints),
            y: constraints.margin_top,
            constraints,
        }
    }

    /// Makes room for a line of `height`, moving to a new page if it does
    /// not fit. A line taller than an empty page is placed anyway.
    fn reserve(&mut self, height: f32) {
        let fits = self.y + height <= self.constraints.content_bottom();
        if !fits && !self.page.lines.is_empty() {
            let index = self.page.index + 1;
            let full = core::mem::replace(&mut self.page, Page::new(index, &self.constraints));
            self.pages.push(full);
            self.y = self.constraints.margin_top;
        }
    }

    pub(crate) fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    pub(crate) fn finish(mut self) -> Vec<Page> {
        self.pages.push(self.page);
        self.pages
    }
}

/// Position of a paragraph within its list, for numbering.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ListCounter(u32);

impl ListCounter {
    /// Advances past `paragraph`, returning its number if it is numbered.
    ///
    /// Any paragraph that is not numbered resets the count.
    pub(crate) fn next(&mut self, paragraph: &Paragraph) -> u32 {
        if paragraph.list == Some(ListKind::Number) {
            self.0 += 1;
        } else {
            self.0 = 0;
        }
        self.0
    }

    pub(crate) fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Everything needed to lay out one paragraph.
pub(crate) struct ParagraphLayout<'a> {
    pub(crate) paragraph: &'a Paragraph,
    pub(crate) section: usize,
    pub(crate) index: usize,
    pub(crate) number: u32,
    pub(crate) items: &'a [Item],
    pub(crate) config: &'a EngineConfig,
    pub(crate) fonts: &'a FontContext,
}

impl ParagraphLayout<'_> {
    fn nominal_style(&self) -> &Style {
        self.paragraph
            .style_near(0)
            .unwrap_or(self.config.default_style.style())
    }

    fn start(&self) -> DocCoord {
        DocCoord::in_section(self.section, self.index, 0, 0)
    }

    fn child_style(&self, coord: DocCoord) -> &Style {
        self.paragraph
            .children
            .get(coord.span)
            .and_then(Inline::as_text)
            .map_or(self.nominal_style(), |span| &span.style)
    }

    /// Breaks the paragraph into lines and places them.
    pub(crate) fn place(&self, builder: &mut PageBuilder) {
        let page = &self.config.page;
        let layout = &self.config.layout;
        let indent = if self.paragraph.list.is_some() {
            layout.list_padding
        } else {
            0.0
        };
        let max_advance = page.content_width() - indent;
        let line_x = page.margin_left + indent;
        let nominal = self.nominal_style();
        let nominal_metrics =
            self.fonts
                .vertical_metrics(&nominal.font_family, nominal.font_size, nominal.bold, nominal.italic);
        let spacing = self
            .paragraph
            .line_spacing
            .or(nominal.line_spacing)
            .unwrap_or(layout.line_spacing);

        let mut breaker = BreakLines::new(self.items);
        let mut first = true;
        while let Some(line) = breaker.break_next(max_advance) {
            let line_items = &self.items[line.items.clone()];

            let mut ascent: f32 = 0.0;
            let mut descent: f32 = 0.0;
            let mut max_size: f32 = 0.0;
            let mut has_content = false;
            for item in line_items.iter().filter(|item| item.source.is_some()) {
                has_content = true;
                ascent = ascent.max(item.ascent);
                descent = descent.min(item.descent);
                max_size = max_size.max(item.size);
            }
            if !has_content {
                ascent = nominal_metrics.ascender;
                descent = nominal_metrics.descender;
            }
            if nearly_zero(max_size) {
                max_size = nominal.font_size;
            }
            let height = (max_size * spacing).max(ascent - descent);

            builder.reserve(height);
            let baseline = builder.y + ascent;
            if first {
                self.place_marker(builder, baseline);
                first = false;
            }

            let adjustment = align_line(
                line_items,
                max_advance,
                self.paragraph.alignment,
                line.is_last(),
                layout,
            );
            let glyph_start = builder.page.glyphs.len();
            let mut x = line_x + adjustment.offset;
            let mut start = None;
            for item in line_items {
                let width = adjustment.adjusted_width(item);
                if let Some(source) = item.source {
                    start.get_or_insert(source);
                    if let Some(glyph) = self.glyph(item, source, x, width, baseline) {
                        builder.page.glyphs.push(glyph);
                    }
                }
                x += width;
            }
            builder.page.lines.push(LineBox {
                start: start.unwrap_or_else(|| self.start()),
                x: line_x + adjustment.offset,
                width: adjustment.visual_width,
                baseline,
                ascent,
                descent,
                height,
                size: max_size,
                glyphs: glyph_start..builder.page.glyphs.len(),
            });
            builder.advance(height);
        }
    }

    fn glyph(&self, item: &Item, source: DocCoord, x: f32, width: f32, baseline: f32) -> Option<Glyph> {
        match item.content {
            Content::Char(ch) => Some(Glyph {
                x,
                baseline,
                width,
                ascent: item.ascent,
                descent: item.descent,
                size: item.size,
                kind: GlyphKind::Text {
                    ch,
                    source: Some(source),
                    style: self.child_style(source).clone(),
                },
            }),
            Content::Image => {
                let image = self.paragraph.children.get(source.span)?.as_image()?;
                let page = &self.config.page;
                let (x, baseline, floating) = match image.placement {
                    ImagePlacement::Inline => (x, baseline, false),
                    ImagePlacement::Floating { x: fx, y: fy } => (
                        page.margin_left + fx,
                        page.margin_top + fy + image.height,
                        true,
                    ),
                };
                Some(Glyph {
                    x,
                    baseline,
                    width: image.width,
                    ascent: image.height,
                    descent: 0.0,
                    size: image.height,
                    kind: GlyphKind::Image {
                        id: image.id,
                        source: image.source.clone(),
                        coord: source,
                        floating,
                    },
                })
            }
            Content::None => None,
        }
    }

    fn place_marker(&self, builder: &mut PageBuilder, baseline: f32) {
        let Some(list) = self.paragraph.list else {
            return;
        };
        let style = self.nominal_style();
        let metrics = self
            .fonts
            .vertical_metrics(&style.font_family, style.font_size, style.bold, style.italic);
        let mut x = self.config.page.margin_left + self.config.layout.marker_offset;
        let mut push_text = |builder: &mut PageBuilder, text: &str| {
            for ch in text.chars() {
                let width = self.fonts.advance_width(
                    &style.font_family,
                    ch,
                    style.font_size,
                    style.bold,
                    style.italic,
                );
                builder.page.glyphs.push(Glyph {
                    x,
                    baseline,
                    width,
                    ascent: metrics.ascender,
                    descent: metrics.descender,
                    size: style.font_size,
                    kind: GlyphKind::Text {
                        ch,
                        source: None,
                        style: style.clone(),
                    },
                });
                x += width;
            }
        };
        match list {
            ListKind::Bullet => push_text(builder, &BULLET.to_string()),
            ListKind::Number => push_text(builder, &format!("{}.", self.number)),
            ListKind::Check => {
                let side = style.font_size * CHECKBOX_SCALE;
                let paragraph = self.start();
                builder.page.glyphs.push(Glyph {
                    x,
                    baseline,
                    width: side,
                    ascent: side,
                    descent: 0.0,
                    size: style.font_size,
                    kind: if self.paragraph.checked {
                        GlyphKind::CheckboxChecked { paragraph }
                    } else {
                        GlyphKind::CheckboxUnchecked { paragraph }
                    },
                });
            }
        }
    }
}
