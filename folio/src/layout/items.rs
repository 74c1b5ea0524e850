// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion of a paragraph into line breaking items.

use folio_document::{DocCoord, ImagePlacement, Inline, Paragraph};

use crate::config::LayoutConfig;
use crate::font::FontContext;

/// Stretch of the glue closing every paragraph, large enough to absorb any
/// free space.
pub(crate) const INFINITE_STRETCH: f32 = 1.0e9;

/// How an item takes part in line breaking.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum ItemKind {
    /// Unbreakable content.
    Box,
    /// Breakable, adjustable space.
    Glue { stretch: f32, shrink: f32 },
    /// Explicit break opportunity. A cost of negative infinity forces the
    /// break.
    Penalty { cost: f32 },
}

/// What an item draws once placed.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) enum Content {
    Char(char),
    /// An inline image, or the zero sized anchor of a floating one.
    Image,
    None,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Item {
    pub(crate) kind: ItemKind,
    pub(crate) width: f32,
    pub(crate) ascent: f32,
    pub(crate) descent: f32,
    /// Font size for text, zero for everything else.
    pub(crate) size: f32,
    pub(crate) content: Content,
    /// Coordinate just before the item. `None` for the closing items.
    pub(crate) source: Option<DocCoord>,
}

impl Item {
    pub(crate) fn is_glue(&self) -> bool {
        matches!(self.kind, ItemKind::Glue { .. })
    }

    pub(crate) fn stretch(&self) -> f32 {
        match self.kind {
            ItemKind::Glue { stretch, .. } => stretch,
            _ => 0.0,
        }
    }

    pub(crate) fn shrink(&self) -> f32 {
        match self.kind {
            ItemKind::Glue { shrink, .. } => shrink,
            _ => 0.0,
        }
    }
}

/// Appends the items of `paragraph` to `items`.
///
/// Characters become boxes and spaces and tabs become glue. Inline images
/// become boxes of their own size, floating images zero sized boxes. The
/// sequence always ends with an infinitely stretchable glue followed by a
/// forced break.
pub(crate) fn push_paragraph_items(
    items: &mut Vec<Item>,
    paragraph: &Paragraph,
    section: usize,
    index: usize,
    fonts: &FontContext,
    config: &LayoutConfig,
) {
    for (span_index, child) in paragraph.children.iter().enumerate() {
        match child {
            Inline::Text(span) => {
                let style = &span.style;
                let family = &*style.font_family;
                let size = style.font_size;
                let vertical = fonts.vertical_metrics(family, size, style.bold, style.italic);
                let mut chars = span.text.chars().enumerate().peekable();
                while let Some((char_index, ch)) = chars.next() {
                    let mut width = fonts.advance_width(family, ch, size, style.bold, style.italic);
                    let kind = if matches!(ch, ' ' | '\t') {
                        ItemKind::Glue {
                            stretch: width * config.glue_stretch,
                            shrink: width * config.glue_shrink,
                        }
                    } else {
                        if let Some(&(_, next)) = chars.peek() {
                            width += fonts.kerning(family, ch, next, size);
                        }
                        ItemKind::Box
                    };
                    items.push(Item {
                        kind,
                        width,
                        ascent: vertical.ascender,
                        descent: vertical.descender,
                        size,
                        content: Content::Char(ch),
                        source: Some(DocCoord::in_section(section, index, span_index, char_index)),
                    });
                }
            }
            Inline::Image(image) => {
                let (width, ascent) = match image.placement {
                    ImagePlacement::Inline => (image.width, image.height),
                    ImagePlacement::Floating { .. } => (0.0, 0.0),
                };
                items.push(Item {
                    kind: ItemKind::Box,
                    width,
                    ascent,
                    descent: 0.0,
                    size: 0.0,
                    content: Content::Image,
                    source: Some(DocCoord::in_section(section, index, span_index, 0)),
                });
            }
        }
    }
    items.push(Item {
        kind: ItemKind::Glue {
            stretch: INFINITE_STRETCH,
            shrink: 0.0,
        },
        width: 0.0,
        ascent: 0.0,
        descent: 0.0,
        size: 0.0,
        content: Content::None,
        source: None,
    });
    items.push(Item {
        kind: ItemKind::Penalty {
            cost: f32::NEG_INFINITY,
        },
        width: 0.0,
        ascent: 0.0,
        descent: 0.0,
        size: 0.0,
        content: Content::None,
        source: None,
    });
}

#[cfg(test)]
mod tests {
    use folio_document::{Image, ImageId, ImageSource, Span, Style};

    use super::*;

    fn items_for(paragraph: &Paragraph) -> Vec<Item> {
        let mut items = Vec::new();
        push_paragraph_items(
            &mut items,
            paragraph,
            0,
            3,
            &FontContext::new(),
            &LayoutConfig::default(),
        );
        items
    }

    #[test]
    fn spaces_become_glue() {
        let paragraph = Paragraph::from_span(Span::new("a b", Style::new("Roboto", 16.0)));
        let items = items_for(&paragraph);
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].kind, ItemKind::Box);
        assert_eq!(
            items[1].kind,
            ItemKind::Glue {
                stretch: 4.0,
                shrink: 8.0 * 0.3
            }
        );
        assert_eq!(items[1].width, 8.0);
        assert_eq!(items[2].source, Some(DocCoord::new(3, 0, 2)));
        assert!(
            matches!(items[4].kind, ItemKind::Penalty { cost } if cost == f32::NEG_INFINITY),
            "paragraphs end with a forced break"
        );
    }

    #[test]
    fn only_spaces_and_tabs_are_glue() {
        let paragraph =
            Paragraph::from_span(Span::new("a\u{a0}b\nc\td", Style::new("Roboto", 16.0)));
        let items = items_for(&paragraph);
        let glue: Vec<bool> = items[..7].iter().map(Item::is_glue).collect();
        assert_eq!(glue, [false, false, false, false, false, true, false]);
    }

    #[test]
    fn empty_paragraph_still_terminates() {
        let paragraph = Paragraph::from_span(Span::empty(Style::new("Roboto", 16.0)));
        let items = items_for(&paragraph);
        assert_eq!(items.len(), 2);
        assert!(items[0].is_glue(), "closing glue");
        assert_eq!(items[0].stretch(), INFINITE_STRETCH);
    }

    #[test]
    fn images_are_boxes() {
        let mut paragraph = Paragraph::from_span(Span::new("x", Style::new("Roboto", 16.0)));
        paragraph.children.push(Inline::Image(Image {
            id: ImageId(4),
            source: ImageSource::new("cat.png"),
            width: 40.0,
            height: 30.0,
            placement: ImagePlacement::Inline,
        }));
        let items = items_for(&paragraph);
        assert_eq!(items[1].content, Content::Image);
        assert_eq!(items[1].width, 40.0);
        assert_eq!(items[1].ascent, 30.0);
        assert_eq!(items[1].source, Some(DocCoord::new(3, 1, 0)));
    }
}
