// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document root.

use serde::{Deserialize, Serialize};

use crate::coord::DocCoord;
use crate::paragraph::{Image, ImageId, Inline, Paragraph, Section, Span};
use crate::style::Style;

/// A rich text document: an ordered run of sections.
///
/// A well formed document has at least one section, every section has at
/// least one paragraph and every paragraph holds at least one text span.
/// [`Document::normalize`] restores that shape for content coming from
/// outside, and every mutation in this crate preserves it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Document {
    /// Sections in reading order.
    pub sections: Vec<Section>,
    /// Next identifier handed out to an inserted image.
    #[serde(default)]
    pub(crate) next_image_id: u64,
}

impl Document {
    /// Creates a document from sections, normalizing it with `style`.
    pub fn new(sections: Vec<Section>, style: &Style) -> Self {
        let mut document = Self {
            sections,
            next_image_id: 0,
        };
        document.normalize(style);
        document
    }

    /// Creates a single section document.
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>, style: &Style) -> Self {
        Self::new(vec![Section::new(paragraphs)], style)
    }

    /// Creates a document of plain text, one paragraph per line.
    pub fn from_text(text: &str, style: &Style) -> Self {
        Self::from_paragraphs(crate::fragment::text_to_paragraphs(text, style), style)
    }

    /// The document shown when nothing could be loaded: a single empty
    /// paragraph.
    pub fn placeholder(style: &Style) -> Self {
        Self::from_paragraphs(Vec::new(), style)
    }

    /// Restores the structural invariants.
    ///
    /// Adds a section, paragraph or empty span where one is missing and
    /// advances the image counter past every image already present.
    pub fn normalize(&mut self, style: &Style) {
        if self.sections.is_empty() {
            self.sections.push(Section::default());
        }
        let mut max_id = None;
        for section in &mut self.sections {
            if section.paragraphs.is_empty() {
                section
                    .paragraphs
                    .push(Paragraph::from_span(Span::empty(style.clone())));
            }
            for paragraph in &mut section.paragraphs {
                let fallback = paragraph.style_near(0).cloned();
                paragraph.ensure_text(fallback.as_ref().unwrap_or(style));
                for child in &paragraph.children {
                    if let Inline::Image(image) = child {
                        max_id = max_id.max(Some(image.id.0));
                    }
                }
            }
        }
        if let Some(max_id) = max_id {
            self.next_image_id = self.next_image_id.max(max_id + 1);
        }
    }

    /// Total number of paragraphs across all sections.
    pub fn paragraph_count(&self) -> usize {
        self.sections.iter().map(|s| s.paragraphs.len()).sum()
    }

    /// The paragraph at the given indices.
    pub fn paragraph(&self, section: usize, paragraph: usize) -> Option<&Paragraph> {
        self.sections.get(section)?.paragraphs.get(paragraph)
    }

    /// The paragraph at the given indices.
    pub fn paragraph_mut(&mut self, section: usize, paragraph: usize) -> Option<&mut Paragraph> {
        self.sections.get_mut(section)?.paragraphs.get_mut(paragraph)
    }

    /// The paragraph containing `coord`.
    pub fn paragraph_at(&self, coord: DocCoord) -> Option<&Paragraph> {
        self.paragraph(coord.section, coord.paragraph)
    }

    /// The child containing `coord`.
    pub fn inline_at(&self, coord: DocCoord) -> Option<&Inline> {
        self.paragraph_at(coord)?.children.get(coord.span)
    }

    /// The style a character typed at `coord` would get.
    pub fn style_at(&self, coord: DocCoord) -> Option<&Style> {
        self.paragraph_at(coord)?.style_near(coord.span)
    }

    /// Returns `true` if `coord` addresses an existing caret position.
    pub fn is_valid(&self, coord: DocCoord) -> bool {
        self.inline_at(coord)
            .is_some_and(|child| coord.char_index <= child.len())
    }

    /// The nearest valid coordinate to `coord`.
    pub fn clamp(&self, coord: DocCoord) -> DocCoord {
        let Some(section) = self.sections.get(coord.section) else {
            return self.end();
        };
        if coord.paragraph >= section.paragraphs.len() {
            return self.paragraph_end(coord.section, section.paragraphs.len().saturating_sub(1));
        }
        match section.paragraphs[coord.paragraph].children.get(coord.span) {
            Some(child) => coord.with_char(coord.char_index.min(child.len())),
            None => self.paragraph_end(coord.section, coord.paragraph),
        }
    }

    /// The first caret position.
    pub fn start(&self) -> DocCoord {
        DocCoord::default()
    }

    /// The last caret position.
    pub fn end(&self) -> DocCoord {
        let section = self.sections.len().saturating_sub(1);
        let paragraph = self
            .sections
            .get(section)
            .map_or(0, |s| s.paragraphs.len().saturating_sub(1));
        self.paragraph_end(section, paragraph)
    }

    /// The caret position after the last child of a paragraph.
    pub fn paragraph_end(&self, section: usize, paragraph: usize) -> DocCoord {
        let span = self
            .paragraph(section, paragraph)
            .map_or(0, |p| p.children.len().saturating_sub(1));
        let len = self
            .paragraph(section, paragraph)
            .and_then(|p| p.children.get(span))
            .map_or(0, Inline::len);
        DocCoord::in_section(section, paragraph, span, len)
    }

    /// Index pairs of every paragraph from `start` to `end` inclusive.
    pub fn paragraphs_between(
        &self,
        start: DocCoord,
        end: DocCoord,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(s, section)| (0..section.paragraphs.len()).map(move |p| (s, p)))
            .skip_while(move |&pos| pos < (start.section, start.paragraph))
            .take_while(move |&pos| pos <= (end.section, end.paragraph))
    }

    /// Looks up an image by id.
    pub fn image(&self, id: ImageId) -> Option<&Image> {
        self.image_coord(id)
            .and_then(|coord| self.inline_at(coord))
            .and_then(Inline::as_image)
    }

    /// Looks up an image by id.
    pub fn image_mut(&mut self, id: ImageId) -> Option<&mut Image> {
        let coord = self.image_coord(id)?;
        match self
            .paragraph_mut(coord.section, coord.paragraph)?
            .children
            .get_mut(coord.span)?
        {
            Inline::Image(image) => Some(image),
            Inline::Text(_) => None,
        }
    }

    /// The coordinate just before the image with the given id.
    pub fn image_coord(&self, id: ImageId) -> Option<DocCoord> {
        self.sections.iter().enumerate().find_map(|(s, section)| {
            section.paragraphs.iter().enumerate().find_map(|(p, paragraph)| {
                paragraph
                    .children
                    .iter()
                    .position(|child| child.as_image().is_some_and(|image| image.id == id))
                    .map(|span| DocCoord::in_section(s, p, span, 0))
            })
        })
    }

    /// Hands out a fresh image identifier.
    pub fn allocate_image_id(&mut self) -> ImageId {
        let id = ImageId(self.next_image_id);
        self.next_image_id += 1;
        id
    }

    /// The plain text of the whole document, paragraphs separated by `\n`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (index, paragraph) in self
            .sections
            .iter()
            .flat_map(|s| &s.paragraphs)
            .enumerate()
        {
            if index > 0 {
                text.push('\n');
            }
            text.push_str(&paragraph.text());
        }
        text
    }

    /// Serializes the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a document from JSON, normalizing it with `style`.
    pub fn from_json(json: &str, style: &Style) -> Result<Self, serde_json::Error> {
        let mut document: Self = serde_json::from_str(json)?;
        document.normalize(style);
        Ok(document)
    }
}
