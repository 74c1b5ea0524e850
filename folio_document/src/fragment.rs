// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Copying content out of a document and splicing it back in.

use crate::coord::{DocCoord, Selection};
use crate::document::Document;
use crate::edit::{delete_in_paragraph, local_bounds, local_end};
use crate::paragraph::{Inline, Paragraph, Span};
use crate::style::Style;

/// Splits plain text into paragraphs at line breaks.
///
/// Both `\n` and `\r\n` end a paragraph. The result is never empty.
pub fn text_to_paragraphs(text: &str, style: &Style) -> Vec<Paragraph> {
    text.split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            Paragraph::from_span(Span::new(line, style.clone()))
        })
        .collect()
}

/// The plain text of a fragment, paragraphs separated by `\n`.
pub fn fragment_text(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(Paragraph::text)
        .collect::<Vec<_>>()
        .join("\n")
}

impl Document {
    /// Copies the selected content as a run of paragraphs.
    ///
    /// Partially covered paragraphs are trimmed to the selection but keep
    /// their attributes.
    pub fn extract_fragment(&self, selection: &Selection) -> Vec<Paragraph> {
        let start = self.clamp(selection.start());
        let end = self.clamp(selection.end());
        if start >= end {
            return Vec::new();
        }
        let mut fragment = Vec::new();
        for (section, index) in self.paragraphs_between(start, end) {
            let Some(paragraph) = self.paragraph(section, index) else {
                continue;
            };
            let (from, to) = local_bounds(paragraph, section, index, start, end);
            let mut copy = paragraph.clone();
            let copy_end = local_end(&copy);
            delete_in_paragraph(&mut copy, to, copy_end);
            delete_in_paragraph(&mut copy, (0, 0), from);
            copy.prune_empty_text();
            fragment.push(copy);
        }
        fragment
    }

    /// The plain text of the selected content.
    pub fn selected_text(&self, selection: &Selection) -> String {
        fragment_text(&self.extract_fragment(selection))
    }

    /// Inserts a run of paragraphs at the selection head.
    ///
    /// A single paragraph is spliced into the current one. With more, the
    /// current paragraph is split at the head: the first fragment paragraph
    /// joins its start, the last one receives its end, and the ones in
    /// between are inserted whole. Images get fresh ids. The caret ends up
    /// after the inserted content.
    pub fn insert_fragment(&mut self, selection: &Selection, fragment: &[Paragraph]) -> Selection {
        let at = self.clamp(selection.head);
        if fragment.is_empty() {
            return Selection::collapsed(at);
        }
        let mut fragment = fragment.to_vec();
        for child in fragment.iter_mut().flat_map(|p| &mut p.children) {
            if let Inline::Image(image) = child {
                image.id = self.allocate_image_id();
            }
        }

        let Some(section) = self.sections.get_mut(at.section) else {
            return Selection::collapsed(at);
        };
        let Some(paragraph) = section.paragraphs.get_mut(at.paragraph) else {
            return Selection::collapsed(at);
        };
        let Some(style) = paragraph.style_near(at.span).cloned() else {
            return Selection::collapsed(at);
        };
        for inserted in &mut fragment {
            inserted.ensure_text(&style);
        }
        let boundary = paragraph.split_at(at.span, at.char_index);
        let count = fragment.len();

        if count == 1 {
            let children = fragment.swap_remove(0).children;
            let last = boundary + children.len() - 1;
            paragraph.children.splice(boundary..boundary, children);
            let char_index = paragraph.children.get(last).map_or(0, Inline::len);
            return Selection::collapsed(DocCoord {
                span: last,
                char_index,
                ..at
            });
        }

        let tail = paragraph.children.split_off(boundary);
        let mut rest = fragment.split_off(1);
        paragraph.children.append(&mut fragment[0].children);
        let Some(last) = rest.last_mut() else {
            return Selection::collapsed(at);
        };
        let span = last.children.len() - 1;
        let char_index = last.children[span].len();
        last.children.extend(tail);
        drop_empty_after(last, span);
        let insert_at = at.paragraph + 1;
        section.paragraphs.splice(insert_at..insert_at, rest);
        log::debug!("pasted {count} paragraphs at {at:?}");
        Selection::collapsed(DocCoord::in_section(
            at.section,
            at.paragraph + count - 1,
            span,
            char_index,
        ))
    }
}

// Drops the empty text spans that follow child `index`.
fn drop_empty_after(paragraph: &mut Paragraph, index: usize) {
    let mut position = 0;
    paragraph.children.retain(|child| {
        let keep = position <= index || !child.is_empty();
        position += 1;
        keep
    });
}
