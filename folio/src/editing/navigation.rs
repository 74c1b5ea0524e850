// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caret movement over the document structure.

use folio_document::{DocCoord, Document, Inline};

/// The caret position one unit before `at`.
///
/// Inside a child this steps back one character. At the start of a child it
/// steps over the last unit of the nearest non-empty child before it, and
/// at the start of a paragraph it moves to the end of the previous one.
pub(crate) fn previous_position(document: &Document, at: DocCoord) -> DocCoord {
    let at = document.clamp(at);
    if at.char_index > 0 {
        return at.with_char(at.char_index - 1);
    }
    if let Some(paragraph) = document.paragraph_at(at) {
        if let Some((span, child)) = paragraph.children[..at.span]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, child)| !child.is_empty())
        {
            return DocCoord {
                span,
                char_index: child.len() - 1,
                ..at
            };
        }
    }
    if at.paragraph > 0 {
        return document.paragraph_end(at.section, at.paragraph - 1);
    }
    if at.section > 0 {
        let section = at.section - 1;
        let last = document
            .sections
            .get(section)
            .map_or(0, |s| s.paragraphs.len().saturating_sub(1));
        return document.paragraph_end(section, last);
    }
    at
}

/// The caret position one unit after `at`.
///
/// Inside a child this steps forward one character. At the end of a child it
/// steps over the first unit of the nearest non-empty child after it, and at
/// the end of a paragraph it moves to the start of the next one.
pub(crate) fn next_position(document: &Document, at: DocCoord) -> DocCoord {
    let at = document.clamp(at);
    let Some(paragraph) = document.paragraph_at(at) else {
        return at;
    };
    let len = paragraph.children.get(at.span).map_or(0, Inline::len);
    if at.char_index < len {
        return at.with_char(at.char_index + 1);
    }
    if let Some(offset) = paragraph.children[at.span + 1..]
        .iter()
        .position(|child| !child.is_empty())
    {
        return DocCoord {
            span: at.span + 1 + offset,
            char_index: 1,
            ..at
        };
    }
    let paragraphs = document
        .sections
        .get(at.section)
        .map_or(0, |s| s.paragraphs.len());
    if at.paragraph + 1 < paragraphs {
        return DocCoord::in_section(at.section, at.paragraph + 1, 0, 0);
    }
    if at.section + 1 < document.sections.len() {
        return DocCoord::in_section(at.section + 1, 0, 0, 0);
    }
    at
}

/// Returns `true` if no content precedes `at` in its paragraph.
pub(crate) fn is_paragraph_start(document: &Document, at: DocCoord) -> bool {
    at.char_index == 0
        && document.paragraph_at(at).is_some_and(|paragraph| {
            paragraph.children[..at.span.min(paragraph.children.len())]
                .iter()
                .all(Inline::is_empty)
        })
}

/// Returns `true` if no content follows `at` in its paragraph.
pub(crate) fn is_paragraph_end(document: &Document, at: DocCoord) -> bool {
    document.paragraph_at(at).is_some_and(|paragraph| {
        let len = paragraph.children.get(at.span).map_or(0, Inline::len);
        at.char_index >= len
            && paragraph
                .children
                .iter()
                .skip(at.span + 1)
                .all(Inline::is_empty)
    })
}
