// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate addressed mutations.
//!
//! Every operation takes the selection it applies to and returns the
//! selection the caller should adopt afterwards. Coordinates that point past
//! the end of the document are clamped first, so a stale selection never
//! panics; at worst it edits the nearest valid position.

use std::mem;

use crate::coord::{DocCoord, Selection};
use crate::document::Document;
use crate::paragraph::{Image, ImageId, ImagePlacement, ImageSource, Inline, Paragraph, Span};
use crate::style::{Alignment, ListKind, Style, StyleChange, StyleFlag};

/// Direction of a single character deletion.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    /// Remove the unit before the caret.
    Backward,
    /// Remove the unit after the caret.
    Forward,
}

// A position inside one paragraph: (child index, character offset).
type Local = (usize, usize);

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl Document {
    // --- MARK: Text ---

    /// Inserts `text` at the selection head.
    ///
    /// Line breaks in `text` are dropped; paragraphs are split with
    /// [`Document::split_paragraph`]. When the head sits on an image the
    /// text goes into the neighbouring span, or into a fresh one styled like
    /// the closest text.
    pub fn insert_text(&mut self, selection: &Selection, text: &str) -> Selection {
        let at = self.clamp(selection.head);
        let text: String = text.chars().filter(|ch| !is_line_break(*ch)).collect();
        if text.is_empty() {
            return Selection::collapsed(at);
        }
        let Some(paragraph) = self.paragraph_mut(at.section, at.paragraph) else {
            return *selection;
        };
        let Some((span, char_index)) = text_position(paragraph, at.span, at.char_index) else {
            return Selection::collapsed(at);
        };
        if let Some(Inline::Text(target)) = paragraph.children.get_mut(span) {
            target.insert_str(char_index, &text);
        }
        Selection::collapsed(DocCoord {
            span,
            char_index: char_index + text.chars().count(),
            ..at
        })
    }

    /// Removes the character or image next to the selection head.
    ///
    /// Empty spans are skipped, so a deletion at a span boundary removes the
    /// nearest unit in the neighbouring span. At the start or end of a
    /// paragraph nothing changes; joining paragraphs is
    /// [`Document::merge_with_next`].
    pub fn delete_text(&mut self, selection: &Selection, direction: Direction) -> Selection {
        let at = self.clamp(selection.head);
        let Some(paragraph) = self.paragraph_mut(at.section, at.paragraph) else {
            return *selection;
        };
        let caret = match direction {
            Direction::Backward => delete_backward(paragraph, at.span, at.char_index),
            Direction::Forward => delete_forward(paragraph, at.span, at.char_index),
        };
        let (span, char_index) = caret.unwrap_or((at.span, at.char_index));
        Selection::collapsed(DocCoord {
            span,
            char_index,
            ..at
        })
    }

    /// Appends the paragraph after `paragraph` to it and removes the former.
    ///
    /// Returns the coordinate of the seam, or `None` if `paragraph` is the
    /// last one in its section. The merged paragraph keeps its own
    /// attributes.
    pub fn merge_with_next(&mut self, section: usize, paragraph: usize) -> Option<DocCoord> {
        let paragraphs = &mut self.sections.get_mut(section)?.paragraphs;
        if paragraph + 1 >= paragraphs.len() {
            return None;
        }
        let next = paragraphs.remove(paragraph + 1);
        let current = &mut paragraphs[paragraph];
        let span = current.children.len().saturating_sub(1);
        let char_index = current.children.get(span).map_or(0, Inline::len);
        current.children.extend(next.children);
        Some(DocCoord::in_section(section, paragraph, span, char_index))
    }

    /// Removes everything between the selection ends and returns a caret at
    /// the start of the range.
    ///
    /// Across paragraphs, the first paragraph keeps its attributes and
    /// receives the content that followed the range in the last one.
    pub fn delete_range(&mut self, selection: &Selection) -> Selection {
        let start = self.clamp(selection.start());
        let end = self.clamp(selection.end());
        if start >= end {
            return Selection::collapsed(start);
        }
        if start.same_paragraph(&end) {
            let Some(paragraph) = self.paragraph_mut(start.section, start.paragraph) else {
                return Selection::collapsed(start);
            };
            let (span, char_index) = delete_in_paragraph(
                paragraph,
                (start.span, start.char_index),
                (end.span, end.char_index),
            );
            return Selection::collapsed(DocCoord {
                span,
                char_index,
                ..start
            });
        }

        let tail = match self.paragraph_mut(end.section, end.paragraph) {
            Some(paragraph) => {
                delete_in_paragraph(paragraph, (0, 0), (end.span, end.char_index));
                let mut tail = mem::take(&mut paragraph.children);
                tail.retain(|child| !child.is_empty());
                tail
            }
            None => Vec::new(),
        };
        self.remove_paragraphs_after(start, end);

        let Some(paragraph) = self.paragraph_mut(start.section, start.paragraph) else {
            return Selection::collapsed(start);
        };
        let paragraph_end = local_end(paragraph);
        let (span, char_index) =
            delete_in_paragraph(paragraph, (start.span, start.char_index), paragraph_end);
        paragraph.children.extend(tail);
        Selection::collapsed(DocCoord {
            span,
            char_index,
            ..start
        })
    }

    // Removes every paragraph after `start`'s up to and including `end`'s,
    // folding the sections in between into `start`'s section.
    fn remove_paragraphs_after(&mut self, start: DocCoord, end: DocCoord) {
        if start.section == end.section {
            self.sections[start.section]
                .paragraphs
                .drain(start.paragraph + 1..=end.paragraph);
            return;
        }
        let end_section = &mut self.sections[end.section].paragraphs;
        end_section.drain(..=end.paragraph);
        let rest = mem::take(end_section);
        self.sections.drain(start.section + 1..=end.section);
        let start_section = &mut self.sections[start.section].paragraphs;
        start_section.truncate(start.paragraph + 1);
        start_section.extend(rest);
    }

    /// Splits the paragraph at the selection head.
    ///
    /// The new paragraph inherits alignment, list membership and spacing but
    /// starts unchecked. The caret moves to its start.
    pub fn split_paragraph(&mut self, selection: &Selection) -> Selection {
        let at = self.clamp(selection.head);
        let Some(section) = self.sections.get_mut(at.section) else {
            return *selection;
        };
        let Some(paragraph) = section.paragraphs.get_mut(at.paragraph) else {
            return *selection;
        };
        let Some(style) = paragraph.style_near(at.span).cloned() else {
            return Selection::collapsed(at);
        };
        let boundary = paragraph.split_at(at.span, at.char_index);
        let mut tail = paragraph.children.split_off(boundary);
        if !matches!(tail.first(), Some(Inline::Text(_))) {
            tail.insert(0, Span::empty(style.clone()).into());
        }
        paragraph.ensure_text(&style);
        let next = paragraph.with_children_like(tail);
        section.paragraphs.insert(at.paragraph + 1, next);
        log::trace!("split paragraph {} of section {}", at.paragraph, at.section);
        Selection::collapsed(DocCoord::in_section(at.section, at.paragraph + 1, 0, 0))
    }

    // --- MARK: Styles ---

    /// Toggles a boolean style flag over the selection.
    ///
    /// The flag is cleared if every selected character already has it and
    /// set otherwise. On a collapsed selection the toggle applies to what is
    /// typed next.
    pub fn toggle_style(&mut self, selection: &Selection, flag: StyleFlag) -> Selection {
        let enable = if selection.is_collapsed() {
            !self
                .style_at(self.clamp(selection.head))
                .is_some_and(|style| flag.get(style))
        } else {
            !self.all_selected_text(selection, |style| flag.get(style))
        };
        self.apply_style(selection, &StyleChange::Flag(flag, enable))
    }

    /// Applies a style change to every span in the selection.
    ///
    /// Spans partially covered are split at the selection ends. A collapsed
    /// selection gets an empty span carrying the changed style, which the
    /// next insertion types into.
    pub fn apply_style(&mut self, selection: &Selection, change: &StyleChange) -> Selection {
        if selection.is_collapsed() {
            return self.apply_style_at_caret(self.clamp(selection.head), change);
        }
        let start = self.clamp(selection.start());
        let end = self.clamp(selection.end());
        let mut new_start = start;
        let mut new_end = end;
        let range: Vec<_> = self.paragraphs_between(start, end).collect();
        for (section, index) in range {
            let Some(paragraph) = self.paragraph_mut(section, index) else {
                continue;
            };
            let (from, to) = local_bounds(paragraph, section, index, start, end);
            let stop = paragraph.split_at(to.0, to.1);
            let before = paragraph.children.len();
            let begin = paragraph.split_at(from.0, from.1);
            let stop = stop + (paragraph.children.len() - before);
            for child in &mut paragraph.children[begin..stop] {
                if let Inline::Text(span) = child {
                    change.apply(&mut span.style);
                }
            }
            if (section, index) == (start.section, start.paragraph) {
                let (span, char_index) = position_before(paragraph, begin, true);
                new_start = DocCoord::in_section(section, index, span, char_index);
            }
            if (section, index) == (end.section, end.paragraph) {
                let (span, char_index) = position_before(paragraph, stop, false);
                new_end = DocCoord::in_section(section, index, span, char_index);
            }
        }
        if selection.is_backward() {
            Selection::new(new_end, new_start)
        } else {
            Selection::new(new_start, new_end)
        }
    }

    fn apply_style_at_caret(&mut self, at: DocCoord, change: &StyleChange) -> Selection {
        let Some(paragraph) = self.paragraph_mut(at.section, at.paragraph) else {
            return Selection::collapsed(at);
        };
        if let Some(Inline::Text(span)) = paragraph.children.get_mut(at.span) {
            if span.is_empty() {
                change.apply(&mut span.style);
                return Selection::collapsed(at);
            }
        }
        let Some(mut style) = paragraph.style_near(at.span).cloned() else {
            return Selection::collapsed(at);
        };
        change.apply(&mut style);
        let boundary = paragraph.split_at(at.span, at.char_index);
        paragraph
            .children
            .insert(boundary, Span::empty(style).into());
        Selection::collapsed(DocCoord {
            span: boundary,
            char_index: 0,
            ..at
        })
    }

    // Returns `true` if the selection covers at least one character and every
    // covered character's style satisfies `predicate`.
    fn all_selected_text(&self, selection: &Selection, predicate: impl Fn(&Style) -> bool) -> bool {
        let start = self.clamp(selection.start());
        let end = self.clamp(selection.end());
        let mut any = false;
        for (section, index) in self.paragraphs_between(start, end) {
            let Some(paragraph) = self.paragraph(section, index) else {
                continue;
            };
            let (from, to) = local_bounds(paragraph, section, index, start, end);
            for (i, child) in paragraph.children.iter().enumerate().take(to.0 + 1).skip(from.0) {
                let Inline::Text(span) = child else {
                    continue;
                };
                let lo = if i == from.0 { from.1 } else { 0 };
                let hi = if i == to.0 { to.1 } else { span.len() };
                if lo < hi {
                    if !predicate(&span.style) {
                        return false;
                    }
                    any = true;
                }
            }
        }
        any
    }

    // --- MARK: Paragraph attributes ---

    /// Sets the alignment of every paragraph the selection touches.
    pub fn set_alignment(&mut self, selection: &Selection, alignment: Alignment) -> Selection {
        self.for_each_selected_paragraph(selection, |paragraph| paragraph.alignment = alignment);
        *selection
    }

    /// Sets the line spacing of every paragraph the selection touches.
    pub fn set_line_spacing(&mut self, selection: &Selection, spacing: Option<f32>) -> Selection {
        self.for_each_selected_paragraph(selection, |paragraph| {
            paragraph.line_spacing = spacing;
        });
        *selection
    }

    /// Toggles list membership of every paragraph the selection touches.
    ///
    /// If all of them already belong to a `kind` list they leave it,
    /// otherwise they all join it. Checkboxes start unchecked.
    pub fn toggle_list(&mut self, selection: &Selection, kind: ListKind) -> Selection {
        let start = self.clamp(selection.start());
        let end = self.clamp(selection.end());
        let all = self
            .paragraphs_between(start, end)
            .all(|(s, p)| self.paragraph(s, p).is_some_and(|p| p.list == Some(kind)));
        self.set_list(selection, if all { None } else { Some(kind) })
    }

    /// Sets list membership of every paragraph the selection touches.
    pub fn set_list(&mut self, selection: &Selection, list: Option<ListKind>) -> Selection {
        self.for_each_selected_paragraph(selection, |paragraph| {
            if paragraph.list != list {
                paragraph.checked = false;
            }
            paragraph.list = list;
        });
        *selection
    }

    /// Flips the checkbox of a checklist paragraph.
    ///
    /// Returns `false` if the paragraph is not a checklist item.
    pub fn toggle_checked(&mut self, section: usize, paragraph: usize) -> bool {
        match self.paragraph_mut(section, paragraph) {
            Some(paragraph) if paragraph.list == Some(ListKind::Check) => {
                paragraph.checked = !paragraph.checked;
                true
            }
            _ => false,
        }
    }

    fn for_each_selected_paragraph(
        &mut self,
        selection: &Selection,
        mut f: impl FnMut(&mut Paragraph),
    ) {
        let start = self.clamp(selection.start());
        let end = self.clamp(selection.end());
        let range: Vec<_> = self.paragraphs_between(start, end).collect();
        for (section, index) in range {
            if let Some(paragraph) = self.paragraph_mut(section, index) {
                f(paragraph);
            }
        }
    }

    // --- MARK: Images ---

    /// Inserts an inline image at the selection head and places the caret
    /// after it.
    pub fn insert_image(
        &mut self,
        selection: &Selection,
        source: ImageSource,
        width: f32,
        height: f32,
    ) -> (ImageId, Selection) {
        let at = self.clamp(selection.head);
        let id = self.allocate_image_id();
        let Some(paragraph) = self.paragraph_mut(at.section, at.paragraph) else {
            return (id, *selection);
        };
        let Some(style) = paragraph.style_near(at.span).cloned() else {
            return (id, Selection::collapsed(at));
        };
        let boundary = paragraph.split_at(at.span, at.char_index);
        let image = Image {
            id,
            source,
            width,
            height,
            placement: ImagePlacement::Inline,
        };
        paragraph.children.insert(boundary, image.into());
        if !matches!(paragraph.children.get(boundary + 1), Some(Inline::Text(_))) {
            paragraph
                .children
                .insert(boundary + 1, Span::empty(style).into());
        }
        log::debug!("inserted image {id:?} at {at:?}");
        (
            id,
            Selection::collapsed(DocCoord {
                span: boundary + 1,
                char_index: 0,
                ..at
            }),
        )
    }

    /// Sets the display size of an image. Returns `false` if it is unknown.
    pub fn resize_image(&mut self, id: ImageId, width: f32, height: f32) -> bool {
        let Some(image) = self.image_mut(id) else {
            return false;
        };
        image.width = width;
        image.height = height;
        true
    }

    /// Moves an image to a floating position relative to its page's content
    /// origin. Returns `false` if it is unknown.
    pub fn update_image_position(&mut self, id: ImageId, x: f32, y: f32) -> bool {
        self.set_image_placement(id, ImagePlacement::Floating { x, y })
    }

    /// Changes how an image is positioned. Returns `false` if it is unknown.
    pub fn set_image_placement(&mut self, id: ImageId, placement: ImagePlacement) -> bool {
        let Some(image) = self.image_mut(id) else {
            return false;
        };
        image.placement = placement;
        true
    }
}

// --- MARK: Paragraph helpers ---

/// The position after the last child of a paragraph.
pub(crate) fn local_end(paragraph: &Paragraph) -> Local {
    let last = paragraph.children.len().saturating_sub(1);
    (last, paragraph.children.get(last).map_or(0, Inline::len))
}

/// The part of `start..end` that falls inside the given paragraph.
pub(crate) fn local_bounds(
    paragraph: &Paragraph,
    section: usize,
    index: usize,
    start: DocCoord,
    end: DocCoord,
) -> (Local, Local) {
    let from = if (section, index) == (start.section, start.paragraph) {
        (start.span, start.char_index)
    } else {
        (0, 0)
    };
    let to = if (section, index) == (end.section, end.paragraph) {
        (end.span, end.char_index)
    } else {
        local_end(paragraph)
    };
    (from, to)
}

// The caret position at the boundary before child `index`. `leading` prefers
// the start of that child over the end of the previous one.
fn position_before(paragraph: &Paragraph, index: usize, leading: bool) -> Local {
    if leading && index < paragraph.children.len() || index == 0 {
        (index.min(paragraph.children.len().saturating_sub(1)), 0)
    } else {
        (index - 1, paragraph.children[index - 1].len())
    }
}

// Resolves a caret to a position inside a text span, creating an empty span
// next to an image when there is none.
fn text_position(paragraph: &mut Paragraph, span: usize, char_index: usize) -> Option<Local> {
    match paragraph.children.get(span)? {
        Inline::Text(_) => Some((span, char_index)),
        Inline::Image(_) => {
            let neighbour = if char_index == 0 {
                span.checked_sub(1)
                    .filter(|&i| paragraph.children[i].as_text().is_some())
                    .map(|i| (i, paragraph.children[i].len()))
            } else {
                paragraph
                    .children
                    .get(span + 1)
                    .and_then(Inline::as_text)
                    .map(|_| (span + 1, 0))
            };
            if neighbour.is_some() {
                return neighbour;
            }
            let style = paragraph.style_near(span)?.clone();
            let index = if char_index == 0 { span } else { span + 1 };
            paragraph.children.insert(index, Span::empty(style).into());
            Some((index, 0))
        }
    }
}

// Removes one unit and returns the caret at the place it occupied.
fn remove_unit(paragraph: &mut Paragraph, index: usize, offset: usize) -> Local {
    match &mut paragraph.children[index] {
        Inline::Text(span) => {
            span.remove_chars(offset, offset + 1);
            (index, offset)
        }
        Inline::Image(_) => {
            paragraph.children.remove(index);
            position_before(paragraph, index, false)
        }
    }
}

fn delete_backward(paragraph: &mut Paragraph, span: usize, char_index: usize) -> Option<Local> {
    let (index, offset) = if char_index > 0 {
        (span, char_index - 1)
    } else {
        let index = (0..span)
            .rev()
            .find(|&i| !paragraph.children[i].is_empty())?;
        (index, paragraph.children[index].len() - 1)
    };
    Some(remove_unit(paragraph, index, offset))
}

fn delete_forward(paragraph: &mut Paragraph, span: usize, char_index: usize) -> Option<Local> {
    let len = paragraph.children.get(span)?.len();
    let (index, offset) = if char_index < len {
        (span, char_index)
    } else {
        let index = (span + 1..paragraph.children.len()).find(|&i| !paragraph.children[i].is_empty())?;
        (index, 0)
    };
    let caret = remove_unit(paragraph, index, offset);
    Some(if index == span { caret } else { (span, char_index) })
}

/// Removes the content between two positions of one paragraph and returns
/// the caret at the start of the removed range.
///
/// A text span holding the start survives, possibly empty, so typing after
/// the deletion keeps its style.
pub(crate) fn delete_in_paragraph(paragraph: &mut Paragraph, start: Local, end: Local) -> Local {
    let fallback = paragraph.style_near(start.0).cloned();
    let (s0, c0) = start;
    let (s1, c1) = end;
    let caret = if s0 == s1 {
        match &mut paragraph.children[s0] {
            Inline::Text(span) => {
                span.remove_chars(c0, c1);
                (s0, c0)
            }
            Inline::Image(_) if c0 == 0 && c1 >= 1 => {
                paragraph.children.remove(s0);
                position_before(paragraph, s0, false)
            }
            Inline::Image(_) => (s0, c0),
        }
    } else {
        let remove_end = match &mut paragraph.children[s1] {
            Inline::Text(span) => {
                span.remove_chars(0, c1);
                span.is_empty()
            }
            Inline::Image(_) => c1 >= 1,
        };
        let remove_start = match &mut paragraph.children[s0] {
            Inline::Text(span) => {
                let len = span.len();
                span.remove_chars(c0, len);
                false
            }
            Inline::Image(_) => c0 == 0,
        };
        if remove_end {
            paragraph.children.remove(s1);
        }
        paragraph.children.drain(s0 + 1..s1);
        if remove_start {
            paragraph.children.remove(s0);
            position_before(paragraph, s0, false)
        } else {
            (s0, c0)
        }
    };
    if let Some(style) = fallback {
        paragraph.ensure_text(&style);
    }
    caret
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::paragraph::Section;

    fn style() -> Style {
        Style::new("Roboto", 16.0)
    }

    fn doc(paragraphs: &[&[&str]]) -> Document {
        let paragraphs = paragraphs
            .iter()
            .map(|spans| {
                Paragraph::new(
                    spans
                        .iter()
                        .map(|text| Span::new(*text, style()).into())
                        .collect(),
                )
            })
            .collect();
        Document::from_paragraphs(paragraphs, &style())
    }

    fn caret(paragraph: usize, span: usize, char_index: usize) -> Selection {
        Selection::collapsed(DocCoord::new(paragraph, span, char_index))
    }

    #[test]
    fn insert_text_advances_caret() {
        let mut doc = doc(&[&["Hllo"]]);
        let sel = doc.insert_text(&caret(0, 0, 1), "e");
        assert_eq!(doc.text(), "Hello");
        assert_eq!(sel, caret(0, 0, 2));
    }

    #[test]
    fn insert_text_drops_line_breaks() {
        let mut doc = doc(&[&["ad"]]);
        let sel = doc.insert_text(&caret(0, 0, 1), "b\r\nc\u{2028}");
        assert_eq!(doc.text(), "abcd");
        assert_eq!(sel, caret(0, 0, 3));
        assert_eq!(doc.paragraph_count(), 1);
        let sel = doc.insert_text(&sel, "\n");
        assert_eq!(doc.text(), "abcd");
        assert_eq!(sel, caret(0, 0, 3));
    }

    #[test]
    fn delete_range_within_span_collapses_to_start() {
        let mut doc = doc(&[&["Hello world"]]);
        let sel = Selection::new(DocCoord::new(0, 0, 2), DocCoord::new(0, 0, 5));
        let sel = doc.delete_range(&sel);
        assert_eq!(doc.text(), "He world");
        assert_eq!(sel, caret(0, 0, 2));
    }

    #[test]
    fn delete_range_across_paragraphs_joins_them() {
        let mut doc = doc(&[&["abc", "def"], &["ghi"], &["jk", "lm"]]);
        let sel = Selection::new(DocCoord::new(2, 0, 1), DocCoord::new(0, 1, 1));
        let sel = doc.delete_range(&sel);
        assert_eq!(doc.text(), "abcdklm");
        assert_eq!(doc.sections[0].paragraphs.len(), 1);
        assert_eq!(sel, caret(0, 1, 1));
    }

    #[test]
    fn delete_range_across_sections() {
        let mut doc = Document::new(
            vec![
                Section::new(vec![Paragraph::from_span(Span::new("one", style()))]),
                Section::new(vec![
                    Paragraph::from_span(Span::new("two", style())),
                    Paragraph::from_span(Span::new("three", style())),
                ]),
            ],
            &style(),
        );
        let sel = Selection::new(
            DocCoord::in_section(0, 0, 0, 2),
            DocCoord::in_section(1, 0, 0, 1),
        );
        let sel = doc.delete_range(&sel);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.text(), "onwo\nthree");
        assert_eq!(sel, caret(0, 0, 2));
    }

    #[test]
    fn backward_delete_crosses_span_boundaries() {
        let mut doc = doc(&[&["ab", "", "cd"]]);
        let sel = doc.delete_text(&caret(0, 2, 0), Direction::Backward);
        assert_eq!(doc.text(), "acd");
        assert_eq!(sel, caret(0, 0, 1));
    }

    #[test]
    fn delete_at_paragraph_edges_is_a_no_op() {
        let mut doc = doc(&[&["ab"], &["cd"]]);
        let sel = doc.delete_text(&caret(1, 0, 0), Direction::Backward);
        assert_eq!(sel, caret(1, 0, 0));
        let sel = doc.delete_text(&caret(0, 0, 2), Direction::Forward);
        assert_eq!(sel, caret(0, 0, 2));
        assert_eq!(doc.text(), "ab\ncd");
    }

    #[test]
    fn merge_with_next_returns_seam() {
        let mut doc = doc(&[&["ab"], &["cd"]]);
        let seam = doc.merge_with_next(0, 0);
        assert_eq!(seam, Some(DocCoord::new(0, 0, 2)));
        assert_eq!(doc.text(), "abcd");
        assert_eq!(doc.merge_with_next(0, 0), None);
    }

    #[test]
    fn split_paragraph_inherits_list_but_not_check_state() {
        let mut doc = doc(&[&["todo item"]]);
        doc.sections[0].paragraphs[0].list = Some(ListKind::Check);
        doc.sections[0].paragraphs[0].checked = true;
        let sel = doc.split_paragraph(&caret(0, 0, 4));
        assert_eq!(doc.text(), "todo\n item");
        assert_eq!(sel, caret(1, 0, 0));
        let new = &doc.sections[0].paragraphs[1];
        assert_eq!(new.list, Some(ListKind::Check));
        assert!(!new.checked);
    }

    #[test]
    fn split_at_paragraph_end_creates_empty_paragraph() {
        let mut doc = doc(&[&["abc"]]);
        doc.split_paragraph(&caret(0, 0, 3));
        let new = &doc.sections[0].paragraphs[1];
        assert!(new.is_empty());
        assert_eq!(new.children.len(), 1);
    }

    #[test]
    fn toggle_style_splits_spans() {
        let mut doc = doc(&[&["Hello world"]]);
        let sel = Selection::new(DocCoord::new(0, 0, 6), DocCoord::new(0, 0, 11));
        let sel = doc.toggle_style(&sel, StyleFlag::Bold);
        let children = &doc.sections[0].paragraphs[0].children;
        assert_eq!(children.len(), 2);
        assert!(children[1].as_text().is_some_and(|s| s.style.bold && s.text == "world"));
        assert_eq!(sel.start(), DocCoord::new(0, 1, 0));
        assert_eq!(sel.end(), DocCoord::new(0, 1, 5));

        // Everything selected is bold now, so toggling again clears it.
        doc.toggle_style(&sel, StyleFlag::Bold);
        let children = &doc.sections[0].paragraphs[0].children;
        assert!(children.iter().all(|c| c.as_text().is_some_and(|s| !s.style.bold)));
    }

    #[test]
    fn toggle_style_on_caret_inserts_pending_span() {
        let mut doc = doc(&[&["ab"]]);
        let sel = doc.toggle_style(&caret(0, 0, 1), StyleFlag::Italic);
        assert_eq!(sel, caret(0, 1, 0));
        let sel = doc.insert_text(&sel, "X");
        assert_eq!(doc.text(), "aXb");
        let span = doc.sections[0].paragraphs[0].children[1].as_text().cloned();
        assert!(span.is_some_and(|s| s.style.italic && s.text == "X"));
        assert_eq!(sel, caret(0, 1, 1));
    }

    #[test]
    fn toggle_list_twice_clears_it() {
        let mut doc = doc(&[&["a"], &["b"]]);
        let sel = Selection::new(DocCoord::new(0, 0, 0), DocCoord::new(1, 0, 1));
        doc.toggle_list(&sel, ListKind::Number);
        assert!(doc.sections[0].paragraphs.iter().all(|p| p.list == Some(ListKind::Number)));
        doc.toggle_list(&sel, ListKind::Number);
        assert!(doc.sections[0].paragraphs.iter().all(|p| p.list.is_none()));
    }

    #[test]
    fn images_take_one_caret_step() {
        let mut doc = doc(&[&["abcd"]]);
        let (id, sel) = doc.insert_image(&caret(0, 0, 2), ImageSource::new("cat.png"), 40.0, 30.0);
        assert_eq!(sel, caret(0, 2, 0));
        assert_eq!(doc.image_coord(id), Some(DocCoord::new(0, 1, 0)));
        assert_eq!(doc.sections[0].paragraphs[0].len(), 5);

        let sel = doc.delete_text(&sel, Direction::Backward);
        assert_eq!(doc.image(id), None);
        assert_eq!(doc.text(), "abcd");
        assert_eq!(sel, caret(0, 0, 2));
    }

    #[test]
    fn typing_next_to_an_image_uses_a_text_span() {
        let mut doc = doc(&[&["ab"]]);
        let (id, _) = doc.insert_image(&caret(0, 0, 2), ImageSource::new("x"), 10.0, 10.0);
        let before_image = Selection::collapsed(doc.image_coord(id).unwrap_or_default());
        let sel = doc.insert_text(&before_image, "c");
        assert_eq!(doc.text(), "abc");
        assert_eq!(sel, caret(0, 0, 3));
    }

    #[test]
    fn image_updates_by_id() {
        let mut doc = doc(&[&["a"]]);
        let (id, _) = doc.insert_image(&caret(0, 0, 1), ImageSource::new("x"), 10.0, 10.0);
        assert!(doc.resize_image(id, 20.0, 15.0));
        assert!(doc.update_image_position(id, 5.0, 6.0));
        let image = doc.image(id).cloned();
        assert!(image.is_some_and(|image| {
            image.width == 20.0
                && image.placement == ImagePlacement::Floating { x: 5.0, y: 6.0 }
        }));
        assert!(!doc.resize_image(ImageId(99), 1.0, 1.0));
    }

    #[test]
    fn stale_coordinates_are_clamped() {
        let mut doc = doc(&[&["ab"]]);
        let sel = doc.insert_text(&caret(7, 3, 9), "c");
        assert_eq!(doc.text(), "abc");
        assert_eq!(sel, caret(0, 0, 3));
    }
}
