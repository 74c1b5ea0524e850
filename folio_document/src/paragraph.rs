// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spans, images, paragraphs and sections.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::style::{Alignment, ListKind, Style};

/// A run of text sharing a single [`Style`].
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The text of the run. May be empty.
    pub text: String,
    /// The style of every character in the run.
    pub style: Style,
}

impl Span {
    /// Creates a span.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Creates an empty span carrying `style`.
    pub fn empty(style: Style) -> Self {
        Self::new(String::new(), style)
    }

    /// Length of the span in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns `true` if the span has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset of the character at `char_index`, clamped to the end.
    pub fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    /// Inserts `text` before the character at `char_index`.
    pub fn insert_str(&mut self, char_index: usize, text: &str) {
        let offset = self.byte_offset(char_index);
        self.text.insert_str(offset, text);
    }

    /// Removes the characters in `start..end` (in character units).
    pub fn remove_chars(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let start = self.byte_offset(start);
        let end = self.byte_offset(end);
        self.text.replace_range(start..end, "");
    }

    /// Splits the span at `char_index`, keeping the head and returning the tail.
    pub fn split_off(&mut self, char_index: usize) -> Self {
        let offset = self.byte_offset(char_index);
        Self {
            text: self.text.split_off(offset),
            style: self.style.clone(),
        }
    }
}

/// Identifies an image within a document.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct ImageId(pub u64);

/// An opaque handle to image content, such as a URL or a content hash.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ImageSource(pub Arc<str>);

impl ImageSource {
    /// Creates a source handle.
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self(source.into())
    }

    /// The handle as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How an image is positioned.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImagePlacement {
    /// Laid out like a glyph on the line.
    #[default]
    Inline,
    /// Drawn at an explicit offset from the content origin of its page.
    Floating {
        /// Horizontal offset.
        x: f32,
        /// Vertical offset.
        y: f32,
    },
}

/// An image embedded in a paragraph.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Image {
    /// Stable identifier.
    pub id: ImageId,
    /// Where the pixel data comes from.
    pub source: ImageSource,
    /// Display width.
    pub width: f32,
    /// Display height.
    pub height: f32,
    /// Positioning mode.
    #[serde(default)]
    pub placement: ImagePlacement,
}

/// A child of a paragraph.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// A styled text run.
    Text(Span),
    /// An embedded image, occupying one caret position.
    Image(Image),
}

impl Inline {
    /// Number of caret steps the child spans.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(span) => span.len(),
            Self::Image(_) => 1,
        }
    }

    /// Returns `true` for an empty text span.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(span) => span.is_empty(),
            Self::Image(_) => false,
        }
    }

    /// The span, if this is text.
    pub fn as_text(&self) -> Option<&Span> {
        match self {
            Self::Text(span) => Some(span),
            Self::Image(_) => None,
        }
    }

    /// The span, if this is text.
    pub fn as_text_mut(&mut self) -> Option<&mut Span> {
        match self {
            Self::Text(span) => Some(span),
            Self::Image(_) => None,
        }
    }

    /// The image, if this is one.
    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Self::Image(image) => Some(image),
            Self::Text(_) => None,
        }
    }
}

impl From<Span> for Inline {
    fn from(span: Span) -> Self {
        Self::Text(span)
    }
}

impl From<Image> for Inline {
    fn from(image: Image) -> Self {
        Self::Image(image)
    }
}

/// A block of inline content with paragraph level attributes.
///
/// Every paragraph holds at least one text span. Edits that would remove the
/// last one leave an empty span behind, so a caret always has a style to
/// type with.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Paragraph {
    /// Spans and images in reading order.
    pub children: Vec<Inline>,
    /// Line alignment.
    #[serde(default)]
    pub alignment: Alignment,
    /// List membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListKind>,
    /// Checkbox state, meaningful for [`ListKind::Check`] only.
    #[serde(default)]
    pub checked: bool,
    /// Line spacing multiplier overriding the engine default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,
}

impl Paragraph {
    /// Creates a left aligned, non-list paragraph.
    pub fn new(children: Vec<Inline>) -> Self {
        Self {
            children,
            alignment: Alignment::default(),
            list: None,
            checked: false,
            line_spacing: None,
        }
    }

    /// Creates a paragraph holding a single span.
    pub fn from_span(span: Span) -> Self {
        Self::new(vec![Inline::Text(span)])
    }

    /// Returns this paragraph with the given alignment.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Returns this paragraph as a member of the given list.
    #[must_use]
    pub fn with_list(mut self, list: ListKind) -> Self {
        self.list = Some(list);
        self
    }

    /// A copy of the attributes with different children.
    ///
    /// The checkbox state is not carried over.
    pub fn with_children_like(&self, children: Vec<Inline>) -> Self {
        Self {
            children,
            alignment: self.alignment,
            list: self.list,
            checked: false,
            line_spacing: self.line_spacing,
        }
    }

    /// Length of the paragraph in caret steps.
    pub fn len(&self) -> usize {
        self.children.iter().map(Inline::len).sum()
    }

    /// Returns `true` if the paragraph has no characters and no images.
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(Inline::is_empty)
    }

    /// The plain text of the paragraph, images omitted.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(Inline::as_text)
            .map(|span| span.text.as_str())
            .collect()
    }

    /// The style of the closest text span at or before `index`, falling
    /// back to the first one after it.
    pub fn style_near(&self, index: usize) -> Option<&Style> {
        let (before, after) = self.children.split_at((index + 1).min(self.children.len()));
        before
            .iter()
            .rev()
            .chain(after)
            .find_map(|child| child.as_text().map(|span| &span.style))
    }

    /// Splits the child at `span` so that a child boundary falls at
    /// `char_index`, returning the index of the first child after it.
    pub fn split_at(&mut self, span: usize, char_index: usize) -> usize {
        let Some(child) = self.children.get_mut(span) else {
            return self.children.len();
        };
        let len = child.len();
        if char_index == 0 {
            return span;
        }
        if char_index >= len {
            return span + 1;
        }
        if let Inline::Text(text) = child {
            let tail = text.split_off(char_index);
            self.children.insert(span + 1, Inline::Text(tail));
        }
        span + 1
    }

    /// Makes sure the paragraph holds a text span, adding an empty one with
    /// `style` at the end if it does not.
    pub fn ensure_text(&mut self, style: &Style) {
        if !self.children.iter().any(|child| child.as_text().is_some()) {
            self.children.push(Inline::Text(Span::empty(style.clone())));
        }
    }

    /// Drops empty text spans, keeping at least one text span.
    pub fn prune_empty_text(&mut self) {
        let has_text = self
            .children
            .iter()
            .any(|child| child.as_text().is_some_and(|span| !span.is_empty()));
        if has_text {
            self.children.retain(|child| !child.is_empty());
            return;
        }
        let mut kept = false;
        self.children.retain(|child| {
            if !child.is_empty() {
                return true;
            }
            !std::mem::replace(&mut kept, true)
        });
    }
}

/// An ordered run of paragraphs.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Section {
    /// Paragraphs in reading order.
    pub paragraphs: Vec<Paragraph>,
}

impl Section {
    /// Creates a section.
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }
}
