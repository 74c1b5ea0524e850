// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_document::{Document, Paragraph, Selection, Span, Style};

use crate::config::EngineConfig;
use crate::context::LayoutContext;
use crate::editing::{RichEditor, RichEditorDriver};
use crate::font::FontContext;
use crate::layout::{GlyphKind, Layout, LineBox, Page};

/// Fonts, configuration and scratch space shared by a test.
///
/// No faces are registered, so every character of a 16 point style is 8
/// units wide, ascends 12.8 and descends 3.2.
pub(crate) struct TestEnv {
    pub(crate) fonts: FontContext,
    pub(crate) config: EngineConfig,
    layout_cx: LayoutContext,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self {
            fonts: FontContext::new(),
            config: EngineConfig::default(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Narrows the page so that lines hold `width` units of content.
    pub(crate) fn with_content_width(mut self, width: f32) -> Self {
        let page = &mut self.config.page;
        page.width = page.margin_left + width + page.margin_right;
        self
    }

    pub(crate) fn style() -> Style {
        Style::new("Roboto", 16.0)
    }

    pub(crate) fn paragraph(text: &str) -> Paragraph {
        Paragraph::from_span(Span::new(text, Self::style()))
    }

    pub(crate) fn document(&self, text: &str) -> Document {
        Document::from_text(text, &Self::style())
    }

    pub(crate) fn layout(&mut self, document: &Document) -> Layout {
        self.layout_cx.layout(document, &self.config, &self.fonts)
    }

    /// An editor over `text` with the caret at the end.
    pub(crate) fn editor(&self, text: &str) -> RichEditor {
        self.editor_for(self.document(text))
    }

    pub(crate) fn editor_for(&self, document: Document) -> RichEditor {
        let mut editor = RichEditor::new(document, self.config.clone());
        let end = editor.document().end();
        editor.set_selection(Some(Selection::collapsed(end)));
        editor
    }

    pub(crate) fn driver<'a>(&'a self, editor: &'a mut RichEditor) -> RichEditorDriver<'a> {
        editor.driver(&self.fonts)
    }
}

/// Returns the characters drawn on a line, in order.
pub(crate) fn line_text(page: &Page, line: &LineBox) -> String {
    page.glyphs[line.glyphs.clone()]
        .iter()
        .filter_map(|glyph| match glyph.kind {
            GlyphKind::Text {
                ch,
                source: Some(_),
                ..
            } => Some(ch),
            _ => None,
        })
        .collect()
}

#[track_caller]
pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

