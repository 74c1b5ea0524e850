// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context for layout.

use folio_document::Document;

use crate::config::EngineConfig;
use crate::font::FontContext;
use crate::layout::items::{push_paragraph_items, Item};
use crate::layout::paginate::{ListCounter, PageBuilder, ParagraphLayout};
use crate::layout::Layout;

/// Scratch space reused across layout passes.
#[derive(Debug, Default)]
pub struct LayoutContext {
    items: Vec<Item>,
}

impl LayoutContext {
    /// Creates a context with empty scratch buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out `document` into pages.
    ///
    /// The result depends only on the document, the configuration and the
    /// faces registered in `fonts`.
    pub fn layout(
        &mut self,
        document: &Document,
        config: &EngineConfig,
        fonts: &FontContext,
    ) -> Layout {
        let mut builder = PageBuilder::new(config.page);
        let mut counter = ListCounter::default();
        for (section_index, section) in document.sections.iter().enumerate() {
            counter.reset();
            for (index, paragraph) in section.paragraphs.iter().enumerate() {
                self.items.clear();
                push_paragraph_items(
                    &mut self.items,
                    paragraph,
                    section_index,
                    index,
                    fonts,
                    &config.layout,
                );
                ParagraphLayout {
                    paragraph,
                    section: section_index,
                    index,
                    number: counter.next(paragraph),
                    items: &self.items,
                    config,
                    fonts,
                }
                .place(&mut builder);
                builder.advance(config.layout.paragraph_gap);
            }
        }
        let pages = builder.finish();
        log::debug!(
            "laid out {} paragraphs on {} pages with {} glyphs",
            document.paragraph_count(),
            pages.len(),
            pages.iter().map(|page| page.glyphs.len()).sum::<usize>()
        );
        Layout::new(pages, config.page)
    }
}
