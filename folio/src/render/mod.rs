// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing laid out pages onto a surface.
//!
//! Folio does not rasterize anything itself. A [`Renderer`] walks the layout
//! and issues drawing commands to a [`Surface`] implemented by the host,
//! page by page, in a fixed order: selection highlight, glyphs and their
//! decorations, the outline and handles of the selected image, and finally
//! the caret.

mod image_cache;

use core::fmt;
use std::sync::Arc;

use folio_document::{Color, ImageSource, Style};

use crate::config::RenderConfig;
use crate::editing::{Handle, RichEditor};
use crate::font::FontContext;
use crate::geometry::BoundingBox;
use crate::layout::{Glyph, GlyphKind, Page};
use crate::util::Generation;

use image_cache::ImageCache;

/// Pixels produced by an [`ImageDecoder`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 pixels, row by row.
    pub pixels: Arc<[u8]>,
}

/// Turns image sources into pixels.
pub trait ImageDecoder {
    /// Decodes the image behind `source`, or returns `None` if it is
    /// unavailable.
    fn decode(&mut self, source: &ImageSource) -> Option<DecodedImage>;
}

/// A drawing target provided by the host.
///
/// All positions are relative to the top left corner of the current page.
pub trait Surface {
    /// Starts drawing a page.
    fn begin_page(&mut self, index: usize, width: f32, height: f32);

    /// Draws text with its left edge at `x`, sitting on `baseline`.
    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, style: &Style);

    /// Draws a checklist box.
    fn draw_checkbox(&mut self, bounds: BoundingBox, checked: bool);

    /// Draws an image. `image` is `None` when it could not be decoded, in
    /// which case a placeholder is expected.
    fn draw_image(&mut self, image: Option<&DecodedImage>, bounds: BoundingBox);

    /// Fills a rectangle. Used for decorations, such as underlines.
    fn fill_rect(&mut self, bounds: BoundingBox, color: Color);

    /// Finishes the current page.
    fn end_page(&mut self, index: usize);
}

const DEFAULT_IMAGE_CACHE_SIZE: usize = 32;

/// Draws an editor's pages onto a [`Surface`].
pub struct Renderer {
    images: ImageCache,
    drawn: Option<Generation>,
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("cached_images", &self.images.len())
            .field("drawn", &self.drawn)
            .finish()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Creates a renderer with the default image cache size.
    pub fn new() -> Self {
        Self::with_image_cache_size(DEFAULT_IMAGE_CACHE_SIZE)
    }

    /// Creates a renderer keeping up to `capacity` decoded images.
    pub fn with_image_cache_size(capacity: usize) -> Self {
        Self {
            images: ImageCache::new(capacity),
            drawn: None,
        }
    }

    /// Forgets all decoded images.
    pub fn clear_images(&mut self) {
        self.images.clear();
    }

    /// Draws the editor if anything changed since the last draw.
    ///
    /// Returns `true` if something was drawn.
    pub fn render_if_dirty(
        &mut self,
        editor: &mut RichEditor,
        fonts: &FontContext,
        surface: &mut impl Surface,
        decoder: &mut impl ImageDecoder,
    ) -> bool {
        editor.refresh_layout(fonts);
        if self.drawn == Some(editor.generation()) {
            return false;
        }
        self.render(editor, fonts, surface, decoder);
        true
    }

    /// Draws every page of the editor.
    pub fn render(
        &mut self,
        editor: &mut RichEditor,
        fonts: &FontContext,
        surface: &mut impl Surface,
        decoder: &mut impl ImageDecoder,
    ) {
        let config = editor.config().render;
        let mut driver = editor.driver(fonts);
        let highlight = driver.selection_geometry();
        let caret = driver.cursor_geometry();
        let selected_image = driver.selected_image_geometry();
        let layout = driver.layout();

        for page in layout.pages() {
            surface.begin_page(page.index, page.width, page.height);
            for (_, rect) in highlight.iter().filter(|(index, _)| *index == page.index) {
                surface.fill_rect(*rect, config.selection_color);
            }
            self.draw_glyphs(page, surface, decoder);
            if let Some((_, bounds)) = selected_image.filter(|(index, _)| *index == page.index) {
                draw_image_frame(&bounds, &config, surface);
            }
            if let Some((_, bounds)) = caret.filter(|(index, _)| *index == page.index) {
                surface.fill_rect(bounds, config.caret_color);
            }
            surface.end_page(page.index);
        }
        self.drawn = Some(editor.generation());
    }

    fn draw_glyphs(
        &mut self,
        page: &Page,
        surface: &mut impl Surface,
        decoder: &mut impl ImageDecoder,
    ) {
        let mut buf = [0; 4];
        for glyph in &page.glyphs {
            match &glyph.kind {
                GlyphKind::Text { ch, style, .. } => {
                    if !ch.is_whitespace() {
                        surface.draw_text(ch.encode_utf8(&mut buf), glyph.x, glyph.baseline, style);
                    }
                    if style.underline {
                        let color = style.color.unwrap_or(Color::BLACK);
                        surface.fill_rect(underline(glyph), color);
                    }
                }
                GlyphKind::CheckboxChecked { .. } => {
                    surface.draw_checkbox(glyph.bounds(), true);
                }
                GlyphKind::CheckboxUnchecked { .. } => {
                    surface.draw_checkbox(glyph.bounds(), false);
                }
                GlyphKind::Image { source, .. } => {
                    let image = self.images.get(source, decoder);
                    surface.draw_image(image, glyph.bounds());
                }
            }
        }
    }
}

/// Underline geometry below a text glyph.
fn underline(glyph: &Glyph) -> BoundingBox {
    let offset = glyph.size * 0.1;
    let thickness = (glyph.size / 16.0).max(1.0);
    BoundingBox::from_origin_size(glyph.x, glyph.baseline + offset, glyph.width, thickness)
}

fn draw_image_frame(bounds: &BoundingBox, config: &RenderConfig, surface: &mut impl Surface) {
    let color = config.handle_color;
    let edges = [
        BoundingBox::new(bounds.x0, bounds.y0, bounds.x1, bounds.y0 + 1.0),
        BoundingBox::new(bounds.x0, bounds.y1 - 1.0, bounds.x1, bounds.y1),
        BoundingBox::new(bounds.x0, bounds.y0, bounds.x0 + 1.0, bounds.y1),
        BoundingBox::new(bounds.x1 - 1.0, bounds.y0, bounds.x1, bounds.y1),
    ];
    for edge in edges {
        surface.fill_rect(edge, color);
    }
    for handle in Handle::ALL {
        let (x, y) = handle.position(bounds);
        surface.fill_rect(BoundingBox::centered(x, y, config.handle_size), color);
    }
}
