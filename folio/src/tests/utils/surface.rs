// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use folio_document::{Color, ImageSource, Style};

use crate::geometry::BoundingBox;
use crate::render::{DecodedImage, ImageDecoder, Surface};

#[derive(Clone, PartialEq, Debug)]
pub(crate) enum DrawCommand {
    BeginPage(usize),
    Text { text: String, x: f32, baseline: f32, bold: bool },
    Checkbox { bounds: BoundingBox, checked: bool },
    Image { decoded: bool, bounds: BoundingBox },
    Rect { bounds: BoundingBox, color: Color },
    EndPage(usize),
}

/// A surface that records what it is asked to draw.
#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub(crate) commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub(crate) fn text(&self) -> String {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn rects_of(&self, color: Color) -> Vec<BoundingBox> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Rect { bounds, color: c } if *c == color => Some(*bounds),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn begin_page(&mut self, index: usize, _width: f32, _height: f32) {
        self.commands.push(DrawCommand::BeginPage(index));
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, style: &Style) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            x,
            baseline,
            bold: style.bold,
        });
    }

    fn draw_checkbox(&mut self, bounds: BoundingBox, checked: bool) {
        self.commands.push(DrawCommand::Checkbox { bounds, checked });
    }

    fn draw_image(&mut self, image: Option<&DecodedImage>, bounds: BoundingBox) {
        self.commands.push(DrawCommand::Image {
            decoded: image.is_some(),
            bounds,
        });
    }

    fn fill_rect(&mut self, bounds: BoundingBox, color: Color) {
        self.commands.push(DrawCommand::Rect { bounds, color });
    }

    fn end_page(&mut self, index: usize) {
        self.commands.push(DrawCommand::EndPage(index));
    }
}

/// Decodes every source except those named `missing*` into a single pixel.
#[derive(Default)]
pub(crate) struct StubDecoder {
    pub(crate) calls: usize,
}

impl ImageDecoder for StubDecoder {
    fn decode(&mut self, source: &ImageSource) -> Option<DecodedImage> {
        self.calls += 1;
        (!source.as_str().starts_with("missing")).then(|| DecodedImage {
            width: 1,
            height: 1,
            pixels: Arc::from([255_u8; 4]),
        })
    }
}
