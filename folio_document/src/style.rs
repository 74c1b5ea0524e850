// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character and paragraph styles.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An 8-bit per channel RGBA color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, where 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// The style shared by every character of a [`Span`](crate::Span).
///
/// Styles are plain values: spans own a copy, and changing the style of part
/// of a span splits it first.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Style {
    /// Font family name, resolved by the font metrics provider.
    pub font_family: Arc<str>,
    /// Font size in layout units.
    pub font_size: f32,
    /// Bold weight.
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    /// Italic slant.
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    /// Underline decoration.
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    /// Text color. `None` leaves the choice to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Line spacing multiplier carried by the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,
}

#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde passes skipped fields by reference"
)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl Style {
    /// Creates a regular style with the given family and size.
    pub fn new(font_family: impl Into<Arc<str>>, font_size: f32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            bold: false,
            italic: false,
            underline: false,
            color: None,
            line_spacing: None,
        }
    }

    /// Returns this style with `bold` set.
    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Returns this style with `italic` set.
    #[must_use]
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Returns this style with `underline` set.
    #[must_use]
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Returns this style with the given color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Boolean style properties that can be toggled over a range.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum StyleFlag {
    /// Bold weight.
    Bold,
    /// Italic slant.
    Italic,
    /// Underline decoration.
    Underline,
}

impl StyleFlag {
    /// Reads the flag from a style.
    pub fn get(self, style: &Style) -> bool {
        match self {
            Self::Bold => style.bold,
            Self::Italic => style.italic,
            Self::Underline => style.underline,
        }
    }

    /// Writes the flag into a style.
    pub fn set(self, style: &mut Style, value: bool) {
        match self {
            Self::Bold => style.bold = value,
            Self::Italic => style.italic = value,
            Self::Underline => style.underline = value,
        }
    }
}

/// A single property change applied to every span in a range.
#[derive(Clone, PartialEq, Debug)]
pub enum StyleChange {
    /// Replace the font family.
    FontFamily(Arc<str>),
    /// Replace the font size.
    FontSize(f32),
    /// Replace the color.
    Color(Option<Color>),
    /// Replace the run line spacing.
    LineSpacing(Option<f32>),
    /// Set a boolean flag to the given value.
    Flag(StyleFlag, bool),
}

impl StyleChange {
    /// Applies the change to `style`.
    pub fn apply(&self, style: &mut Style) {
        match self {
            Self::FontFamily(family) => style.font_family = family.clone(),
            Self::FontSize(size) => style.font_size = *size,
            Self::Color(color) => style.color = *color,
            Self::LineSpacing(spacing) => style.line_spacing = *spacing,
            Self::Flag(flag, value) => flag.set(style, *value),
        }
    }
}

/// Horizontal alignment of a paragraph's lines.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Lines start at the left edge.
    #[default]
    Left,
    /// Lines are centered.
    Center,
    /// Lines end at the right edge.
    Right,
    /// Every line but the last is stretched to the full width.
    Justify,
}

/// The kind of list a paragraph belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// Unordered list with a bullet marker.
    Bullet,
    /// Ordered list with an `N.` marker.
    Number,
    /// Checklist with a checkbox marker.
    Check,
}
