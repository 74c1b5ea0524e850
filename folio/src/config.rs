// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! [page]
//! width = 595.0
//! height = 842.0
//!
//! [default_style]
//! font_family = "Roboto"
//! font_size = 12.0
//!
//! [editor]
//! merge_paragraphs = false
//! ```

use std::fs;
use std::path::Path;

use folio_document::{Color, Style};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Everything the engine needs to know up front.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Page size and margins.
    pub page: PageConstraints,
    /// Style used wherever content carries none.
    pub default_style: DefaultStyle,
    /// Line breaking and paragraph spacing.
    pub layout: LayoutConfig,
    /// Interaction tunables.
    pub editor: EditorConfig,
    /// Colors and sizes of editing decorations.
    pub render: RenderConfig,
}

impl EngineConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: "<string>".into(),
            source: Box::new(source),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        config.validate()?;
        log::debug!("loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Checks that the values describe a usable page and sane tunables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let page = &self.page;
        if page.width <= 0.0 || page.height <= 0.0 {
            return Err(invalid("page dimensions must be positive"));
        }
        if [
            page.margin_top,
            page.margin_right,
            page.margin_bottom,
            page.margin_left,
            page.page_gap,
        ]
        .iter()
        .any(|value| *value < 0.0)
        {
            return Err(invalid("margins and page gap must not be negative"));
        }
        if page.content_width() <= 0.0 {
            return Err(invalid("horizontal margins leave no room for content"));
        }
        if page.content_height() <= 0.0 {
            return Err(invalid("vertical margins leave no room for content"));
        }
        if self.default_style.0.font_size <= 0.0 {
            return Err(invalid("default font size must be positive"));
        }
        if self.default_style.0.font_family.is_empty() {
            return Err(invalid("default font family must not be empty"));
        }
        let layout = &self.layout;
        if layout.line_spacing <= 0.0 {
            return Err(invalid("line spacing must be positive"));
        }
        if layout.list_padding >= page.content_width() {
            return Err(invalid("list padding is wider than the content area"));
        }
        if layout.min_ratio > 0.0 || layout.max_ratio < 0.0 {
            return Err(invalid("justification ratio bounds must bracket zero"));
        }
        if layout.glue_stretch < 0.0 || layout.glue_shrink < 0.0 {
            return Err(invalid("glue stretch and shrink must not be negative"));
        }
        if self.editor.min_image_size <= 0.0 {
            return Err(invalid("minimum image size must be positive"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_owned())
}

/// Page dimensions, margins and the gap between stacked pages.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConstraints {
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    /// Top margin.
    pub margin_top: f32,
    /// Right margin.
    pub margin_right: f32,
    /// Bottom margin.
    pub margin_bottom: f32,
    /// Left margin.
    pub margin_left: f32,
    /// Vertical space between consecutive pages.
    pub page_gap: f32,
}

impl Default for PageConstraints {
    fn default() -> Self {
        Self {
            width: 816.0,
            height: 1056.0,
            margin_top: 96.0,
            margin_right: 96.0,
            margin_bottom: 96.0,
            margin_left: 96.0,
            page_gap: 20.0,
        }
    }
}

impl PageConstraints {
    /// Width available to content.
    pub fn content_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Height available to content.
    pub fn content_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// The y coordinate content may not extend past.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }

    /// Distance between the tops of consecutive pages.
    pub fn stride(&self) -> f32 {
        self.height + self.page_gap
    }
}

/// The style applied wherever content carries none.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultStyle(pub Style);

impl Default for DefaultStyle {
    fn default() -> Self {
        Self(Style::new("Roboto", 16.0))
    }
}

impl DefaultStyle {
    /// The wrapped style.
    pub fn style(&self) -> &Style {
        &self.0
    }
}

/// Line breaking and paragraph spacing tunables.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Line advance as a multiple of the largest font size on a line.
    pub line_spacing: f32,
    /// Space added after every paragraph.
    pub paragraph_gap: f32,
    /// Indentation of list paragraphs.
    pub list_padding: f32,
    /// Distance of list markers from the left margin.
    pub marker_offset: f32,
    /// Stretch of a space as a fraction of its width.
    pub glue_stretch: f32,
    /// Shrink of a space as a fraction of its width.
    pub glue_shrink: f32,
    /// Lower bound of the justification ratio.
    pub min_ratio: f32,
    /// Upper bound of the justification ratio.
    pub max_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_spacing: 1.15,
            paragraph_gap: 10.0,
            list_padding: 24.0,
            marker_offset: 6.0,
            glue_stretch: 0.5,
            glue_shrink: 0.3,
            min_ratio: -1.0,
            max_ratio: 5.0,
        }
    }
}

/// Interaction tunables.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// How far from a resize handle a pointer-down still grabs it.
    pub handle_tolerance: f32,
    /// Smallest width or height a resize can produce.
    pub min_image_size: f32,
    /// Whether backspace and delete at a paragraph edge join paragraphs.
    pub merge_paragraphs: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            handle_tolerance: 10.0,
            min_image_size: 16.0,
            merge_paragraphs: true,
        }
    }
}

/// Colors and sizes of editing decorations.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Fill behind selected text.
    pub selection_color: Color,
    /// Caret fill.
    pub caret_color: Color,
    /// Selected image outline and handles.
    pub handle_color: Color,
    /// Side of a resize handle square.
    pub handle_size: f32,
    /// Caret width.
    pub caret_width: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            selection_color: Color::rgba(0x33, 0x99, 0xff, 0x66),
            caret_color: Color::BLACK,
            handle_color: Color::rgb(0x33, 0x99, 0xff),
            handle_size: 8.0,
            caret_width: 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.layout.line_spacing, 1.15);
        assert_eq!(config.layout.paragraph_gap, 10.0);
        assert!(config.editor.merge_paragraphs);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [page]
            width = 400.0

            [default_style]
            font_family = "Inter"
            font_size = 12.0
            bold = false
            italic = false

            [editor]
            merge_paragraphs = false
            "#,
        )
        .unwrap();
        assert_eq!(config.page.width, 400.0);
        assert_eq!(config.page.height, PageConstraints::default().height);
        assert_eq!(&*config.default_style.style().font_family, "Inter");
        assert!(!config.editor.merge_paragraphs);
        assert_eq!(config.editor.handle_tolerance, 10.0);
    }

    #[test]
    fn margins_wider_than_page_are_rejected() {
        let err = EngineConfig::from_toml_str(
            r#"
            [page]
            width = 100.0
            margin_left = 60.0
            margin_right = 60.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        let err = EngineConfig::from_toml_str("[page\nwidth = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(&path, "[layout]\nparagraph_gap = 4.0\n").unwrap();
        let config = EngineConfig::load_from_path(&path).unwrap();
        assert_eq!(config.layout.paragraph_gap, 4.0);

        let missing = EngineConfig::load_from_path(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }), "{missing}");
    }
}
