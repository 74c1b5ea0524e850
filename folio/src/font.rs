// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font metrics.
//!
//! Faces are registered from raw font data as it becomes available. Every
//! lookup succeeds: an unknown family resolves to the most recently
//! registered one, and with nothing registered at all the context answers
//! with fixed proportional metrics so that layout can always proceed.

use std::sync::Arc;

use hashbrown::HashMap;
use skrifa::instance::{LocationRef, Size};
use skrifa::{FontRef, GlyphId, MetadataProvider};
use smallvec::SmallVec;

use crate::error::FontError;
use crate::util::Generation;

const DEGRADED_ADVANCE: f32 = 0.5;
const DEGRADED_ASCENDER: f32 = 0.8;
const DEGRADED_DESCENDER: f32 = -0.2;
const BOLD_WEIGHT: u16 = 600;

/// Slant of a face.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Slanted.
    Italic,
}

/// Describes which face of a family some font data provides.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FontDescriptor {
    /// CSS style weight, 400 for regular and 700 for bold.
    pub weight: u16,
    /// Slant.
    pub style: FontStyle,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl FontDescriptor {
    /// Upright regular weight.
    pub const REGULAR: Self = Self {
        weight: 400,
        style: FontStyle::Normal,
    };

    /// Descriptor of the face matching the given style flags.
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        Self {
            weight: if bold { 700 } else { 400 },
            style: if italic {
                FontStyle::Italic
            } else {
                FontStyle::Normal
            },
        }
    }

    fn is_bold(self) -> bool {
        self.weight >= BOLD_WEIGHT
    }

    fn is_italic(self) -> bool {
        self.style == FontStyle::Italic
    }
}

/// Vertical extent of a font at some size.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct VerticalMetrics {
    /// Distance from the baseline to the top of the tallest glyphs.
    pub ascender: f32,
    /// Distance from the baseline to the bottom of the lowest glyphs.
    /// Negative below the baseline.
    pub descender: f32,
    /// `ascender - descender`.
    pub height: f32,
}

/// Metrics extracted from one face, in font units.
#[derive(Clone, Debug)]
pub(crate) struct FaceMetrics {
    pub(crate) units_per_em: f32,
    pub(crate) ascent: f32,
    pub(crate) descent: f32,
    pub(crate) advances: HashMap<char, f32>,
    pub(crate) default_advance: f32,
}

impl FaceMetrics {
    fn parse(data: &[u8]) -> Result<Self, String> {
        let font = FontRef::new(data).map_err(|err| err.to_string())?;
        let metrics = font.metrics(Size::unscaled(), LocationRef::default());
        let glyph_metrics = font.glyph_metrics(Size::unscaled(), LocationRef::default());
        let units_per_em = f32::from(metrics.units_per_em.max(1));
        let mut advances = HashMap::new();
        for (codepoint, glyph) in font.charmap().mappings() {
            let (Some(ch), Some(advance)) =
                (char::from_u32(codepoint), glyph_metrics.advance_width(glyph))
            else {
                continue;
            };
            advances.insert(ch, advance);
        }
        let default_advance = glyph_metrics
            .advance_width(GlyphId::NOTDEF)
            .unwrap_or(units_per_em * DEGRADED_ADVANCE);
        Ok(Self {
            units_per_em,
            ascent: metrics.ascent,
            descent: metrics.descent,
            advances,
            default_advance,
        })
    }

    fn scaled(&self, value: f32, size: f32) -> f32 {
        value * size / self.units_per_em
    }
}

#[derive(Clone, Debug)]
struct Face {
    descriptor: FontDescriptor,
    metrics: FaceMetrics,
}

#[derive(Clone, Debug, Default)]
struct Family {
    faces: SmallVec<[Face; 4]>,
    /// Pair adjustments in font units of the family's first face.
    kerning: HashMap<(char, char), f32>,
}

impl Family {
    fn face(&self, bold: bool, italic: bool) -> Option<&Face> {
        self.faces
            .iter()
            .find(|face| face.descriptor.is_bold() == bold && face.descriptor.is_italic() == italic)
            .or_else(|| {
                self.faces
                    .iter()
                    .find(|face| !face.descriptor.is_bold() && !face.descriptor.is_italic())
            })
            .or_else(|| self.faces.first())
    }
}

/// Registry of font faces answering metric queries for layout.
#[derive(Clone, Debug)]
pub struct FontContext {
    families: HashMap<Arc<str>, Family>,
    last_registered: Option<Arc<str>>,
    failed: HashMap<Arc<str>, String>,
    line_height_factor: f32,
    generation: Generation,
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontContext {
    /// Creates a context without any faces.
    pub fn new() -> Self {
        Self {
            families: HashMap::new(),
            last_registered: None,
            failed: HashMap::new(),
            line_height_factor: 1.2,
            generation: Generation::default(),
        }
    }

    /// Sets the multiplier used by [`Self::line_height`].
    pub fn with_line_height_factor(mut self, factor: f32) -> Self {
        self.line_height_factor = factor;
        self
    }

    /// Changes whenever a family becomes available or its metrics change.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns `true` if at least one face of `family` is registered.
    pub fn has_family(&self, family: &str) -> bool {
        self.families
            .get(family)
            .is_some_and(|f| !f.faces.is_empty())
    }

    /// The reason the last load of `family` failed, if it did.
    pub fn load_failure(&self, family: &str) -> Option<&str> {
        self.failed.get(family).map(String::as_str)
    }

    /// Parses `data` and registers it as a face of `family`.
    ///
    /// A face with the same descriptor replaces the previous one. On
    /// failure no face is added and the failure is recorded.
    pub fn register_font(
        &mut self,
        family: &str,
        descriptor: FontDescriptor,
        data: &[u8],
    ) -> Result<(), FontError> {
        if family.is_empty() {
            return Err(FontError::EmptyFamilyName);
        }
        match FaceMetrics::parse(data) {
            Ok(metrics) => {
                log::debug!(
                    "registered font family `{family}` {descriptor:?} with {} mapped characters",
                    metrics.advances.len()
                );
                self.insert_face(family, descriptor, metrics);
                Ok(())
            }
            Err(message) => {
                self.font_load_failed(family, &message);
                Err(FontError::Parse {
                    family: family.to_owned(),
                    message,
                })
            }
        }
    }

    pub(crate) fn insert_face(
        &mut self,
        family: &str,
        descriptor: FontDescriptor,
        metrics: FaceMetrics,
    ) {
        let name: Arc<str> = family.into();
        let entry = self.families.entry(name.clone()).or_default();
        let face = Face {
            descriptor,
            metrics,
        };
        match entry
            .faces
            .iter()
            .position(|existing| existing.descriptor == descriptor)
        {
            Some(index) => entry.faces[index] = face,
            None => entry.faces.push(face),
        }
        self.failed.remove(&name);
        self.last_registered = Some(name);
        self.generation.nudge();
    }

    /// Registers kerning pairs for `family`, in font units.
    ///
    /// Pairs apply to every face of the family.
    pub fn register_kerning(
        &mut self,
        family: &str,
        pairs: impl IntoIterator<Item = ((char, char), f32)>,
    ) -> Result<(), FontError> {
        if family.is_empty() {
            return Err(FontError::EmptyFamilyName);
        }
        let entry = self.families.entry(Arc::from(family)).or_default();
        entry.kerning.extend(pairs);
        self.generation.nudge();
        Ok(())
    }

    /// Records that loading `family` failed elsewhere.
    ///
    /// Layout keeps using fallback metrics for the family.
    pub fn font_load_failed(&mut self, family: &str, reason: &str) {
        log::warn!("failed to load font family `{family}`: {reason}");
        self.failed.insert(family.into(), reason.to_owned());
    }

    fn family(&self, family: &str) -> Option<&Family> {
        self.families
            .get(family)
            .filter(|f| !f.faces.is_empty())
            .or_else(|| {
                self.last_registered
                    .as_ref()
                    .and_then(|name| self.families.get(name))
            })
    }

    fn face(&self, family: &str, bold: bool, italic: bool) -> Option<&FaceMetrics> {
        self.family(family)
            .and_then(|f| f.face(bold, italic))
            .map(|face| &face.metrics)
    }

    /// Horizontal advance of `ch` at `size`.
    pub fn advance_width(&self, family: &str, ch: char, size: f32, bold: bool, italic: bool) -> f32 {
        match self.face(family, bold, italic) {
            Some(face) => {
                let advance = face.advances.get(&ch).copied().unwrap_or(face.default_advance);
                face.scaled(advance, size)
            }
            None => size * DEGRADED_ADVANCE,
        }
    }

    /// Adjustment to the advance of `left` when followed by `right`.
    pub fn kerning(&self, family: &str, left: char, right: char, size: f32) -> f32 {
        let Some(family) = self.family(family) else {
            return 0.0;
        };
        let Some(delta) = family.kerning.get(&(left, right)) else {
            return 0.0;
        };
        let units_per_em = family
            .faces
            .first()
            .map_or(1000.0, |face| face.metrics.units_per_em);
        delta * size / units_per_em
    }

    /// Ascender, descender and height of the face at `size`.
    pub fn vertical_metrics(
        &self,
        family: &str,
        size: f32,
        bold: bool,
        italic: bool,
    ) -> VerticalMetrics {
        let (ascender, descender) = match self.face(family, bold, italic) {
            Some(face) => (face.scaled(face.ascent, size), face.scaled(face.descent, size)),
            None => (size * DEGRADED_ASCENDER, size * DEGRADED_DESCENDER),
        };
        VerticalMetrics {
            ascender,
            descender,
            height: ascender - descender,
        }
    }

    /// Nominal line height for text of `size`.
    pub fn line_height(&self, size: f32) -> f32 {
        size * self.line_height_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(advance: f32) -> FaceMetrics {
        FaceMetrics {
            units_per_em: 1000.0,
            ascent: 900.0,
            descent: -300.0,
            advances: [('a', advance), (' ', 250.0)].into_iter().collect(),
            default_advance: 500.0,
        }
    }

    #[test]
    fn degraded_metrics_without_fonts() {
        let fonts = FontContext::new();
        assert_eq!(fonts.advance_width("Roboto", 'x', 16.0, false, false), 8.0);
        let v = fonts.vertical_metrics("Roboto", 10.0, true, false);
        assert_eq!(v.ascender, 8.0);
        assert_eq!(v.descender, -2.0);
        assert_eq!(v.height, 10.0);
        assert_eq!(fonts.kerning("Roboto", 'A', 'V', 16.0), 0.0);
        assert_eq!(fonts.line_height(10.0), 12.0);
    }

    #[test]
    fn registered_face_scales_to_size() {
        let mut fonts = FontContext::new();
        fonts.insert_face("Serif", FontDescriptor::REGULAR, metrics(600.0));
        assert_eq!(fonts.advance_width("Serif", 'a', 10.0, false, false), 6.0);
        assert_eq!(fonts.advance_width("Serif", 'z', 10.0, false, false), 5.0);
        let v = fonts.vertical_metrics("Serif", 10.0, false, false);
        assert_eq!(v.ascender, 9.0);
        assert_eq!(v.descender, -3.0);
    }

    #[test]
    fn style_lookup_prefers_exact_face_then_regular() {
        let mut fonts = FontContext::new();
        fonts.insert_face("Serif", FontDescriptor::from_flags(false, true), metrics(300.0));
        fonts.insert_face("Serif", FontDescriptor::REGULAR, metrics(500.0));
        fonts.insert_face("Serif", FontDescriptor::from_flags(true, false), metrics(700.0));
        assert_eq!(fonts.advance_width("Serif", 'a', 1000.0, true, false), 700.0);
        assert_eq!(fonts.advance_width("Serif", 'a', 1000.0, false, true), 300.0);
        // No bold italic face: regular wins over the first registered one.
        assert_eq!(fonts.advance_width("Serif", 'a', 1000.0, true, true), 500.0);
    }

    #[test]
    fn unknown_family_uses_last_registered() {
        let mut fonts = FontContext::new();
        fonts.insert_face("Serif", FontDescriptor::REGULAR, metrics(500.0));
        fonts.insert_face("Mono", FontDescriptor::REGULAR, metrics(600.0));
        assert_eq!(fonts.advance_width("Missing", 'a', 1000.0, false, false), 600.0);
        assert_eq!(fonts.advance_width("Serif", 'a', 1000.0, false, false), 500.0);
    }

    #[test]
    fn kerning_is_scaled_per_family() {
        let mut fonts = FontContext::new();
        fonts.insert_face("Serif", FontDescriptor::REGULAR, metrics(500.0));
        fonts
            .register_kerning("Serif", [(('A', 'V'), -80.0)])
            .unwrap();
        assert_eq!(fonts.kerning("Serif", 'A', 'V', 10.0), -0.8);
        assert_eq!(fonts.kerning("Serif", 'V', 'A', 10.0), 0.0);
    }

    #[test]
    fn generation_moves_when_families_arrive() {
        let mut fonts = FontContext::new();
        let before = fonts.generation();
        fonts.insert_face("Serif", FontDescriptor::REGULAR, metrics(500.0));
        assert_ne!(fonts.generation(), before, "registration should be observable");
        assert!(fonts.has_family("Serif"), "family should be registered");
    }

    #[test]
    fn bad_font_data_is_reported_and_ignored() {
        let mut fonts = FontContext::new();
        let before = fonts.generation();
        let err = fonts
            .register_font("Broken", FontDescriptor::REGULAR, b"not a font")
            .unwrap_err();
        assert!(matches!(err, FontError::Parse { ref family, .. } if family == "Broken"));
        assert_eq!(fonts.generation(), before);
        assert!(fonts.load_failure("Broken").is_some(), "failure should be recorded");
        assert_eq!(fonts.advance_width("Broken", 'a', 16.0, false, false), 8.0);
    }

    #[test]
    fn empty_family_name_is_rejected() {
        let mut fonts = FontContext::new();
        assert!(matches!(
            fonts.register_font("", FontDescriptor::REGULAR, &[]),
            Err(FontError::EmptyFamilyName)
        ));
    }
}
