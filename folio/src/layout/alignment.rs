// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_document::Alignment;

use crate::config::LayoutConfig;
use crate::layout::items::{Item, ItemKind};
use crate::util::nearly_zero;

/// How the items of one line are spread over the available width.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub(crate) struct LineAdjustment {
    /// Horizontal offset of the first item from the line start.
    pub(crate) offset: f32,
    /// Scale applied to glue stretch when positive, to glue shrink when
    /// negative.
    pub(crate) ratio: f32,
    /// Width of the line before adjustment, without a trailing space.
    pub(crate) visual_width: f32,
}

impl LineAdjustment {
    /// Width of `item` once the ratio is applied.
    pub(crate) fn adjusted_width(&self, item: &Item) -> f32 {
        if !item.is_glue() || nearly_zero(self.ratio) {
            item.width
        } else if self.ratio > 0.0 {
            item.width + item.stretch() * self.ratio
        } else {
            item.width + item.shrink() * self.ratio
        }
    }
}

/// Index of the glue ending `items`, if the last item of the text is one.
/// Penalties and the items closing a paragraph are skipped.
pub(crate) fn trailing_glue(items: &[Item]) -> Option<usize> {
    let last = items.iter().rposition(|item| {
        item.source.is_some() && !matches!(item.kind, ItemKind::Penalty { .. })
    })?;
    items[last].is_glue().then_some(last)
}

/// Computes the adjustment for a line.
///
/// Justified lines other than the last of their paragraph stretch or shrink
/// their glue to fill `max_advance` exactly, within the configured ratio
/// bounds. Other lines only ever shrink, and are then shifted according to
/// the alignment.
pub(crate) fn align_line(
    items: &[Item],
    max_advance: f32,
    alignment: Alignment,
    is_last: bool,
    config: &LayoutConfig,
) -> LineAdjustment {
    let hanging = trailing_glue(items);
    let mut visual_width = 0.0;
    let mut total_stretch = 0.0;
    let mut total_shrink = 0.0;
    for (index, item) in items.iter().enumerate() {
        if Some(index) == hanging {
            continue;
        }
        visual_width += item.width;
        total_stretch += item.stretch();
        total_shrink += item.shrink();
    }
    let difference = max_advance - visual_width;

    if alignment == Alignment::Justify && !is_last {
        let ratio = if difference > 0.0 && total_stretch > 0.0 {
            difference / total_stretch
        } else if difference < 0.0 && total_shrink > 0.0 {
            difference / total_shrink
        } else {
            0.0
        };
        return LineAdjustment {
            offset: 0.0,
            ratio: ratio.clamp(config.min_ratio, config.max_ratio),
            visual_width,
        };
    }

    let ratio = if difference < 0.0 && total_shrink > 0.0 {
        (difference / total_shrink).max(config.min_ratio)
    } else {
        0.0
    };
    let remaining = (difference - total_shrink * ratio).max(0.0);
    let offset = match alignment {
        Alignment::Right => remaining,
        Alignment::Center => remaining * 0.5,
        Alignment::Left | Alignment::Justify => 0.0,
    };
    LineAdjustment {
        offset,
        ratio,
        visual_width,
    }
}
