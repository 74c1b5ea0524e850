// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use core::ops::Range;

use crate::layout::items::{Item, ItemKind};

use super::{BreakReason, BrokenLine};

#[derive(Clone, Default)]
struct LineState {
    x: f32,
    items: Range<usize>,
}

#[derive(Clone, Default)]
struct PrevBoundaryState {
    item_idx: usize,
    state: LineState,
}

#[derive(Clone, Default)]
struct BreakerState {
    /// Iteration state: the next item to look at.
    item_idx: usize,
    line: LineState,
    prev_boundary: Option<PrevBoundaryState>,
}

impl BreakerState {
    fn append_item_to_line(&mut self, next_x: f32) {
        self.line.items.end = self.item_idx + 1;
        self.line.x = next_x;
        self.item_idx += 1;
    }

    /// Remembers the state after the current item so that the line can be
    /// ended here if a later item overflows.
    fn mark_line_break_opportunity(&mut self) {
        self.prev_boundary = Some(PrevBoundaryState {
            item_idx: self.item_idx,
            state: self.line.clone(),
        });
    }
}

/// First fit line breaking over the items of one paragraph.
///
/// Each glue is a break opportunity. A line ends at the forced break that
/// closes the paragraph, or as soon as an item overflows: at the last glue
/// seen on the line, or before the overflowing item when the line has no
/// glue yet. A single box wider than the line is placed alone. The line
/// holding the last content of the paragraph is always its last line.
pub(crate) struct BreakLines<'a> {
    items: &'a [Item],
    state: BreakerState,
    done: bool,
}

impl<'a> BreakLines<'a> {
    pub(crate) fn new(items: &'a [Item]) -> Self {
        Self {
            items,
            state: BreakerState::default(),
            done: items.is_empty(),
        }
    }

    fn start_new_line(&mut self, item_idx: usize) {
        self.state.item_idx = item_idx;
        self.state.line = LineState {
            x: 0.0,
            items: item_idx..item_idx,
        };
        self.state.prev_boundary = None;
    }

    fn commit(
        &mut self,
        mut line: LineState,
        mut next_item: usize,
        mut reason: BreakReason,
    ) -> BrokenLine {
        // Only the closing glue and forced break are left: they end this
        // line rather than starting an empty one.
        if reason != BreakReason::Forced
            && self.items[next_item..].iter().all(|item| item.source.is_none())
        {
            line.items.end = self.items.len();
            next_item = self.items.len();
            reason = BreakReason::Forced;
        }
        log::trace!(
            "line break ({reason:?}) after item {} at x = {}",
            line.items.end,
            line.x
        );
        self.start_new_line(next_item);
        if next_item >= self.items.len() {
            self.done = true;
        }
        BrokenLine {
            items: line.items,
            reason,
        }
    }

    /// Computes the next line, or `None` once the paragraph is exhausted.
    pub(crate) fn break_next(&mut self, max_advance: f32) -> Option<BrokenLine> {
        if self.done {
            return None;
        }
        let items = self.items;
        while let Some(item) = items.get(self.state.item_idx) {
            let next_x = self.state.line.x + item.width;
            let line_is_empty = self.state.line.items.is_empty();
            match item.kind {
                ItemKind::Penalty { cost } if cost == f32::NEG_INFINITY => {
                    self.state.append_item_to_line(self.state.line.x);
                    let line = self.state.line.clone();
                    let next = self.state.item_idx;
                    return Some(self.commit(line, next, BreakReason::Forced));
                }
                ItemKind::Penalty { .. } => {
                    self.state.append_item_to_line(self.state.line.x);
                    self.state.mark_line_break_opportunity();
                }
                ItemKind::Glue { .. } => {
                    // Glue never starts an overflow: a space that does not
                    // fit hangs off the end of the line.
                    let overflows = next_x > max_advance && !line_is_empty;
                    self.state.append_item_to_line(next_x);
                    if overflows {
                        let line = self.state.line.clone();
                        let next = self.state.item_idx;
                        return Some(self.commit(line, next, BreakReason::Regular));
                    }
                    self.state.mark_line_break_opportunity();
                }
                ItemKind::Box => {
                    if next_x <= max_advance {
                        self.state.append_item_to_line(next_x);
                    } else if let Some(prev) = self.state.prev_boundary.take() {
                        return Some(self.commit(prev.state, prev.item_idx, BreakReason::Regular));
                    } else {
                        if line_is_empty {
                            // Nothing narrower will ever come first, so
                            // accept the overflow.
                            self.state.append_item_to_line(next_x);
                        }
                        let line = self.state.line.clone();
                        let next = self.state.item_idx;
                        return Some(self.commit(line, next, BreakReason::Emergency));
                    }
                }
            }
        }
        // Ran out of items without a forced break.
        self.done = true;
        let line = self.state.line.clone();
        (!line.items.is_empty()).then_some(BrokenLine {
            items: line.items,
            reason: BreakReason::Forced,
        })
    }

    /// Breaks every remaining line at the same width.
    #[cfg(test)]
    pub(crate) fn break_remaining(&mut self, max_advance: f32) -> Vec<BrokenLine> {
        let mut lines = Vec::new();
        while let Some(line) = self.break_next(max_advance) {
            lines.push(line);
        }
        lines
    }
}
