// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

pub(crate) mod greedy;

use core::ops::Range;

/// Why a line ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum BreakReason {
    /// At a space.
    Regular,
    /// At a forced break.
    Forced,
    /// Inside a word that does not fit the line.
    Emergency,
}

/// A line chosen by the breaker: a range of items.
#[derive(Clone, PartialEq, Debug)]
pub(crate) struct BrokenLine {
    pub(crate) items: Range<usize>,
    pub(crate) reason: BreakReason,
}

impl BrokenLine {
    /// Returns `true` for the last line of a paragraph.
    pub(crate) fn is_last(&self) -> bool {
        self.reason == BreakReason::Forced
    }
}
