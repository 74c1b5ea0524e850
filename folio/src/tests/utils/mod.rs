// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod env;
mod surface;

pub(crate) use env::{assert_close, line_text, TestEnv};
pub(crate) use surface::{DrawCommand, RecordingSurface, StubDecoder};
