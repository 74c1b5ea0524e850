// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive editing on top of the layout.

mod editor;
mod image_drag;
mod input;
mod navigation;

pub use editor::{RichEditor, RichEditorDriver};
pub use image_drag::Handle;
pub use input::{ClipboardContent, EventOutcome, InputEvent, Key, Modifiers, PasteData};
