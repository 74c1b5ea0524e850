// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paginated rich text layout and editing.
//!
//! Folio lays out a [`folio_document::Document`] onto fixed size pages and
//! lets users edit it through a [`RichEditor`]. Pages are stacked vertically
//! in one coordinate space, with a gap between them, and all pointer input
//! is given in that space.
//!
//! Font metrics come from a [`FontContext`]. Families that were never
//! registered fall back to approximate metrics, so documents always lay out.
//!
//! ```
//! use folio::{
//!     DocCoord, Document, EngineConfig, FontContext, InputEvent, RichEditor, Selection, Style,
//! };
//!
//! let config = EngineConfig::default();
//! let fonts = FontContext::new();
//! let document = Document::from_text("Hello", &Style::new("Roboto", 16.0));
//! let mut editor = RichEditor::new(document, config);
//! editor.set_selection(Some(Selection::collapsed(DocCoord::new(0, 0, 5))));
//!
//! let mut driver = editor.driver(&fonts);
//! driver.handle_event(InputEvent::Text(" World".into()));
//! assert_eq!(driver.layout().pages().len(), 1);
//! assert_eq!(editor.document().text(), "Hello World");
//! ```
//!
//! Drawing goes through a [`Surface`](render::Surface) implemented by the
//! host; see the [`render`] module.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use folio_document;

mod context;
mod error;
mod geometry;
mod lru_cache;
mod util;

pub mod config;
pub mod editing;
pub mod font;
pub mod layout;
pub mod render;

#[cfg(test)]
mod tests;

pub use config::{EngineConfig, PageConstraints};
pub use context::LayoutContext;
pub use editing::{EventOutcome, InputEvent, RichEditor, RichEditorDriver};
pub use error::{ConfigError, FontError};
pub use font::FontContext;
pub use geometry::BoundingBox;
pub use layout::Layout;
pub use util::Generation;

pub use folio_document::{
    Alignment, Color, DocCoord, Document, DocumentStore, Image, ImageId, ImagePlacement,
    ImageSource, ListKind, Paragraph, Selection, Style, StyleChange, StyleFlag,
};
