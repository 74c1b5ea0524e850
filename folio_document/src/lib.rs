// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document model behind the Folio editor.
//!
//! A [`Document`] is an ordered run of [`Section`]s, each holding
//! [`Paragraph`]s made of styled [`Span`]s and [`Image`]s. Positions are
//! addressed with [`DocCoord`]s, and every mutation takes the current
//! [`Selection`] and returns the one to adopt afterwards:
//!
//! ```
//! use folio_document::{DocCoord, Document, Selection, Style};
//!
//! let style = Style::new("Roboto", 16.0);
//! let mut document = Document::from_text("Hllo", &style);
//! let caret = Selection::collapsed(DocCoord::new(0, 0, 1));
//! let caret = document.insert_text(&caret, "e");
//! assert_eq!(document.text(), "Hello");
//! assert_eq!(caret.head, DocCoord::new(0, 0, 2));
//! ```
//!
//! Documents serialize with serde and can be kept in a [`DocumentStore`].

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET

mod coord;
mod document;
mod edit;
mod error;
mod fragment;
mod paragraph;
mod store;
mod style;


pub use coord::{DocCoord, Selection};
pub use document::Document;
pub use edit::Direction;
pub use error::StoreError;
pub use fragment::{fragment_text, text_to_paragraphs};
pub use paragraph::{Image, ImageId, ImagePlacement, ImageSource, Inline, Paragraph, Section, Span};
pub use store::{DocumentId, DocumentStore, FileStore, MemoryStore, StoredDocument};
pub use style::{Alignment, Color, ListKind, Style, StyleChange, StyleFlag};
