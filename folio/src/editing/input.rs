// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events consumed by the editor.

use folio_document::Paragraph;

/// Modifier state accompanying a key press.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Modifiers {
    /// The platform shortcut modifier: Control, or Command on macOS.
    pub action: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self { action: false };
    /// The shortcut modifier held.
    pub const ACTION: Self = Self { action: true };
}

/// A key the editor reacts to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Key {
    /// Split the paragraph, or leave a list.
    Enter,
    /// Delete backward.
    Backspace,
    /// Delete forward.
    Delete,
    /// Move the caret backward.
    ArrowLeft,
    /// Move the caret forward.
    ArrowRight,
    /// Deselect the selected image.
    Escape,
    /// A character key, used for shortcuts.
    Character(char),
}

/// Content offered by the clipboard.
#[derive(Clone, PartialEq, Debug)]
pub enum PasteData {
    /// Plain text, split into paragraphs at line breaks.
    Text(String),
    /// Rich content already converted into paragraphs.
    Paragraphs(Vec<Paragraph>),
}

/// What a copy or cut put on the clipboard.
#[derive(Clone, PartialEq, Debug)]
pub struct ClipboardContent {
    /// Plain text, paragraphs separated by `\n`.
    pub text: String,
    /// The copied content with its structure.
    pub paragraphs: Vec<Paragraph>,
}

/// An input event.
#[derive(Clone, PartialEq, Debug)]
pub enum InputEvent {
    /// Committed text input.
    Text(String),
    /// A key press.
    Key {
        /// The key.
        key: Key,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// Primary button pressed, in stacked page space.
    PointerDown {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Pointer moved, in stacked page space.
    PointerMove {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Primary button released, in stacked page space.
    PointerUp {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Clipboard content to insert.
    Paste(PasteData),
}

impl InputEvent {
    /// A key press without modifiers.
    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// A key press with the shortcut modifier.
    pub fn shortcut(ch: char) -> Self {
        Self::Key {
            key: Key::Character(ch),
            modifiers: Modifiers::ACTION,
        }
    }
}

/// The result of handling an event.
#[derive(Clone, PartialEq, Debug)]
pub enum EventOutcome {
    /// The event changed nothing.
    Ignored,
    /// The document or selection changed.
    Handled,
    /// Content was copied and should be placed on the clipboard.
    Copied(ClipboardContent),
}

impl EventOutcome {
    /// Returns `true` unless the event was ignored.
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
