// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rich text editor and its driver.

use folio_document::{
    text_to_paragraphs, Alignment, DocCoord, Direction, Document, DocumentId, DocumentStore,
    ImageId, ImagePlacement, ImageSource, ListKind, Selection, StoreError, StoredDocument,
    StyleChange, StyleFlag,
};

use crate::config::EngineConfig;
use crate::context::LayoutContext;
use crate::editing::image_drag::{Drag, Handle};
use crate::editing::input::{ClipboardContent, EventOutcome, InputEvent, Key, PasteData};
use crate::editing::navigation::{
    is_paragraph_end, is_paragraph_start, next_position, previous_position,
};
use crate::font::FontContext;
use crate::geometry::BoundingBox;
use crate::layout::{GlyphKind, Layout};
use crate::util::Generation;

/// Prefixes that turn a paragraph into a list when typed at its start.
const AUTOFORMAT_PREFIXES: [(&str, ListKind); 3] = [
    ("- ", ListKind::Bullet),
    ("1. ", ListKind::Number),
    ("[] ", ListKind::Check),
];

/// A rich text editing session over one document.
///
/// The editor owns the document, the selection and the last computed
/// [`Layout`]. Operations that need an up to date layout, such as pointer
/// handling, go through a [`RichEditorDriver`] obtained from
/// [`RichEditor::driver`].
#[derive(Debug)]
pub struct RichEditor {
    document: Document,
    config: EngineConfig,
    selection: Option<Selection>,
    selected_image: Option<ImageId>,
    drag: Option<Drag>,
    layout: Layout,
    layout_cx: LayoutContext,
    // The layout is stale until the next refresh. Mutations set this, and
    // so does a change in the available fonts.
    layout_dirty: bool,
    font_generation: Option<Generation>,
    generation: Generation,
}

impl RichEditor {
    /// Creates an editor for `document`.
    ///
    /// The document is normalized with the configured default style. There
    /// is no selection until the first interaction.
    pub fn new(mut document: Document, config: EngineConfig) -> Self {
        document.normalize(config.default_style.style());
        let mut generation = Generation::default();
        // Start away from the default so that consumers tracking the
        // generation draw at least once.
        generation.nudge();
        Self {
            layout: Layout::empty(config.page),
            document,
            config,
            selection: None,
            selected_image: None,
            drag: None,
            layout_cx: LayoutContext::new(),
            layout_dirty: true,
            font_generation: None,
            generation,
        }
    }

    /// Opens a stored document.
    ///
    /// When loading fails the editor starts on a placeholder document
    /// instead, and the failure is logged.
    pub fn open(store: &dyn DocumentStore, id: DocumentId, config: EngineConfig) -> Self {
        match store.load(id) {
            Ok(stored) => Self::new(stored.document, config),
            Err(err) => {
                log::warn!("document {id} unavailable, opening a placeholder: {err}");
                let placeholder = Document::placeholder(config.default_style.style());
                Self::new(placeholder, config)
            }
        }
    }

    /// Persists the document under `title`, returning its id.
    pub fn save(
        &self,
        store: &mut dyn DocumentStore,
        id: Option<DocumentId>,
        title: &str,
    ) -> Result<DocumentId, StoreError> {
        store.save(
            id,
            &StoredDocument {
                title: title.to_owned(),
                document: self.document.clone(),
            },
        )
    }

    /// Run a series of [`RichEditorDriver`] methods.
    pub fn driver<'drv>(&'drv mut self, fonts: &'drv FontContext) -> RichEditorDriver<'drv> {
        RichEditorDriver {
            editor: self,
            fonts,
        }
    }

    /// The document being edited.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current selection, or `None` without focus.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Replaces the selection. Coordinates are clamped to the document.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        let selection = selection.map(|selection| {
            Selection::new(
                self.document.clamp(selection.anchor),
                self.document.clamp(selection.head),
            )
        });
        if selection != self.selection {
            self.generation.nudge();
        }
        self.selection = selection;
    }

    /// The image selected for resizing or moving.
    pub fn selected_image(&self) -> Option<ImageId> {
        self.selected_image
    }

    /// Selects an image, or clears the image selection.
    pub fn select_image(&mut self, id: Option<ImageId>) {
        let id = id.filter(|id| self.document.image(*id).is_some());
        if id != self.selected_image {
            self.generation.nudge();
        }
        self.selected_image = id;
    }

    /// Changes whenever anything visible changes.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Invalidates the layout after a change to the document.
    pub fn mark_dirty(&mut self) {
        self.layout_dirty = true;
        self.generation.nudge();
    }

    /// Returns `true` if the layout is out of date.
    pub fn is_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// The layout, if it is up to date with the document.
    pub fn try_layout(&self) -> Option<&Layout> {
        if self.layout_dirty {
            None
        } else {
            Some(&self.layout)
        }
    }

    /// Recomputes the layout if the document or the fonts changed.
    pub fn refresh_layout(&mut self, fonts: &FontContext) {
        if self.layout_dirty || self.font_generation != Some(fonts.generation()) {
            self.update_layout(fonts);
        }
    }

    fn update_layout(&mut self, fonts: &FontContext) {
        self.layout = self.layout_cx.layout(&self.document, &self.config, fonts);
        if self.font_generation.is_some_and(|g| g != fonts.generation()) {
            // New metrics moved glyphs without any edit.
            self.generation.nudge();
        }
        self.font_generation = Some(fonts.generation());
        self.layout_dirty = false;
    }

    fn apply(&mut self, edit: impl FnOnce(&mut Document, &Selection) -> Selection) -> bool {
        let Some(selection) = self.selection else {
            return false;
        };
        let next = edit(&mut self.document, &selection);
        self.mark_dirty();
        self.set_selection(Some(next));
        true
    }
}

/// A short-lived wrapper around [`RichEditor`].
///
/// This can perform operations which require the editor's layout to
/// be up-to-date by refreshing it as necessary.
#[derive(Debug)]
pub struct RichEditorDriver<'a> {
    /// The editor being driven.
    pub editor: &'a mut RichEditor,
    /// Metrics used for layout.
    pub fonts: &'a FontContext,
}

impl RichEditorDriver<'_> {
    // --- MARK: Events ---
    /// Dispatches an input event to the matching operation.
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        let handled = match event {
            InputEvent::Text(text) => self.insert_or_replace_selection(&text),
            InputEvent::Key { key, modifiers } if modifiers.action => match key {
                Key::Character(ch) => return self.shortcut(ch.to_ascii_lowercase()),
                _ => false,
            },
            InputEvent::Key { key, .. } => match key {
                Key::Enter => self.insert_paragraph_break(),
                Key::Backspace => self.delete_backward(),
                Key::Delete => self.delete_forward(),
                Key::ArrowLeft => self.move_left(),
                Key::ArrowRight => self.move_right(),
                Key::Escape => {
                    let had_image = self.editor.selected_image.is_some();
                    self.editor.select_image(None);
                    had_image
                }
                Key::Character(ch) => self.insert_or_replace_selection(ch.encode_utf8(&mut [0; 4])),
            },
            InputEvent::PointerDown { x, y } => self.pointer_down(x, y),
            InputEvent::PointerMove { x, y } => self.pointer_move(x, y),
            InputEvent::PointerUp { x, y } => self.pointer_up(x, y),
            InputEvent::Paste(data) => self.paste(data),
        };
        if handled {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }

    fn shortcut(&mut self, ch: char) -> EventOutcome {
        let handled = match ch {
            'a' => self.select_all(),
            'b' => self.toggle_style(StyleFlag::Bold),
            'i' => self.toggle_style(StyleFlag::Italic),
            'u' => self.toggle_style(StyleFlag::Underline),
            'l' => self.set_alignment(Alignment::Left),
            'e' => self.set_alignment(Alignment::Center),
            'r' => self.set_alignment(Alignment::Right),
            'j' => self.set_alignment(Alignment::Justify),
            '7' => self.toggle_list(ListKind::Number),
            '8' => self.toggle_list(ListKind::Bullet),
            '9' => self.toggle_list(ListKind::Check),
            'c' => return self.copy().map_or(EventOutcome::Ignored, EventOutcome::Copied),
            'x' => return self.cut().map_or(EventOutcome::Ignored, EventOutcome::Copied),
            _ => false,
        };
        if handled {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }

    // --- MARK: Text ---
    /// Insert at the caret, or replace the selection.
    ///
    /// Typing a space after `- `, `1. ` or `[] ` at the very start of a
    /// paragraph turns it into a bullet, numbered or check list item. In a
    /// paragraph that already is a list item of that kind the prefix stays
    /// as typed.
    pub fn insert_or_replace_selection(&mut self, text: &str) -> bool {
        if text.contains('\n') {
            return self.paste(PasteData::Text(text.to_owned()));
        }
        self.editor.select_image(None);
        self.editor.apply(|document, selection| {
            let selection = if selection.is_collapsed() {
                *selection
            } else {
                document.delete_range(selection)
            };
            let after = document.insert_text(&selection, text);
            if text == " " {
                autoformat(document, after.head)
            } else {
                after
            }
        })
    }

    /// Delete the selection.
    pub fn delete_selection(&mut self) -> bool {
        self.editor.apply(Document::delete_range)
    }

    /// Delete the selection or the previous character (typical ‘backspace’
    /// behavior).
    ///
    /// At the start of a list item this leaves the list instead. At the
    /// start of any other paragraph it joins the paragraph onto the previous
    /// one, if the configuration allows it.
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selected_image() {
            return true;
        }
        let merge = self.editor.config.editor.merge_paragraphs;
        self.editor.apply(|document, selection| {
            if !selection.is_collapsed() {
                return document.delete_range(selection);
            }
            let head = selection.head;
            if !is_paragraph_start(document, head) {
                return document.delete_text(selection, Direction::Backward);
            }
            let in_list = document.paragraph_at(head).is_some_and(|p| p.list.is_some());
            if in_list {
                document.set_list(selection, None)
            } else if merge && head.paragraph > 0 {
                document
                    .merge_with_next(head.section, head.paragraph - 1)
                    .map_or(*selection, Selection::collapsed)
            } else {
                document.delete_text(selection, Direction::Backward)
            }
        })
    }

    /// Delete the selection or the next character (typical ‘delete’
    /// behavior).
    ///
    /// At the end of a paragraph this pulls the next paragraph up, if the
    /// configuration allows it.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selected_image() {
            return true;
        }
        let merge = self.editor.config.editor.merge_paragraphs;
        self.editor.apply(|document, selection| {
            if !selection.is_collapsed() {
                return document.delete_range(selection);
            }
            let head = selection.head;
            if merge && is_paragraph_end(document, head) {
                document
                    .merge_with_next(head.section, head.paragraph)
                    .map_or(*selection, Selection::collapsed)
            } else {
                document.delete_text(selection, Direction::Forward)
            }
        })
    }

    fn delete_selected_image(&mut self) -> bool {
        let Some(id) = self.editor.selected_image else {
            return false;
        };
        let Some(coord) = self.editor.document.image_coord(id) else {
            return false;
        };
        let range = Selection::new(coord, coord.with_char(1));
        let caret = self.editor.document.delete_range(&range);
        self.editor.select_image(None);
        self.editor.mark_dirty();
        self.editor.set_selection(Some(caret));
        true
    }

    /// Split the paragraph at the caret (typical ‘enter’ behavior).
    ///
    /// Enter in an empty list item leaves the list instead.
    pub fn insert_paragraph_break(&mut self) -> bool {
        self.editor.select_image(None);
        self.editor.apply(|document, selection| {
            let selection = if selection.is_collapsed() {
                *selection
            } else {
                document.delete_range(selection)
            };
            let leaves_list = document
                .paragraph_at(selection.head)
                .is_some_and(|p| p.list.is_some() && p.is_empty());
            if leaves_list {
                document.set_list(&selection, None)
            } else {
                document.split_paragraph(&selection)
            }
        })
    }

    // --- MARK: Formatting ---
    /// Toggle a style flag over the selection, or for text typed next.
    pub fn toggle_style(&mut self, flag: StyleFlag) -> bool {
        self.editor
            .apply(|document, selection| document.toggle_style(selection, flag))
    }

    /// Apply a style change over the selection, or for text typed next.
    pub fn apply_style(&mut self, change: &StyleChange) -> bool {
        self.editor
            .apply(|document, selection| document.apply_style(selection, change))
    }

    /// Align the selected paragraphs.
    pub fn set_alignment(&mut self, alignment: Alignment) -> bool {
        self.editor
            .apply(|document, selection| document.set_alignment(selection, alignment))
    }

    /// Override the line spacing of the selected paragraphs.
    pub fn set_line_spacing(&mut self, spacing: Option<f32>) -> bool {
        self.editor
            .apply(|document, selection| document.set_line_spacing(selection, spacing))
    }

    /// Toggle the selected paragraphs in or out of a list.
    pub fn toggle_list(&mut self, kind: ListKind) -> bool {
        self.editor
            .apply(|document, selection| document.toggle_list(selection, kind))
    }

    /// Tick or untick a checklist item.
    pub fn toggle_checked(&mut self, section: usize, paragraph: usize) -> bool {
        let changed = self.editor.document.toggle_checked(section, paragraph);
        if changed {
            self.editor.mark_dirty();
        }
        changed
    }

    // --- MARK: Images ---
    /// Insert an image at the caret, replacing the selection.
    pub fn insert_image(&mut self, source: ImageSource, width: f32, height: f32) -> Option<ImageId> {
        let mut inserted = None;
        self.editor.apply(|document, selection| {
            let selection = if selection.is_collapsed() {
                *selection
            } else {
                document.delete_range(selection)
            };
            let (id, caret) = document.insert_image(&selection, source, width, height);
            inserted = Some(id);
            caret
        });
        inserted
    }

    /// Handle a primary button press at a point of the stacked page space.
    ///
    /// Presses on a resize handle of the selected image start a resize,
    /// presses on an image select it and start a move, presses on a
    /// checkbox toggle it, and anything else places the caret.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.refresh_layout();
        let editor = &mut *self.editor;
        if let Some(id) = editor.selected_image {
            let handle = editor.layout.image_bounds(id).and_then(|(page, bounds)| {
                let local_y = y - editor.layout.page_origin(page);
                Handle::at(&bounds, x, local_y, editor.config.editor.handle_tolerance)
            });
            if let (Some(handle), Some(image)) = (handle, editor.document.image(id)) {
                editor.drag = Some(Drag::Resize {
                    id,
                    handle,
                    origin: (x, y),
                    size: (image.width, image.height),
                });
                return true;
            }
        }

        let hit = editor
            .layout
            .glyph_at(x, y)
            .map(|(_, glyph)| (glyph.kind.clone(), glyph.bounds()));
        match hit {
            Some((GlyphKind::Image { id, coord, .. }, bounds)) => {
                let page = &editor.config.page;
                let position = match editor.document.image(id).map(|image| image.placement) {
                    Some(ImagePlacement::Floating { x, y }) => (x, y),
                    _ => (bounds.x0 - page.margin_left, bounds.y0 - page.margin_top),
                };
                editor.drag = Some(Drag::Move {
                    id,
                    origin: (x, y),
                    position,
                });
                editor.select_image(Some(id));
                editor.set_selection(Some(Selection::collapsed(coord)));
                return true;
            }
            Some((
                GlyphKind::CheckboxChecked { paragraph } | GlyphKind::CheckboxUnchecked { paragraph },
                _,
            )) => {
                return self.toggle_checked(paragraph.section, paragraph.paragraph);
            }
            _ => {}
        }

        let had_image = editor.selected_image.is_some();
        editor.select_image(None);
        match editor.layout.hit_test(x, y) {
            Some(coord) => {
                editor.set_selection(Some(Selection::collapsed(coord)));
                editor.drag = Some(Drag::Select);
                true
            }
            None => had_image,
        }
    }

    /// Handle pointer movement, continuing the drag in progress.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let Some(drag) = self.editor.drag else {
            return false;
        };
        match drag {
            Drag::Select => self.extend_selection_to_point(x, y),
            Drag::Resize {
                id,
                handle,
                origin,
                size,
            } => {
                let min = self.editor.config.editor.min_image_size;
                let (width, height) = handle.resize(size, x - origin.0, y - origin.1, min);
                let changed = self.editor.document.resize_image(id, width, height);
                if changed {
                    self.editor.mark_dirty();
                }
                changed
            }
            Drag::Move {
                id,
                origin,
                position,
            } => {
                let changed = self.editor.document.update_image_position(
                    id,
                    position.0 + x - origin.0,
                    position.1 + y - origin.1,
                );
                if changed {
                    self.editor.mark_dirty();
                }
                changed
            }
        }
    }

    /// Handle a primary button release, ending the drag in progress.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        if self.editor.drag == Some(Drag::Select) {
            self.extend_selection_to_point(x, y);
        }
        self.editor.drag.take().is_some()
    }

    // --- MARK: Cursor Movement ---
    /// Move the caret one position back, collapsing a selection to its
    /// start.
    pub fn move_left(&mut self) -> bool {
        let Some(selection) = self.editor.selection else {
            return false;
        };
        let target = if selection.is_collapsed() {
            previous_position(&self.editor.document, selection.head)
        } else {
            selection.start()
        };
        self.editor.select_image(None);
        self.editor.set_selection(Some(Selection::collapsed(target)));
        true
    }

    /// Move the caret one position forward, collapsing a selection to its
    /// end.
    pub fn move_right(&mut self) -> bool {
        let Some(selection) = self.editor.selection else {
            return false;
        };
        let target = if selection.is_collapsed() {
            next_position(&self.editor.document, selection.head)
        } else {
            selection.end()
        };
        self.editor.select_image(None);
        self.editor.set_selection(Some(Selection::collapsed(target)));
        true
    }

    /// Select the whole document.
    pub fn select_all(&mut self) -> bool {
        let document = &self.editor.document;
        let selection = Selection::new(document.start(), document.end());
        self.editor.set_selection(Some(selection));
        true
    }

    /// Collapse the selection to its head.
    pub fn collapse_selection(&mut self) -> bool {
        let Some(selection) = self.editor.selection else {
            return false;
        };
        self.editor.set_selection(Some(selection.collapse()));
        true
    }

    /// Move the caret to the position nearest a point.
    pub fn move_to_point(&mut self, x: f32, y: f32) -> bool {
        self.refresh_layout();
        match self.editor.layout.hit_test(x, y) {
            Some(coord) => {
                self.editor.set_selection(Some(Selection::collapsed(coord)));
                true
            }
            None => false,
        }
    }

    /// Move the selection head to the position nearest a point.
    pub fn extend_selection_to_point(&mut self, x: f32, y: f32) -> bool {
        self.refresh_layout();
        let (Some(selection), Some(coord)) =
            (self.editor.selection, self.editor.layout.hit_test(x, y))
        else {
            return false;
        };
        self.editor.set_selection(Some(selection.extend_to(coord)));
        true
    }

    // --- MARK: Clipboard ---
    /// The selected content, if the selection is not collapsed.
    pub fn copy(&self) -> Option<ClipboardContent> {
        let selection = self.editor.selection.filter(|s| !s.is_collapsed())?;
        let document = &self.editor.document;
        Some(ClipboardContent {
            text: document.selected_text(&selection),
            paragraphs: document.extract_fragment(&selection),
        })
    }

    /// Copy the selected content and delete it.
    pub fn cut(&mut self) -> Option<ClipboardContent> {
        let content = self.copy()?;
        self.delete_selection();
        Some(content)
    }

    /// Insert clipboard content at the caret, replacing the selection.
    ///
    /// Plain text takes the style at the caret.
    pub fn paste(&mut self, data: PasteData) -> bool {
        let fallback = self.editor.config.default_style.style().clone();
        self.editor.select_image(None);
        self.editor.apply(|document, selection| {
            let selection = if selection.is_collapsed() {
                *selection
            } else {
                document.delete_range(selection)
            };
            let paragraphs = match data {
                PasteData::Text(text) => {
                    let style = document.style_at(selection.head).unwrap_or(&fallback).clone();
                    text_to_paragraphs(&text, &style)
                }
                PasteData::Paragraphs(paragraphs) => paragraphs,
            };
            document.insert_fragment(&selection, &paragraphs)
        })
    }

    // --- MARK: Geometry ---
    /// The up to date layout.
    pub fn layout(&mut self) -> &Layout {
        self.refresh_layout();
        &self.editor.layout
    }

    /// The caret rectangle and its page, when the selection is collapsed.
    pub fn cursor_geometry(&mut self) -> Option<(usize, BoundingBox)> {
        let selection = self.editor.selection.filter(Selection::is_collapsed)?;
        let position = self.layout().caret_position(selection.head)?;
        let width = self.editor.config.render.caret_width;
        let height = self.fonts.line_height(position.size);
        Some((position.page, position.geometry(width, height)))
    }

    /// Rectangles covering the selection, with their pages.
    pub fn selection_geometry(&mut self) -> Vec<(usize, BoundingBox)> {
        let Some(selection) = self.editor.selection else {
            return Vec::new();
        };
        self.layout().selection_geometry(&selection)
    }

    /// Bounds of the selected image, with its page.
    pub fn selected_image_geometry(&mut self) -> Option<(usize, BoundingBox)> {
        let id = self.editor.selected_image?;
        self.layout().image_bounds(id)
    }

    // --- MARK: Internal helpers ---
    /// Update the layout if needed.
    pub fn refresh_layout(&mut self) {
        self.editor.refresh_layout(self.fonts);
    }
}

/// Turns a paragraph into a list item if `caret` just completed one of the
/// list prefixes at its start, removing the prefix.
fn autoformat(document: &mut Document, caret: DocCoord) -> Selection {
    let unchanged = Selection::collapsed(caret);
    if caret.span != 0 {
        return unchanged;
    }
    let Some(paragraph) = document.paragraph_at(caret) else {
        return unchanged;
    };
    let Some(span) = paragraph.children.first().and_then(|child| child.as_text()) else {
        return unchanged;
    };
    let typed: String = span.text.chars().take(caret.char_index).collect();
    let Some(kind) = AUTOFORMAT_PREFIXES
        .iter()
        .find(|(prefix, _)| *prefix == typed)
        .map(|(_, kind)| *kind)
    else {
        return unchanged;
    };
    if paragraph.list == Some(kind) {
        return unchanged;
    }
    let start = caret.with_char(0);
    let caret = document.delete_range(&Selection::new(start, caret));
    log::debug!("autoformat turned paragraph {} into {kind:?}", start.paragraph);
    document.set_list(&caret, Some(kind))
}
