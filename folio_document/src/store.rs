// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistence of documents behind a small store interface.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::Document;
use crate::error::StoreError;

/// Identifies a stored document.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Creates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A document together with its title, as persisted.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Human readable title.
    pub title: String,
    /// The content.
    pub document: Document,
}

/// Loads and saves documents by id.
pub trait DocumentStore {
    /// Persists a document, returning its id.
    ///
    /// Passing `Some(id)` overwrites that entry; `None` creates a new one.
    fn save(&mut self, id: Option<DocumentId>, entry: &StoredDocument)
    -> Result<DocumentId, StoreError>;

    /// Loads a document by id.
    fn load(&self, id: DocumentId) -> Result<StoredDocument, StoreError>;

    /// Ids of every stored document.
    fn list(&self) -> Result<Vec<DocumentId>, StoreError>;
}

/// A store that keeps serialized documents in memory.
///
/// Entries are kept as JSON so that loading goes through the same path as
/// the file store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<DocumentId, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn save(
        &mut self,
        id: Option<DocumentId>,
        entry: &StoredDocument,
    ) -> Result<DocumentId, StoreError> {
        let id = id.unwrap_or_default();
        self.entries.insert(id, serde_json::to_string(entry)?);
        log::debug!("saved document {id} to memory");
        Ok(id)
    }

    fn load(&self, id: DocumentId) -> Result<StoredDocument, StoreError> {
        let json = self.entries.get(&id).ok_or(StoreError::NotFound(id))?;
        Ok(serde_json::from_str(json)?)
    }

    fn list(&self) -> Result<Vec<DocumentId>, StoreError> {
        Ok(self.entries.keys().copied().collect())
    }
}

/// A store that keeps one JSON file per document in a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The directory holding the documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: DocumentId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl DocumentStore for FileStore {
    fn save(
        &mut self,
        id: Option<DocumentId>,
        entry: &StoredDocument,
    ) -> Result<DocumentId, StoreError> {
        let id = id.unwrap_or_default();
        let path = self.path_for(id);
        let json = serde_json::to_string_pretty(entry)?;
        fs::write(&path, json).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        log::debug!("saved document {id} to {}", path.display());
        Ok(id)
    }

    fn load(&self, id: DocumentId) -> Result<StoredDocument, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id));
        }
        let json = fs::read_to_string(&path).map_err(|source| StoreError::Io { path, source })?;
        Ok(serde_json::from_str(&json)?)
    }

    fn list(&self) -> Result<Vec<DocumentId>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(id) = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(|stem| stem.parse().ok())
                {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paragraph::{
        Image, ImageId, ImagePlacement, ImageSource, Inline, Paragraph, Section, Span,
    };
    use crate::style::{Alignment, Color, ListKind, Style};

    fn entry(text: &str) -> StoredDocument {
        StoredDocument {
            title: "Notes".into(),
            document: Document::from_text(text, &Style::new("Roboto", 16.0)),
        }
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        let id = store.save(None, &entry("hello\nworld")).unwrap();
        let loaded = store.load(id).unwrap();
        assert_eq!(loaded, entry("hello\nworld"));

        store.save(Some(id), &entry("changed")).unwrap();
        assert_eq!(store.load(id).unwrap().document.text(), "changed");
        assert_eq!(store.list().unwrap(), vec![id]);
    }

    #[test]
    fn file_store_keeps_every_attribute() {
        let style = Style::new("Roboto", 16.0);
        let mut task = Paragraph::from_span(Span::new(
            "done",
            style.clone().with_bold(true).with_color(Color::rgb(200, 30, 30)),
        ))
        .with_list(ListKind::Check)
        .with_alignment(Alignment::Justify);
        task.checked = true;
        task.line_spacing = Some(1.5);
        let figure = Paragraph::new(vec![
            Inline::Text(Span::new("see", style.clone())),
            Inline::Image(Image {
                id: ImageId(7),
                source: ImageSource::new("chart.png"),
                width: 120.0,
                height: 80.0,
                placement: ImagePlacement::Floating { x: 40.0, y: 12.5 },
            }),
        ]);
        let entry = StoredDocument {
            title: "Report".into(),
            document: Document::new(
                vec![Section::new(vec![task]), Section::new(vec![figure])],
                &style,
            ),
        };

        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        let id = store.save(None, &entry).unwrap();
        assert_eq!(store.load(id).unwrap(), entry);
    }

    #[test]
    fn missing_documents_are_reported() {
        let store = MemoryStore::new();
        let id = DocumentId::new();
        assert!(matches!(store.load(id), Err(StoreError::NotFound(missing)) if missing == id));
    }

    #[test]
    fn file_store_writes_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("docs")).unwrap();
        let id = store.save(None, &entry("on disk")).unwrap();
        assert!(store.root().join(format!("{id}.json")).exists());

        let reopened = FileStore::open(dir.path().join("docs")).unwrap();
        assert_eq!(reopened.load(id).unwrap().document.text(), "on disk");
        assert_eq!(reopened.list().unwrap(), vec![id]);
        assert!(matches!(
            reopened.load(DocumentId::new()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn corrupt_files_fail_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        let id = store.save(None, &entry("x")).unwrap();
        fs::write(dir.path().join(format!("{id}.json")), "{ not json").unwrap();
        assert!(matches!(store.load(id), Err(StoreError::Serialize(_))));
    }
}
