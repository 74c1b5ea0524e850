// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by document stores.

use std::io;
use std::path::PathBuf;

use crate::store::DocumentId;

/// An error loading or saving a document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No document is stored under the id.
    #[error("document {0} not found")]
    NotFound(DocumentId),
    /// The backing storage failed.
    #[error("failed to access {}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The stored content is not a valid document.
    #[error("failed to (de)serialize document")]
    Serialize(#[from] serde_json::Error),
}
