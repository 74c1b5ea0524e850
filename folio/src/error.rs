// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use std::path::PathBuf;

/// Failure to register a font face.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// The font data could not be parsed.
    #[error("failed to parse font data for family `{family}`: {message}")]
    Parse {
        /// Family the face was registered under.
        family: String,
        /// Description from the font parser.
        message: String,
    },
    /// Faces must be registered under a non-empty family name.
    #[error("font family name is empty")]
    EmptyFamilyName,
}

/// Failure to load or validate an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: Box<toml::de::Error>,
    },
    /// The values parsed but describe an impossible setup.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
