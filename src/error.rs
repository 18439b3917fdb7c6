// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Crate-wide error type.
//!
//! Every fatal condition in a build or load names the stage that failed: the
//! source by name, or the artifact by path. Non-fatal conditions (a skipped
//! best-effort source, a bad query token, a marker mismatch right after
//! writing) never become an `Error`; they are logged or reported instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::binary::FormatError;

#[derive(Debug, Error)]
pub enum Error {
    /// A required (or supplied optional) source could not produce its words.
    #[error("source '{name}' unavailable: {reason}")]
    SourceUnavailable { name: String, reason: String },

    /// Every source was empty, so there is nothing to build a trie from.
    #[error("no words from any source")]
    EmptyVocabulary,

    /// The serialized trie could not be trusted.
    #[error("malformed trie artifact {}: {source}", path.display())]
    MalformedArtifact {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    /// The trie cannot be written in a form that would load again.
    #[error("cannot encode trie {}: {source}", path.display())]
    Unencodable {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    /// A string that was required to be canonical was not.
    #[error("invalid word {0:?}: expected one or more letters a-z")]
    InvalidWord(String),

    /// The source manifest could not be read or parsed.
    #[error("invalid manifest {}: {reason}", path.display())]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn source_unavailable(name: &str, reason: impl Into<String>) -> Self {
        Error::SourceUnavailable {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
