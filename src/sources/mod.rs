// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word sources: local word list files and how hard to fail on each.
//!
//! Fetching lists over the network is somebody else's job; by the time a
//! source reaches this module it is a file on disk. What this module owns is
//! the failure policy, which is deliberately uneven:
//!
//! | Policy       | no path       | unreadable / no words |
//! |--------------|---------------|-----------------------|
//! | `Required`   | fatal         | fatal                 |
//! | `BestEffort` | empty         | empty, logged         |
//! | `Optional`   | empty         | fatal                 |
//!
//! `BestEffort` exists for the host's system dictionary, which may or may not
//! be installed. `Optional` is for lists the caller may pass explicitly: not
//! passing one is fine, passing a broken one is a mistake worth stopping for.

mod formats;

pub use formats::{parse_moby_section, parse_plain};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aggregate::NamedWordSet;
use crate::error::{Error, Result};
use crate::word::WordSet;

/// Default location of the host system dictionary.
pub const SYSTEM_DICTIONARY: &str = "/usr/share/dict/words";

/// How a source file is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// One word per line
    #[default]
    Plain,
    /// Moby word lists e-text; only the standard English section is read
    Moby,
}

/// What a failure to load the source means for the build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourcePolicy {
    #[default]
    Required,
    BestEffort,
    Optional,
}

/// A named source and where to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub name: String,
    pub path: Option<PathBuf>,
    pub format: SourceFormat,
    pub policy: SourcePolicy,
}

impl SourceSpec {
    /// A required plain word list.
    pub fn required(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        SourceSpec {
            name: name.into(),
            path: Some(path.into()),
            format: SourceFormat::Plain,
            policy: SourcePolicy::Required,
        }
    }

    /// The host dictionary, skipped quietly when missing.
    pub fn system_dictionary(path: impl Into<PathBuf>) -> Self {
        SourceSpec {
            name: "system-dict".to_string(),
            path: Some(path.into()),
            format: SourceFormat::Plain,
            policy: SourcePolicy::BestEffort,
        }
    }

    /// The Moby list, if the caller supplied one.
    pub fn moby(path: Option<PathBuf>) -> Self {
        SourceSpec {
            name: "moby".to_string(),
            path,
            format: SourceFormat::Moby,
            policy: SourcePolicy::Optional,
        }
    }
}

/// Load one source according to its policy.
pub fn load_source(spec: &SourceSpec) -> Result<NamedWordSet> {
    let Some(path) = spec.path.as_deref() else {
        return match spec.policy {
            SourcePolicy::Required => Err(Error::source_unavailable(&spec.name, "no path given")),
            SourcePolicy::BestEffort | SourcePolicy::Optional => {
                info!(source = %spec.name, "not supplied, skipping");
                Ok(NamedWordSet::empty(&spec.name))
            }
        };
    };

    match read_words(path, spec.format) {
        Ok(words) => {
            info!(
                source = %spec.name,
                path = %path.display(),
                words = words.len(),
                rejected = words.rejected(),
                "loaded source"
            );
            Ok(NamedWordSet::new(&spec.name, words))
        }
        Err(reason) if spec.policy == SourcePolicy::BestEffort => {
            warn!(source = %spec.name, path = %path.display(), %reason, "skipping source");
            Ok(NamedWordSet::empty(&spec.name))
        }
        Err(reason) => Err(Error::source_unavailable(&spec.name, reason)),
    }
}

/// Read and parse a source file, failing if it yields no canonical words.
fn read_words(path: &Path, format: SourceFormat) -> std::result::Result<WordSet, String> {
    let text = read_lossy(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let words = match format {
        SourceFormat::Plain => parse_plain(&text),
        SourceFormat::Moby => parse_moby_section(&text),
    };
    if words.is_empty() {
        return Err(format!("no valid a-z words in {}", path.display()));
    }
    Ok(words)
}

fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Load the omit list. A missing file is fatal; lines that are not
/// canonical words are dropped without complaint.
pub fn load_omit_list(path: &Path) -> Result<WordSet> {
    let text = read_lossy(path)
        .map_err(|e| Error::io(format!("reading omit list {}", path.display()), e))?;
    let omit = parse_plain(&text);
    info!(path = %path.display(), words = omit.len(), "loaded omit list");
    Ok(omit)
}
