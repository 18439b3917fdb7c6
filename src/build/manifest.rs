// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::sources::{SourceFormat, SourcePolicy, SourceSpec};

/// Manifest format version this build understands
pub const MANIFEST_VERSION: u32 = 1;

/// Source list read from a JSON file.
///
/// ```json
/// {
///   "version": 1,
///   "sources": [
///     { "name": "dwyl", "path": "words_alpha.txt" },
///     { "name": "system-dict", "path": "/usr/share/dict/words", "policy": "best-effort" },
///     { "name": "moby", "path": "moby.txt", "format": "moby", "policy": "optional" }
///   ],
///   "omit": "omit.txt"
/// }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SourceManifest {
    pub version: u32,
    pub sources: Vec<ManifestSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omit: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ManifestSource {
    pub name: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub format: SourceFormat,
    #[serde(default)]
    pub policy: SourcePolicy,
}

impl SourceManifest {
    /// Read a manifest, resolving relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::InvalidManifest {
            path: path.to_path_buf(),
            reason: format!("failed to read: {e}"),
        })?;
        let mut manifest = Self::parse(&content).map_err(|reason| Error::InvalidManifest {
            path: path.to_path_buf(),
            reason,
        })?;
        if let Some(base) = path.parent() {
            manifest.resolve_relative_to(base);
        }
        Ok(manifest)
    }

    /// Parse and check a manifest without touching the filesystem.
    pub fn parse(json: &str) -> std::result::Result<Self, String> {
        let manifest: SourceManifest =
            serde_json::from_str(json).map_err(|e| format!("invalid JSON: {e}"))?;
        if manifest.version != MANIFEST_VERSION {
            return Err(format!(
                "unsupported version {} (expected {MANIFEST_VERSION})",
                manifest.version
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for source in &manifest.sources {
            if !seen.insert(source.name.as_str()) {
                return Err(format!("duplicate source name '{}'", source.name));
            }
        }
        Ok(manifest)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let paths = self
            .sources
            .iter_mut()
            .filter_map(|s| s.path.as_mut())
            .chain(self.omit.as_mut());
        for path in paths {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// The sources in declared order, ready to load.
    pub fn source_specs(&self) -> Vec<SourceSpec> {
        self.sources
            .iter()
            .map(|s| SourceSpec {
                name: s.name.clone(),
                path: s.path.clone(),
                format: s.format,
                policy: s.policy,
            })
            .collect()
    }
}
