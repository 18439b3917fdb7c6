// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The build pipeline: sources in, word list and trie out.

pub mod artifact;
pub mod manifest;
pub mod parallel;

use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use crate::aggregate::{aggregate, AggregationReport, NamedWordSet};
use crate::sources::{load_omit_list, SourceSpec};
use crate::word::WordSet;

pub use artifact::{
    encode_trie, load_trie, read_word_list, write_encoded_trie, write_trie, write_word_list,
};
pub use manifest::{ManifestSource, SourceManifest, MANIFEST_VERSION};
pub use parallel::load_sources;

/// Extension used for serialized tries
pub const TRIE_EXTENSION: &str = "ltrie";

/// Everything a build needs to know.
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    /// Word list output path
    pub output: PathBuf,
    /// Trie output path; defaults to `output` with the extension swapped
    pub trie: Option<PathBuf>,
    /// Sources in merge order
    pub sources: Vec<SourceSpec>,
    pub omit: Option<PathBuf>,
    /// Show a progress bar while loading sources
    pub progress: bool,
}

impl BuildConfig {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        BuildConfig {
            output: output.into(),
            ..Self::default()
        }
    }

    /// Where the trie will be written.
    pub fn trie_path(&self) -> PathBuf {
        self.trie
            .clone()
            .unwrap_or_else(|| default_trie_path(&self.output))
    }
}

/// What a successful build produced.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub word_list: PathBuf,
    pub trie: PathBuf,
    pub report: AggregationReport,
    pub word_count: usize,
    pub node_count: usize,
    pub max_depth: usize,
    pub trie_bytes: usize,
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

/// Run the whole pipeline.
///
/// The omit list is read first so a bad path fails before any source is
/// touched. Nothing is written unless aggregation succeeds and the trie
/// encodes.
pub fn run_build(config: &BuildConfig) -> crate::Result<BuildSummary> {
    // 1. Omit list
    let omit = match &config.omit {
        Some(path) => load_omit_list(path)?,
        None => WordSet::new(),
    };

    // 2. Sources
    let sources = load_all(&config.sources, config.progress)?;

    // 3. Union and omission
    let aggregation = aggregate(&sources, &omit)?;
    drop(sources);
    info!(
        union = aggregation.report.union_size,
        omitted = aggregation.report.omitted,
        words = aggregation.report.final_size,
        "aggregated vocabulary"
    );

    // 4. Trie, encoded before anything is written
    let trie = aggregation.vocabulary.to_trie();
    let trie_path = config.trie_path();
    let encoded = encode_trie(&trie_path, &trie)?;

    // 5. Word list, then trie
    write_word_list(&config.output, &aggregation.vocabulary)?;
    let trie_bytes = write_encoded_trie(&trie_path, &encoded)?;
    info!(nodes = trie.node_count(), words = trie.len(), "built trie");

    Ok(BuildSummary {
        word_list: config.output.clone(),
        trie: trie_path,
        report: aggregation.report,
        word_count: trie.len(),
        node_count: trie.node_count(),
        max_depth: trie.max_depth(),
        trie_bytes,
    })
}

#[cfg(feature = "parallel")]
fn load_all(specs: &[SourceSpec], progress: bool) -> crate::Result<Vec<NamedWordSet>> {
    if !progress {
        return load_sources(specs);
    }
    let pb = ProgressBar::new(specs.len() as u64);
    pb.set_style(create_progress_style());
    pb.set_prefix("Loading");
    pb.set_message("sources...");
    let loaded = parallel::load_sources_with_progress(specs, &pb);
    match &loaded {
        Ok(sets) => pb.finish_with_message(format!("loaded {} sources", sets.len())),
        Err(_) => pb.abandon_with_message("failed"),
    }
    loaded
}

#[cfg(not(feature = "parallel"))]
fn load_all(specs: &[SourceSpec], _progress: bool) -> crate::Result<Vec<NamedWordSet>> {
    load_sources(specs)
}

/// `<dir>/<stem>.ltrie` for a word list path.
pub fn default_trie_path(output: &Path) -> PathBuf {
    output.with_extension(TRIE_EXTENSION)
}
