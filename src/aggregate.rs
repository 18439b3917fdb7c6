// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Vocabulary aggregation: union the sources, then subtract the omit list.
//!
//! This is a plain left fold over the sources in the order given. Each step
//! records how many words the source offered and how many of them were new,
//! so the same inputs always produce the same report. The union is checked
//! for emptiness *before* omission: an empty union means every source came
//! back empty, which is always a configuration problem.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::trie::Trie;
use crate::word::{Word, WordSet};

/// One source's contribution, labelled for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedWordSet {
    pub name: String,
    pub words: WordSet,
}

impl NamedWordSet {
    pub fn new(name: impl Into<String>, words: WordSet) -> Self {
        Self {
            name: name.into(),
            words,
        }
    }

    /// An empty contribution (a skipped best-effort or unsupplied optional source).
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, WordSet::new())
    }
}

/// The final deduplicated, omission-filtered word set. Always sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: BTreeSet<Word>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Words in codepoint-lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    /// Words as plain strings, sorted.
    pub fn to_sorted_strings(&self) -> Vec<String> {
        self.words.iter().map(|w| w.as_str().to_string()).collect()
    }

    /// Build the prefix trie holding exactly these words.
    pub fn to_trie(&self) -> Trie {
        self.words.iter().collect()
    }
}

impl FromIterator<Word> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = Word>>(iter: T) -> Self {
        Vocabulary {
            words: iter.into_iter().collect(),
        }
    }
}

/// How one source changed the running union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceContribution {
    pub name: String,
    /// Words the source offered
    pub offered: usize,
    /// Words not already in the union
    pub added: usize,
    /// Union size after this source
    pub union_size: usize,
}

/// Audit trail of an aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationReport {
    pub sources: Vec<SourceContribution>,
    pub union_size: usize,
    pub omit_size: usize,
    pub omitted: usize,
    pub final_size: usize,
}

/// Vocabulary plus the report of how it was assembled.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub vocabulary: Vocabulary,
    pub report: AggregationReport,
}

/// Merge `sources` in order, then remove every word in `omit`.
///
/// Fails with [`Error::EmptyVocabulary`] when the union of all sources is
/// empty. Omission itself never fails.
pub fn aggregate(sources: &[NamedWordSet], omit: &WordSet) -> Result<Aggregation> {
    let mut report = AggregationReport::default();

    let union = sources
        .iter()
        .fold(BTreeSet::<Word>::new(), |mut union, source| {
            let before = union.len();
            // INVARIANT: the union only grows, so `added` cannot underflow
            union.extend(source.words.iter().cloned());
            let contribution = SourceContribution {
                name: source.name.clone(),
                offered: source.words.len(),
                added: union.len() - before,
                union_size: union.len(),
            };
            info!(
                source = %contribution.name,
                offered = contribution.offered,
                added = contribution.added,
                union = contribution.union_size,
                "merged source"
            );
            report.sources.push(contribution);
            union
        });

    if union.is_empty() {
        return Err(Error::EmptyVocabulary);
    }
    report.union_size = union.len();

    let words: BTreeSet<Word> = union
        .into_iter()
        .filter(|word| !omit.contains(word.as_str()))
        .collect();

    report.omit_size = omit.len();
    // INVARIANT: words is a subset of the union
    report.omitted = report.union_size - words.len();
    report.final_size = words.len();

    if report.omitted > 0 {
        info!(
            omitted = report.omitted,
            remaining = report.final_size,
            "applied omit list"
        );
    }
    if words.is_empty() {
        warn!("omit list removed every word; the trie will be empty");
    }

    Ok(Aggregation {
        vocabulary: Vocabulary { words },
        report,
    })
}
