// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests, benches and
//! fuzz targets.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::aggregate::NamedWordSet;
use crate::trie::Trie;
use crate::word::WordSet;

/// Word set from string literals. Non-canonical entries are dropped.
pub fn word_set(words: &[&str]) -> WordSet {
    WordSet::from_lines(words)
}

/// Named source from string literals.
pub fn named(name: &str, words: &[&str]) -> NamedWordSet {
    NamedWordSet::new(name, word_set(words))
}

/// Trie from canonical string literals.
pub fn trie_of(words: &[&str]) -> Trie {
    words.iter().copied().collect()
}

/// Deterministic pseudo-random canonical words (xorshift64), for benches.
pub fn synthetic_words(count: usize, seed: u64) -> Vec<String> {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..count)
        .map(|_| {
            let len = 2 + (next() % 10) as usize;
            (0..len)
                .map(|_| (b'a' + (next() % 26) as u8) as char)
                .collect()
        })
        .collect()
}

/// Every prefix of `word`, including "" and the word itself.
pub fn prefixes(word: &str) -> impl Iterator<Item = &str> {
    (0..=word.len()).map(move |i| &word[..i])
}
