// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Validation of arbitrary tokens against a fuzzer-chosen vocabulary.
//!
//! The vocabulary is canonicalized through the same path a build uses, so the
//! trie only ever holds a-z words; the tokens are anything at all.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lexitrie::{canonicalize, validate_tokens, Trie, Verdict, WordSet};

#[derive(Debug, Arbitrary)]
struct Input {
    vocabulary: Vec<String>,
    tokens: Vec<String>,
}

fuzz_target!(|input: Input| {
    let words = WordSet::from_lines(&input.vocabulary);
    let trie: Trie = words.iter().collect();

    let report = validate_tokens(&trie, &input.tokens);
    assert_eq!(
        report.found + report.not_found + report.invalid,
        report.results.len()
    );

    for result in &report.results {
        let canonical = canonicalize(&result.token);
        match &result.verdict {
            Verdict::Found => {
                let word = canonical.as_deref().unwrap_or_default();
                assert!(words.contains(word), "found {word:?} outside the vocabulary");
            }
            Verdict::NotFound => assert!(canonical.is_some_and(|w| !words.contains(&w))),
            Verdict::Invalid { .. } => assert!(canonical.is_none()),
        }
    }
});
