// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Membership queries against a loaded trie.
//!
//! A token is trimmed and lowercased, then looked up as an exact word. Tokens
//! that still contain anything outside `a`-`z` are not errors: they get an
//! [`Verdict::Invalid`] with a reason and the batch carries on.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::trie::Trie;
use crate::word::canonicalize;

/// Outcome for one query token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Found,
    NotFound,
    Invalid { reason: String },
}

impl Verdict {
    /// `Some(true|false)` for a valid token, `None` if it was skipped.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Verdict::Found => Some(true),
            Verdict::NotFound => Some(false),
            Verdict::Invalid { .. } => None,
        }
    }
}

/// Check a single raw token.
///
/// ```
/// use lexitrie::validate::{check_token, Verdict};
/// use lexitrie::Trie;
///
/// let trie: Trie = ["cat"].into_iter().collect();
/// assert_eq!(check_token(&trie, " Cat "), Verdict::Found);
/// assert_eq!(check_token(&trie, "ca"), Verdict::NotFound);
/// assert!(matches!(check_token(&trie, "c4t"), Verdict::Invalid { .. }));
/// ```
pub fn check_token(trie: &Trie, raw: &str) -> Verdict {
    match canonicalize(raw) {
        Some(word) if trie.contains(&word) => Verdict::Found,
        Some(_) => Verdict::NotFound,
        None => Verdict::Invalid {
            reason: invalid_reason(raw),
        },
    }
}

fn invalid_reason(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "blank token".to_string();
    }
    match trimmed
        .chars()
        .find(|c| !c.is_ascii_alphabetic())
    {
        Some(c) => format!("contains {c:?}, expected letters a-z only"),
        None => "expected letters a-z only".to_string(),
    }
}

/// One line of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResult {
    /// 1-based line number in the input
    pub line: usize,
    /// Token as given, minus the line ending
    pub token: String,
    /// Normalized form, if the token had one
    pub word: Option<String>,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Results of validating a batch of tokens, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub results: Vec<TokenResult>,
    pub found: usize,
    pub not_found: usize,
    pub invalid: usize,
}

impl ValidationReport {
    /// Number of tokens that got a definite answer.
    pub fn valid(&self) -> usize {
        self.found + self.not_found
    }

    pub fn has_valid_tokens(&self) -> bool {
        self.valid() > 0
    }
}

/// Validate tokens in order. Blank tokens are skipped silently but still
/// count toward line numbers; duplicates are reported each time.
pub fn validate_tokens<I, S>(trie: &Trie, tokens: I) -> ValidationReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = ValidationReport::default();

    for (index, token) in tokens.into_iter().enumerate() {
        let token = token.as_ref();
        if token.trim().is_empty() {
            continue;
        }
        let line = index + 1;
        let verdict = check_token(trie, token);
        match &verdict {
            Verdict::Found => report.found += 1,
            Verdict::NotFound => report.not_found += 1,
            Verdict::Invalid { .. } => report.invalid += 1,
        }
        debug!(line, token, ?verdict, "checked token");

        report.results.push(TokenResult {
            line,
            token: token.to_string(),
            word: canonicalize(token),
            verdict,
        });
    }

    report
}

/// Read a token file, one token per line. Undecodable bytes are replaced
/// rather than failing the whole file.
pub fn read_tokens(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path)
        .map_err(|e| Error::io(format!("reading validate file {}", path.display()), e))?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}
