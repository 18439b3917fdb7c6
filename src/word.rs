// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Canonical words and word sets.
//!
//! A canonical word is one or more ASCII lowercase letters and nothing else.
//! Raw input gets trimmed and lowercased first, so "Apple" becomes "apple",
//! but "don't", "x-ray", "café" and "b2b" are dropped. Once a string is a
//! [`Word`] it stays canonical; [`WordSet`] only ever holds `Word`s.

use std::borrow::Borrow;
use std::collections::hash_set;
use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};

/// Returns true if `s` is non-empty and made only of `a`-`z`.
#[inline]
pub fn is_canonical(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase())
}

/// Trim, lowercase, and keep the result only if it is canonical.
///
/// ```
/// use lexitrie::canonicalize;
///
/// assert_eq!(canonicalize("  Apple\n").as_deref(), Some("apple"));
/// assert_eq!(canonicalize("x-ray"), None);
/// assert_eq!(canonicalize(""), None);
/// ```
pub fn canonicalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Non-ASCII input can never become canonical, and `to_lowercase` on it may
    // even produce ASCII ('K' KELVIN SIGN -> 'k'), so reject it up front.
    if !trimmed.is_ascii() {
        return None;
    }
    let lowered = trimmed.to_ascii_lowercase();
    is_canonical(&lowered).then_some(lowered)
}

/// A validated canonical word.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(String);

impl Word {
    /// Wrap an already-canonical string. Fails without normalizing.
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if is_canonical(&s) {
            Ok(Word(s))
        } else {
            Err(Error::InvalidWord(s))
        }
    }

    /// Canonicalize raw text into a word, if possible.
    pub fn parse(raw: &str) -> Option<Self> {
        canonicalize(raw).map(Word)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// `Word` derives `Hash`/`Eq` from its `String`, so it hashes exactly like `str`.
impl Borrow<str> for Word {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Word {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Word::new(s)
    }
}

/// Deduplicated set of canonical words from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: HashSet<Word>,
    rejected: usize,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize every line, keeping the ones that survive.
    ///
    /// Blank lines are ignored. Non-blank lines that fail the canonical check
    /// are counted in [`rejected`](Self::rejected) but otherwise dropped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = WordSet::new();
        for line in lines {
            set.insert_raw(line.as_ref());
        }
        set
    }

    /// Canonicalize and insert one raw line. Returns true if it was new.
    pub fn insert_raw(&mut self, raw: &str) -> bool {
        if raw.trim().is_empty() {
            return false;
        }
        match Word::parse(raw) {
            Some(word) => self.words.insert(word),
            None => {
                self.rejected += 1;
                false
            }
        }
    }

    pub fn insert(&mut self, word: Word) -> bool {
        self.words.insert(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of non-blank input lines dropped by the canonical check.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Word> {
        self.words.iter()
    }
}

impl FromIterator<Word> for WordSet {
    fn from_iter<T: IntoIterator<Item = Word>>(iter: T) -> Self {
        WordSet {
            words: iter.into_iter().collect(),
            rejected: 0,
        }
    }
}

impl Extend<Word> for WordSet {
    fn extend<T: IntoIterator<Item = Word>>(&mut self, iter: T) {
        self.words.extend(iter);
    }
}

impl IntoIterator for WordSet {
    type Item = Word;
    type IntoIter = hash_set::IntoIter<Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.into_iter()
    }
}

impl<'a> IntoIterator for &'a WordSet {
    type Item = &'a Word;
    type IntoIter = hash_set::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
