// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Prefix trie over canonical words.
//!
//! Each node owns its children outright, keyed by letter, so the tree is
//! acyclic by construction and drops as a unit with its root. Children live in
//! a `BTreeMap` rather than a `HashMap` so that walking them is always in
//! letter order: the binary encoder relies on that to produce identical bytes
//! for identical vocabularies, and [`Trie::words`] relies on it to come out
//! sorted without a separate sort.
//!
//! Lookups are exact-word: a path that exists but ends on a node without the
//! word flag (a prefix of stored words) is a miss.

use std::collections::BTreeMap;

use crate::word::Word;

/// One prefix position in the trie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    pub(crate) children: BTreeMap<u8, TrieNode>,
    pub(crate) is_word: bool,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_flag(is_word: bool) -> Self {
        TrieNode {
            children: BTreeMap::new(),
            is_word,
        }
    }

    /// True if the path from the root to this node spells a stored word.
    pub fn is_word(&self) -> bool {
        self.is_word
    }

    /// Follow one edge.
    pub fn get(&self, letter: char) -> Option<&TrieNode> {
        if !letter.is_ascii_lowercase() {
            return None;
        }
        self.children.get(&(letter as u8))
    }

    /// Child edges in ascending letter order.
    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.children.iter().map(|(&b, node)| (b as char, node))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes in this subtree, this node included.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        // Decoded tries can be thousands of levels deep; unlink iteratively
        // so dropping them never recurses.
        let mut stack: Vec<TrieNode> = std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

/// A prefix trie built from a canonical vocabulary.
///
/// ```
/// use lexitrie::Trie;
///
/// let trie: Trie = ["cat", "dog"].into_iter().collect();
/// assert!(trie.contains("cat"));
/// assert!(!trie.contains("ca"));
/// assert!(!trie.contains("Cat"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie {
    root: TrieNode,
    word_count: usize,
    node_count: usize,
    max_depth: usize,
}

impl Trie {
    /// An empty trie: one root node, no words.
    pub fn new() -> Self {
        Trie {
            root: TrieNode::new(),
            word_count: 0,
            node_count: 1,
            max_depth: 0,
        }
    }

    /// Reassemble a trie from a decoded root, recomputing the counters.
    pub(crate) fn from_root(root: TrieNode) -> Self {
        let mut word_count = 0;
        let mut node_count = 0;
        let mut max_depth = 0;
        let mut stack = vec![(&root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            node_count += 1;
            if node.is_word {
                word_count += 1;
                max_depth = max_depth.max(depth);
            }
            stack.extend(node.children.values().map(|child| (child, depth + 1)));
        }
        Trie {
            root,
            word_count,
            node_count,
            max_depth,
        }
    }

    /// Insert a canonical word.
    ///
    /// The caller guarantees `word` is canonical (use [`Trie::insert_word`] to
    /// have the type system do it). Inserting the same word twice is a no-op.
    pub fn insert(&mut self, word: &str) {
        debug_assert!(
            crate::word::is_canonical(word),
            "insert requires a canonical word, got {word:?}"
        );
        let mut node = &mut self.root;
        for &letter in word.as_bytes() {
            let created = !node.children.contains_key(&letter);
            if created {
                self.node_count += 1;
            }
            node = node.children.entry(letter).or_default();
        }
        // INVARIANT: word_count equals the number of nodes with is_word set
        if !node.is_word {
            node.is_word = true;
            self.word_count += 1;
            self.max_depth = self.max_depth.max(word.len());
        }
    }

    pub fn insert_word(&mut self, word: &Word) {
        self.insert(word.as_str());
    }

    /// Exact-word membership for arbitrary text.
    ///
    /// Anything outside `a`-`z` simply has no edge, so it returns false.
    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some_and(TrieNode::is_word)
    }

    /// True if some stored word starts with `prefix` (every word starts with "").
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.find(prefix).is_some()
    }

    fn find(&self, path: &str) -> Option<&TrieNode> {
        path.bytes()
            .try_fold(&self.root, |node, letter| node.children.get(&letter))
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Length of the longest stored word.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Every stored word, in lexicographic order.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.word_count);
        let mut prefix = Vec::with_capacity(self.max_depth);
        collect_words(&self.root, &mut prefix, &mut words);
        words
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_words(node: &TrieNode, prefix: &mut Vec<u8>, words: &mut Vec<String>) {
    if node.is_word {
        // INVARIANT: edges are a-z only, so the prefix is always valid UTF-8
        words.push(prefix.iter().map(|&b| b as char).collect());
    }
    for (&letter, child) in &node.children {
        prefix.push(letter);
        collect_words(child, prefix, words);
        prefix.pop();
    }
}

impl<'a> FromIterator<&'a str> for Trie {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

impl FromIterator<String> for Trie {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

impl<'a> FromIterator<&'a Word> for Trie {
    fn from_iter<T: IntoIterator<Item = &'a Word>>(iter: T) -> Self {
        let mut trie = Trie::new();
        for word in iter {
            trie.insert_word(word);
        }
        trie
    }
}

impl<'a> Extend<&'a str> for Trie {
    fn extend<T: IntoIterator<Item = &'a str>>(&mut self, iter: T) {
        for word in iter {
            self.insert(word);
        }
    }
}

impl Extend<String> for Trie {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        for word in iter {
            self.insert(&word);
        }
    }
}
