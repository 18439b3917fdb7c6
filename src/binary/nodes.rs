// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pre-order node stream.
//!
//! Every node is one tag byte, `child_count << 1 | is_word`, followed by its
//! children in ascending letter order, each child as a letter byte and then
//! that child's own encoding. There are no lengths or offsets to trust: the
//! shape of the tree is fully determined by the tags, so a reader can only be
//! lied to about letters, counts, depth and empty branches, and it checks each.
//!
//! Both directions use an explicit stack instead of recursing; on the decode
//! side the depth comes from untrusted input.

use crate::trie::TrieNode;

use super::header::ALPHABET_SIZE;
use super::FormatError;

/// Largest valid tag: 26 children and the word flag.
const MAX_TAG: u8 = ((ALPHABET_SIZE as u8) << 1) | 1;

#[inline]
fn tag(node: &TrieNode) -> u8 {
    // INVARIANT: a node has at most 26 children (a-z), so this fits in a byte
    ((node.children.len() as u8) << 1) | u8::from(node.is_word)
}

/// Append the pre-order encoding of `root` to `buf`.
pub(crate) fn encode_nodes(root: &TrieNode, buf: &mut Vec<u8>) {
    enum Step<'a> {
        Node(&'a TrieNode),
        Edge(u8, &'a TrieNode),
    }

    let mut stack = vec![Step::Node(root)];
    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Node(node) => node,
            Step::Edge(letter, node) => {
                buf.push(letter);
                node
            }
        };
        buf.push(tag(node));
        // Reversed so the smallest letter is popped (and written) first
        stack.extend(
            node.children
                .iter()
                .rev()
                .map(|(&letter, child)| Step::Edge(letter, child)),
        );
    }
}

/// What the decoder saw, for checking against the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct NodeStats {
    pub nodes: u64,
    pub words: u64,
    pub max_word_depth: usize,
    /// Bytes of the stream consumed
    pub consumed: usize,
}

struct Frame {
    letter: u8,
    node: TrieNode,
    remaining: u8,
    last_letter: Option<u8>,
}

/// Decode one complete node stream from the front of `bytes`.
///
/// `base_offset` is where `bytes` starts in the file, so errors can point at
/// real file offsets. `max_depth` bounds how deep any node may sit and
/// `max_nodes` bounds how many nodes are read before giving up.
pub(crate) fn decode_nodes(
    bytes: &[u8],
    base_offset: usize,
    max_depth: usize,
    max_nodes: u64,
) -> Result<(TrieNode, NodeStats), FormatError> {
    let mut pos = 0usize;
    let mut stats = NodeStats::default();

    let (is_word, children) = read_tag(bytes, &mut pos, base_offset)?;
    stats.nodes = 1;
    stats.words = u64::from(is_word);

    let mut stack = vec![Frame {
        letter: 0,
        node: TrieNode::with_flag(is_word),
        remaining: children,
        last_letter: None,
    }];

    let mut root = None;
    while let Some(mut frame) = stack.pop() {
        if frame.remaining == 0 {
            match stack.last_mut() {
                Some(parent) => {
                    parent.node.children.insert(frame.letter, frame.node);
                }
                None => root = Some(frame.node),
            }
            continue;
        }
        frame.remaining -= 1;

        let letter_offset = base_offset + pos;
        let letter = *bytes.get(pos).ok_or(FormatError::Truncated {
            offset: letter_offset,
        })?;
        pos += 1;
        if !letter.is_ascii_lowercase() {
            return Err(FormatError::InvalidLetter {
                letter,
                offset: letter_offset,
            });
        }
        if frame.last_letter.is_some_and(|prev| letter <= prev) {
            return Err(FormatError::UnsortedEdges {
                letter: letter as char,
                offset: letter_offset,
            });
        }
        frame.last_letter = Some(letter);
        stack.push(frame);

        // The root sits at depth 0, so a child's depth is the frame count
        let depth = stack.len();
        if depth > max_depth {
            return Err(FormatError::TooDeep {
                depth,
                limit: max_depth,
            });
        }

        let tag_offset = base_offset + pos;
        let (is_word, children) = read_tag(bytes, &mut pos, base_offset)?;
        // Only the root may be a bare leaf; anywhere else it is a prefix with no word
        if !is_word && children == 0 {
            return Err(FormatError::EmptyBranch { offset: tag_offset });
        }
        stats.nodes += 1;
        if stats.nodes > max_nodes {
            return Err(FormatError::CountMismatch {
                what: "nodes",
                declared: max_nodes,
                actual: stats.nodes,
            });
        }
        if is_word {
            stats.words += 1;
            stats.max_word_depth = stats.max_word_depth.max(depth);
        }

        stack.push(Frame {
            letter,
            node: TrieNode::with_flag(is_word),
            remaining: children,
            last_letter: None,
        });
    }

    let root = root.ok_or(FormatError::Truncated {
        offset: base_offset + pos,
    })?;
    stats.consumed = pos;
    Ok((root, stats))
}

fn read_tag(bytes: &[u8], pos: &mut usize, base_offset: usize) -> Result<(bool, u8), FormatError> {
    let offset = base_offset + *pos;
    let tag = *bytes.get(*pos).ok_or(FormatError::Truncated { offset })?;
    if tag > MAX_TAG {
        return Err(FormatError::InvalidTag { tag, offset });
    }
    *pos += 1;
    Ok((tag & 1 == 1, tag >> 1))
}
