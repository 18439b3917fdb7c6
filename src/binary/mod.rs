// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for persisted tries.
//!
//! The artifact is written by one process and read by another, possibly much
//! later, so the format is explicit and versioned rather than a dump of
//! in-memory structures. It is small enough to describe in full:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (16 bytes)                                          │
//! │   magic: [u8; 4] = "LXTR"                                  │
//! │   version: u8 = 1                                          │
//! │   flags: u8 = 0                                            │
//! │   node_count: u32, word_count: u32                         │
//! │   max_depth: u16                                           │
//! ├────────────────────────────────────────────────────────────┤
//! │ NODES (pre-order)                                          │
//! │   per node: tag u8 = child_count << 1 | is_word            │
//! │   per child, ascending: letter u8 (a-z), then child node   │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (5 bytes)                                           │
//! │   crc32: u32 (header + nodes)                              │
//! │   terminator: u8 = '.'                                     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Security Considerations
//!
//! This format is designed to be safely parsed from untrusted sources:
//! - File size is checked against [`MAX_FILE_SIZE`] before anything else
//! - Magic, version, terminator and CRC32 are verified before the node stream
//! - Every edge letter must be `a`-`z` and strictly ascending within a node
//! - Depth is bounded by the header and by [`MAX_DEPTH`]; decoding never recurses
//! - Every node below the root leads to at least one word
//! - Node count, word count and depth must all match the header exactly
//! - Trailing bytes between the node stream and the footer are rejected

mod header;
mod nodes;

pub use header::{
    TrieFooter, TrieHeader, ALPHABET_SIZE, MAGIC, MAX_DEPTH, MAX_FILE_SIZE, MAX_NODE_COUNT,
    TERMINATOR, VERSION,
};

use std::io::Cursor;

use thiserror::Error;

use crate::trie::Trie;

/// Why a byte stream is not a usable trie.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("file too small ({size} bytes, minimum {minimum})")]
    TooSmall { size: usize, minimum: usize },

    #[error("file too large ({size} bytes, maximum {maximum})")]
    TooLarge { size: usize, maximum: usize },

    #[error("invalid magic: expected LXTR, got {found:?}")]
    BadMagic { found: [u8; 4] },

    #[error("unsupported format version {found} (this build reads {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("unknown format flags {0:#04x}")]
    UnknownFlags(u8),

    #[error("invalid terminator: expected {expected:#04x}, got {found:#04x}")]
    BadTerminator { found: u8, expected: u8 },

    #[error("CRC32 mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("node stream truncated at byte {offset}")]
    Truncated { offset: usize },

    #[error("invalid node tag {tag:#04x} at byte {offset}")]
    InvalidTag { tag: u8, offset: usize },

    #[error("node at byte {offset} has no children and ends no word")]
    EmptyBranch { offset: usize },

    #[error("invalid edge letter {letter:#04x} at byte {offset}")]
    InvalidLetter { letter: u8, offset: usize },

    #[error("edge {letter:?} at byte {offset} is out of ascending order")]
    UnsortedEdges { letter: char, offset: usize },

    #[error("node depth {depth} exceeds limit {limit}")]
    TooDeep { depth: usize, limit: usize },

    #[error("header declares {declared} {what}, stream holds {actual}")]
    CountMismatch {
        what: &'static str,
        declared: u64,
        actual: u64,
    },

    #[error("{count} unexpected bytes after the node stream")]
    TrailingBytes { count: usize },
}

/// Smallest possible file: header, a lone root tag, footer.
pub const MIN_FILE_SIZE: usize = TrieHeader::SIZE + 1 + TrieFooter::SIZE;

/// Encode a trie into the persisted format.
///
/// Refuses anything [`deserialize`] would reject: a word longer than
/// [`MAX_DEPTH`], or an encoding larger than [`MAX_FILE_SIZE`]. Whatever this
/// returns decodes back to an equal trie.
pub fn serialize(trie: &Trie) -> Result<Vec<u8>, FormatError> {
    if trie.max_depth() > MAX_DEPTH {
        return Err(FormatError::TooDeep {
            depth: trie.max_depth(),
            limit: MAX_DEPTH,
        });
    }

    // Tag per node plus a letter per edge; the root has no edge
    let size = TrieHeader::SIZE + 2 * trie.node_count() - 1 + TrieFooter::SIZE;
    if size > MAX_FILE_SIZE {
        return Err(FormatError::TooLarge {
            size,
            maximum: MAX_FILE_SIZE,
        });
    }

    // Both fit: node_count < size <= MAX_FILE_SIZE and depth <= MAX_DEPTH
    let header = TrieHeader {
        version: VERSION,
        flags: 0,
        node_count: u32::try_from(trie.node_count()).unwrap_or(MAX_NODE_COUNT),
        word_count: u32::try_from(trie.len()).unwrap_or(MAX_NODE_COUNT),
        max_depth: u16::try_from(trie.max_depth()).unwrap_or(u16::MAX),
    };

    let mut buf = Vec::with_capacity(size);
    buf.extend_from_slice(&header.to_bytes());
    nodes::encode_nodes(trie.root(), &mut buf);

    let crc32 = TrieFooter::compute_crc32(&buf);
    buf.extend_from_slice(&TrieFooter { crc32 }.to_bytes());
    debug_assert_eq!(buf.len(), size);
    Ok(buf)
}

/// Parse and validate only the header.
pub fn read_header(bytes: &[u8]) -> Result<TrieHeader, FormatError> {
    if bytes.len() < TrieHeader::SIZE {
        return Err(FormatError::TooSmall {
            size: bytes.len(),
            minimum: MIN_FILE_SIZE,
        });
    }
    let mut found = [0u8; 4];
    found.copy_from_slice(&bytes[..4]);
    if found != MAGIC {
        return Err(FormatError::BadMagic { found });
    }

    // Length and magic were checked above, so this read cannot fail
    let header = TrieHeader::read(&mut Cursor::new(bytes)).map_err(|_| FormatError::TooSmall {
        size: bytes.len(),
        minimum: MIN_FILE_SIZE,
    })?;

    if header.version != VERSION {
        return Err(FormatError::UnsupportedVersion {
            found: header.version,
            expected: VERSION,
        });
    }
    if header.flags != 0 {
        return Err(FormatError::UnknownFlags(header.flags));
    }
    Ok(header)
}

/// Decode a persisted trie, validating everything along the way.
pub fn deserialize(bytes: &[u8]) -> Result<Trie, FormatError> {
    if bytes.len() > MAX_FILE_SIZE {
        return Err(FormatError::TooLarge {
            size: bytes.len(),
            maximum: MAX_FILE_SIZE,
        });
    }
    if bytes.len() < MIN_FILE_SIZE {
        return Err(FormatError::TooSmall {
            size: bytes.len(),
            minimum: MIN_FILE_SIZE,
        });
    }

    let header = read_header(bytes)?;

    let found = bytes[bytes.len() - 1];
    if found != TERMINATOR {
        return Err(FormatError::BadTerminator {
            found,
            expected: TERMINATOR,
        });
    }

    // INVARIANT: bytes.len() >= MIN_FILE_SIZE, so the footer slice is in bounds
    let content_end = bytes.len() - TrieFooter::SIZE;
    let content = &bytes[..content_end];
    let stored = TrieFooter::read(bytes)
        .map_err(|_| FormatError::BadTerminator {
            found,
            expected: TERMINATOR,
        })?
        .crc32;
    let computed = TrieFooter::compute_crc32(content);
    if stored != computed {
        return Err(FormatError::ChecksumMismatch { stored, computed });
    }

    let declared_depth = usize::from(header.max_depth);
    if declared_depth > MAX_DEPTH {
        return Err(FormatError::TooDeep {
            depth: declared_depth,
            limit: MAX_DEPTH,
        });
    }

    let stream = &content[TrieHeader::SIZE..];
    // Every node costs at least its tag byte
    if header.node_count as usize > stream.len() || header.node_count > MAX_NODE_COUNT {
        return Err(FormatError::CountMismatch {
            what: "nodes",
            declared: u64::from(header.node_count),
            actual: stream.len() as u64,
        });
    }

    let (root, stats) = nodes::decode_nodes(
        stream,
        TrieHeader::SIZE,
        declared_depth,
        u64::from(header.node_count),
    )?;

    if stats.consumed != stream.len() {
        return Err(FormatError::TrailingBytes {
            count: stream.len() - stats.consumed,
        });
    }
    check_count("nodes", u64::from(header.node_count), stats.nodes)?;
    check_count("words", u64::from(header.word_count), stats.words)?;
    check_count(
        "max depth",
        u64::from(header.max_depth),
        stats.max_word_depth as u64,
    )?;

    Ok(Trie::from_root(root))
}

fn check_count(what: &'static str, declared: u64, actual: u64) -> Result<(), FormatError> {
    if declared == actual {
        Ok(())
    } else {
        Err(FormatError::CountMismatch {
            what,
            declared,
            actual,
        })
    }
}

/// Result of the cheap framing check run right after writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerCheck {
    /// First bytes as found (magic + version), zero-padded if the file is short
    pub leading: [u8; 5],
    /// Last byte as found, if any
    pub trailing: Option<u8>,
}

impl MarkerCheck {
    pub fn leading_ok(&self) -> bool {
        self.leading[..4] == MAGIC && self.leading[4] == VERSION
    }

    pub fn trailing_ok(&self) -> bool {
        self.trailing == Some(TERMINATOR)
    }

    pub fn is_ok(&self) -> bool {
        self.leading_ok() && self.trailing_ok()
    }
}

/// Read the leading magic/version bytes and the trailing terminator byte.
///
/// Deliberately shallow: it detects a truncated or clobbered file without
/// decoding it. [`deserialize`] is the real gate.
pub fn check_markers(bytes: &[u8]) -> MarkerCheck {
    let mut leading = [0u8; 5];
    let n = bytes.len().min(leading.len());
    leading[..n].copy_from_slice(&bytes[..n]);
    MarkerCheck {
        leading,
        trailing: bytes.last().copied(),
    }
}
