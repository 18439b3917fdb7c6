// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format header and footer structures.
//!
//! The header is 16 bytes of fixed-size fields, parsed in one read before
//! anything else. It carries the node and word counts the decoder must
//! reproduce, and the longest word length so the decoder knows how deep the
//! stream is allowed to go before it has seen a single node.
//!
//! The footer is 5 bytes: a CRC32 checksum over everything before it, then a
//! single terminator byte. If either is wrong, something got corrupted or
//! truncated. Don't trust the data.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "LXTR" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x4C, 0x58, 0x54, 0x52];

/// Current format version
pub const VERSION: u8 = 1;

/// Terminator: the last byte of every valid file ('.')
pub const TERMINATOR: u8 = 0x2E;

/// Letters per node; a tag's child count can never exceed this
pub const ALPHABET_SIZE: usize = 26;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum file size: 256 MB (prevents huge allocations)
pub const MAX_FILE_SIZE: usize = 256 * 1024 * 1024;

/// Maximum trie depth, i.e. the longest word a file may hold.
/// Fits the u16 `max_depth` header field and caps the decoder's frame stack.
pub const MAX_DEPTH: usize = 4096;

/// Maximum node count; every node costs at least one byte in the stream
pub const MAX_NODE_COUNT: u32 = MAX_FILE_SIZE as u32;

// ============================================================================
// HEADER
// ============================================================================

/// Binary format header (16 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieHeader {
    pub version: u8,
    /// Reserved, always zero in v1
    pub flags: u8,
    /// Number of nodes in the stream, root included
    pub node_count: u32,
    /// Number of nodes with the word flag set
    pub word_count: u32,
    /// Length of the longest word (depth of the deepest word node)
    pub max_depth: u16,
}

impl TrieHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 4 + 4 (u32s) + 2 (u16) = 16
    pub const SIZE: usize = 16;

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&MAGIC);
        out[4] = self.version;
        out[5] = self.flags;
        out[6..10].copy_from_slice(&self.node_count.to_le_bytes());
        out[10..14].copy_from_slice(&self.word_count.to_le_bytes());
        out[14..16].copy_from_slice(&self.max_depth.to_le_bytes());
        out
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.to_bytes())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected LXTR, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 12]; // 16 - 4 (magic) = 12
        r.read_exact(&mut buf)?;

        Ok(Self {
            version: buf[0],
            flags: buf[1],
            node_count: u32::from_le_bytes([buf[2], buf[3], buf[4], buf[5]]),
            word_count: u32::from_le_bytes([buf[6], buf[7], buf[8], buf[9]]),
            max_depth: u16::from_le_bytes([buf[10], buf[11]]),
        })
    }
}

// ============================================================================
// FOOTER (5 bytes)
// ============================================================================

/// Footer with CRC32 checksum and terminator byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieFooter {
    /// CRC32 checksum of header + node stream (everything before footer)
    pub crc32: u32,
}

impl TrieFooter {
    pub const SIZE: usize = 5; // 4 bytes CRC32 + 1 byte terminator

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let crc = self.crc32.to_le_bytes();
        [crc[0], crc[1], crc[2], crc[3], TERMINATOR]
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.to_bytes())
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "File too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let terminator = bytes[bytes.len() - 1];
        if terminator != TERMINATOR {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid terminator: expected {:#04x}, got {:#04x}",
                    TERMINATOR, terminator
                ),
            ));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
