// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading and writing the two build artifacts: the sorted word list and
//! the serialized trie.
//!
//! Loading a trie is a gate: any format problem is a hard
//! [`Error::MalformedArtifact`]. Right after writing one, the check is only a
//! framing sanity check against the file just written, and a mismatch is
//! logged, not returned.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::aggregate::Vocabulary;
use crate::binary::{self, FormatError, MAX_FILE_SIZE};
use crate::error::{Error, Result};
use crate::trie::Trie;
use crate::word::Word;

/// Write the vocabulary as sorted lines, each ending in `\n`.
pub fn write_word_list(path: &Path, vocabulary: &Vocabulary) -> Result<()> {
    let context = || format!("writing word list {}", path.display());
    let file = File::create(path).map_err(|e| Error::io(context(), e))?;
    let mut out = BufWriter::new(file);
    for word in vocabulary.iter() {
        writeln!(out, "{word}").map_err(|e| Error::io(context(), e))?;
    }
    out.flush().map_err(|e| Error::io(context(), e))?;
    info!(path = %path.display(), words = vocabulary.len(), "wrote word list");
    Ok(())
}

/// Read a word list back. Every non-empty line must already be canonical.
pub fn read_word_list(path: &Path) -> Result<Vocabulary> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("reading word list {}", path.display()), e))?;
    text.lines()
        .filter(|line| !line.is_empty())
        .map(Word::new)
        .collect()
}

/// Encode `trie` for writing to `path`.
///
/// Fails with [`Error::Unencodable`] when the trie is outside what the format
/// can hold, such as a word longer than [`binary::MAX_DEPTH`].
pub fn encode_trie(path: &Path, trie: &Trie) -> Result<Vec<u8>> {
    binary::serialize(trie).map_err(|source| Error::Unencodable {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `trie` to `path` and return the number of bytes written.
///
/// Nothing is written if the trie cannot be encoded.
pub fn write_trie(path: &Path, trie: &Trie) -> Result<usize> {
    let bytes = encode_trie(path, trie)?;
    write_encoded_trie(path, &bytes)
}

/// Write bytes from [`encode_trie`] to `path`.
///
/// After writing, the file is re-read and its leading and trailing marker
/// bytes compared against the expected constants.
pub fn write_encoded_trie(path: &Path, bytes: &[u8]) -> Result<usize> {
    fs::write(path, bytes)
        .map_err(|e| Error::io(format!("writing trie {}", path.display()), e))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote trie");

    match fs::read(path) {
        Ok(written) => {
            let markers = binary::check_markers(&written);
            if !markers.is_ok() {
                warn!(
                    path = %path.display(),
                    leading = ?markers.leading,
                    trailing = ?markers.trailing,
                    "trie markers do not match expected values"
                );
            }
        }
        Err(e) => warn!(path = %path.display(), error = %e, "could not re-read trie for marker check"),
    }

    Ok(bytes.len())
}

/// Read and fully validate a serialized trie.
pub fn load_trie(path: &Path) -> Result<Trie> {
    let malformed = |source| Error::MalformedArtifact {
        path: path.to_path_buf(),
        source,
    };

    let meta = fs::metadata(path)
        .map_err(|e| Error::io(format!("opening trie {}", path.display()), e))?;
    if meta.len() > MAX_FILE_SIZE as u64 {
        return Err(malformed(FormatError::TooLarge {
            size: usize::try_from(meta.len()).unwrap_or(usize::MAX),
            maximum: MAX_FILE_SIZE,
        }));
    }

    let bytes =
        fs::read(path).map_err(|e| Error::io(format!("reading trie {}", path.display()), e))?;
    let trie = binary::deserialize(&bytes).map_err(malformed)?;
    info!(
        path = %path.display(),
        words = trie.len(),
        nodes = trie.node_count(),
        "loaded trie"
    );
    Ok(trie)
}
