// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Trie decoding under adversarial input.
//!
//! A `.ltrie` file is read from disk and may have been truncated, clobbered
//! or crafted. The decoder must answer with an error, never a panic, an
//! unbounded allocation or a stack overflow.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lexitrie::binary;

fuzz_target!(|data: &[u8]| {
    let _ = binary::read_header(data);
    let _ = binary::check_markers(data);

    if let Ok(trie) = binary::deserialize(data) {
        // INVARIANT: anything the decoder accepts re-encodes to the same bytes
        assert_eq!(binary::serialize(&trie).as_deref(), Ok(data), "accepted a non-canonical encoding");

        let words = trie.words();
        assert_eq!(words.len(), trie.len());
        assert!(words.windows(2).all(|w| w[0] < w[1]), "words out of order");
        for word in words.iter().take(64) {
            assert!(trie.contains(word));
        }
    }
});
