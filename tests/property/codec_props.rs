//! Binary format properties.
//!
//! - deserialize(serialize(t)) == t, and membership survives for every query
//! - Serialization is a function of the vocabulary alone
//! - Corruption of any single byte is detected
//! - Arbitrary bytes never panic the decoder

use std::collections::BTreeSet;

use proptest::prelude::*;

use lexitrie::binary::{self, check_markers, TrieHeader};
use lexitrie::Trie;

use crate::common::{assert_trie_matches, query_strategy, word_vec_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: round trip reproduces the trie exactly.
    #[test]
    fn prop_roundtrip(words in word_vec_strategy(60)) {
        let trie: Trie = words.iter().cloned().collect();
        let decoded = binary::deserialize(&binary::serialize(&trie).unwrap()).unwrap();
        prop_assert_eq!(&decoded, &trie);

        let set: BTreeSet<String> = words.into_iter().collect();
        assert_trie_matches(&decoded, &set);
    }

    /// Property: decoded tries answer arbitrary queries like the original.
    #[test]
    fn prop_roundtrip_queries(
        words in word_vec_strategy(30),
        queries in prop::collection::vec(query_strategy(), 0..20),
    ) {
        let trie: Trie = words.iter().cloned().collect();
        let decoded = binary::deserialize(&binary::serialize(&trie).unwrap()).unwrap();
        for query in &queries {
            prop_assert_eq!(decoded.contains(query), trie.contains(query));
        }
    }

    /// Property: same vocabulary, same bytes, whatever the insertion order.
    #[test]
    fn prop_serialization_deterministic(words in word_vec_strategy(30)) {
        let a: Trie = words.iter().cloned().collect();
        let b: Trie = words.iter().rev().cloned().collect();
        prop_assert_eq!(binary::serialize(&a).unwrap(), binary::serialize(&b).unwrap());
    }

    /// Property: fresh output always passes the marker check.
    #[test]
    fn prop_fresh_output_has_markers(words in word_vec_strategy(30)) {
        let bytes = binary::serialize(&words.iter().cloned().collect()).unwrap();
        prop_assert!(check_markers(&bytes).is_ok());
        prop_assert!(bytes.len() >= binary::MIN_FILE_SIZE);
    }

    /// Property: flipping any bit in any byte is rejected.
    #[test]
    fn prop_single_byte_corruption_detected(
        words in word_vec_strategy(20),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut bytes = binary::serialize(&words.iter().cloned().collect()).unwrap();
        let i = index.index(bytes.len());
        bytes[i] ^= 1 << bit;
        prop_assert!(binary::deserialize(&bytes).is_err(), "flip at {} undetected", i);
    }

    /// Property: truncation at any point is rejected.
    #[test]
    fn prop_truncation_detected(words in word_vec_strategy(20), index in any::<prop::sample::Index>()) {
        let bytes = binary::serialize(&words.iter().cloned().collect()).unwrap();
        let cut = index.index(bytes.len());
        prop_assert!(binary::deserialize(&bytes[..cut]).is_err());
    }

    /// Property: random bytes never panic, with or without a valid header.
    #[test]
    fn prop_garbage_never_panics(
        body in prop::collection::vec(any::<u8>(), 0..256),
        with_header in any::<bool>(),
    ) {
        let mut bytes = Vec::new();
        if with_header {
            bytes.extend_from_slice(&binary::MAGIC);
            bytes.push(binary::VERSION);
        }
        bytes.extend_from_slice(&body);
        let _ = binary::deserialize(&bytes);
        let _ = binary::read_header(&bytes);
        if bytes.len() >= TrieHeader::SIZE {
            let _ = binary::read_header(&bytes[..TrieHeader::SIZE]);
        }
    }
}
