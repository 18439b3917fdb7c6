// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Aggregated English word lists compiled into a checksummed prefix trie.
//!
//! A build takes several word lists, keeps only canonical words (`a`-`z`,
//! lowercased), unions them, subtracts an omit list, and writes two
//! artifacts: the sorted word list and a binary trie. A separate validation
//! run loads the trie and answers exact-word membership queries.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌─────────────┐    ┌───────────┐    ┌────────────┐
//! │ sources.rs │───▶│ aggregate.rs│───▶│  trie.rs  │───▶│ binary/    │
//! │ (policies, │    │ (union, omit│    │ (insert,  │    │ (header,   │
//! │  formats)  │    │  report)    │    │  contains)│    │  nodes,crc)│
//! └────────────┘    └─────────────┘    └───────────┘    └────────────┘
//!        ▲                                    ▲                │
//!        │            ┌──────────┐            │                ▼
//!        └────────────│ build/   │────────────┘         ┌────────────┐
//!                     │ (driver, │                      │ validate.rs│
//!                     │ artifacts)                      │ (verdicts) │
//!                     └──────────┘                      └────────────┘
//! ```
//!
//! # Invariants
//!
//! - Every word in a [`WordSet`], a [`Vocabulary`] or a [`Trie`] matches `^[a-z]+$`
//! - `aggregate(S1..Sn, O) == (S1 ∪ ... ∪ Sn) \ O`, and an empty union is an error
//! - `deserialize(serialize(t)) == t`, and `contains` is exact-word, not prefix
//!
//! # Usage
//!
//! ```
//! use lexitrie::{aggregate, binary, NamedWordSet, WordSet};
//!
//! let sources = [
//!     NamedWordSet::new("a", WordSet::from_lines(["dog", "cat"])),
//!     NamedWordSet::new("b", WordSet::from_lines(["cat", "fish"])),
//! ];
//! let omit = WordSet::from_lines(["fish"]);
//!
//! let vocabulary = aggregate(&sources, &omit)?.vocabulary;
//! assert_eq!(vocabulary.to_sorted_strings(), ["cat", "dog"]);
//!
//! let bytes = binary::serialize(&vocabulary.to_trie()).unwrap();
//! let trie = binary::deserialize(&bytes).unwrap();
//! assert!(trie.contains("dog"));
//! assert!(!trie.contains("do"));
//! # Ok::<(), lexitrie::Error>(())
//! ```

pub mod aggregate;
pub mod binary;
pub mod build;
pub mod error;
pub mod sources;
pub mod testing;
pub mod trie;
pub mod validate;
pub mod word;

pub use aggregate::{aggregate, Aggregation, AggregationReport, NamedWordSet, Vocabulary};
pub use error::{Error, Result};
pub use trie::{Trie, TrieNode};
pub use validate::{check_token, validate_tokens, ValidationReport, Verdict};
pub use word::{canonicalize, is_canonical, Word, WordSet};
