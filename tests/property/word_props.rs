//! Canonical form properties.
//!
//! - Whatever goes in, anything that comes out of canonicalization is `^[a-z]+$`
//! - Canonicalization is idempotent
//! - Case never decides acceptance, only letters do

use proptest::prelude::*;

use lexitrie::{canonicalize, is_canonical, Word, WordSet};

use crate::common::raw_line_strategy;

fn matches_canonical_regex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: canonicalize only ever returns canonical words.
    #[test]
    fn prop_canonicalize_output_is_canonical(raw in raw_line_strategy()) {
        if let Some(word) = canonicalize(&raw) {
            prop_assert!(matches_canonical_regex(&word), "{:?} -> {:?}", raw, word);
            prop_assert!(is_canonical(&word));
        }
    }

    /// Property: canonicalize(canonicalize(x)) == canonicalize(x).
    #[test]
    fn prop_canonicalize_idempotent(raw in raw_line_strategy()) {
        if let Some(word) = canonicalize(&raw) {
            prop_assert_eq!(canonicalize(&word), Some(word));
        }
    }

    /// Property: upper and lower case spellings are accepted or rejected together.
    #[test]
    fn prop_case_is_normalized_not_rejected(raw in "[a-zA-Z]{1,12}") {
        let lower = canonicalize(&raw.to_ascii_lowercase());
        let upper = canonicalize(&raw.to_ascii_uppercase());
        prop_assert_eq!(&lower, &upper);
        prop_assert_eq!(lower, Some(raw.to_ascii_lowercase()));
    }

    /// Property: anything with a non-letter inside is rejected.
    #[test]
    fn prop_inner_non_letter_rejected(
        head in "[a-z]{1,5}",
        junk in "[-'0-9_. ]",
        tail in "[a-z]{1,5}",
    ) {
        let raw = format!("{head}{junk}{tail}");
        prop_assert_eq!(canonicalize(&raw), None);
        prop_assert!(Word::new(raw).is_err());
    }

    /// Property: a WordSet holds only canonical words, and every non-blank
    /// line is either kept or counted as rejected.
    #[test]
    fn prop_word_set_accounts_for_every_line(
        lines in prop::collection::vec(raw_line_strategy(), 0..50),
    ) {
        let set = WordSet::from_lines(&lines);
        prop_assert!(set.iter().all(|w| matches_canonical_regex(w.as_str())));

        let non_blank = lines.iter().filter(|l| !l.trim().is_empty()).count();
        let accepted = lines.iter().filter(|l| canonicalize(l).is_some()).count();
        prop_assert_eq!(set.rejected(), non_blank - accepted);
        prop_assert!(set.len() <= accepted);
    }
}
