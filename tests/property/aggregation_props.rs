//! Aggregation properties.
//!
//! - aggregate(S1..Sn, O) == (S1 ∪ ... ∪ Sn) \ O
//! - Source order changes the report, never the vocabulary
//! - The per-source deltas add up to the union size
//! - Only an empty union is an error

use proptest::prelude::*;

use lexitrie::{aggregate, Error, WordSet};

use crate::common::{model_vocabulary, sources_strategy, to_named, word_vec_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: union minus omit, against a BTreeSet model.
    #[test]
    fn prop_union_minus_omit(
        sources in sources_strategy(6, 30),
        omit in word_vec_strategy(20),
    ) {
        let named = to_named(&sources);
        let omit_set = WordSet::from_lines(&omit);
        let expected = model_vocabulary(&sources, &omit);
        let union_is_empty = sources.iter().all(Vec::is_empty);

        match aggregate(&named, &omit_set) {
            Ok(agg) => {
                prop_assert!(!union_is_empty);
                prop_assert_eq!(agg.vocabulary.to_sorted_strings(), expected);
            }
            Err(Error::EmptyVocabulary) => prop_assert!(union_is_empty),
            Err(e) => prop_assert!(false, "unexpected error {}", e),
        }
    }

    /// Property: reversing the sources gives the same vocabulary.
    #[test]
    fn prop_source_order_irrelevant_to_result(
        sources in sources_strategy(5, 20),
        omit in word_vec_strategy(10),
    ) {
        prop_assume!(sources.iter().any(|s| !s.is_empty()));
        let omit = WordSet::from_lines(&omit);

        let forward = aggregate(&to_named(&sources), &omit).unwrap();
        let mut reversed_sources = sources.clone();
        reversed_sources.reverse();
        let backward = aggregate(&to_named(&reversed_sources), &omit).unwrap();

        prop_assert_eq!(forward.vocabulary, backward.vocabulary);
    }

    /// Property: deltas sum to the union, and the report is reproducible.
    #[test]
    fn prop_report_deltas_sum_to_union(sources in sources_strategy(6, 30)) {
        prop_assume!(sources.iter().any(|s| !s.is_empty()));
        let named = to_named(&sources);

        let agg = aggregate(&named, &WordSet::new()).unwrap();
        let report = &agg.report;
        let added: usize = report.sources.iter().map(|s| s.added).sum();
        prop_assert_eq!(added, report.union_size);
        prop_assert_eq!(report.sources.len(), sources.len());
        prop_assert_eq!(report.final_size, agg.vocabulary.len());

        let again = aggregate(&named, &WordSet::new()).unwrap();
        prop_assert_eq!(&again.report, report);
    }

    /// Property: the running union size never shrinks.
    #[test]
    fn prop_union_size_monotonic(sources in sources_strategy(6, 30)) {
        prop_assume!(sources.iter().any(|s| !s.is_empty()));
        let report = aggregate(&to_named(&sources), &WordSet::new()).unwrap().report;
        for pair in report.sources.windows(2) {
            prop_assert!(pair[0].union_size <= pair[1].union_size);
            prop_assert_eq!(pair[1].union_size, pair[0].union_size + pair[1].added);
        }
    }

    /// Property: omitting everything leaves an empty vocabulary, not an error.
    #[test]
    fn prop_omit_everything(sources in sources_strategy(4, 20)) {
        prop_assume!(sources.iter().any(|s| !s.is_empty()));
        let all: Vec<String> = sources.iter().flatten().cloned().collect();
        let agg = aggregate(&to_named(&sources), &WordSet::from_lines(&all)).unwrap();
        prop_assert!(agg.vocabulary.is_empty());
        prop_assert_eq!(agg.report.omitted, agg.report.union_size);
    }
}
