//! Worked examples, end to end: build from files, then validate tokens
//! against the trie that was written.

use std::fs;

use lexitrie::build::{load_trie, run_build, BuildConfig};
use lexitrie::sources::SourceSpec;
use lexitrie::validate::{read_tokens, validate_tokens, Verdict};
use lexitrie::{aggregate, Trie};

use crate::common::{named, word_set, write_file};

/// Build from {"dog","cat"} and {"cat","fish"} minus {"fish"}.
fn build_cat_dog(dir: &std::path::Path) -> Trie {
    let a = write_file(dir, "a.txt", "dog\ncat\n");
    let b = write_file(dir, "b.txt", "cat\nfish\n");
    let omit = write_file(dir, "omit.txt", "fish\n");

    let summary = run_build(&BuildConfig {
        sources: vec![SourceSpec::required("a", a), SourceSpec::required("b", b)],
        omit: Some(omit),
        ..BuildConfig::new(dir.join("words.txt"))
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(&summary.word_list).unwrap(),
        "cat\ndog\n"
    );
    load_trie(&summary.trie).unwrap()
}

#[test]
fn test_union_minus_omit_in_memory() {
    let agg = aggregate(
        &[named("a", &["dog", "cat"]), named("b", &["cat", "fish"])],
        &word_set(&["fish"]),
    )
    .unwrap();
    assert_eq!(agg.vocabulary.to_sorted_strings(), vec!["cat", "dog"]);

    let trie = agg.vocabulary.to_trie();
    assert!(trie.contains("dog"));
    assert!(!trie.contains("do"));
    assert!(!trie.contains("fish"));
}

#[test]
fn test_build_then_query() {
    let dir = tempfile::tempdir().unwrap();
    let trie = build_cat_dog(dir.path());

    assert!(trie.contains("cat"));
    assert!(trie.contains("dog"));
    assert!(!trie.contains("do"));
    assert!(!trie.contains("fish"));
    assert!(!trie.contains(""));
    assert!(!trie.contains("DOG"));
    assert!(!trie.contains("dogs"));
}

#[test]
fn test_validate_mixed_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let trie = build_cat_dog(dir.path());

    let report = validate_tokens(&trie, ["Cat", "xyz123", "dog"]);
    let outcomes: Vec<Option<bool>> = report.results.iter().map(|r| r.verdict.as_bool()).collect();
    assert_eq!(outcomes, vec![Some(true), None, Some(true)]);
    assert_eq!(report.results[0].word.as_deref(), Some("cat"));
    assert_eq!((report.found, report.not_found, report.invalid), (2, 0, 1));
    assert!(report.has_valid_tokens());
}

#[test]
fn test_validate_file_of_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let trie = build_cat_dog(dir.path());
    let tokens = write_file(dir.path(), "tokens.txt", "  DOG \n\nbird\nc@t\ncat\ncat\n");

    let report = validate_tokens(&trie, read_tokens(&tokens).unwrap());

    let lines: Vec<usize> = report.results.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![1, 3, 4, 5, 6]);
    assert_eq!(report.results[0].verdict, Verdict::Found);
    assert_eq!(report.results[1].verdict, Verdict::NotFound);
    assert!(matches!(report.results[2].verdict, Verdict::Invalid { .. }));
    assert_eq!(report.found, 3);
    assert_eq!(report.valid(), 4);
}

#[test]
fn test_validate_only_invalid_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let trie = build_cat_dog(dir.path());

    let report = validate_tokens(&trie, ["123", "-", "two words"]);
    assert_eq!(report.invalid, 3);
    assert!(!report.has_valid_tokens());
}

#[test]
fn test_prefix_is_not_a_word_after_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "do\ndog\ndogs\n");
    let summary = run_build(&BuildConfig {
        sources: vec![SourceSpec::required("a", a)],
        ..BuildConfig::new(dir.path().join("words.txt"))
    })
    .unwrap();

    let trie = load_trie(&summary.trie).unwrap();
    assert!(trie.contains("do"));
    assert!(trie.contains("dog"));
    assert!(trie.contains("dogs"));
    assert!(!trie.contains("d"));
    assert!(!trie.contains("dogsy"));
    assert!(trie.has_prefix("d"));
}
