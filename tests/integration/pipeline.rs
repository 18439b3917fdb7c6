//! End-to-end build pipeline tests.
//!
//! Sources are written to a temp directory, `run_build` turns them into a
//! word list and a trie, and the artifacts are read back and checked.

use std::fs;

use lexitrie::build::{
    load_trie, read_word_list, run_build, BuildConfig, SourceManifest, TRIE_EXTENSION,
};
use lexitrie::sources::{SourceFormat, SourcePolicy, SourceSpec};
use lexitrie::Error;

use crate::common::write_file;

const MOBY_TEXT: &str = "\
Moby Word Lists

1. Standard English Words
Aardvark
zebra
e-mail

2. Hyphenated Words
well-known
";

// ============================================================================
// HAPPY PATH
// ============================================================================

#[test]
fn test_build_three_sources_with_omit() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "Apple\nbanana\n\ncherry\n");
    let b = write_file(dir.path(), "b.txt", "banana\ndate\nnot-a-word\n");
    let moby = write_file(dir.path(), "moby.txt", MOBY_TEXT);
    let omit = write_file(dir.path(), "omit.txt", "date\nzebra\nnever-listed\n");

    let config = BuildConfig {
        sources: vec![
            SourceSpec::required("a", a),
            SourceSpec::system_dictionary(b),
            SourceSpec::moby(Some(moby)),
        ],
        omit: Some(omit),
        ..BuildConfig::new(dir.path().join("words.txt"))
    };
    let summary = run_build(&config).unwrap();

    let report = &summary.report;
    assert_eq!(report.sources.len(), 3);
    assert_eq!(report.sources[0].added, 3);
    assert_eq!(report.sources[1].added, 1);
    assert_eq!(report.sources[2].added, 2);
    assert_eq!(report.union_size, 6);
    assert_eq!(report.omitted, 2);
    assert_eq!(report.final_size, 4);

    let list = fs::read_to_string(&summary.word_list).unwrap();
    assert_eq!(list, "aardvark\napple\nbanana\ncherry\n");

    let trie = load_trie(&summary.trie).unwrap();
    for word in ["aardvark", "apple", "banana", "cherry"] {
        assert!(trie.contains(word), "{word}");
    }
    for word in ["date", "zebra", "well", "email", "app"] {
        assert!(!trie.contains(word), "{word}");
    }
    assert_eq!(summary.word_count, 4);
    assert_eq!(summary.node_count, trie.node_count());
    assert_eq!(summary.max_depth, 8);
    assert_eq!(
        summary.trie_bytes as u64,
        fs::metadata(&summary.trie).unwrap().len()
    );
}

#[test]
fn test_word_list_and_trie_agree() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(
        dir.path(),
        "src.txt",
        &lexitrie::testing::synthetic_words(500, 7).join("\n"),
    );
    let summary = run_build(&BuildConfig {
        sources: vec![SourceSpec::required("synthetic", source)],
        ..BuildConfig::new(dir.path().join("out.txt"))
    })
    .unwrap();

    let listed = read_word_list(&summary.word_list).unwrap();
    let trie = load_trie(&summary.trie).unwrap();
    assert_eq!(listed.to_sorted_strings(), trie.words());
    assert_eq!(listed.to_trie(), trie);
}

#[test]
fn test_default_and_explicit_trie_paths() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "s.txt", "cat\n");

    let summary = run_build(&BuildConfig {
        sources: vec![SourceSpec::required("s", source.clone())],
        ..BuildConfig::new(dir.path().join("words.txt"))
    })
    .unwrap();
    assert_eq!(
        summary.trie,
        dir.path().join(format!("words.{TRIE_EXTENSION}"))
    );
    assert!(summary.trie.exists());

    let explicit = dir.path().join("nested.bin");
    let summary = run_build(&BuildConfig {
        sources: vec![SourceSpec::required("s", source)],
        trie: Some(explicit.clone()),
        ..BuildConfig::new(dir.path().join("other.txt"))
    })
    .unwrap();
    assert_eq!(summary.trie, explicit);
    assert!(load_trie(&explicit).unwrap().contains("cat"));
}

#[test]
fn test_rebuild_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "delta\nalpha\ncharlie\n");
    let b = write_file(dir.path(), "b.txt", "bravo\nalpha\n");

    let build = |out: &str, sources: Vec<SourceSpec>| {
        run_build(&BuildConfig {
            sources,
            ..BuildConfig::new(dir.path().join(out))
        })
        .unwrap()
    };
    let first = build(
        "one.txt",
        vec![SourceSpec::required("a", &a), SourceSpec::required("b", &b)],
    );
    let second = build(
        "two.txt",
        vec![SourceSpec::required("b", &b), SourceSpec::required("a", &a)],
    );

    assert_eq!(
        fs::read(&first.trie).unwrap(),
        fs::read(&second.trie).unwrap()
    );
    assert_eq!(
        fs::read(&first.word_list).unwrap(),
        fs::read(&second.word_list).unwrap()
    );
}

// ============================================================================
// SOURCE POLICIES
// ============================================================================

#[test]
fn test_missing_system_dictionary_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "cat\n");

    let summary = run_build(&BuildConfig {
        sources: vec![
            SourceSpec::required("a", a),
            SourceSpec::system_dictionary(dir.path().join("no-such-dict")),
        ],
        ..BuildConfig::new(dir.path().join("words.txt"))
    })
    .unwrap();

    assert_eq!(summary.word_count, 1);
    assert_eq!(summary.report.sources[1].offered, 0);
}

#[test]
fn test_moby_without_path_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "cat\n");

    let summary = run_build(&BuildConfig {
        sources: vec![SourceSpec::required("a", a), SourceSpec::moby(None)],
        ..BuildConfig::new(dir.path().join("words.txt"))
    })
    .unwrap();
    assert_eq!(summary.report.sources[1].name, "moby");
    assert_eq!(summary.report.sources[1].added, 0);
}

#[test]
fn test_supplied_moby_path_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "cat\n");

    let result = run_build(&BuildConfig {
        sources: vec![
            SourceSpec::required("a", a),
            SourceSpec::moby(Some(dir.path().join("missing-moby.txt"))),
        ],
        ..BuildConfig::new(dir.path().join("words.txt"))
    });
    assert!(
        matches!(result, Err(Error::SourceUnavailable { ref name, .. }) if name == "moby"),
        "{result:?}"
    );
    assert!(!dir.path().join("words.txt").exists());
}

#[test]
fn test_moby_file_without_section_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "cat\n");
    let moby = write_file(dir.path(), "moby.txt", "just\nsome\nwords\n");

    let result = run_build(&BuildConfig {
        sources: vec![SourceSpec::required("a", a), SourceSpec::moby(Some(moby))],
        ..BuildConfig::new(dir.path().join("words.txt"))
    });
    assert!(matches!(result, Err(Error::SourceUnavailable { .. })));
}

#[test]
fn test_required_source_missing_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_build(&BuildConfig {
        sources: vec![SourceSpec::required("core", dir.path().join("absent.txt"))],
        ..BuildConfig::new(dir.path().join("words.txt"))
    });
    match result {
        Err(Error::SourceUnavailable { name, reason }) => {
            assert_eq!(name, "core");
            assert!(reason.contains("absent.txt"), "{reason}");
        }
        other => panic!("expected SourceUnavailable, got {other:?}"),
    }
}

#[test]
fn test_required_source_with_no_valid_words_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let junk = write_file(dir.path(), "junk.txt", "123\nfoo-bar\n\n");
    let result = run_build(&BuildConfig {
        sources: vec![SourceSpec::required("junk", junk)],
        ..BuildConfig::new(dir.path().join("words.txt"))
    });
    assert!(matches!(result, Err(Error::SourceUnavailable { .. })));
}

#[test]
fn test_no_sources_is_empty_vocabulary() {
    let dir = tempfile::tempdir().unwrap();
    let result = run_build(&BuildConfig::new(dir.path().join("words.txt")));
    assert!(matches!(result, Err(Error::EmptyVocabulary)));
}

#[test]
fn test_omit_everything_still_writes_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "cat\ndog\n");
    let omit = write_file(dir.path(), "omit.txt", "dog\ncat\n");

    let summary = run_build(&BuildConfig {
        sources: vec![SourceSpec::required("a", a)],
        omit: Some(omit),
        ..BuildConfig::new(dir.path().join("words.txt"))
    })
    .unwrap();

    assert_eq!(summary.word_count, 0);
    assert_eq!(fs::read_to_string(&summary.word_list).unwrap(), "");
    let trie = load_trie(&summary.trie).unwrap();
    assert!(trie.is_empty());
}

// ============================================================================
// MANIFEST
// ============================================================================

#[test]
fn test_manifest_drives_build() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("lists")).unwrap();
    write_file(&dir.path().join("lists"), "core.txt", "cat\ndog\n");
    write_file(&dir.path().join("lists"), "moby.txt", MOBY_TEXT);
    write_file(dir.path(), "omit.txt", "dog\n");
    let manifest_path = write_file(
        dir.path(),
        "sources.json",
        r#"{
            "version": 1,
            "sources": [
                { "name": "core", "path": "lists/core.txt" },
                { "name": "moby", "path": "lists/moby.txt", "format": "moby", "policy": "optional" },
                { "name": "extra", "path": "lists/absent.txt", "policy": "best-effort" }
            ],
            "omit": "omit.txt"
        }"#,
    );

    let manifest = SourceManifest::load(&manifest_path).unwrap();
    let specs = manifest.source_specs();
    assert_eq!(specs[1].format, SourceFormat::Moby);
    assert_eq!(specs[1].policy, SourcePolicy::Optional);
    assert_eq!(specs[2].policy, SourcePolicy::BestEffort);

    let summary = run_build(&BuildConfig {
        sources: specs,
        omit: manifest.omit.clone(),
        ..BuildConfig::new(dir.path().join("words.txt"))
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(&summary.word_list).unwrap(),
        "aardvark\ncat\nzebra\n"
    );
    assert_eq!(summary.report.sources[2].offered, 0);
}

#[test]
fn test_manifest_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write_file(dir.path(), "bad.json", r#"{ "version": 9, "sources": [] }"#);

    match SourceManifest::load(&bad) {
        Err(Error::InvalidManifest { path, reason }) => {
            assert_eq!(path, bad);
            assert!(reason.contains("version"), "{reason}");
        }
        other => panic!("expected InvalidManifest, got {other:?}"),
    }

    let missing = dir.path().join("missing.json");
    assert!(matches!(
        SourceManifest::load(&missing),
        Err(Error::InvalidManifest { .. })
    ));
}
