// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word list parsing on arbitrary text, both plain and Moby layouts.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lexitrie::is_canonical;
use lexitrie::sources::{parse_moby_section, parse_plain};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let plain = parse_plain(&text);
    let moby = parse_moby_section(&text);

    for word in plain.iter().chain(moby.iter()) {
        assert!(is_canonical(word.as_str()), "non-canonical word {word:?}");
    }
    // The Moby section is a run of lines from the same text
    assert!(moby.len() <= plain.len());
});
