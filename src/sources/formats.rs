// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Line-oriented word list parsers.

use crate::word::WordSet;

const MOBY_SECTION_START: &str = "1. Standard English Words";

/// One word per line. Every non-blank line is a candidate.
pub fn parse_plain(text: &str) -> WordSet {
    WordSet::from_lines(text.lines())
}

/// The "Standard English Words" section of the Moby word lists e-text.
///
/// Reading starts after the line whose trimmed text begins with
/// `1. Standard English Words` and stops at the first blank line or at the
/// `2. Hyphenated Words` heading, whichever comes first. Everything outside
/// the section is ignored, so a file without the heading yields nothing.
pub fn parse_moby_section(text: &str) -> WordSet {
    let section = text
        .lines()
        .skip_while(|line| !line.trim().starts_with(MOBY_SECTION_START))
        .skip(1)
        .take_while(|line| !line.trim().is_empty() && !is_hyphenated_heading(line));
    WordSet::from_lines(section)
}

/// Matches `2.` followed by whitespace and "Hyphenated Words", any case.
fn is_hyphenated_heading(line: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix("2.") else {
        return false;
    };
    let title = rest.trim_start();
    if title.len() == rest.len() {
        return false;
    }
    title
        .get(..16)
        .is_some_and(|t| t.eq_ignore_ascii_case("hyphenated words"))
}
