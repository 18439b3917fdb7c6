// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Source loading, in parallel when the `parallel` feature is on.
//!
//! Reading and canonicalizing a few hundred thousand lines per source is the
//! slow part of a build, and the sources are independent of each other. Rayon's
//! indexed `par_iter().collect()` keeps results in input order, so the merge
//! that follows sees the sources in declared order either way. Every source is
//! loaded to completion, then the error of the earliest failing source in
//! declared order is returned; best-effort sources never produce one.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use crate::aggregate::NamedWordSet;
use crate::error::Result;
use crate::sources::{load_source, SourceSpec};

/// Load every source, keeping declared order.
pub fn load_sources(specs: &[SourceSpec]) -> Result<Vec<NamedWordSet>> {
    #[cfg(feature = "parallel")]
    let loaded: Vec<_> = specs.par_iter().map(load_source).collect();
    #[cfg(not(feature = "parallel"))]
    let loaded: Vec<_> = specs.iter().map(load_source).collect();
    first_error(loaded)
}

/// Sequential collect stops at the first `Err`, which is the earliest source.
fn first_error(loaded: Vec<Result<NamedWordSet>>) -> Result<Vec<NamedWordSet>> {
    loaded.into_iter().collect()
}

/// Load every source, ticking `progress` as each one finishes.
#[cfg(feature = "parallel")]
pub fn load_sources_with_progress(
    specs: &[SourceSpec],
    progress: &ProgressBar,
) -> Result<Vec<NamedWordSet>> {
    let loaded: Vec<_> = specs
        .par_iter()
        .map(|spec| {
            let loaded = load_source(spec);
            if let Ok(set) = &loaded {
                progress.set_message(format!("{} ({} words)", set.name, set.words.len()));
            }
            progress.inc(1);
            loaded
        })
        .collect();
    first_error(loaded)
}
