// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the lexitrie command-line interface.
//!
//! Three subcommands: `build` to aggregate sources into a word list and a
//! trie, `validate` to check tokens against a trie, and `inspect` to examine
//! a `.ltrie` file.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lexitrie",
    about = "Aggregate English word lists into a checksummed prefix trie",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge word lists, write the sorted union, and serialize it as a trie
    Build {
        /// Word list output (one word per line, sorted). Overwritten if it exists.
        #[arg(short, long)]
        output: PathBuf,

        /// JSON manifest listing sources, their formats and policies
        #[arg(short = 's', long)]
        manifest: Option<PathBuf>,

        /// Required plain word list, as NAME=PATH (repeatable)
        #[arg(long = "source", value_name = "NAME=PATH", value_parser = parse_named_path)]
        sources: Vec<(String, PathBuf)>,

        /// System dictionary, used if present
        #[arg(long, value_name = "PATH", conflicts_with = "no_system_dict")]
        system_dict: Option<PathBuf>,

        /// Do not read the system dictionary
        #[arg(long)]
        no_system_dict: bool,

        /// Moby word lists e-text; only the standard English section is read
        #[arg(short, long)]
        moby: Option<PathBuf>,

        /// Words to leave out of the result (one per line)
        #[arg(short = 'x', long)]
        omit: Option<PathBuf>,

        /// Trie output. Defaults to the word list path with a .ltrie extension.
        #[arg(short = 'r', long)]
        trie_output: Option<PathBuf>,

        /// Print the build summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check each token in a file against a trie
    Validate {
        /// Serialized trie (.ltrie)
        #[arg(short, long)]
        trie: PathBuf,

        /// Tokens to check, one per line
        #[arg(short, long)]
        validate_file: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect a .ltrie file structure
    Inspect {
        /// Path to .ltrie file
        file: PathBuf,
    },
}

fn parse_named_path(s: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got '{s}'"))?;
    if name.is_empty() || path.is_empty() {
        return Err(format!("expected NAME=PATH, got '{s}'"));
    }
    Ok((name.to_string(), PathBuf::from(path)))
}
