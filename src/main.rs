// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lexitrie::binary::{self, TrieFooter, TrieHeader};
use lexitrie::build::{self, BuildConfig, BuildSummary, SourceManifest};
use lexitrie::sources::{SourceSpec, SYSTEM_DICTIONARY};
use lexitrie::validate::{read_tokens, validate_tokens, Verdict};

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

/// Log filter variable; defaults to `info`
const LOG_ENV: &str = "LEXITRIE_LOG";

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let (stage, result) = match cli.command {
        Commands::Build {
            output,
            manifest,
            sources,
            system_dict,
            no_system_dict,
            moby,
            omit,
            trie_output,
            json,
        } => {
            let config = BuildArgs {
                output,
                manifest,
                sources,
                system_dict,
                no_system_dict,
                moby,
                omit,
                trie_output,
            };
            ("build", run_build(config, json))
        }
        Commands::Validate {
            trie,
            validate_file,
            json,
        } => ("validate", run_validate(&trie, &validate_file, json)),
        Commands::Inspect { file } => ("inspect", inspect_trie_file(&file)),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {stage}: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

type CliResult = Result<ExitCode, Box<dyn std::error::Error>>;

// ═══════════════════════════════════════════════════════════════════════════
// BUILD
// ═══════════════════════════════════════════════════════════════════════════

struct BuildArgs {
    output: PathBuf,
    manifest: Option<PathBuf>,
    sources: Vec<(String, PathBuf)>,
    system_dict: Option<PathBuf>,
    no_system_dict: bool,
    moby: Option<PathBuf>,
    omit: Option<PathBuf>,
    trie_output: Option<PathBuf>,
}

/// Source names owned by dedicated flags.
const SYSTEM_DICT_SOURCE: &str = "system-dict";
const MOBY_SOURCE: &str = "moby";

#[derive(Debug, Error)]
enum ArgsError {
    #[error("--source name '{name}' is reserved, use {flag} instead")]
    ReservedSourceName { name: String, flag: &'static str },

    #[error("source name '{0}' is given more than once")]
    DuplicateSource(String),

    #[error(transparent)]
    Lexitrie(#[from] lexitrie::Error),
}

/// Sources in merge order: manifest, then `--source`, then the system
/// dictionary, then Moby. Flags override what the manifest says.
fn build_config(args: BuildArgs) -> Result<BuildConfig, ArgsError> {
    let mut config = BuildConfig::new(args.output);
    config.trie = args.trie_output;

    if let Some(path) = &args.manifest {
        let manifest = SourceManifest::load(path)?;
        config.sources = manifest.source_specs();
        config.omit = manifest.omit;
    }
    for (name, path) in args.sources {
        let flag = match name.as_str() {
            SYSTEM_DICT_SOURCE => Some("--system-dict"),
            MOBY_SOURCE => Some("--moby"),
            _ => None,
        };
        if let Some(flag) = flag {
            return Err(ArgsError::ReservedSourceName { name, flag });
        }
        if config.sources.iter().any(|s| s.name == name) {
            return Err(ArgsError::DuplicateSource(name));
        }
        config.sources.push(SourceSpec::required(name, path));
    }

    match config.sources.iter().position(|s| s.name == SYSTEM_DICT_SOURCE) {
        Some(_) if args.no_system_dict => {
            info!("--no-system-dict set, dropping the manifest's system-dict source");
            config.sources.retain(|s| s.name != SYSTEM_DICT_SOURCE);
        }
        Some(i) => {
            if let Some(path) = args.system_dict {
                info!(path = %path.display(), "--system-dict overrides the manifest path");
                config.sources[i].path = Some(path);
            }
        }
        None if args.no_system_dict => {}
        None => {
            let path = args.system_dict.unwrap_or_else(|| SYSTEM_DICTIONARY.into());
            config.sources.push(SourceSpec::system_dictionary(path));
        }
    }
    match config.sources.iter().position(|s| s.name == MOBY_SOURCE) {
        Some(i) if args.moby.is_some() => config.sources[i].path = args.moby,
        Some(_) => {}
        None => config.sources.push(SourceSpec::moby(args.moby)),
    }

    if args.omit.is_some() {
        config.omit = args.omit;
    }
    config.progress = atty::is(atty::Stream::Stderr);
    Ok(config)
}

fn run_build(args: BuildArgs, json: bool) -> CliResult {
    let config = build_config(args)?;
    let summary = build::run_build(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_build_summary(&summary);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_build_summary(summary: &BuildSummary) {
    let report = &summary.report;

    println!();
    banner("LEXITRIE BUILD");
    println!();

    section_top("SOURCES");
    row(&format!(
        " {} {} {} {}",
        pad_right(&themed(GRAY, &[], "name"), 24),
        pad_left(&themed(GRAY, &[], "offered"), 12),
        pad_left(&themed(GRAY, &[], "added"), 12),
        pad_left(&themed(GRAY, &[], "union"), 12),
    ));
    for source in &report.sources {
        row(&format!(
            " {} {} {} {}",
            pad_right(&truncate_path(&source.name, 24), 24),
            pad_left(&source.offered.to_string(), 12),
            pad_left(&delta(source.added), 12),
            pad_left(&source.union_size.to_string(), 12),
        ));
    }

    section_mid("VOCABULARY");
    field("union", &report.union_size.to_string());
    field("omit list", &report.omit_size.to_string());
    field("omitted", &report.omitted.to_string());
    field("final", &themed(GREEN, &[BOLD], &report.final_size.to_string()));

    let list_bytes = fs::metadata(&summary.word_list)
        .map(|m| m.len() as usize)
        .unwrap_or(0);
    section_mid("ARTIFACTS");
    field(
        "word list",
        &format!(
            "{} ({})",
            truncate_path(&summary.word_list.display().to_string(), 32),
            format_size(list_bytes)
        ),
    );
    field(
        "trie",
        &format!(
            "{} ({})",
            truncate_path(&summary.trie.display().to_string(), 32),
            format_size(summary.trie_bytes)
        ),
    );
    field("vs word list", &savings_colored(list_bytes, summary.trie_bytes));
    field(
        "nodes / depth",
        &format!("{} / {}", summary.node_count, summary.max_depth),
    );
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// VALIDATE
// ═══════════════════════════════════════════════════════════════════════════

fn run_validate(trie_path: &Path, tokens_path: &Path, json: bool) -> CliResult {
    let trie = build::load_trie(trie_path)?;
    let tokens = read_tokens(tokens_path)?;
    let report = validate_tokens(&trie, &tokens);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for result in &report.results {
            match &result.verdict {
                Verdict::Invalid { reason } => eprintln!(
                    "{} skipping invalid word '{}' on line {}: {}",
                    themed(YELLOW, &[BOLD], "warning:"),
                    result.token,
                    result.line,
                    reason
                ),
                verdict => {
                    let found = verdict.as_bool().unwrap_or(false);
                    let word = result.word.as_deref().unwrap_or(&result.token);
                    writeln!(out, "{}: {}", word, verdict_label(found))?;
                }
            }
        }
        out.flush()?;
        eprintln!(
            "{} found, {} not found, {} invalid",
            report.found, report.not_found, report.invalid
        );
    }

    if !report.has_valid_tokens() {
        eprintln!("no valid words found in {}", tokens_path.display());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn inspect_trie_file(path: &Path) -> CliResult {
    let bytes = fs::read(path)
        .map_err(|e| format!("could not read {}: {}", path.display(), e))?;

    println!();
    banner("LEXITRIE INSPECT");
    println!();

    section_top("FILE");
    field("path", &truncate_path(&path.display().to_string(), 44));
    field("size", &format_size(bytes.len()));
    let markers = binary::check_markers(&bytes);
    field("leading marker", &status(markers.leading_ok(), "mismatch"));
    field("terminator", &status(markers.trailing_ok(), "mismatch"));

    section_mid("HEADER");
    let header = match binary::read_header(&bytes) {
        Ok(header) => header,
        Err(e) => {
            field("status", &themed(RED, &[BOLD], &e.to_string()));
            section_bot();
            return Ok(ExitCode::FAILURE);
        }
    };
    field("version", &header.version.to_string());
    field("flags", &format!("{:#04x}", header.flags));
    field("nodes", &header.node_count.to_string());
    field("words", &header.word_count.to_string());
    field("max depth", &header.max_depth.to_string());

    section_mid("INTEGRITY");
    if bytes.len() >= TrieHeader::SIZE + TrieFooter::SIZE {
        let content = &bytes[..bytes.len() - TrieFooter::SIZE];
        let computed = TrieFooter::compute_crc32(content);
        let stored = TrieFooter::read(&bytes).map(|f| f.crc32).ok();
        let crc_ok = stored == Some(computed);
        field("crc32", &format!("{:08x} {}", computed, status(crc_ok, "mismatch")));
    }
    let decoded = binary::deserialize(&bytes);
    match &decoded {
        Ok(trie) => {
            field("decode", &status(true, ""));
            field(
                "stream",
                &format!(
                    "{} nodes, {} words, depth {}",
                    trie.node_count(),
                    trie.len(),
                    trie.max_depth()
                ),
            );
        }
        Err(e) => field("decode", &themed(RED, &[BOLD], &e.to_string())),
    }

    section_mid("SIZE");
    let compressed = brotli_size(&bytes)?;
    field("raw", &format_size(bytes.len()));
    field(
        "brotli",
        &format!("{} {}", format_size(compressed), savings_colored(bytes.len(), compressed)),
    );
    section_bot();

    Ok(if decoded.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn brotli_size(data: &[u8]) -> std::io::Result<usize> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder.write_all(data)?;
    }
    Ok(compressed.len())
}
