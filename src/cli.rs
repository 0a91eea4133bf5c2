// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The watch directory normally comes from `TIDDLER_PATH`; `clap`'s `env`
//! feature lets the flag and the variable share one field.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `tiddlytime`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "tiddlytime",
    version,
    about = "Send WakaTime heartbeats while you edit a TiddlyWiki folder.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory of `.tid` files to watch.
    #[arg(long, env = "TIDDLER_PATH", value_name = "DIR")]
    pub wiki_dir: Option<PathBuf>,

    /// Optional TOML file with heartbeat / watch overrides.
    #[arg(long, env = "TIDDLYTIME_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the `wakatime-cli` binary.
    ///
    /// Default: `~/.wakatime/wakatime-cli-<os>-<arch>`.
    #[arg(long, value_name = "PATH")]
    pub cli_path: Option<PathBuf>,

    /// Project name to report, skipping the site title lookup.
    #[arg(long, value_name = "NAME")]
    pub project: Option<String>,

    /// Heartbeat category (default: "coding").
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TIDDLYTIME_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the settings, but don't watch anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
