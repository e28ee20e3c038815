//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "comic-viewer",
    version,
    about = "Browse a comic catalog and drive viewer sessions",
    long_about = "Browse a comic catalog and drive viewer sessions.\n\n\
                  Comics open in single-view, paged, or auto-play mode; signed-in\n\
                  users (--user) can toggle favorites."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON catalog of comics and favorites.
    #[arg(
        long = "catalog",
        value_name = "FILE",
        default_value = "catalog.json",
        global = true
    )]
    pub catalog: PathBuf,

    /// Viewer settings (default: platform config directory).
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Output format for command results.
    #[arg(long = "output", value_enum, default_value = "table", global = true)]
    pub output: OutputArg,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List comics, newest first.
    List(ListArgs),

    /// Show one comic's details.
    Show(ShowArgs),

    /// Open a comic in a viewer session and print the resulting state.
    View(ViewArgs),

    /// List a user's favorite comics.
    Favorites(FavoritesArgs),

    /// List the supported view modes.
    Modes,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Case-insensitive title substring or exact tag.
    #[arg(long = "search", value_name = "TERM")]
    pub search: Option<String>,

    /// Maximum number of comics to list.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Parser)]
pub struct ShowArgs {
    #[arg(value_name = "COMIC_ID")]
    pub id: String,
}

#[derive(Parser)]
pub struct ViewArgs {
    #[arg(value_name = "COMIC_ID")]
    pub id: String,

    /// View mode id (single-view, paged, auto-play; legacy ids accepted).
    ///
    /// Unknown ids fall back to single-view. Defaults to the configured
    /// default mode.
    #[arg(long = "mode", value_name = "MODE")]
    pub mode: Option<String>,

    /// Signed-in user id.
    #[arg(long = "user", value_name = "USER_ID")]
    pub user: Option<String>,

    /// Let auto-play run for this many periods before reporting.
    #[arg(long = "ticks", value_name = "N", default_value_t = 0)]
    pub ticks: u32,

    /// Manual forward steps (paged mode only).
    #[arg(long = "next", value_name = "N", default_value_t = 0)]
    pub next: u32,

    /// Manual backward steps, applied after --next (paged mode only).
    #[arg(long = "prev", value_name = "N", default_value_t = 0)]
    pub prev: u32,

    /// Toggle the favorite flag and save the catalog on success.
    #[arg(long = "favorite")]
    pub favorite: bool,
}

#[derive(Parser)]
pub struct FavoritesArgs {
    #[arg(long = "user", value_name = "USER_ID")]
    pub user: String,
}

/// Command result format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
