//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// pagenote - per-page notes keyed by canonical URL
#[derive(Parser, Debug)]
#[command(name = "pagenote", version, about, long_about = None)]
pub struct Cli {
    /// Notes database (overrides config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Keep notes in memory for this run only
    #[arg(long, global = true, conflicts_with = "db")]
    pub memory: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the canonical identity of a URL
    Canon(CanonArgs),

    /// Show the note for a URL
    Get(GetArgs),

    /// Create or update the note for a URL
    Save(SaveArgs),

    /// Delete the note for a URL
    #[command(name = "rm")]
    Remove(RemoveArgs),

    /// List notes, most recently updated first
    #[command(name = "ls")]
    List(ListArgs),

    /// Report storage usage against the quota
    Quota(QuotaArgs),

    /// Export all notes as JSON
    Export(ExportArgs),

    /// Run as the browser's native messaging host
    Host,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `canon` command
#[derive(Parser, Debug)]
pub struct CanonArgs {
    /// Page URL
    pub url: String,
}

/// Arguments for the `get` command
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Page URL (any variant of it)
    pub url: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `save` command
#[derive(Parser, Debug)]
pub struct SaveArgs {
    /// Page URL
    pub url: String,

    /// Note title (derived from the URL if omitted on a new note)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Note content (read from stdin if omitted)
    #[arg(short, long)]
    pub content: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Page URL
    pub url: String,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only notes whose title, content, identity or aliases contain this text
    #[arg(short, long)]
    pub query: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `quota` command
#[derive(Parser, Debug)]
pub struct QuotaArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output path (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
