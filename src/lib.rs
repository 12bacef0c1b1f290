//! pagenote - per-page notes keyed by canonical URL
//!
//! The core behind a browser extension that attaches a note to each web
//! page. Notes are keyed by a canonical identity so URL variants of one page
//! share a note; toolbar icons and the side panel follow the notes and the
//! user's panel toggles per tab.

pub mod cli;
pub mod domain;
pub mod logging;
pub mod messaging;
pub mod presentation;
pub mod store;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        StoreLocation, handle_canon, handle_completions, handle_export, handle_get, handle_host,
        handle_list, handle_quota, handle_remove, handle_save, open_store,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    logging::init(cli.verbose, config.log.as_deref());

    let location = if cli.memory {
        StoreLocation::Memory
    } else {
        StoreLocation::File(config.db_path(cli.db.as_ref()))
    };
    let open = || open_store(&location);

    match &cli.command {
        Command::Canon(args) => handle_canon(args),
        Command::Get(args) => handle_get(args, &open()?),
        Command::Save(args) => handle_save(args, &mut open()?),
        Command::Remove(args) => handle_remove(args, &mut open()?),
        Command::List(args) => handle_list(args, &open()?),
        Command::Quota(args) => handle_quota(args, &open()?),
        Command::Export(args) => handle_export(args, &open()?),
        Command::Host => handle_host(open()?),
        Command::Completions(args) => handle_completions(args),
    }
}
