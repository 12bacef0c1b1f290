//! Quota command handler.

use anyhow::Result;

use super::Store;
use crate::cli::QuotaArgs;
use crate::cli::output::{Output, OutputFormat, render_quota};
use crate::store::QuotaMonitor;

pub fn handle_quota(args: &QuotaArgs, store: &Store) -> Result<()> {
    let report = QuotaMonitor::default().check_usage(store.keyspace());

    match args.format {
        OutputFormat::Human => println!("{}", render_quota(&report)),
        OutputFormat::Json => println!("{}", Output::new(report).to_json()?),
    }
    Ok(())
}
