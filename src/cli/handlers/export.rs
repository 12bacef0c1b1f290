//! Export command handler.

use anyhow::{Context, Result};

use super::Store;
use crate::cli::ExportArgs;

pub fn handle_export(args: &ExportArgs, store: &Store) -> Result<()> {
    let data = store.export_json().context("failed to export notes")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{data}\n"))
                .with_context(|| format!("failed to write export to {}", path.display()))?;
            let count = store.list_all().map(|notes| notes.len()).unwrap_or(0);
            eprintln!("Exported {} note(s) to {}", count, path.display());
        }
        None => println!("{}", data),
    }
    Ok(())
}
