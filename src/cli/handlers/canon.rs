//! Canon command handler.

use anyhow::Result;

use super::resolve_id;
use crate::cli::CanonArgs;

pub fn handle_canon(args: &CanonArgs) -> Result<()> {
    let id = resolve_id(&args.url)?;
    println!("{}", id);
    Ok(())
}
