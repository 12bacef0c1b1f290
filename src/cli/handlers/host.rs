//! Host command handler.

use anyhow::{Context, Result};
use std::io;

use super::Store;
use crate::messaging::Dispatcher;
use crate::messaging::native::{self, EffectQueue};
use crate::presentation::PresentationSync;

/// Serves native-messaging frames on stdin/stdout until stdin closes.
pub fn handle_host(store: Store) -> Result<()> {
    let mut dispatcher = Dispatcher::new(store, PresentationSync::new(EffectQueue::new()));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = native::serve(&mut dispatcher, &mut stdin.lock(), &mut stdout.lock())
        .context("native messaging host failed")?;

    tracing::debug!(?stats, "native messaging host exited");
    Ok(())
}
