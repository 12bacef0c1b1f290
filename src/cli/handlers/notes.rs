//! Get, save, remove and list command handlers.

use anyhow::{Context, Result, bail};
use std::io::{self, IsTerminal};

use super::{Store, read_content, resolve_id};
use crate::cli::output::{NoteListing, Output, OutputFormat, render_note, truncate_str};
use crate::cli::{GetArgs, ListArgs, RemoveArgs, SaveArgs};
use crate::domain::{Note, NoteUpdate};

pub fn handle_get(args: &GetArgs, store: &Store) -> Result<()> {
    let id = resolve_id(&args.url)?;
    let Some(note) = store
        .get(&id)
        .with_context(|| format!("failed to read note for {}", id))?
    else {
        bail!("note not found: '{}'", args.url);
    };

    match args.format {
        OutputFormat::Human => print!("{}", render_note(&note)),
        OutputFormat::Json => println!("{}", Output::new(&note).to_json()?),
    }
    Ok(())
}

pub fn handle_save(args: &SaveArgs, store: &mut Store) -> Result<()> {
    let id = resolve_id(&args.url)?;

    let content = match &args.content {
        Some(content) => Some(content.clone()),
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprintln!("Reading note content from stdin (Ctrl-D to finish)...");
            }
            read_content(stdin.lock())?
        }
    };
    let update = NoteUpdate {
        title: args.title.clone(),
        content,
    };

    let note = store
        .upsert(&id, &args.url, update)
        .with_context(|| format!("failed to save note for {}", id))?;
    tracing::info!(id = %id, "note saved");

    match args.format {
        OutputFormat::Human => println!("Saved note: {}", note),
        OutputFormat::Json => println!("{}", Output::new(&note).to_json()?),
    }
    Ok(())
}

pub fn handle_remove(args: &RemoveArgs, store: &mut Store) -> Result<()> {
    let id = resolve_id(&args.url)?;
    let existed = store
        .get(&id)
        .with_context(|| format!("failed to read note for {}", id))?
        .is_some();

    store
        .remove(&id)
        .with_context(|| format!("failed to delete note for {}", id))?;

    if existed {
        println!("Deleted note for {}", id);
    } else {
        println!("No note for {}", id);
    }
    Ok(())
}

pub fn handle_list(args: &ListArgs, store: &Store) -> Result<()> {
    let notes = select_notes(store, args.query.as_deref())?;

    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
                return Ok(());
            }

            println!("{:<16}  {:<40}  {}", "Updated", "Title", "ID");
            println!(
                "{:<16}  {:<40}  {}",
                "----------------",
                "----------------------------------------",
                "--"
            );
            for note in &notes {
                let updated = note.updated().format("%Y-%m-%d %H:%M").to_string();
                let title = truncate_str(note.title(), 40);
                println!("{:<16}  {:<40}  {}", updated, title, note.id());
            }

            println!();
            println!("{} note(s)", notes.len());
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(NoteListing::from).collect();
            println!("{}", Output::new(listings).to_json()?);
        }
    }
    Ok(())
}

/// All notes, newest first, optionally narrowed by a case-insensitive query.
pub(crate) fn select_notes(store: &Store, query: Option<&str>) -> Result<Vec<Note>> {
    let mut notes = store.list_all().context("failed to list notes")?;
    if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
        notes.retain(|note| note.matches(query));
    }
    Ok(notes)
}
