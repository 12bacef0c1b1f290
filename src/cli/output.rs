//! Output format types for CLI commands.

use crate::domain::Note;
use crate::store::QuotaReport;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Renders the wrapper as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl From<&Note> for NoteListing {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            updated: note.updated().to_rfc3339(),
            link: note.link().map(str::to_string),
        }
    }
}

/// Renders a note for the terminal.
pub fn render_note(note: &Note) -> String {
    let mut out = format!("# {}\n\n", note.title());
    out.push_str(&format!(
        "ID: {}  Created: {}  Updated: {}\n",
        note.id(),
        note.created().format("%Y-%m-%d %H:%M"),
        note.updated().format("%Y-%m-%d %H:%M")
    ));
    if !note.aliases().is_empty() {
        out.push_str(&format!("Aliases: {}\n", note.aliases().join(", ")));
    }
    if note.has_content() {
        out.push('\n');
        out.push_str(note.content());
        if !note.content().ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Renders a quota report for the terminal.
pub fn render_quota(report: &QuotaReport) -> String {
    let mut out = format!(
        "{} of {} bytes used ({:.1}%)",
        report.usage_bytes, report.quota_bytes, report.percentage
    );
    if report.near_limit {
        out.push_str(" - near limit");
    }
    out
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
