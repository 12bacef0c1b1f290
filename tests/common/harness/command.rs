//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test binaries
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `pagenote` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct PagenoteCommand {
    args: Vec<String>,
    config: Option<PathBuf>,
    stdin: Vec<u8>,
}

impl PagenoteCommand {
    /// Creates a new command for the `pagenote` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config: None,
            stdin: Vec::new(),
        }
    }

    /// Sets the `--db` option.
    pub fn db(mut self, path: &Path) -> Self {
        self.args.push("--db".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Points `PAGENOTE_CONFIG` at the given file.
    pub fn config(mut self, path: &Path) -> Self {
        self.config = Some(path.to_path_buf());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Sets the bytes fed to stdin.
    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = input.into();
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("pagenote").expect("Failed to find pagenote binary");
        cmd.args(&self.args)
            .env_remove("PAGENOTE_LOG")
            .env_remove("RUST_LOG");
        if let Some(config) = &self.config {
            cmd.env("PAGENOTE_CONFIG", config);
        }
        cmd.write_stdin(self.stdin);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and returns raw stdout.
    pub fn output_bytes(self) -> Vec<u8> {
        self.assert().success().get_output().stdout.clone()
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `canon` command.
    pub fn canon(self, url: &str) -> Self {
        self.args(["canon", url])
    }

    /// Configures for the `get` command.
    pub fn get(self, url: &str) -> Self {
        self.args(["get", url])
    }

    /// Configures for the `save` command with inline content.
    pub fn save(self, url: &str, content: &str) -> Self {
        self.args(["save", url, "--content", content])
    }

    /// Configures for the `rm` command.
    pub fn rm(self, url: &str) -> Self {
        self.args(["rm", url])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `quota` command.
    pub fn quota(self) -> Self {
        self.args(["quota"])
    }

    /// Configures for the `export` command.
    pub fn export(self) -> Self {
        self.args(["export"])
    }

    /// Configures for the `host` command.
    pub fn host(self) -> Self {
        self.args(["host"])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for PagenoteCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        PagenoteCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_output_success() {
        let output = PagenoteCommand::new().args(["--help"]).output_success();
        assert!(output.contains("pagenote"));
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = PagenoteCommand::new().ls().format_json();
        let args = cmd.get_args();
        assert_eq!(args, ["ls", "--format", "json"]);
    }
}
