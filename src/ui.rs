// UI layer: every line the user sees goes through `Reporter`, which knows
// the output mode. Errors and warnings always reach the error stream;
// progress, URLs and the summary depend on the mode.

use crate::error::ValidationError;
use log::warn;
use std::io::{self, Write};
use std::time::Duration;

/// How chatty the run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Progress lines, upload lines and the final summary.
    Normal,
    /// Errors and warnings only.
    Quiet,
    /// Bare share URLs on stdout, plus errors and warnings.
    UrlOnly,
}

impl OutputMode {
    /// `--quiet` wins over `--url` when both are given.
    pub fn from_flags(quiet: bool, url_only: bool) -> Self {
        match (quiet, url_only) {
            (true, _) => OutputMode::Quiet,
            (false, true) => OutputMode::UrlOnly,
            (false, false) => OutputMode::Normal,
        }
    }

    /// Whether transfer progress should be hidden.
    pub fn is_silent(self) -> bool {
        self != OutputMode::Normal
    }
}

/// Writes user-facing lines for one run.
pub struct Reporter {
    mode: OutputMode,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Reporter {
    pub fn new(mode: OutputMode, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Reporter { mode, out, err }
    }

    /// Reporter bound to the process's stdout and stderr.
    pub fn stdio(mode: OutputMode) -> Self {
        Self::new(mode, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn progress(&mut self, name: &str) {
        if self.mode == OutputMode::Normal {
            self.say(format!("Progress for '{}'", name));
        }
    }

    pub fn uploaded(&mut self, name: &str, url: &str) {
        match self.mode {
            OutputMode::Normal => self.say(format!("Omploaded '{}' to {}", name, url)),
            OutputMode::UrlOnly => self.say(url.to_string()),
            OutputMode::Quiet => {}
        }
    }

    pub fn rejected(&mut self, name: &str, reason: &ValidationError) {
        self.complain(format!("error: '{}' {}", name, reason));
    }

    pub fn throttled(&mut self, name: &str, delay: Duration) {
        self.complain(format!(
            "warning: got throttled when trying to ompload '{}'\nAwaiting {}s and attempting to continue...",
            name,
            delay.as_secs()
        ));
    }

    pub fn gave_up(&mut self, name: &str, attempts: u32) {
        self.complain(format!(
            "error: still throttled after {} attempts, giving up on '{}'",
            attempts, name
        ));
    }

    pub fn transport_failed(&mut self, name: &str, cause: &dyn std::fmt::Display) {
        self.complain(format!(
            "error: failed to get a response uploading '{}': {}",
            name, cause
        ));
    }

    pub fn unrecognized(&mut self, name: &str) {
        self.complain(format!(
            "error: unexpected response from the server uploading '{}'",
            name
        ));
    }

    pub fn clipboard_failed(&mut self, cause: &anyhow::Error) {
        self.complain(format!("warning: could not copy URLs to the clipboard: {:#}", cause));
    }

    /// Final status line; nothing in quiet or url-only mode.
    pub fn summary(&mut self, errors: usize) {
        if self.mode != OutputMode::Normal {
            return;
        }
        if errors > 0 {
            self.say(format!("Finished with {} errors.", errors));
        } else {
            self.say("Success.".to_string());
        }
    }

    fn say(&mut self, line: String) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            warn!("failed to write to stdout: {}", e);
        }
    }

    fn complain(&mut self, line: String) {
        if let Err(e) = writeln!(self.err, "{}", line) {
            warn!("failed to write to stderr: {}", e);
        }
    }
}
