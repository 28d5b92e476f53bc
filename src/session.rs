// One invocation of the tool: walks every item in order, keeps the tally
// and does the end-of-run clipboard write and status line.

use crate::api::Uploader;
use crate::clipboard::ClipboardWriter;
use crate::config::share_url;
use crate::error::ValidationError;
use crate::item::UploadItem;
use crate::ui::Reporter;
use crate::upload::{Orchestrator, Pause, UploadOutcome};
use crate::validate::validate;
use log::{debug, info};
use std::path::PathBuf;

/// Errors and URLs gathered during a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionTally {
    pub errors: usize,
    /// Share URLs in upload order; only filled while clipboard copy is on.
    pub urls: Vec<String>,
}

impl SessionTally {
    fn record(&mut self, outcome: &UploadOutcome, collect_urls: bool) {
        match outcome {
            UploadOutcome::Uploaded { share_id } => {
                if collect_urls {
                    self.urls.push(share_url(share_id));
                }
            }
            _ => self.errors += 1,
        }
    }
}

pub struct RunSession<U, P, C> {
    orchestrator: Orchestrator<U, P>,
    /// `None` when copying is disabled or no clipboard is available.
    clipboard: Option<C>,
    reporter: Reporter,
    max_file_size: u64,
    tally: SessionTally,
}

impl<U: Uploader, P: Pause, C: ClipboardWriter> RunSession<U, P, C> {
    pub fn new(
        orchestrator: Orchestrator<U, P>,
        clipboard: Option<C>,
        reporter: Reporter,
        max_file_size: u64,
    ) -> Self {
        RunSession {
            orchestrator,
            clipboard,
            reporter,
            max_file_size,
            tally: SessionTally::default(),
        }
    }

    /// Upload `files` in order, then `piped` if given, and finish the run.
    pub fn run(mut self, files: &[PathBuf], piped: Option<UploadItem>) -> SessionTally {
        let items = files
            .iter()
            .cloned()
            .map(UploadItem::file)
            .chain(piped);

        for mut item in items {
            let outcome = self.process(&mut item);
            debug!("'{}' finished as {:?}", item.display_name(), outcome);
            self.tally.record(&outcome, self.clipboard.is_some());
        }

        self.finish();
        self.tally
    }

    fn process(&mut self, item: &mut UploadItem) -> UploadOutcome {
        if let Err(reason) = validate(&item.source, self.max_file_size) {
            self.reporter.rejected(&item.display_name(), &reason);
            return match reason {
                ValidationError::InvalidInput => UploadOutcome::InvalidInput,
                ValidationError::TooLarge { actual, .. } => {
                    UploadOutcome::TooLarge { actual_size: actual }
                }
            };
        }
        self.orchestrator.drive(item, &mut self.reporter)
    }

    fn finish(&mut self) {
        if let Some(clipboard) = self.clipboard.as_mut() {
            if !self.tally.urls.is_empty() {
                let text = self.tally.urls.join("\n");
                match clipboard.write_text(&text) {
                    Ok(()) => info!("copied {} URLs to the clipboard", self.tally.urls.len()),
                    Err(e) => self.reporter.clipboard_failed(&e),
                }
            }
        }
        self.reporter.summary(self.tally.errors);
    }
}
