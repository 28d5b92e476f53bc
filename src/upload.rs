// Drives a single item through upload, throttling and retries until it
// reaches a terminal outcome.

use crate::api::Uploader;
use crate::config::{share_url, Settings};
use crate::item::UploadItem;
use crate::response::{self, Verdict};
use crate::ui::Reporter;
use log::{debug, info};
use std::time::Duration;

/// Terminal result for one item. Every item gets exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { share_id: String },
    InvalidInput,
    TooLarge { actual_size: u64 },
    TransportFailure,
    UnrecognizedResponse,
    GaveUpAfterRetries { attempts: u32 },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded { .. })
    }
}

/// Blocks the run between throttled attempts.
pub trait Pause {
    fn pause(&self, delay: Duration);
}

/// Plain thread sleep. An interrupt signal still ends the process while
/// it is sleeping.
pub struct ThreadSleep;

impl Pause for ThreadSleep {
    fn pause(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

impl<T: Pause + ?Sized> Pause for &T {
    fn pause(&self, delay: Duration) {
        (**self).pause(delay)
    }
}

/// How throttled uploads are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    /// `None` retries for as long as the service keeps throttling.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        RetryPolicy {
            delay: settings.throttle_delay,
            max_attempts: settings.max_attempts,
        }
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

#[derive(Debug)]
enum State {
    Pending,
    Uploading,
    RateLimitedWaiting,
    Succeeded(String),
    Failed(UploadOutcome),
}

pub struct Orchestrator<U, P> {
    uploader: U,
    pause: P,
    policy: RetryPolicy,
}

impl<U: Uploader, P: Pause> Orchestrator<U, P> {
    pub fn new(uploader: U, pause: P, policy: RetryPolicy) -> Self {
        Orchestrator {
            uploader,
            pause,
            policy,
        }
    }

    /// Run `item` to completion, updating its attempt counter along the
    /// way. Lines for the user go to `reporter`; counting failures is the
    /// caller's job.
    pub fn drive(&self, item: &mut UploadItem, reporter: &mut Reporter) -> UploadOutcome {
        let name = item.display_name().into_owned();
        let silent = reporter.mode().is_silent();
        let mut state = State::Pending;

        loop {
            state = match state {
                State::Pending => {
                    reporter.progress(&name);
                    State::Uploading
                }
                State::Uploading => {
                    item.attempts += 1;
                    debug!("uploading '{}' (attempt {})", name, item.attempts);
                    match self.uploader.upload(&item.source, silent) {
                        Err(e) => {
                            reporter.transport_failed(&name, &e);
                            State::Failed(UploadOutcome::TransportFailure)
                        }
                        Ok(body) => match response::parse(&body) {
                            Verdict::Success(id) => State::Succeeded(id),
                            Verdict::RateLimited if self.policy.exhausted(item.attempts) => {
                                reporter.gave_up(&name, item.attempts);
                                State::Failed(UploadOutcome::GaveUpAfterRetries {
                                    attempts: item.attempts,
                                })
                            }
                            Verdict::RateLimited => State::RateLimitedWaiting,
                            Verdict::Unrecognized => {
                                debug!("unrecognized response body: {:?}", body);
                                reporter.unrecognized(&name);
                                State::Failed(UploadOutcome::UnrecognizedResponse)
                            }
                        },
                    }
                }
                State::RateLimitedWaiting => {
                    reporter.throttled(&name, self.policy.delay);
                    info!("throttled on '{}', sleeping {:?}", name, self.policy.delay);
                    self.pause.pause(self.policy.delay);
                    State::Uploading
                }
                State::Succeeded(share_id) => {
                    reporter.uploaded(&name, &share_url(&share_id));
                    return UploadOutcome::Uploaded { share_id };
                }
                State::Failed(outcome) => return outcome,
            }
        }
    }
}
