#![allow(dead_code)]

use anyhow::{anyhow, Result};
use ompload::api::Uploader;
use ompload::clipboard::ClipboardWriter;
use ompload::error::TransportError;
use ompload::item::Source;
use ompload::upload::Pause;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

pub const THROTTLED: &str = "<html><body><p>Slow down there, cowboy.</p></body></html>";

pub fn success_page(id: &str) -> String {
    format!(
        "<html><body>\n<p>View file: <a href=\"v{id}\">v{id}</a></p>\n</body></html>\n"
    )
}

/// Uploader returning scripted bodies and remembering what it was asked
/// to send.
#[derive(Default)]
pub struct FakeUploader {
    replies: RefCell<VecDeque<Result<String, TransportError>>>,
    pub sent: RefCell<Vec<String>>,
}

impl FakeUploader {
    pub fn replying(replies: Vec<Result<String, TransportError>>) -> Self {
        FakeUploader {
            replies: RefCell::new(replies.into()),
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl Uploader for FakeUploader {
    fn upload(&self, source: &Source, _silent: bool) -> Result<String, TransportError> {
        self.sent.borrow_mut().push(source.display_name().into_owned());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(TransportError::EmptyResponse))
    }
}

#[derive(Default)]
pub struct FakePause {
    pub pauses: RefCell<Vec<Duration>>,
}

impl Pause for FakePause {
    fn pause(&self, delay: Duration) {
        self.pauses.borrow_mut().push(delay);
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub written: Vec<String>,
    pub fail: bool,
}

impl ClipboardWriter for FakeClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(anyhow!("no display"));
        }
        self.written.push(text.to_string());
        Ok(())
    }
}

/// Shared in-memory sink so tests can read what the reporter wrote.
#[derive(Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn write_file(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, vec![b'x'; len]).expect("write fixture");
    path
}
