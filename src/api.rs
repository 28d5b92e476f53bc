// Upload client: a small blocking HTTP client that posts one payload to
// the hosting service and hands back whatever HTML it answered with.
// Deciding what that HTML means is left to `response`.

use crate::config::{Settings, UPLOAD_FIELD, UPLOAD_URL};
use crate::error::TransportError;
use crate::item::Source;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use reqwest::blocking::{multipart, Client};
use std::fs::File;

/// Anything able to push a payload to the service and return the raw
/// response body. The session only talks to uploads through this trait.
pub trait Uploader {
    /// Upload `source`. `silent` hides the progress bar and nothing else.
    fn upload(&self, source: &Source, silent: bool) -> Result<String, TransportError>;
}

impl<T: Uploader + ?Sized> Uploader for &T {
    fn upload(&self, source: &Source, silent: bool) -> Result<String, TransportError> {
        (**self).upload(source, silent)
    }
}

/// Uploader backed by a reqwest blocking client.
#[derive(Clone)]
pub struct HttpUploader {
    client: Client,
    url: String,
}

impl HttpUploader {
    /// Build the client. Failing here means no upload can happen at all,
    /// so callers treat it as a missing prerequisite.
    pub fn new(settings: &Settings) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("ompload/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()
            .map_err(TransportError::Unavailable)?;
        Ok(HttpUploader {
            client,
            url: UPLOAD_URL.to_string(),
        })
    }

    /// Build the multipart part for `source`, wiring the progress bar into
    /// the reader so it advances as bytes go out.
    fn part_for(&self, source: &Source, bar: &ProgressBar) -> Result<multipart::Part, TransportError> {
        let name = source.upload_name().into_owned();
        let part = match source {
            Source::File(path) => {
                let file = File::open(path).map_err(|e| TransportError::Read {
                    path: path.clone(),
                    source: e,
                })?;
                let len = file
                    .metadata()
                    .map_err(|e| TransportError::Read {
                        path: path.clone(),
                        source: e,
                    })?
                    .len();
                bar.set_length(len);
                multipart::Part::reader_with_length(bar.wrap_read(file), len)
            }
            Source::Piped { data, .. } => {
                let len = data.len() as u64;
                bar.set_length(len);
                multipart::Part::reader_with_length(bar.wrap_read(std::io::Cursor::new(data.clone())), len)
            }
        };
        Ok(part.file_name(name))
    }
}

impl Uploader for HttpUploader {
    fn upload(&self, source: &Source, silent: bool) -> Result<String, TransportError> {
        let bar = progress_bar(silent);
        let part = self.part_for(source, &bar)?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        debug!("POST {} ({})", self.url, source.display_name());
        let res = self.client.post(&self.url).multipart(form).send();
        bar.finish_and_clear();

        let res = res.map_err(TransportError::Request)?;
        let status = res.status();
        // Throttling and error pages are still worth parsing, so the body is
        // returned whatever the status code.
        let body = res.text().map_err(TransportError::Request)?;
        debug!("response {} with {} bytes", status, body.len());

        if body.trim().is_empty() {
            return Err(TransportError::EmptyResponse);
        }
        Ok(body)
    }
}

fn progress_bar(silent: bool) -> ProgressBar {
    if silent {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::with_template("{bar:40} {bytes}/{total_bytes} ({bytes_per_sec})")
    {
        bar.set_style(style);
    }
    bar
}
