// One unit of work: a file named on the command line or the data piped in
// on stdin.

use std::borrow::Cow;
use std::path::PathBuf;

/// Where the bytes of an upload come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    /// Stdin has no path, so it carries the name shown to the service.
    Piped { data: Vec<u8>, name: String },
}

impl Source {
    /// Name used in messages and sent as the multipart file name.
    pub fn display_name(&self) -> Cow<'_, str> {
        match self {
            Source::File(path) => path.to_string_lossy(),
            Source::Piped { name, .. } => Cow::Borrowed(name),
        }
    }

    /// Name sent to the service as the multipart file name. For files this
    /// is only the last path component; the directories stay local.
    pub fn upload_name(&self) -> Cow<'_, str> {
        match self {
            Source::File(path) => match path.file_name() {
                Some(name) => name.to_string_lossy(),
                None => path.to_string_lossy(),
            },
            Source::Piped { name, .. } => Cow::Borrowed(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    pub source: Source,
    /// Number of times the item has entered the uploading state.
    pub attempts: u32,
}

impl UploadItem {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        UploadItem {
            source: Source::File(path.into()),
            attempts: 0,
        }
    }

    pub fn piped(data: Vec<u8>, name: impl Into<String>) -> Self {
        UploadItem {
            source: Source::Piped {
                data,
                name: name.into(),
            },
            attempts: 0,
        }
    }

    pub fn display_name(&self) -> Cow<'_, str> {
        self.source.display_name()
    }
}
