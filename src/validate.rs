// Checks run on every item before it is handed to the uploader.

use crate::error::ValidationError;
use crate::item::Source;
use std::fs;

/// Accept the source if it is a regular file (or piped buffer) no larger
/// than `limit` bytes. Only metadata is inspected.
pub fn validate(source: &Source, limit: u64) -> Result<(), ValidationError> {
    let size = match source {
        Source::File(path) => match fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Err(ValidationError::InvalidInput),
        },
        Source::Piped { data, .. } => data.len() as u64,
    };

    if size > limit {
        return Err(ValidationError::TooLarge {
            actual: size,
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn accepts_small_regular_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        assert_eq!(validate(&Source::File(path), 1024), Ok(()));
    }

    #[test]
    fn file_at_the_limit_is_accepted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("exact.bin");
        fs::write(&path, vec![0u8; 16]).unwrap();

        assert_eq!(validate(&Source::File(path), 16), Ok(()));
    }

    #[test]
    fn missing_path_is_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = Source::File(dir.path().join("nope"));
        assert_eq!(validate(&source, 1024), Err(ValidationError::InvalidInput));
    }

    #[test]
    fn directory_is_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = Source::File(PathBuf::from(dir.path()));
        assert_eq!(validate(&source, 1024), Err(ValidationError::InvalidInput));
    }

    #[test]
    fn oversized_file_reports_actual_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("big.bin");
        fs::write(&path, vec![7u8; 33]).unwrap();

        assert_eq!(
            validate(&Source::File(path), 32),
            Err(ValidationError::TooLarge {
                actual: 33,
                limit: 32
            })
        );
    }

    #[test]
    fn piped_payload_is_size_checked() {
        let ok = Source::Piped {
            data: vec![1; 4],
            name: "piped data".into(),
        };
        let big = Source::Piped {
            data: vec![1; 5],
            name: "piped data".into(),
        };
        assert_eq!(validate(&ok, 4), Ok(()));
        assert_eq!(
            validate(&big, 4),
            Err(ValidationError::TooLarge { actual: 5, limit: 4 })
        );
    }
}
