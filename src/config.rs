// Fixed service constants plus the few knobs that can be tuned from the
// environment. The upload endpoint itself is deliberately not one of them.

use crate::error::ConfigError;
use std::time::Duration;

/// Public base of the hosting service; share pages live at `BASE_URL/v<id>`.
pub const BASE_URL: &str = "http://ompldr.org";

/// Endpoint accepting the multipart upload.
pub const UPLOAD_URL: &str = "http://ompldr.org/upload";

/// Multipart field the service reads the file from.
pub const UPLOAD_FIELD: &str = "file1";

/// Largest payload accepted, in bytes (1 MiB).
pub const MAX_FILE_SIZE: u64 = 1 << 20;

/// Pause applied after the service throttles us.
pub const THROTTLE_DELAY: Duration = Duration::from_secs(60);

/// Upload attempts per item before giving up on a throttled item.
pub const MAX_ATTEMPTS: u32 = 10;

/// Request timeout used unless `OMPLOAD_TIMEOUT` says otherwise.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Display name for stdin payloads when `--filename` is not given.
pub const DEFAULT_PIPED_NAME: &str = "piped data";

const ENV_THROTTLE_DELAY: &str = "OMPLOAD_THROTTLE_DELAY";
const ENV_MAX_ATTEMPTS: &str = "OMPLOAD_MAX_ATTEMPTS";
const ENV_TIMEOUT: &str = "OMPLOAD_TIMEOUT";

/// Build the share page URL for a share identifier.
pub fn share_url(id: &str) -> String {
    format!("{}/v{}", BASE_URL, id)
}

/// Runtime settings. `max_attempts == None` means retry throttled uploads
/// forever; `timeout == None` disables the request timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub throttle_delay: Duration,
    pub max_attempts: Option<u32>,
    pub timeout: Option<Duration>,
    pub max_file_size: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            throttle_delay: THROTTLE_DELAY,
            max_attempts: Some(MAX_ATTEMPTS),
            timeout: Some(REQUEST_TIMEOUT),
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl Settings {
    /// Read overrides from `OMPLOAD_THROTTLE_DELAY`, `OMPLOAD_MAX_ATTEMPTS`
    /// and `OMPLOAD_TIMEOUT`, falling back to the built-in defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(secs) = read_number(&lookup, ENV_THROTTLE_DELAY)? {
            settings.throttle_delay = Duration::from_secs(secs);
        }
        if let Some(n) = read_number(&lookup, ENV_MAX_ATTEMPTS)? {
            settings.max_attempts = match u32::try_from(n) {
                Ok(0) => None,
                Ok(n) => Some(n),
                Err(_) => {
                    return Err(ConfigError::InvalidNumber {
                        var: ENV_MAX_ATTEMPTS,
                        value: n.to_string(),
                    })
                }
            };
        }
        if let Some(secs) = read_number(&lookup, ENV_TIMEOUT)? {
            settings.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(settings)
    }
}

fn read_number<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(n) => Ok(Some(n)),
        Err(_) => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.throttle_delay, Duration::from_secs(60));
        assert_eq!(settings.max_attempts, Some(10));
        assert_eq!(settings.max_file_size, 1_048_576);
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("OMPLOAD_THROTTLE_DELAY", "5"),
            ("OMPLOAD_MAX_ATTEMPTS", "3"),
            ("OMPLOAD_TIMEOUT", " 20 "),
        ]))
        .unwrap();
        assert_eq!(settings.throttle_delay, Duration::from_secs(5));
        assert_eq!(settings.max_attempts, Some(3));
        assert_eq!(settings.timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn zero_means_unbounded() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("OMPLOAD_MAX_ATTEMPTS", "0"),
            ("OMPLOAD_TIMEOUT", "0"),
        ]))
        .unwrap();
        assert_eq!(settings.max_attempts, None);
        assert_eq!(settings.timeout, None);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = Settings::from_lookup(lookup_from(&[("OMPLOAD_THROTTLE_DELAY", "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "OMPLOAD_THROTTLE_DELAY",
                value: "soon".into()
            }
        );
    }

    #[test]
    fn share_url_prefixes_v() {
        assert_eq!(share_url("AbC123"), "http://ompldr.org/vAbC123");
    }
}
