// Classification of the HTML the service sends back after an upload.

/// Phrase the service puts in the page when it throttles a client.
pub const THROTTLE_PHRASE: &str = "Slow down there, cowboy.";

const VIEW_MARKER: &str = "View file:";
const ANCHOR_PREFIX: &str = "href=\"v";

/// What a response body tells us about the upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The file was stored under this share identifier.
    Success(String),
    /// The service asked us to slow down; the upload should be retried.
    RateLimited,
    /// Anything else, including an empty body.
    Unrecognized,
}

/// Classify a raw response body. Only substrings are matched, so the
/// surrounding markup and whitespace do not matter.
pub fn parse(body: &str) -> Verdict {
    if body.contains(THROTTLE_PHRASE) {
        return Verdict::RateLimited;
    }

    // Prefer the anchor that follows the "View file:" label, but accept any
    // `href="v<id>"` when the label is missing.
    let region = body
        .find(VIEW_MARKER)
        .map(|at| &body[at..])
        .filter(|rest| find_share_id(rest).is_some())
        .unwrap_or(body);

    match find_share_id(region) {
        Some(id) => Verdict::Success(id.to_string()),
        None => Verdict::Unrecognized,
    }
}

fn find_share_id(haystack: &str) -> Option<&str> {
    let mut rest = haystack;
    while let Some(at) = rest.find(ANCHOR_PREFIX) {
        let candidate = &rest[at + ANCHOR_PREFIX.len()..];
        let len = candidate
            .find(|c: char| !is_id_char(c))
            .unwrap_or(candidate.len());
        if len > 0 && candidate[len..].starts_with('"') {
            return Some(&candidate[..len]);
        }
        rest = candidate;
    }
    None
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/'
}
