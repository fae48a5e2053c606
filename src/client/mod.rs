//! Client subsystem for the microfn REST API.
//!
//! [`MicroFnClient`] in [`microfn`] translates typed method calls into HTTP
//! requests: one method per remote operation, bearer-token auth, fixed
//! per-operation timeouts, and no retry policy — a failed call surfaces
//! immediately as a [`ClientError`]. Latest-version resolution for npm
//! packages lives in [`npm`].
//!
//! Error text destined for agent transcripts goes through
//! [`sanitize_api_error`], which scrubs secret-like tokens and truncates;
//! the errors themselves keep status and body verbatim.

pub mod error;
pub mod microfn;
pub(crate) mod npm;

pub use error::ClientError;
pub use microfn::{MicroFnClient, Package, Secret, Workspace};

const MAX_API_ERROR_CHARS: usize = 200;

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
}

fn token_end(input: &str, from: usize) -> usize {
    let mut end = from;
    for (i, c) in input[from..].char_indices() {
        if is_secret_char(c) {
            end = from + i + c.len_utf8();
        } else {
            break;
        }
    }
    end
}

/// Scrub known secret-like token prefixes from error strings.
///
/// Redacts tokens with prefixes like `mfn_`, `sk-`, `npm_`, `ghp_`, and
/// `Bearer ` so a reflected request header never reaches an agent
/// transcript.
pub fn scrub_secret_patterns(input: &str) -> String {
    const PREFIXES: [&str; 5] = ["mfn_", "sk-", "npm_", "ghp_", "Bearer "];

    let mut scrubbed = input.to_string();

    for prefix in PREFIXES {
        let mut search_from = 0;
        loop {
            let Some(rel) = scrubbed[search_from..].find(prefix) else {
                break;
            };

            let start = search_from + rel;
            let content_start = start + prefix.len();
            let end = token_end(&scrubbed, content_start);

            if end == content_start {
                search_from = content_start;
                continue;
            }

            scrubbed.replace_range(start..end, "[REDACTED]");
            search_from = start + "[REDACTED]".len();
        }
    }

    scrubbed
}

/// Sanitize API error text by scrubbing secrets and truncating length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed;
    }

    let mut end = MAX_API_ERROR_CHARS;
    while end > 0 && !scrubbed.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &scrubbed[..end])
}
