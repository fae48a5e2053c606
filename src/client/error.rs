use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes of the microfn API client.
///
/// The client performs no local recovery: every variant surfaces to the
/// caller unchanged, and no request is ever retried.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The bearer token is absent or empty. Raised at client construction,
    /// before any network call.
    #[error("MICROFN_API_TOKEN is not configured. Set it in the environment the agent host runs the tools with.")]
    MissingToken,

    /// The configured host could not be parsed as an HTTP(S) base URL.
    #[error("invalid microfn host URL: {0}")]
    InvalidHost(String),

    /// Connection, TLS, or timeout failure from the HTTP layer.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Any non-2xx response. Status and body are carried verbatim.
    #[error("microfn API error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    /// Latest-version lookup against the npm registry failed. Fatal for the
    /// install/update that triggered it; no fallback version is assumed.
    #[error("npm registry lookup failed for {name}: {reason}")]
    Registry { name: String, reason: String },
}

impl ClientError {
    /// Status code of the failed response, when this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}
