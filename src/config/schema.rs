use crate::client::{ClientError, MicroFnClient};
use serde::{Deserialize, Serialize};

/// Environment variable holding the bearer token. Set by the agent host
/// that launches the tools; there is no config file fallback.
pub const API_TOKEN_ENV: &str = "MICROFN_API_TOKEN";
/// Optional host override (defaults to the production platform).
pub const HOST_ENV: &str = "MICROFN_HOST";
/// Optional package registry override.
pub const REGISTRY_ENV: &str = "MICROFN_REGISTRY_URL";

const DEFAULT_HOST: &str = "https://microfn.dev";
const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";

/// Runtime configuration for the tool set.
///
/// A missing token is not an error here: it becomes
/// [`ClientError::MissingToken`] when a tool first builds a client, so the
/// process starts cleanly and the failure surfaces on the call that needs
/// the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bearer token for the platform API. `None` when unset in the
    /// environment.
    pub api_token: Option<String>,
    /// Platform host; API calls go to `{host}/api`, execution to
    /// `{host}/run/{id}`.
    pub host: String,
    /// npm-style registry used for latest-version resolution.
    pub registry_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            host: DEFAULT_HOST.to_string(),
            registry_url: DEFAULT_REGISTRY.to_string(),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Resolve configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            api_token: non_empty_env(API_TOKEN_ENV),
            host: non_empty_env(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            registry_url: non_empty_env(REGISTRY_ENV)
                .unwrap_or_else(|| DEFAULT_REGISTRY.to_string()),
        }
    }

    /// Build an API client from this configuration. Fails with
    /// [`ClientError::MissingToken`] when no token is configured; performs
    /// no I/O.
    pub fn client(&self) -> Result<MicroFnClient, ClientError> {
        let token = self.api_token.as_deref().unwrap_or_default();
        MicroFnClient::with_host(token, &self.host, &self.registry_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_production() {
        let config = Config::default();
        assert_eq!(config.host, "https://microfn.dev");
        assert_eq!(config.registry_url, "https://registry.npmjs.org");
        assert!(config.api_token.is_none());
    }

    #[test]
    fn client_fails_without_token() {
        let config = Config::default();
        assert!(matches!(config.client(), Err(ClientError::MissingToken)));
    }

    #[test]
    fn client_builds_with_token() {
        let config = Config {
            api_token: Some("mfn-token".into()),
            ..Config::default()
        };
        assert!(config.client().is_ok());
    }

    #[test]
    fn whitespace_token_is_rejected() {
        let config = Config {
            api_token: Some("   ".into()),
            ..Config::default()
        };
        assert!(matches!(config.client(), Err(ClientError::MissingToken)));
    }
}
