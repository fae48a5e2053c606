//! Latest-version resolution against an npm-style registry.
//!
//! Install/update calls that omit a version (or pass the `"latest"`
//! sentinel) resolve the concrete version here first. A failed lookup is
//! fatal for that operation — the client never substitutes a guess.

use super::ClientError;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct LatestMetadata {
    #[serde(default)]
    version: Option<String>,
}

/// Read-only handle on the package registry's `/{name}/latest` endpoint.
#[derive(Debug, Clone)]
pub(crate) struct NpmRegistry {
    base: Url,
    http: Client,
}

impl NpmRegistry {
    pub(crate) fn new(base: Url, http: Client) -> Self {
        Self { base, http }
    }

    /// Resolve the latest published version of `name`.
    ///
    /// Scoped names (`@scope/pkg`) are pushed as a single percent-encoded
    /// path segment, matching how the registry addresses them.
    pub(crate) async fn resolve_latest(&self, name: &str) -> Result<String, ClientError> {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name).push("latest");
        }

        let response = self
            .http
            .get(url)
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await
            .map_err(|e| ClientError::Registry {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Registry {
                name: name.to_string(),
                reason: format!("status {status}"),
            });
        }

        let metadata: LatestMetadata =
            response.json().await.map_err(|e| ClientError::Registry {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let version = metadata.version.ok_or_else(|| ClientError::Registry {
            name: name.to_string(),
            reason: "registry response had no version field".to_string(),
        })?;

        debug!(package = name, %version, "resolved latest version from npm registry");
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_metadata_deserializes() {
        let meta: LatestMetadata = serde_json::from_str(r#"{"version":"4.17.21"}"#).unwrap();
        assert_eq!(meta.version.as_deref(), Some("4.17.21"));
    }

    #[test]
    fn latest_metadata_tolerates_missing_version() {
        let meta: LatestMetadata = serde_json::from_str(r#"{"name":"lodash"}"#).unwrap();
        assert!(meta.version.is_none());
    }
}
