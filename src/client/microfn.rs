//! HTTP client for the microfn REST API.
//!
//! One method per remote operation. Every call is a single independent
//! request/response exchange: no retries, no caching, no shared mutable
//! state. The remote API nests payloads under a wrapper key
//! (`{"workspace": …}`, `{"secrets": […]}`); each method unwraps its key
//! and returns the bare value.

use super::npm::NpmRegistry;
use super::ClientError;
use reqwest::{header, Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const DEFAULT_HOST: &str = "https://microfn.dev";
const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";

/// Short reads: list/get calls that the platform serves from its own store.
const READ_TIMEOUT: Duration = Duration::from_secs(10);
/// Writes: create/update/delete calls that may redeploy behind the scenes.
const WRITE_TIMEOUT: Duration = Duration::from_secs(20);
/// Function execution may cold-start the workspace runtime.
const EXECUTE_TIMEOUT: Duration = Duration::from_secs(30);

/// A deployable function on the platform. The server owns the shape; fields
/// beyond `id`/`name` are carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A workspace-scoped secret. Values are write-only: the API never returns
/// them, so neither does this client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Secret {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub key: String,
}

/// An npm dependency pinned to a workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

// Response envelopes. `#[serde(default)]` everywhere: the API omits the
// wrapper key on some code paths and callers get the empty value, matching
// the platform's own SDKs.

#[derive(Debug, Deserialize)]
struct WorkspaceEnvelope {
    #[serde(default)]
    workspace: Option<Workspace>,
}

#[derive(Debug, Deserialize)]
struct WorkspacesEnvelope {
    #[serde(default)]
    workspaces: Vec<Workspace>,
}

#[derive(Debug, Deserialize)]
struct CodeEnvelope {
    #[serde(default)]
    code: String,
}

#[derive(Debug, Deserialize)]
struct DeploymentEnvelope {
    #[serde(default)]
    deployment: Value,
}

#[derive(Debug, Deserialize)]
struct SecretsEnvelope {
    #[serde(default)]
    secrets: Vec<Secret>,
}

#[derive(Debug, Deserialize)]
struct PackagesEnvelope {
    #[serde(default)]
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct PackageEnvelope {
    #[serde(default)]
    package: Option<Package>,
}

/// Decode a run-endpoint body: JSON when it parses, raw text otherwise.
/// Deployed functions may legitimately return a bare scalar or plain text.
fn decode_execute_body(text: String) -> Value {
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}

/// Authenticated client for the microfn API.
///
/// Holds the bearer token (immutable for the client's lifetime) and the
/// resolved base URLs. Construction fails with
/// [`ClientError::MissingToken`] before any network call when the token is
/// absent or empty.
#[derive(Debug, Clone)]
pub struct MicroFnClient {
    token: String,
    /// `{host}/api` — workspace, secret, and package endpoints.
    api_base: Url,
    /// `{host}` — the run endpoint lives outside the `/api` prefix.
    run_base: Url,
    registry: NpmRegistry,
    http: Client,
}

impl MicroFnClient {
    /// Client against the production host and the public npm registry.
    pub fn new(token: &str) -> Result<Self, ClientError> {
        Self::with_host(token, DEFAULT_HOST, DEFAULT_REGISTRY)
    }

    /// Client against an explicit host and package registry.
    pub fn with_host(token: &str, host: &str, registry: &str) -> Result<Self, ClientError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::MissingToken);
        }

        let host = host.trim_end_matches('/');
        let run_base =
            Url::parse(host).map_err(|_| ClientError::InvalidHost(host.to_string()))?;
        let api_base = Url::parse(&format!("{host}/api"))
            .map_err(|_| ClientError::InvalidHost(host.to_string()))?;
        let registry = registry.trim_end_matches('/');
        let registry_base =
            Url::parse(registry).map_err(|_| ClientError::InvalidHost(registry.to_string()))?;

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            token: token.to_string(),
            api_base,
            run_base,
            registry: NpmRegistry::new(registry_base, http.clone()),
            http,
        })
    }

    /// Build `{api_base}/{segments…}` with each segment percent-encoded.
    /// Package names can be scoped (`@scope/pkg`) and must land in one
    /// path segment.
    fn api_endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    fn run_endpoint(&self, workspace_id: &str) -> Url {
        let mut url = self.run_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("run").push(workspace_id);
        }
        url
    }

    /// Attach auth headers, send, and turn any non-2xx into
    /// [`ClientError::Status`] carrying the verbatim status and body.
    async fn send(&self, op: &'static str, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!(op, %status, "microfn response");
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            return Err(ClientError::Status { status, body });
        }
        Ok(response)
    }

    // ── Workspaces ───────────────────────────────────────────────

    /// POST /workspaces — create a workspace with an initial code body.
    pub async fn create_workspace(&self, name: &str, code: &str) -> Result<Workspace, ClientError> {
        let url = self.api_endpoint(&["workspaces"]);
        let body = serde_json::json!({ "name": name, "initialCode": code });
        let response = self
            .send("create_workspace", self.http.post(url).timeout(WRITE_TIMEOUT).json(&body))
            .await?;
        let envelope: WorkspaceEnvelope = response.json().await?;
        Ok(envelope.workspace.unwrap_or_default())
    }

    /// GET /workspaces — all workspaces visible to the token.
    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>, ClientError> {
        let url = self.api_endpoint(&["workspaces"]);
        let response = self
            .send("list_workspaces", self.http.get(url).timeout(READ_TIMEOUT))
            .await?;
        let envelope: WorkspacesEnvelope = response.json().await?;
        Ok(envelope.workspaces)
    }

    /// PATCH /workspaces/{id} — rename a workspace.
    pub async fn rename_workspace(
        &self,
        workspace_id: &str,
        new_name: &str,
    ) -> Result<Workspace, ClientError> {
        let url = self.api_endpoint(&["workspaces", workspace_id]);
        let body = serde_json::json!({ "name": new_name });
        let response = self
            .send("rename_workspace", self.http.patch(url).timeout(WRITE_TIMEOUT).json(&body))
            .await?;
        let envelope: WorkspaceEnvelope = response.json().await?;
        Ok(envelope.workspace.unwrap_or_default())
    }

    // ── Code ─────────────────────────────────────────────────────

    /// GET /workspaces/{id}/code — current source text.
    pub async fn get_code(&self, workspace_id: &str) -> Result<String, ClientError> {
        let url = self.api_endpoint(&["workspaces", workspace_id, "code"]);
        let response = self
            .send("get_code", self.http.get(url).timeout(READ_TIMEOUT))
            .await?;
        let envelope: CodeEnvelope = response.json().await?;
        Ok(envelope.code)
    }

    /// POST /workspaces/{id}/code — replace the source text. Returns the
    /// raw response body; the API is not consistent about an envelope here.
    pub async fn update_code(&self, workspace_id: &str, code: &str) -> Result<Value, ClientError> {
        let url = self.api_endpoint(&["workspaces", workspace_id, "code"]);
        let body = serde_json::json!({ "code": code });
        let response = self
            .send("update_code", self.http.post(url).timeout(WRITE_TIMEOUT).json(&body))
            .await?;
        Ok(response.json().await?)
    }

    // ── Deployments ──────────────────────────────────────────────

    /// GET /workspaces/{id}/deployments/latest — most recent published
    /// snapshot. Read-only; the shape is owned by the server.
    pub async fn latest_deployment(&self, workspace_id: &str) -> Result<Value, ClientError> {
        let url = self.api_endpoint(&["workspaces", workspace_id, "deployments", "latest"]);
        let response = self
            .send("latest_deployment", self.http.get(url).timeout(READ_TIMEOUT))
            .await?;
        let envelope: DeploymentEnvelope = response.json().await?;
        Ok(envelope.deployment)
    }

    // ── Execution ────────────────────────────────────────────────

    /// POST {host}/run/{id} — invoke the workspace's exported `main` with a
    /// JSON payload. The response is JSON when it parses and raw text
    /// otherwise; deployed functions may return either.
    pub async fn execute(&self, workspace_id: &str, input: &Value) -> Result<Value, ClientError> {
        let url = self.run_endpoint(workspace_id);
        let response = self
            .send("execute", self.http.post(url).timeout(EXECUTE_TIMEOUT).json(input))
            .await?;
        let text = response.text().await?;
        Ok(decode_execute_body(text))
    }

    // ── Secrets ──────────────────────────────────────────────────

    /// GET /workspaces/{id}/secrets — keys only; values are never returned.
    pub async fn list_secrets(&self, workspace_id: &str) -> Result<Vec<Secret>, ClientError> {
        let url = self.api_endpoint(&["workspaces", workspace_id, "secrets"]);
        let response = self
            .send("list_secrets", self.http.get(url).timeout(READ_TIMEOUT))
            .await?;
        let envelope: SecretsEnvelope = response.json().await?;
        Ok(envelope.secrets)
    }

    /// POST /workspaces/{id}/secrets — create a secret. Keys are write-once:
    /// a duplicate key comes back as a conflict status, surfaced unchanged.
    /// Returns the full secret list after creation.
    pub async fn create_secret(
        &self,
        workspace_id: &str,
        key: &str,
        value: &str,
    ) -> Result<Vec<Secret>, ClientError> {
        let url = self.api_endpoint(&["workspaces", workspace_id, "secrets"]);
        let body = serde_json::json!({ "key": key, "value": value });
        let response = self
            .send("create_secret", self.http.post(url).timeout(WRITE_TIMEOUT).json(&body))
            .await?;
        let envelope: SecretsEnvelope = response.json().await?;
        Ok(envelope.secrets)
    }

    /// DELETE /workspaces/{id}/secrets/{secretId} — the API sends an empty
    /// body on success; callers get `{}` in that case.
    pub async fn delete_secret(
        &self,
        workspace_id: &str,
        secret_id: &str,
    ) -> Result<Value, ClientError> {
        let url = self.api_endpoint(&["workspaces", workspace_id, "secrets", secret_id]);
        let response = self
            .send("delete_secret", self.http.delete(url).timeout(WRITE_TIMEOUT))
            .await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_else(|_| Value::Object(serde_json::Map::new())))
    }

    // ── Packages ─────────────────────────────────────────────────

    /// GET /workspaces/{id}/packages — installed npm dependencies.
    pub async fn list_packages(&self, workspace_id: &str) -> Result<Vec<Package>, ClientError> {
        let url = self.api_endpoint(&["workspaces", workspace_id, "packages"]);
        let response = self
            .send("list_packages", self.http.get(url).timeout(READ_TIMEOUT))
            .await?;
        let envelope: PackagesEnvelope = response.json().await?;
        Ok(envelope.packages)
    }

    /// POST /workspaces/{id}/packages — install a package. A missing or
    /// `"latest"` version is resolved against the registry first.
    pub async fn install_package(
        &self,
        workspace_id: &str,
        name: &str,
        version: Option<&str>,
    ) -> Result<Package, ClientError> {
        let version = self.resolve_version(name, version).await?;
        let url = self.api_endpoint(&["workspaces", workspace_id, "packages"]);
        let body = serde_json::json!({ "name": name, "version": version });
        let response = self
            .send("install_package", self.http.post(url).timeout(WRITE_TIMEOUT).json(&body))
            .await?;
        let envelope: PackageEnvelope = response.json().await?;
        Ok(envelope.package.unwrap_or(Package {
            name: name.to_string(),
            version,
        }))
    }

    /// PUT /workspaces/{id}/packages/{name} — change a package's pinned
    /// version, resolving `"latest"` the same way as install.
    pub async fn update_package(
        &self,
        workspace_id: &str,
        name: &str,
        version: Option<&str>,
    ) -> Result<Package, ClientError> {
        let version = self.resolve_version(name, version).await?;
        let url = self.api_endpoint(&["workspaces", workspace_id, "packages", name]);
        let body = serde_json::json!({ "version": version });
        let response = self
            .send("update_package", self.http.put(url).timeout(WRITE_TIMEOUT).json(&body))
            .await?;
        let envelope: PackageEnvelope = response.json().await?;
        Ok(envelope.package.unwrap_or(Package {
            name: name.to_string(),
            version,
        }))
    }

    /// DELETE /workspaces/{id}/packages/{name} — uninstall. Raw body back.
    pub async fn remove_package(
        &self,
        workspace_id: &str,
        name: &str,
    ) -> Result<Value, ClientError> {
        let url = self.api_endpoint(&["workspaces", workspace_id, "packages", name]);
        let response = self
            .send("remove_package", self.http.delete(url).timeout(WRITE_TIMEOUT))
            .await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_else(|_| Value::Object(serde_json::Map::new())))
    }

    /// POST /workspaces/{id}/packages/update-layer — rebuild the dependency
    /// layer after package changes. Raw body back.
    pub async fn update_package_layer(&self, workspace_id: &str) -> Result<Value, ClientError> {
        let url = self.api_endpoint(&["workspaces", workspace_id, "packages", "update-layer"]);
        let response = self
            .send("update_package_layer", self.http.post(url).timeout(WRITE_TIMEOUT))
            .await?;
        Ok(response.json().await?)
    }

    /// Pass explicit versions through; resolve `None`, `""`, and `"latest"`
    /// against the registry. Resolution failure is fatal for the operation.
    async fn resolve_version(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> Result<String, ClientError> {
        match version {
            Some(v) if !v.is_empty() && v != "latest" => Ok(v.to_string()),
            _ => self.registry.resolve_latest(name).await,
        }
    }
}
