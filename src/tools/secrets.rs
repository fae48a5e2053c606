//! Secret management tools.
//!
//! Secrets are write-once: the platform rejects a duplicate key with a
//! conflict status, which these tools surface unchanged — delete first,
//! then re-create. Values are never echoed back in any response.

use super::traits::{Tool, ToolResult};
use super::{client_failure, json_output, str_arg};
use crate::config::Config;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// List the secret keys of a workspace.
pub struct GetSecretsTool {
    config: Arc<Config>,
}

impl GetSecretsTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for GetSecretsTool {
    fn name(&self) -> &str {
        "get_secrets"
    }

    fn description(&self) -> &str {
        "List all secrets of a workspace. Only IDs and keys are returned; \
         values are write-only."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workspace_id": {
                    "type": "string",
                    "description": "Workspace ID"
                }
            },
            "required": ["workspace_id"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult> {
        let Some(workspace_id) = str_arg(&args, "workspace_id") else {
            return Ok(ToolResult::fail("missing required parameter: workspace_id"));
        };

        info!(workspace_id, "listing secrets");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.list_secrets(workspace_id).await {
            Ok(secrets) => json_output(&secrets),
            Err(e) => Ok(client_failure(&e)),
        }
    }
}

/// Create a secret. Keys are unique per workspace and write-once.
pub struct CreateSecretTool {
    config: Arc<Config>,
}

impl CreateSecretTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for CreateSecretTool {
    fn name(&self) -> &str {
        "create_secret"
    }

    fn description(&self) -> &str {
        "Create a new secret in a workspace. Keys are write-once: to change \
         a value, delete the secret and create it again."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workspace_id": {
                    "type": "string",
                    "description": "Workspace ID"
                },
                "key": {
                    "type": "string",
                    "description": "Secret key, unique within the workspace"
                },
                "value": {
                    "type": "string",
                    "description": "Secret value (never echoed back)"
                }
            },
            "required": ["workspace_id", "key", "value"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult> {
        let Some(workspace_id) = str_arg(&args, "workspace_id") else {
            return Ok(ToolResult::fail("missing required parameter: workspace_id"));
        };
        let Some(key) = str_arg(&args, "key") else {
            return Ok(ToolResult::fail("missing required parameter: key"));
        };
        let Some(value) = str_arg(&args, "value") else {
            return Ok(ToolResult::fail("missing required parameter: value"));
        };

        // The value itself stays out of the logs.
        info!(workspace_id, key, "creating secret");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.create_secret(workspace_id, key, value).await {
            Ok(secrets) => json_output(&secrets),
            Err(e) => Ok(client_failure(&e)),
        }
    }
}

/// Delete a secret by its ID.
pub struct DeleteSecretTool {
    config: Arc<Config>,
}

impl DeleteSecretTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for DeleteSecretTool {
    fn name(&self) -> &str {
        "delete_secret"
    }

    fn description(&self) -> &str {
        "Delete a secret from a workspace by its secret ID."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "workspace_id": {
                    "type": "string",
                    "description": "Workspace ID"
                },
                "secret_id": {
                    "type": "string",
                    "description": "ID of the secret to delete"
                }
            },
            "required": ["workspace_id", "secret_id"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult> {
        let Some(workspace_id) = str_arg(&args, "workspace_id") else {
            return Ok(ToolResult::fail("missing required parameter: workspace_id"));
        };
        let Some(secret_id) = str_arg(&args, "secret_id") else {
            return Ok(ToolResult::fail("missing required parameter: secret_id"));
        };

        info!(workspace_id, secret_id, "deleting secret");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.delete_secret(workspace_id, secret_id).await {
            Ok(body) => json_output(&body),
            Err(e) => Ok(client_failure(&e)),
        }
    }
}
