use super::traits::{Tool, ToolResult};
use super::{client_failure, json_output};
use crate::config::Config;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// List all functions (workspaces) visible to the configured token.
pub struct ListFunctionsTool {
    config: Arc<Config>,
}

impl ListFunctionsTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for ListFunctionsTool {
    fn name(&self) -> &str {
        "list_functions"
    }

    fn description(&self) -> &str {
        "List all functions (workspaces) in the account, with their IDs and names."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _args: Value) -> anyhow::Result<ToolResult> {
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.list_workspaces().await {
            Ok(workspaces) => {
                info!(count = workspaces.len(), "listed functions");
                json_output(&workspaces)
            }
            Err(e) => Ok(client_failure(&e)),
        }
    }
}
