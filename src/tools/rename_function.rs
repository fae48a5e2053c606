use super::traits::{Tool, ToolResult};
use super::{client_failure, json_output, str_arg};
use crate::config::Config;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Rename a function (workspace). The ID stays stable; only the display
/// name changes.
pub struct RenameFunctionTool {
    config: Arc<Config>,
}

impl RenameFunctionTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for RenameFunctionTool {
    fn name(&self) -> &str {
        "rename_function"
    }

    fn description(&self) -> &str {
        "Rename a function (workspace) to a new name."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "function_id": {
                    "type": "string",
                    "description": "Function ID"
                },
                "new_name": {
                    "type": "string",
                    "description": "New name for the function"
                }
            },
            "required": ["function_id", "new_name"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult> {
        let Some(function_id) = str_arg(&args, "function_id") else {
            return Ok(ToolResult::fail("missing required parameter: function_id"));
        };
        let Some(new_name) = str_arg(&args, "new_name") else {
            return Ok(ToolResult::fail("missing required parameter: new_name"));
        };

        info!(function_id, new_name, "renaming function");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.rename_workspace(function_id, new_name).await {
            Ok(workspace) => json_output(&workspace),
            Err(e) => Ok(client_failure(&e)),
        }
    }
}
