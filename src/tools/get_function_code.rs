use super::traits::{Tool, ToolResult};
use super::{client_failure, str_arg};
use crate::config::Config;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Fetch the current source text of a function.
pub struct GetFunctionCodeTool {
    config: Arc<Config>,
}

impl GetFunctionCodeTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for GetFunctionCodeTool {
    fn name(&self) -> &str {
        "get_function_code"
    }

    fn description(&self) -> &str {
        "Get the current code of a function by its ID."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "function_id": {
                    "type": "string",
                    "description": "Function ID"
                }
            },
            "required": ["function_id"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult> {
        let Some(function_id) = str_arg(&args, "function_id") else {
            return Ok(ToolResult::fail("missing required parameter: function_id"));
        };

        info!(function_id, "fetching function code");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.get_code(function_id).await {
            Ok(code) => Ok(ToolResult::ok(code)),
            Err(e) => Ok(client_failure(&e)),
        }
    }
}
