use super::traits::{Tool, ToolResult};
use super::{client_failure, json_output, str_arg};
use crate::config::Config;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Replace the source text of a function.
pub struct UpdateFunctionCodeTool {
    config: Arc<Config>,
}

impl UpdateFunctionCodeTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for UpdateFunctionCodeTool {
    fn name(&self) -> &str {
        "update_function_code"
    }

    fn description(&self) -> &str {
        "Replace the code of a function. The new code must keep an exported \
         main(input) entrypoint."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "function_id": {
                    "type": "string",
                    "description": "Function ID"
                },
                "code": {
                    "type": "string",
                    "description": "Replacement source with an exported main(input) entrypoint"
                }
            },
            "required": ["function_id", "code"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult> {
        let Some(function_id) = str_arg(&args, "function_id") else {
            return Ok(ToolResult::fail("missing required parameter: function_id"));
        };
        let Some(code) = str_arg(&args, "code") else {
            return Ok(ToolResult::fail("missing required parameter: code"));
        };

        info!(function_id, "updating function code");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.update_code(function_id, code).await {
            Ok(body) => json_output(&body),
            Err(e) => Ok(client_failure(&e)),
        }
    }
}
