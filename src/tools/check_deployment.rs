use super::traits::{Tool, ToolResult};
use super::{client_failure, json_output, str_arg};
use crate::config::Config;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Look up the latest published deployment of a function.
pub struct CheckDeploymentTool {
    config: Arc<Config>,
}

impl CheckDeploymentTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for CheckDeploymentTool {
    fn name(&self) -> &str {
        "check_deployment"
    }

    fn description(&self) -> &str {
        "Get the latest deployment of a function (status, timestamps)."
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

        info!(function_id, "checking latest deployment");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.latest_deployment(function_id).await {
            Ok(deployment) => json_output(&deployment),
            Err(e) => Ok(client_failure(&e)),
        }
    }
}
