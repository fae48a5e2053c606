use super::traits::{Tool, ToolResult};
use super::{client_failure, json_output, str_arg};
use crate::config::Config;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Create a new function (workspace) with a name and initial code body.
pub struct CreateFunctionTool {
    config: Arc<Config>,
}

impl CreateFunctionTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for CreateFunctionTool {
    fn name(&self) -> &str {
        "create_function"
    }

    fn description(&self) -> &str {
        "Create a new function (workspace) with the given name and code. \
         The code must include an exported main(input) function as the entrypoint, \
         e.g. `export async function main(input) { return \"hello\"; }`."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name for the new function"
                },
                "code": {
                    "type": "string",
                    "description": "TypeScript source with an exported main(input) entrypoint"
                }
            },
            "required": ["name", "code"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult> {
        let Some(name) = str_arg(&args, "name") else {
            return Ok(ToolResult::fail("missing required parameter: name"));
        };
        let Some(code) = str_arg(&args, "code") else {
            return Ok(ToolResult::fail("missing required parameter: code"));
        };

        info!(name, "creating function");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.create_workspace(name, code).await {
            Ok(workspace) => {
                info!(workspace_id = %workspace.id, "function created");
                json_output(&workspace)
            }
            Err(e) => Ok(client_failure(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_code_fails_without_network() {
        let tool = CreateFunctionTool::new(Arc::new(Config::default()));
        let result = tool.execute(json!({"name": "hello"})).await.unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("code"));
    }

    #[tokio::test]
    async fn missing_token_surfaces_config_error() {
        let tool = CreateFunctionTool::new(Arc::new(Config::default()));
        let result = tool
            .execute(json!({"name": "hello", "code": "export async function main() {}"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("MICROFN_API_TOKEN"));
    }
}
