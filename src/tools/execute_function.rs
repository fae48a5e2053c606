use super::traits::{Tool, ToolResult};
use super::{client_failure, json_output, str_arg};
use crate::config::Config;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Invoke a function's exported `main` through the run endpoint.
pub struct ExecuteFunctionTool {
    config: Arc<Config>,
}

impl ExecuteFunctionTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for ExecuteFunctionTool {
    fn name(&self) -> &str {
        "execute_function"
    }

    fn description(&self) -> &str {
        "Execute the main function of a workspace with a JSON payload. The \
         result is whatever the function returns: JSON when it parses, plain \
         text otherwise."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "function_id": {
                    "type": "string",
                    "description": "Function ID"
                },
                "input_data": {
                    "description": "JSON payload passed to main(input). Defaults to {}."
                }
            },
            "required": ["function_id"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult> {
        let Some(function_id) = str_arg(&args, "function_id") else {
            return Ok(ToolResult::fail("missing required parameter: function_id"));
        };
        let input = args
            .get("input_data")
            .cloned()
            .unwrap_or_else(|| json!({}));

        info!(function_id, "executing function");
        debug!(input = %input, "execution payload");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.execute(function_id, &input).await {
            Ok(result) => {
                info!(function_id, "function execution completed");
                json_output(&result)
            }
            Err(e) => Ok(client_failure(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_data_is_optional_in_schema() {
        let schema = ExecuteFunctionTool::new(Arc::new(Config::default())).parameters_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required, vec!["function_id"]);
    }
}
