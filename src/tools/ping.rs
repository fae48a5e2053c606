use super::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

/// Connectivity probe. Takes no arguments, answers `pong`.
pub struct PingTool;

impl PingTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for PingTool {
    fn name(&self) -> &str {
        "ping"
    }

    fn description(&self) -> &str {
        "Responds with 'pong' to test tool connectivity."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(&self, _args: Value) -> anyhow::Result<ToolResult> {
        debug!("ping request received");
        Ok(ToolResult::ok("pong"))
    }
}
