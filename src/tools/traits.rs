use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a tool invocation, as shown to the calling agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error.into()),
        }
    }
}

/// Registration record consumed by the agent-tool-calling host: name,
/// human-readable description, and JSON Schema for the parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// An agent-callable capability.
///
/// Implementations are stateless beyond their configuration handle;
/// invocations may run concurrently and must not assume any ordering
/// between distinct calls.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema object describing the accepted arguments.
    fn parameters_schema(&self) -> Value;

    /// Run the tool with JSON arguments. Expected failures (bad arguments,
    /// API errors) come back as an unsuccessful [`ToolResult`]; `Err` is
    /// reserved for invariant violations in the tool itself.
    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult>;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}
