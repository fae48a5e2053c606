//! Tool subsystem exposing the microfn API as agent-callable capabilities.
//!
//! Each tool implements the [`Tool`] trait defined in [`traits`], which
//! requires a name, description, JSON parameter schema, and an async
//! `execute` method returning a structured [`ToolResult`]. Every tool wraps
//! exactly one [`MicroFnClient`](crate::client::MicroFnClient) operation:
//! validate arguments, issue one request, hand back the unwrapped payload.
//!
//! Tools are assembled into a registry by [`default_tools`] from a shared
//! [`Config`]. The client is built per invocation, so a missing
//! `MICROFN_API_TOKEN` surfaces as a tool failure on first use instead of
//! aborting the host at startup.
//!
//! # Extension
//!
//! To add a new tool, implement [`Tool`] in a new submodule and register it
//! in [`default_tools`].

pub mod check_deployment;
pub mod create_function;
pub mod execute_function;
pub mod get_function_code;
pub mod list_functions;
pub mod packages;
pub mod ping;
pub mod rename_function;
pub mod secrets;
pub mod traits;
pub mod update_function_code;

pub use check_deployment::CheckDeploymentTool;
pub use create_function::CreateFunctionTool;
pub use execute_function::ExecuteFunctionTool;
pub use get_function_code::GetFunctionCodeTool;
pub use list_functions::ListFunctionsTool;
pub use packages::{
    InstallPackageTool, ListPackagesTool, RemovePackageTool, UpdatePackageLayerTool,
    UpdatePackageTool,
};
pub use ping::PingTool;
pub use rename_function::RenameFunctionTool;
pub use secrets::{CreateSecretTool, DeleteSecretTool, GetSecretsTool};
pub use traits::{Tool, ToolResult, ToolSpec};
pub use update_function_code::UpdateFunctionCodeTool;

use crate::client::{sanitize_api_error, ClientError};
use crate::config::Config;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Extract a required string argument; `None` for missing or non-string.
pub(crate) fn str_arg<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

/// Turn a client error into an agent-visible failure. Secret-like tokens
/// are scrubbed out of the text; the caller keeps nothing back.
pub(crate) fn client_failure(err: &ClientError) -> ToolResult {
    ToolResult::fail(sanitize_api_error(&err.to_string()))
}

/// Pretty-printed JSON output for a successful invocation.
pub(crate) fn json_output<T: Serialize>(value: &T) -> anyhow::Result<ToolResult> {
    Ok(ToolResult::ok(serde_json::to_string_pretty(value)?))
}

/// Create the full tool registry (16 tools) over a shared configuration.
pub fn default_tools(config: Arc<Config>) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(PingTool::new()),
        Box::new(CreateFunctionTool::new(config.clone())),
        Box::new(ListFunctionsTool::new(config.clone())),
        Box::new(GetFunctionCodeTool::new(config.clone())),
        Box::new(UpdateFunctionCodeTool::new(config.clone())),
        Box::new(ExecuteFunctionTool::new(config.clone())),
        Box::new(CheckDeploymentTool::new(config.clone())),
        Box::new(RenameFunctionTool::new(config.clone())),
        Box::new(GetSecretsTool::new(config.clone())),
        Box::new(CreateSecretTool::new(config.clone())),
        Box::new(DeleteSecretTool::new(config.clone())),
        Box::new(ListPackagesTool::new(config.clone())),
        Box::new(InstallPackageTool::new(config.clone())),
        Box::new(UpdatePackageTool::new(config.clone())),
        Box::new(RemovePackageTool::new(config.clone())),
        Box::new(UpdatePackageLayerTool::new(config)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Vec<Box<dyn Tool>> {
        default_tools(Arc::new(Config::default()))
    }

    #[test]
    fn default_tools_has_expected_count() {
        assert_eq!(registry().len(), 16);
    }

    #[test]
    fn default_tools_names() {
        let tools = registry();
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        for expected in [
            "ping",
            "create_function",
            "list_functions",
            "get_function_code",
            "update_function_code",
            "execute_function",
            "check_deployment",
            "rename_function",
            "get_secrets",
            "create_secret",
            "delete_secret",
            "list_packages",
            "install_package",
            "update_package",
            "remove_package",
            "update_package_layer",
        ] {
            assert!(names.contains(&expected), "missing tool {expected}");
        }
    }

    #[test]
    fn default_tools_names_are_unique() {
        let tools = registry();
        let mut names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), tools.len());
    }

    #[test]
    fn default_tools_all_have_descriptions() {
        for tool in &registry() {
            assert!(
                !tool.description().is_empty(),
                "Tool {} has empty description",
                tool.name()
            );
        }
    }

    #[test]
    fn default_tools_all_have_schemas() {
        for tool in &registry() {
            let schema = tool.parameters_schema();
            assert!(
                schema.is_object(),
                "Tool {} schema is not an object",
                tool.name()
            );
            assert!(
                schema["properties"].is_object(),
                "Tool {} schema has no properties",
                tool.name()
            );
        }
    }

    #[test]
    fn tool_spec_generation() {
        for tool in &registry() {
            let spec = tool.spec();
            assert_eq!(spec.name, tool.name());
            assert_eq!(spec.description, tool.description());
            assert!(spec.parameters.is_object());
        }
    }

    #[test]
    fn tool_result_serde() {
        let result = ToolResult::ok("hello");
        let json = serde_json::to_string(&result).unwrap();
        let parsed: ToolResult = serde_json::from_str(&json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.output, "hello");
        assert!(parsed.error.is_none());
    }

    #[test]
    fn tool_result_with_error_serde() {
        let result = ToolResult::fail("boom");
        let json = serde_json::to_string(&result).unwrap();
        let parsed: ToolResult = serde_json::from_str(&json).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error.as_deref(), Some("boom"));
    }

    #[test]
    fn client_failure_scrubs_tokens() {
        let err = ClientError::Status {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "invalid token mfn_super_secret_value".into(),
        };
        let result = client_failure(&err);
        let text = result.error.unwrap();
        assert!(!text.contains("super_secret_value"), "{text}");
        assert!(text.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn every_tool_fails_cleanly_without_token() {
        // Argument-complete calls against an unconfigured environment must
        // produce a config failure, not a panic or a network attempt.
        let args = serde_json::json!({
            "function_id": "fn1",
            "workspace_id": "ws1",
            "name": "lodash",
            "new_name": "renamed",
            "key": "API_KEY",
            "value": "v",
            "secret_id": "s1",
            "code": "export async function main() {}",
        });
        for tool in registry() {
            if tool.name() == "ping" {
                continue;
            }
            let result = tool.execute(args.clone()).await.unwrap();
            assert!(!result.success, "{} should fail without token", tool.name());
            assert!(
                result.error.unwrap().contains("MICROFN_API_TOKEN"),
                "{} error should name the missing setting",
                tool.name()
            );
        }
    }
}
