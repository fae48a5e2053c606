//! npm package management tools.
//!
//! Install and update accept an optional version; a missing version or the
//! `"latest"` sentinel is resolved against the npm registry before the
//! platform call, and a failed resolution fails the whole operation.
//! After changing packages, `update_package_layer` rebuilds the runtime's
//! dependency layer.

use super::traits::{Tool, ToolResult};
use super::{client_failure, json_output, str_arg};
use crate::config::Config;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

fn version_arg(args: &Value) -> Option<&str> {
    str_arg(args, "version")
}

/// List the npm packages installed for a function.
pub struct ListPackagesTool {
    config: Arc<Config>,
}

impl ListPackagesTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for ListPackagesTool {
    fn name(&self) -> &str {
        "list_packages"
    }

    fn description(&self) -> &str {
        "List all npm packages installed for a function, with their pinned versions."
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

        info!(function_id, "listing packages");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.list_packages(function_id).await {
            Ok(packages) => {
                info!(count = packages.len(), "packages found");
                json_output(&packages)
            }
            Err(e) => Ok(client_failure(&e)),
        }
    }
}

/// Install an npm package for a function.
pub struct InstallPackageTool {
    config: Arc<Config>,
}

impl InstallPackageTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for InstallPackageTool {
    fn name(&self) -> &str {
        "install_package"
    }

    fn description(&self) -> &str {
        "Install an npm package for a function. When version is omitted or \
         'latest', the latest published version is resolved from the npm \
         registry first."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "function_id": {
                    "type": "string",
                    "description": "Function ID"
                },
                "name": {
                    "type": "string",
                    "description": "Package name, scoped names allowed (@scope/pkg)"
                },
                "version": {
                    "type": "string",
                    "description": "Exact version to install; omit for latest"
                }
            },
            "required": ["function_id", "name"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult> {
        let Some(function_id) = str_arg(&args, "function_id") else {
            return Ok(ToolResult::fail("missing required parameter: function_id"));
        };
        let Some(name) = str_arg(&args, "name") else {
            return Ok(ToolResult::fail("missing required parameter: name"));
        };
        let version = version_arg(&args);

        info!(function_id, package = name, version = version.unwrap_or("latest"), "installing package");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.install_package(function_id, name, version).await {
            Ok(package) => {
                info!(package = %package.name, version = %package.version, "package installed");
                json_output(&package)
            }
            Err(e) => Ok(client_failure(&e)),
        }
    }
}

/// Change the pinned version of an installed package.
pub struct UpdatePackageTool {
    config: Arc<Config>,
}

impl UpdatePackageTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for UpdatePackageTool {
    fn name(&self) -> &str {
        "update_package"
    }

    fn description(&self) -> &str {
        "Update an installed npm package to a new version. When version is \
         omitted or 'latest', the latest published version is resolved from \
         the npm registry first."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "function_id": {
                    "type": "string",
                    "description": "Function ID"
                },
                "name": {
                    "type": "string",
                    "description": "Installed package name"
                },
                "version": {
                    "type": "string",
                    "description": "Target version; omit for latest"
                }
            },
            "required": ["function_id", "name"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult> {
        let Some(function_id) = str_arg(&args, "function_id") else {
            return Ok(ToolResult::fail("missing required parameter: function_id"));
        };
        let Some(name) = str_arg(&args, "name") else {
            return Ok(ToolResult::fail("missing required parameter: name"));
        };
        let version = version_arg(&args);

        info!(function_id, package = name, "updating package");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.update_package(function_id, name, version).await {
            Ok(package) => json_output(&package),
            Err(e) => Ok(client_failure(&e)),
        }
    }
}

/// Uninstall a package from a function.
pub struct RemovePackageTool {
    config: Arc<Config>,
}

impl RemovePackageTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for RemovePackageTool {
    fn name(&self) -> &str {
        "remove_package"
    }

    fn description(&self) -> &str {
        "Remove an installed npm package from a function."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "function_id": {
                    "type": "string",
                    "description": "Function ID"
                },
                "name": {
                    "type": "string",
                    "description": "Package name to remove"
                }
            },
            "required": ["function_id", "name"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<ToolResult> {
        let Some(function_id) = str_arg(&args, "function_id") else {
            return Ok(ToolResult::fail("missing required parameter: function_id"));
        };
        let Some(name) = str_arg(&args, "name") else {
            return Ok(ToolResult::fail("missing required parameter: name"));
        };

        info!(function_id, package = name, "removing package");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.remove_package(function_id, name).await {
            Ok(body) => json_output(&body),
            Err(e) => Ok(client_failure(&e)),
        }
    }
}

/// Rebuild the dependency layer of a function after package changes.
pub struct UpdatePackageLayerTool {
    config: Arc<Config>,
}

impl UpdatePackageLayerTool {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Tool for UpdatePackageLayerTool {
    fn name(&self) -> &str {
        "update_package_layer"
    }

    fn description(&self) -> &str {
        "Rebuild the npm dependency layer of a function so installed \
         packages become available to the runtime."
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

        info!(function_id, "rebuilding package layer");
        let client = match self.config.client() {
            Ok(client) => client,
            Err(e) => return Ok(client_failure(&e)),
        };
        match client.update_package_layer(function_id).await {
            Ok(body) => json_output(&body),
            Err(e) => Ok(client_failure(&e)),
        }
    }
}
