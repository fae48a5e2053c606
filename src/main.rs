#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::uninlined_format_args
)]

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use microfn_tools::config::Config;
use microfn_tools::tools::{default_tools, Tool};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

/// CLI front-end over the microfn tool registry. Each subcommand maps to
/// one registered tool, so the binary exercises exactly the surface an
/// agent host sees.
#[derive(Parser, Debug)]
#[command(name = "microfn-tools")]
#[command(version)]
#[command(about = "Agent-callable tools for the microfn FaaS platform.", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the registered tool specs as JSON, for host integration
    Spec,
    /// Check tool connectivity
    Ping,
    /// List all functions in the account
    List,
    /// Create a function from a source file
    Create {
        /// Name for the new function
        name: String,
        /// Path to the source file (must export main(input))
        #[arg(long)]
        file: PathBuf,
    },
    /// Print a function's current code
    Code {
        function_id: String,
    },
    /// Replace a function's code from a source file
    SetCode {
        function_id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Execute a function with a JSON payload
    Run {
        function_id: String,
        /// JSON payload passed to main(input)
        #[arg(long, default_value = "{}")]
        input: String,
    },
    /// Show a function's latest deployment
    Deployment {
        function_id: String,
    },
    /// Rename a function
    Rename {
        function_id: String,
        new_name: String,
    },
    /// Manage workspace secrets
    #[command(subcommand)]
    Secret(SecretCommands),
    /// Manage npm packages of a function
    #[command(subcommand)]
    Package(PackageCommands),
}

#[derive(Subcommand, Debug)]
enum SecretCommands {
    /// List secret keys of a workspace
    List { workspace_id: String },
    /// Create a secret (keys are write-once; delete first to replace)
    Set {
        workspace_id: String,
        key: String,
        value: String,
    },
    /// Delete a secret by its ID
    Rm {
        workspace_id: String,
        secret_id: String,
    },
}

#[derive(Subcommand, Debug)]
enum PackageCommands {
    /// List installed packages
    List { function_id: String },
    /// Install a package (latest version unless --version is given)
    Add {
        function_id: String,
        name: String,
        #[arg(long)]
        version: Option<String>,
    },
    /// Update a package's pinned version
    Update {
        function_id: String,
        name: String,
        #[arg(long)]
        version: Option<String>,
    },
    /// Remove an installed package
    Rm { function_id: String, name: String },
    /// Rebuild the dependency layer after package changes
    SyncLayer { function_id: String },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_target(false).init();
}

/// Find a tool by name and run it; non-success becomes a process failure.
async fn run_tool(tools: &[Box<dyn Tool>], name: &str, args: Value) -> Result<()> {
    let tool = tools
        .iter()
        .find(|t| t.name() == name)
        .with_context(|| format!("unknown tool: {name}"))?;
    let result = tool.execute(args).await?;
    if result.success {
        println!("{}", result.output);
        Ok(())
    } else {
        bail!(result.error.unwrap_or_else(|| "tool failed".to_string()))
    }
}

fn read_source(path: &PathBuf) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Arc::new(Config::from_env());
    let tools = default_tools(config);

    match cli.command {
        Commands::Spec => {
            let specs: Vec<_> = tools.iter().map(|t| t.spec()).collect();
            println!("{}", serde_json::to_string_pretty(&specs)?);
            Ok(())
        }
        Commands::Ping => run_tool(&tools, "ping", json!({})).await,
        Commands::List => run_tool(&tools, "list_functions", json!({})).await,
        Commands::Create { name, file } => {
            let code = read_source(&file)?;
            run_tool(&tools, "create_function", json!({ "name": name, "code": code })).await
        }
        Commands::Code { function_id } => {
            run_tool(&tools, "get_function_code", json!({ "function_id": function_id })).await
        }
        Commands::SetCode { function_id, file } => {
            let code = read_source(&file)?;
            run_tool(
                &tools,
                "update_function_code",
                json!({ "function_id": function_id, "code": code }),
            )
            .await
        }
        Commands::Run { function_id, input } => {
            let input: Value =
                serde_json::from_str(&input).context("--input must be valid JSON")?;
            run_tool(
                &tools,
                "execute_function",
                json!({ "function_id": function_id, "input_data": input }),
            )
            .await
        }
        Commands::Deployment { function_id } => {
            run_tool(&tools, "check_deployment", json!({ "function_id": function_id })).await
        }
        Commands::Rename {
            function_id,
            new_name,
        } => {
            run_tool(
                &tools,
                "rename_function",
                json!({ "function_id": function_id, "new_name": new_name }),
            )
            .await
        }
        Commands::Secret(cmd) => match cmd {
            SecretCommands::List { workspace_id } => {
                run_tool(&tools, "get_secrets", json!({ "workspace_id": workspace_id })).await
            }
            SecretCommands::Set {
                workspace_id,
                key,
                value,
            } => {
                run_tool(
                    &tools,
                    "create_secret",
                    json!({ "workspace_id": workspace_id, "key": key, "value": value }),
                )
                .await
            }
            SecretCommands::Rm {
                workspace_id,
                secret_id,
            } => {
                run_tool(
                    &tools,
                    "delete_secret",
                    json!({ "workspace_id": workspace_id, "secret_id": secret_id }),
                )
                .await
            }
        },
        Commands::Package(cmd) => match cmd {
            PackageCommands::List { function_id } => {
                run_tool(&tools, "list_packages", json!({ "function_id": function_id })).await
            }
            PackageCommands::Add {
                function_id,
                name,
                version,
            } => {
                let mut args = json!({ "function_id": function_id, "name": name });
                if let Some(version) = version {
                    args["version"] = Value::String(version);
                }
                run_tool(&tools, "install_package", args).await
            }
            PackageCommands::Update {
                function_id,
                name,
                version,
            } => {
                let mut args = json!({ "function_id": function_id, "name": name });
                if let Some(version) = version {
                    args["version"] = Value::String(version);
                }
                run_tool(&tools, "update_package", args).await
            }
            PackageCommands::Rm { function_id, name } => {
                run_tool(
                    &tools,
                    "remove_package",
                    json!({ "function_id": function_id, "name": name }),
                )
                .await
            }
            PackageCommands::SyncLayer { function_id } => {
                run_tool(
                    &tools,
                    "update_package_layer",
                    json!({ "function_id": function_id }),
                )
                .await
            }
        },
    }
}
