#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::new_without_default,
    clippy::return_self_not_must_use,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::uninlined_format_args
)]

pub mod client;
pub mod config;
pub mod tools;

pub use client::{ClientError, MicroFnClient, Package, Secret, Workspace};
pub use config::Config;
pub use tools::{default_tools, Tool, ToolResult, ToolSpec};
