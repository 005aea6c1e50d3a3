//! # CLI
//!
//! This module defines the command-line interface of `papercut` using `clap`.
//!
//! Connection settings can come from flags or from `PAPERCUT_*` environment variables,
//! so the token does not have to appear in the shell history.
use clap::{Args, Parser, Subcommand};
use papercut_core::client::{ConnectionConfig, DEFAULT_PATH};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "papercut",
    version,
    about = "Dynamic XML-RPC client for the print management API"
)]
pub struct Cli {
    /// Path to an API description file (JSON). The bundled description is used otherwise
    #[arg(long, global = true, env = "PAPERCUT_API")]
    pub api: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Call a remote method
    ///
    /// Arguments are validated against the method's parameter list before anything is sent.
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// papercut call --host localhost --token secret getUserAccountBalance alice
    /// papercut call --host localhost --token secret adjustUserAccountBalance alice 5.5 '"Top up"'
    /// ```
    Call {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Method name (e.g. getUserAccountBalance)
        method: String,

        /// Positional arguments. Each one is parsed as JSON, or taken as a plain string if it
        /// is not valid JSON
        #[arg(value_parser = parse_argument, allow_negative_numbers = true)]
        args: Vec<serde_json::Value>,
    },

    /// List the available methods
    List,

    /// Describe a method (show its parameters)
    Describe {
        /// Method name (e.g. getUserAccountBalance)
        method: String,
    },
}

#[derive(Args)]
pub struct ConnectionArgs {
    /// Server host name or address
    #[arg(long, env = "PAPERCUT_HOST")]
    pub host: String,

    /// Server port
    #[arg(long, env = "PAPERCUT_PORT", default_value_t = 9192)]
    pub port: u16,

    /// Authentication token
    #[arg(long, env = "PAPERCUT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Path of the XML-RPC endpoint
    #[arg(long, env = "PAPERCUT_PATH", default_value = DEFAULT_PATH)]
    pub path: String,

    /// Use plain HTTP instead of HTTPS
    #[arg(long)]
    pub insecure: bool,
}

impl ConnectionArgs {
    pub fn config(&self) -> ConnectionConfig {
        ConnectionConfig::new(&self.host, self.port)
            .with_path(&self.path)
            .with_security(!self.insecure)
    }
}

fn parse_argument(value: &str) -> Result<serde_json::Value, String> {
    Ok(serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string())))
}
