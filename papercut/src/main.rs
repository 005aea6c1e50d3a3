//! # Papercut CLI Entry Point
//!
//! The main executable for the `papercut` tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and sets up logging.
//! 2. **Description**: Loads the API description (bundled, or the file given with `--api`).
//! 3. **Execution**: Builds a `papercut_core` client and lists, describes or calls methods.
//! 4. **Presentation**: Formats and prints the resulting data or error to standard output/error.

mod cli;
mod formatter;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, ConnectionArgs};
use formatter::{FormattedString, MethodList};
use papercut_core::client::Client;
use papercut_core::description::ApiDescription;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let description = match load_description(args.api.as_deref()) {
        Ok(description) => description,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    match args.command {
        Commands::List => list_methods(description),
        Commands::Describe { method } => describe_method(description, &method),
        Commands::Call {
            connection,
            method,
            args,
        } => run_call(connection, description, &method, args).await,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_description(path: Option<&Path>) -> anyhow::Result<ApiDescription> {
    match path {
        Some(path) => ApiDescription::from_path(path)
            .with_context(|| format!("Failed to load API description '{}'", path.display())),
        None => ApiDescription::bundled().context("The bundled API description is invalid"),
    }
}

fn list_methods(description: ApiDescription) {
    let client = Client::offline(description);
    println!(
        "{}",
        FormattedString::from(MethodList(client.methods().to_vec()))
    );
}

fn describe_method(description: ApiDescription, name: &str) {
    let client = Client::offline(description);

    match client.method(name) {
        Some(method) => println!("{}", FormattedString::from(method.descriptor())),
        None => {
            eprintln!(
                "{}",
                FormattedString::from(anyhow::anyhow!("Method '{name}' not found"))
            );
            process::exit(1);
        }
    }
}

async fn run_call(
    connection: ConnectionArgs,
    description: ApiDescription,
    method: &str,
    args: Vec<serde_json::Value>,
) {
    let config = connection.config();
    tracing::debug!(url = %config.url(), "connecting");

    let client = match Client::new(&config, connection.token, description) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    match client.call(method, args).await {
        Ok(value) => println!("{}", FormattedString::from(value)),
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    }
}
