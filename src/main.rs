// Copyright 2026 Sandcastle Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Parser, Subcommand};
use sandcastle::cli;

#[derive(Parser)]
#[command(
    name = "sandcastle",
    about = "Sandcastle: compile AI-generated web projects into sandboxed previews",
    version,
    after_help = "Run 'sandcastle <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a project directory into a single preview document
    Compile {
        /// Directory containing the generated project files
        dir: String,
        /// Where to write the compiled document
        #[arg(long, short, default_value = "preview.html")]
        output: String,
    },
    /// Validate a project directory and report its detected type
    Inspect {
        /// Directory containing the generated project files
        dir: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("sandcastle=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sandcastle=info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Compile { dir, output } => cli::compile_cmd::run(&dir, &output, cli.json).await,
        Commands::Inspect { dir } => cli::inspect_cmd::run(&dir, cli.json).await,
    }
}
