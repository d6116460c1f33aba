//! Elements CLI - API documentation from OpenAPI descriptions.
//!
//! Provides commands for:
//! - `preview`: Serve the documentation locally, optionally with live reload
//!   and a CORS proxy for the "Try It" panel
//! - `export`: Print a self-contained HTML page to stdout

mod commands;
mod error;
mod output;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExportArgs, PreviewArgs};
use error::CliError;
use output::Output;

/// Elements CLI.
#[derive(Parser, Debug)]
#[command(name = "elements", version, about, disable_version_flag = true)]
struct Cli {
    /// Print version number.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Enable informational logging (overrides RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export rendered API docs.
    Export(ExportArgs),
    /// Preview rendered API docs.
    Preview(PreviewArgs),
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = exit_code(err.kind());
            let _ = err.print();
            std::process::exit(code);
        }
    };
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Export(args) => args.execute(),
        Commands::Preview(args) => {
            // One logical thread drives every connection, watcher event and proxy call.
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(args.execute())
        }
    }
}

/// Help and version output exit successfully, every other usage error with 1.
fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
