//! mermaid-render - render Mermaid diagrams through the Mermaid CLI
//!
//! Finds the `mmdc` executable (PATH first, then the global npm install
//! directory) and runs it on one input file, with the output format picked
//! from the output file extension.

mod cli;
mod config;
mod error;
mod render;
mod resolve;
mod runner;

use std::process::ExitCode;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::RenderError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some((input, output)) = cli.paths() else {
        println!("{}", cli::usage());
        return ExitCode::from(1);
    };

    match cli::render(&cli, input, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            let code = err
                .downcast_ref::<RenderError>()
                .map(RenderError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
