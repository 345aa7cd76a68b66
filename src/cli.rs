//! CLI definition and handler

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use console::{style, Emoji};

use crate::config::Config;
use crate::render::Renderer;
use crate::resolve::SystemProbe;
use crate::runner::SystemRunner;

static CHECK: Emoji = Emoji("✓ ", "* ");
static INFO: Emoji = Emoji("ℹ ", "i ");

#[derive(Parser, Debug)]
#[command(name = "mermaid-render")]
#[command(author, version, about = "Render Mermaid diagrams through the Mermaid CLI (mmdc)")]
pub struct Cli {
    /// Diagram source file (e.g. flow.mmd)
    pub input: Option<PathBuf>,

    /// Output file; the extension picks the format (svg, png, pdf, ...)
    pub output: Option<PathBuf>,

    /// Use this mmdc executable instead of searching for one
    #[arg(long, value_name = "PATH")]
    pub mmdc: Option<PathBuf>,

    /// Mermaid theme passed to the renderer
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Background color passed to the renderer
    #[arg(short, long)]
    pub background: Option<String>,

    /// Config file (default: <config dir>/mermaid-render/config.json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the renderer command without running it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Both positionals, or `None` when either is missing.
    pub fn paths(&self) -> Option<(PathBuf, PathBuf)> {
        Some((self.input.clone()?, self.output.clone()?))
    }
}

/// Usage text printed when the positionals are missing.
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

/// Render `input` into `output` with the configured renderer.
pub fn render(cli: &Cli, input: PathBuf, output: PathBuf) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(mmdc) = &cli.mmdc {
        config.executable_path = Some(mmdc.clone());
    }
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if let Some(background) = &cli.background {
        config.background = background.clone();
    }

    let probe = SystemProbe::from_env();
    let runner = SystemRunner;
    let renderer = Renderer::new(config.resolver(), &probe, &runner, config.render_options());

    if cli.dry_run {
        let command = renderer.plan(&input, &output)?;
        println!("{}", command);
        println!("{} Dry run - renderer not started", INFO);
        return Ok(());
    }

    renderer.render(&input, &output)?;
    println!("{} Wrote {}", CHECK, style(output.display()).green());

    Ok(())
}
