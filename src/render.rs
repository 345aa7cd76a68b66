//! Building and running the Mermaid CLI command line

use std::path::Path;

use console::{style, Emoji};
use tracing::{debug, info};

use crate::error::{RenderError, Result};
use crate::resolve::{Probe, Resolver};
use crate::runner::{ProcessRunner, RenderCommand};

static ARROW: Emoji = Emoji("→ ", "-> ");

/// Asks the renderer to size the PDF page to the diagram.
pub const PDF_FIT_FLAG: &str = "--pdfFit";

pub const DEFAULT_THEME: &str = "default";
pub const DEFAULT_BACKGROUND: &str = "transparent";

/// Output kind, taken from the output file extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Paginated output (`.pdf`).
    Document,
    /// Everything else. The renderer decides whether it is supported.
    Image,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => OutputFormat::Document,
            _ => OutputFormat::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub theme: String,
    pub background: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

/// Argument list for one render. `--pdfFit` is appended for document output.
pub fn build_command(
    program: &Path,
    input: &Path,
    output: &Path,
    options: &RenderOptions,
) -> RenderCommand {
    let mut cmd = RenderCommand::new(program);
    cmd.arg("-i")
        .arg(input)
        .arg("-o")
        .arg(output)
        .arg("-t")
        .arg(&options.theme)
        .arg("-b")
        .arg(&options.background);

    if OutputFormat::from_path(output) == OutputFormat::Document {
        cmd.arg(PDF_FIT_FLAG);
    }

    cmd
}

/// Resolves the renderer and drives it through a [`ProcessRunner`].
pub struct Renderer<'a> {
    resolver: Resolver,
    probe: &'a dyn Probe,
    runner: &'a dyn ProcessRunner,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(
        resolver: Resolver,
        probe: &'a dyn Probe,
        runner: &'a dyn ProcessRunner,
        options: RenderOptions,
    ) -> Self {
        Self { resolver, probe, runner, options }
    }

    /// Resolve the executable and build the command without running it.
    pub fn plan(&self, input: &Path, output: &Path) -> Result<RenderCommand> {
        let program = self.resolver.resolve(self.probe)?;
        let format = OutputFormat::from_path(output);
        debug!("Output {} treated as {:?}", output.display(), format);
        Ok(build_command(&program, input, output, &self.options))
    }

    /// Plan, print the command, then run it and wait for it to finish.
    pub fn render(&self, input: &Path, output: &Path) -> Result<()> {
        let command = self.plan(input, output)?;
        println!("{} Running: {}", ARROW, style(&command).dim());

        let outcome = self
            .runner
            .run(&command)
            .map_err(|source| RenderError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        if !outcome.success() {
            return Err(RenderError::RendererFailed {
                command: command.to_string(),
                code: outcome.code,
            });
        }

        info!("Rendered {} -> {}", input.display(), output.display());
        Ok(())
    }
}
