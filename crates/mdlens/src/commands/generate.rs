//! `mdlens generate` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mdlens_config::{CliSettings, Config};
use mdlens_highlight::SyntectHighlighter;
use mdlens_render::{Converter, Template};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Markdown file to render.
    markdown: PathBuf,

    /// Path to configuration file (default: auto-discover mdlens.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page template containing a {{CONTENT}} marker (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output file for the finished page (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable syntax highlighting of fenced code blocks.
    #[arg(long)]
    no_highlight: bool,

    /// Enable verbose output (show render logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, template validation or
    /// writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let out = Output::new();

        let cli_settings = CliSettings {
            template: self.template,
            output: self.output,
            highlight_enabled: self.no_highlight.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let markdown = read(&self.markdown)?;
        let template = Template::new(read(&config.generate_resolved.template)?)?;

        tracing::info!(
            path = %self.markdown.display(),
            template = %config.generate_resolved.template.display(),
            highlight = config.highlight.enabled,
            "rendering markdown"
        );

        let mut converter = Converter::new();
        if config.highlight.enabled {
            converter = converter.with_highlighter(SyntectHighlighter::new());
        }
        let result = converter.convert_with_template(&markdown, &template);

        for warning in &result.warnings {
            out.warning(warning);
        }

        let output_path = &config.generate_resolved.output;
        std::fs::write(output_path, &result.html).map_err(|source| CliError::Write {
            path: output_path.clone(),
            source,
        })?;

        out.success(&format!("Generated {}", output_path.display()));
        Ok(())
    }
}

/// Read a file with path context on failure.
fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
