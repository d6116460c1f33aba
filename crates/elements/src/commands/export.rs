//! `elements export` command implementation.

use std::io::Write;

use clap::Args;
use elements_config::{CliSettings, Config, Env};
use elements_template::{RenderMode, ShellRenderer};

use super::DocumentArgs;
use crate::error::CliError;

/// Arguments for the export command.
#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    document: DocumentArgs,

    /// Provide CORS proxy.
    #[arg(long)]
    cors_proxy: Option<String>,

    /// Elements release referenced from the CDN.
    #[arg(long)]
    elements_version: Option<String>,
}

impl ExportArgs {
    /// Execute the export command, writing the page to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let html = self.render(&Env::from_process())?;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{html}")?;
        stdout.flush()?;
        Ok(())
    }

    fn render(self, env: &Env) -> Result<String, CliError> {
        let (settings, config_path) = self.document.into_settings();
        let settings = CliSettings {
            cors_proxy: self.cors_proxy,
            elements_version: self.elements_version,
            ..settings
        };

        let config = Config::load(config_path.as_deref(), &settings, env)?;
        let renderer = ShellRenderer::for_config(&config)?;
        Ok(renderer.render(&config, RenderMode::Export)?)
    }
}
