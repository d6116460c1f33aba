//! `elements preview` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use elements_assets::AssetSet;
use elements_config::{CliSettings, Config, Env};
use elements_server::{Server, shutdown_signal};

use super::{DocumentArgs, flag};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the preview command.
#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    #[command(flatten)]
    document: DocumentArgs,

    /// Enable CORS proxy capabilities.
    #[arg(short = 'c', long)]
    with_cors_proxy: bool,

    /// Server hostname [default: "localhost"].
    #[arg(long)]
    hostname: Option<String>,

    /// Server port [default: 8000].
    #[arg(long)]
    port: Option<u16>,

    /// Use polling instead of file system events.
    #[arg(short, long)]
    poll: bool,

    /// Watch for changes and reload (only for local files).
    #[arg(short, long)]
    watch: bool,

    /// Reported hostname [default: "localhost"].
    #[arg(long)]
    virtual_host: Option<String>,

    /// Reported port [default: the server port].
    #[arg(long)]
    virtual_port: Option<String>,

    /// Use the given directory as working directory [default: current directory].
    #[arg(long, value_name = "PWD")]
    working_dir: Option<PathBuf>,

    /// Directory containing the Elements bundle and livereload.js.
    #[arg(long)]
    assets_dir: Option<PathBuf>,
}

impl PreviewArgs {
    /// Execute the preview command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let (settings, config_path) = self.into_settings();
        let config = Config::load(config_path.as_deref(), &settings, &Env::from_process())?;
        tracing::debug!(?config, "Resolved configuration");

        let assets = AssetSet::locate(&config.assets_dir, config.watch)?;
        let server = Server::new(config, assets)?;
        let listener = server.bind().await?;

        let config = server.config();
        output.info(&format!(
            "Elements server listening on {}",
            config.listen_address()
        ));
        output.highlight(&format!("Visit {}", config.visit_url()));
        if config.watch {
            output.info(&format!(
                "Watching {}",
                absolute(&config.working_dir).display()
            ));
        }

        server.serve(listener, shutdown_signal()).await?;
        Ok(())
    }

    fn into_settings(self) -> (CliSettings, Option<PathBuf>) {
        let (settings, config_path) = self.document.into_settings();
        let settings = CliSettings {
            with_cors_proxy: flag(self.with_cors_proxy),
            hostname: self.hostname,
            port: self.port,
            poll: flag(self.poll),
            watch: flag(self.watch),
            virtual_host: self.virtual_host,
            virtual_port: self.virtual_port,
            working_dir: self.working_dir,
            assets_dir: self.assets_dir,
            ..settings
        };
        (settings, config_path)
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
