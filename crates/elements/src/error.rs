//! CLI error types.

use elements_assets::AssetError;
use elements_config::ConfigError;
use elements_server::ServerError;
use elements_template::TemplateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Assets(#[from] AssetError),

    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
