//! Error types for the preview server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Server startup and runtime error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Page template could not be loaded.
    #[error("Template error: {0}")]
    Template(#[from] elements_template::TemplateError),

    /// Listener or socket I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Proxy HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failure while forwarding a request through the CORS proxy.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ProxyError {
    /// Path after the proxy prefix is not a usable absolute URL.
    #[error("Invalid proxy target: {0:?}")]
    InvalidTarget(String),

    /// Request body could not be read.
    #[error("Failed to read request body: {0}")]
    Body(axum::Error),

    /// Upstream could not be reached or broke the connection.
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidTarget(_) | Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        (status, self.to_string()).into_response()
    }
}
