//! Preview server for Elements API documentation.
//!
//! This crate provides the HTTP server behind `elements preview`, serving:
//! - The Elements viewer shell for every client-side route under the base path
//! - Frontend assets (bundle, stylesheet, reload client)
//! - Files from the working directory (the OpenAPI document and its references)
//! - An optional CORS proxy for the "Try It" panel
//! - A LiveReload WebSocket endpoint while watching
//!
//! # Quick Start
//!
//! ```ignore
//! use elements_assets::AssetSet;
//! use elements_config::{CliSettings, Config, Env};
//! use elements_server::Server;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = CliSettings {
//!         document: "openapi.yaml".to_owned(),
//!         watch: Some(true),
//!         ..CliSettings::default()
//!     };
//!     let config = Config::load(None, &settings, &Env::from_process())?;
//!     let assets = AssetSet::locate(&config.assets_dir, config.watch)?;
//!
//!     Server::new(config, assets)?.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (elements-server)
//!                        │
//!                        ├─► {base}/{asset}     ──► AssetSet file
//!                        ├─► {base}/_/{target}  ──► reqwest ──► upstream API
//!                        └─► fallback
//!                               ├─► WebSocket upgrade ──► ReloadHub ◄── ChangeWatcher (notify)
//!                               ├─► working directory file
//!                               └─► viewer shell (elements-template)
//! ```

mod app;
mod error;
mod live_reload;
mod proxy;
mod state;
mod static_files;
#[cfg(test)]
mod test_support;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use elements_assets::AssetSet;
use elements_config::Config;
use elements_template::ShellRenderer;
use tokio::net::TcpListener;

pub use error::ServerError;
pub use live_reload::{
    ChangeWatcher, POLL_INTERVAL, PROTOCOLS, ReloadHub, SERVER_NAME, ServerMessage, Subscription,
    WatchEvent, WatchEventKind, WatchEvents, WatchMode,
};

use live_reload::LiveReloadManager;
use state::AppState;

/// Configured preview server.
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Prepare a server with its renderer, proxy client and reload hub.
    ///
    /// # Errors
    ///
    /// Returns an error if the page template cannot be loaded or the proxy
    /// client cannot be built.
    pub fn new(config: Config, assets: AssetSet) -> Result<Self, ServerError> {
        let renderer = ShellRenderer::for_config(&config)?;
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(proxy::MAX_REDIRECTS))
            .build()?;
        let live_reload = config.watch.then(|| Arc::new(ReloadHub::new()));

        Ok(Self {
            state: Arc::new(AppState {
                config,
                assets,
                renderer,
                live_reload,
                http,
            }),
        })
    }

    /// Resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.state.config
    }

    /// Reload client registry, present while watching.
    #[must_use]
    pub fn reload_hub(&self) -> Option<Arc<ReloadHub>> {
        self.state.live_reload.clone()
    }

    /// Application router without a listener.
    #[must_use]
    pub fn router(&self) -> Router {
        app::create_router(Arc::clone(&self.state))
    }

    /// Bind the configured address and serve until Ctrl-C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Bind the configured hostname and port.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be resolved or is in use.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let config = &self.state.config;
        Ok(TcpListener::bind((config.hostname.as_str(), config.port)).await?)
    }

    /// Serve on `listener` until `shutdown` completes.
    ///
    /// Starts the file watcher when watching. On shutdown the watcher is
    /// stopped and every reload client is disconnected.
    ///
    /// # Errors
    ///
    /// Returns an error if serving fails.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_href = %self.state.config.base_href,
            document = %self.state.config.document,
            "Starting server"
        );

        let manager = self.start_watcher();
        let hub = self.reload_hub();
        let app = self.router();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received, stopping server...");
                if let Some(manager) = manager {
                    manager.stop();
                }
                if let Some(hub) = hub {
                    hub.close_all();
                }
            })
            .await?;

        Ok(())
    }

    /// Start watching the working directory. Failures disable live reload
    /// without stopping the server.
    fn start_watcher(&self) -> Option<LiveReloadManager> {
        let hub = self.state.live_reload.as_ref()?;
        let config = &self.state.config;
        let mode = WatchMode::new(config.poll);

        match LiveReloadManager::start(&config.working_dir, mode, Arc::clone(hub)) {
            Ok(manager) => {
                tracing::info!(path = %config.working_dir.display(), ?mode, "Watching for changes");
                Some(manager)
            }
            Err(err) => {
                tracing::error!(
                    path = %config.working_dir.display(),
                    error = %err,
                    "Failed to start file watcher, live reload disabled"
                );
                None
            }
        }
    }
}

/// Wait for Ctrl-C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
