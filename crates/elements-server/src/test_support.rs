//! Shared fixtures for server tests.

use std::net::SocketAddr;

use elements_assets::{AssetSet, LIVERELOAD_JS, STYLES_CSS, WEB_COMPONENTS_JS};
use elements_config::{CliSettings, Config, Env, FileConfig};
use tempfile::TempDir;
use tokio::sync::oneshot;

use crate::Server;

pub(crate) const ASSET_STYLES: &str = "/* elements styles */";
pub(crate) const DOCUMENT: &str = r#"{"openapi":"3.1.0","info":{"title":"Pets","version":"1"}}"#;

/// Temporary assets and working directories backing a test server.
pub(crate) struct Fixture {
    _assets_dir: TempDir,
    pub(crate) working_dir: TempDir,
}

/// Build a server for `settings`, serving `openapi.json` from a fresh working directory.
pub(crate) fn server(settings: CliSettings) -> (Fixture, Server) {
    let assets_dir = tempfile::tempdir().unwrap();
    std::fs::write(assets_dir.path().join(STYLES_CSS), ASSET_STYLES).unwrap();
    std::fs::write(assets_dir.path().join(WEB_COMPONENTS_JS), "/* elements */").unwrap();
    std::fs::write(assets_dir.path().join(LIVERELOAD_JS), "/* livereload */").unwrap();

    let working_dir = tempfile::tempdir().unwrap();
    std::fs::write(working_dir.path().join("openapi.json"), DOCUMENT).unwrap();

    let settings = CliSettings {
        document: "openapi.json".to_owned(),
        hostname: Some("127.0.0.1".to_owned()),
        working_dir: Some(working_dir.path().to_path_buf()),
        assets_dir: Some(assets_dir.path().to_path_buf()),
        ..settings
    };
    let config = Config::resolve(&settings, &Env::default(), FileConfig::default()).unwrap();
    let assets = AssetSet::locate(&config.assets_dir, config.watch).unwrap();
    let server = Server::new(config, assets).unwrap();

    (
        Fixture {
            _assets_dir: assets_dir,
            working_dir,
        },
        server,
    )
}

/// Serve on an ephemeral port until the returned sender fires or is dropped.
pub(crate) async fn spawn(server: Server) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown, signal) = oneshot::channel::<()>();

    tokio::spawn(server.serve(listener, async move {
        let _ = signal.await;
    }));

    (addr, shutdown)
}
