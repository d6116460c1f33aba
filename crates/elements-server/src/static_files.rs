//! Static file serving and the shell fallback.
//!
//! Fixed assets are served from the located [`AssetSet`](elements_assets::AssetSet).
//! Every other path under the base path is looked up in the working directory
//! and, when no regular file matches, answered with the viewer shell so the
//! SPA router can handle it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use elements_template::RenderMode;
use percent_encoding::percent_decode_str;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::live_reload;
use crate::state::AppState;

/// Serve one of the fixed frontend assets.
pub(crate) async fn serve_asset(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
) -> Response {
    match state.assets.resolve(req.uri().path()) {
        Some(path) => serve_file(path, req).await,
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Fallback for everything that is not an asset or proxy route.
///
/// Order: live reload upgrade, working directory file, viewer shell.
pub(crate) async fn serve_site(
    State(state): State<Arc<AppState>>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    req: Request<Body>,
) -> Response {
    let Some(rest) = strip_base(req.uri().path(), state.config.base_path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let (Some(hub), Ok(ws)) = (&state.live_reload, upgrade) {
        return live_reload::upgrade(ws, Arc::clone(hub));
    }

    if req.method() != Method::GET && req.method() != Method::HEAD {
        return StatusCode::NOT_FOUND.into_response();
    }

    if let Some(file) = resolve_working_file(&state.config.working_dir, rest).await {
        return serve_file(&file, req).await;
    }

    render_shell(&state, req.headers())
}

/// Serve a file with content type, conditional and range support.
async fn serve_file(path: &Path, req: Request<Body>) -> Response {
    match ServeFile::new(path).oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

fn render_shell(state: &AppState, headers: &HeaderMap) -> Response {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());

    match state.renderer.render(&state.config, RenderMode::Serve { host }) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render viewer shell");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Path relative to the base path, or `None` when outside of it.
///
/// `base` has no trailing slash (empty for root).
fn strip_base<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest.trim_start_matches('/'))
    } else {
        None
    }
}

/// Map a relative request path to a regular file inside `root`.
///
/// Dot segments (including `..` and hidden files) never resolve.
async fn resolve_working_file(root: &Path, rest: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(rest).decode_utf8().ok()?;

    let mut path = root.to_path_buf();
    let mut depth = 0;
    for segment in decoded.split('/').filter(|segment| !segment.is_empty()) {
        if segment.starts_with('.') || segment.contains(['\\', '\0']) {
            return None;
        }
        path.push(segment);
        depth += 1;
    }
    if depth == 0 {
        return None;
    }

    let metadata = tokio::fs::metadata(&path).await.ok()?;
    metadata.is_file().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_base_root() {
        assert_eq!(strip_base("/", ""), Some(""));
        assert_eq!(strip_base("/openapi.json", ""), Some("openapi.json"));
    }

    #[test]
    fn test_strip_base_nested() {
        assert_eq!(strip_base("/docs", "/docs"), Some(""));
        assert_eq!(strip_base("/docs/", "/docs"), Some(""));
        assert_eq!(strip_base("/docs/v1/pets", "/docs"), Some("v1/pets"));
    }

    #[test]
    fn test_strip_base_outside() {
        assert_eq!(strip_base("/documents", "/docs"), None);
        assert_eq!(strip_base("/other", "/docs"), None);
    }

    #[tokio::test]
    async fn test_resolve_working_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("specs")).unwrap();
        std::fs::write(dir.path().join("specs/pet store.yaml"), "openapi: 3.1.0").unwrap();

        assert_eq!(
            resolve_working_file(dir.path(), "specs/pet%20store.yaml").await,
            Some(dir.path().join("specs/pet store.yaml"))
        );
    }

    #[tokio::test]
    async fn test_resolve_skips_directories_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("specs")).unwrap();

        assert_eq!(resolve_working_file(dir.path(), "specs").await, None);
        assert_eq!(resolve_working_file(dir.path(), "missing.yaml").await, None);
        assert_eq!(resolve_working_file(dir.path(), "").await, None);
    }

    #[tokio::test]
    async fn test_resolve_rejects_dot_segments() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("site");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(dir.path().join("secret.txt"), "secret").unwrap();
        std::fs::write(root.join(".env"), "TOKEN=1").unwrap();

        assert_eq!(resolve_working_file(&root, "../secret.txt").await, None);
        assert_eq!(resolve_working_file(&root, "%2e%2e/secret.txt").await, None);
        assert_eq!(resolve_working_file(&root, ".env").await, None);
    }
}
