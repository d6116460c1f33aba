//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{any, get};
use tower_http::trace::TraceLayer;

use crate::proxy;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// Routes, in match order:
///
/// - `{base}/{asset}` for each located asset
/// - `{base}/_/{target}` when the CORS proxy is enabled
/// - fallback: live reload upgrade, working directory file, viewer shell
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let base = state.config.base_path().to_owned();
    let mut router: Router<Arc<AppState>> = Router::new();

    for name in state.assets.names() {
        router = router.route(&format!("{base}/{name}"), get(static_files::serve_asset));
    }

    if state.config.proxy_enabled() {
        router = router.route(&format!("{base}/_/{{*target}}"), any(proxy::forward));
    }

    router
        .fallback(static_files::serve_site)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use elements_config::CliSettings;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use crate::test_support::{self, ASSET_STYLES};

    fn docs_settings() -> CliSettings {
        CliSettings {
            base_path: Some("docs".to_owned()),
            ..CliSettings::default()
        }
    }

    async fn request(settings: CliSettings, method: Method, uri: &str) -> Response {
        let (_fixture, server) = test_support::server(settings);
        server
            .router()
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn get(uri: &str) -> Response {
        request(docs_settings(), Method::GET, uri).await
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn content_type(response: &Response) -> &str {
        response.headers()[header::CONTENT_TYPE].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_asset_served_from_assets_dir() {
        let response = get("/docs/styles.min.css").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(content_type(&response).starts_with("text/css"));
        assert_eq!(body_string(response).await, ASSET_STYLES);
    }

    #[tokio::test]
    async fn test_asset_wins_over_working_dir_file() {
        let (fixture, server) = test_support::server(docs_settings());
        std::fs::write(fixture.working_dir.path().join("styles.min.css"), "/* user */").unwrap();

        let response = server
            .router()
            .oneshot(Request::get("/docs/styles.min.css").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(body_string(response).await, ASSET_STYLES);
    }

    #[tokio::test]
    async fn test_reload_client_not_routed_without_watch() {
        let response = get("/docs/livereload.js").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(content_type(&response).starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_working_dir_file_served() {
        let response = get("/docs/openapi.json").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(content_type(&response).starts_with("application/json"));
        assert_eq!(body_string(response).await, test_support::DOCUMENT);
    }

    #[tokio::test]
    async fn test_range_request() {
        let (_fixture, server) = test_support::server(docs_settings());

        let response = server
            .router()
            .oneshot(
                Request::get("/docs/openapi.json")
                    .header(header::RANGE, "bytes=0-3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(body_string(response).await, &test_support::DOCUMENT[..4]);
    }

    #[tokio::test]
    async fn test_shell_for_root_and_client_routes() {
        for uri in ["/docs", "/docs/", "/docs/operations/list-pets", "/docs/missing.yaml"] {
            let response = get(uri).await;

            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert!(content_type(&response).starts_with("text/html"), "{uri}");
            let html = body_string(response).await;
            assert!(html.contains(r#"<base href="/docs/">"#), "{uri}");
            assert!(html.contains(r#"apiDescriptionUrl: "openapi.json""#), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_hidden_and_parent_paths_get_shell() {
        for uri in ["/docs/.secret", "/docs/../Cargo.toml", "/docs/%2e%2e/Cargo.toml"] {
            let response = get(uri).await;

            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert!(content_type(&response).starts_with("text/html"), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_outside_base_path_not_found() {
        assert_eq!(get("/other").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(get("/documents").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_get_not_found() {
        let response = request(docs_settings(), Method::POST, "/docs/openapi.json").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_head_request() {
        let response = request(docs_settings(), Method::HEAD, "/docs/openapi.json").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_base_path() {
        let response = request(CliSettings::default(), Method::GET, "/openapi.json").await;
        assert_eq!(body_string(response).await, test_support::DOCUMENT);

        let response = request(CliSettings::default(), Method::GET, "/").await;
        assert!(body_string(response).await.contains(r#"<base href="/">"#));
    }

    #[tokio::test]
    async fn test_proxy_route_absent_when_disabled() {
        let response = get("/docs/_/https://api.example.com/v1/pets").await;

        assert!(content_type(&response).starts_with("text/html"));
        assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_proxy_hidden_without_try_it() {
        let settings = CliSettings {
            with_cors_proxy: Some(true),
            hide_try_it: Some(true),
            ..docs_settings()
        };
        let response = request(settings, Method::GET, "/docs/_/https://api.example.com/").await;

        assert!(content_type(&response).starts_with("text/html"));
    }
}
