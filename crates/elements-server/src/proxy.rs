//! CORS proxy gateway.
//!
//! Requests to `{base}/_/{target}` are forwarded to the absolute URL `target`
//! and the upstream response is streamed back with permissive CORS headers, so
//! the "Try It" panel can call APIs that do not allow the docs origin.
//! Preflight requests are answered locally.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use url::Url;

use crate::error::ProxyError;
use crate::state::AppState;

/// Maximum redirects followed for one proxied request.
pub(crate) const MAX_REDIRECTS: usize = 5;

/// Path segment separating the base path from the target URL.
const PROXY_SEGMENT: &str = "/_/";

const REQUEST_URL: &str = "x-request-url";
const FINAL_URL: &str = "x-final-url";

/// Connection-level headers that are never forwarded in either direction.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Forward a request to the target URL embedded in its path.
pub(crate) async fn forward(State(state): State<Arc<AppState>>, req: Request<Body>) -> Response {
    let origin = req.headers().get(header::ORIGIN).cloned();

    if is_preflight(&req) {
        return preflight(req.headers());
    }

    let mut response = match proxy_request(&state, req).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "Proxy request failed");
            err.into_response()
        }
    };
    apply_cors(response.headers_mut(), origin.as_ref());
    response
}

async fn proxy_request(state: &AppState, req: Request<Body>) -> Result<Response, ProxyError> {
    let prefix = format!("{}{PROXY_SEGMENT}", state.config.base_path());
    let raw = req.uri().path().strip_prefix(&prefix).unwrap_or_default();
    let target = parse_target(raw, req.uri().query())?;

    let (parts, body) = req.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(ProxyError::Body)?;

    let mut headers = parts.headers;
    strip_hop_by_hop(&mut headers);
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);

    tracing::debug!(method = %parts.method, target = %target, "Proxying request");

    let mut request = state
        .http
        .request(parts.method, target.clone())
        .headers(headers);
    if !body.is_empty() {
        request = request.body(body);
    }
    let upstream = request.send().await?;

    let status = upstream.status();
    let final_url = upstream.url().to_string();
    let mut upstream_headers = upstream.headers().clone();
    strip_hop_by_hop(&mut upstream_headers);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = upstream_headers;

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(target.as_str()) {
        headers.insert(HeaderName::from_static(REQUEST_URL), value);
    }
    if let Ok(value) = HeaderValue::from_str(&final_url) {
        headers.insert(HeaderName::from_static(FINAL_URL), value);
    }

    Ok(response)
}

/// Build the absolute target URL from the path after the proxy prefix.
///
/// Collapsed scheme slashes (`https:/host`) are repaired. Without a scheme,
/// port 443 implies `https` and anything else `http`.
fn parse_target(raw: &str, query: Option<&str>) -> Result<Url, ProxyError> {
    let raw = raw.trim_start_matches('/');
    let invalid = || ProxyError::InvalidTarget(raw.to_owned());

    let mut target = match scheme_len(raw) {
        Some(len) => {
            let (scheme, rest) = raw.split_at(len);
            format!("{}//{}", scheme.to_ascii_lowercase(), rest.trim_start_matches('/'))
        }
        None => {
            let authority = raw.split('/').next().unwrap_or_default();
            let scheme = if authority.ends_with(":443") { "https:" } else { "http:" };
            format!("{scheme}//{raw}")
        }
    };
    if let Some(query) = query {
        target.push('?');
        target.push_str(query);
    }

    let url = Url::parse(&target).map_err(|_| invalid())?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }
    Ok(url)
}

/// Length of a leading `http:` or `https:` scheme, case-insensitive.
fn scheme_len(raw: &str) -> Option<usize> {
    ["https:", "http:"].into_iter().find_map(|scheme| {
        raw.get(..scheme.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .map(str::len)
    })
}

fn is_preflight(req: &Request<Body>) -> bool {
    req.method() == Method::OPTIONS
        && req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Answer a CORS preflight without contacting the target.
fn preflight(request_headers: &HeaderMap) -> Response {
    let mut response = StatusCode::OK.into_response();
    let headers = response.headers_mut();

    if let Some(method) = request_headers.get(header::ACCESS_CONTROL_REQUEST_METHOD) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, method.clone());
    }
    if let Some(requested) = request_headers.get(header::ACCESS_CONTROL_REQUEST_HEADERS) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
    }
    apply_cors(headers, request_headers.get(header::ORIGIN));
    response
}

/// Allow the calling origin (or any origin) and expose every response header.
fn apply_cors(headers: &mut HeaderMap, origin: Option<&HeaderValue>) {
    let exposed = headers
        .keys()
        .map(HeaderName::as_str)
        .collect::<Vec<_>>()
        .join(",");

    match origin {
        Some(origin) => {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
            headers.append(header::VARY, HeaderValue::from_static("origin"));
        }
        None => {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            );
        }
    }

    if !exposed.is_empty()
        && let Ok(value) = HeaderValue::from_str(&exposed)
    {
        headers.insert(header::ACCESS_CONTROL_EXPOSE_HEADERS, value);
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}
