use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use serde_json::json;

use crate::arguments::is_debug_webserver_enabled;
use crate::logger::{self, LogTag};
use crate::webserver::{state::AppState, utils::error_response};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/game/*path", any(forward_request))
}

/// ANY /api/game/*path
///
/// Reverse proxy to the game production API. Credentials come from the
/// browser client's own headers; the server only adds the browser-like
/// headers the upstream expects. Payloads pass through untouched.
async fn forward_request(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let authorization = match header_value(&headers, "authorization") {
        Some(value) => value,
        None => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "Missing Authorization header",
                "Please provide a valid Bearer token",
            )
        }
    };

    let wallet = match header_value(&headers, "x-selected-wallet-address") {
        Some(value) => value,
        None => {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "Missing wallet address header",
                "Please provide a valid wallet address",
            )
        }
    };

    let path_and_query = match query {
        Some(q) => format!("/{}?{}", path, q),
        None => format!("/{}", path),
    };

    if is_debug_webserver_enabled() {
        logger::debug(
            LogTag::Webserver,
            &format!("Forwarding {} {}", method, path_and_query),
        );
    }

    let upstream_method = reqwest::Method::from_bytes(method.as_str().as_bytes())
        .unwrap_or(reqwest::Method::GET);
    let upstream_body = if body.is_empty() {
        None
    } else {
        Some(body.to_vec())
    };

    let upstream = match state
        .game
        .forward(
            upstream_method,
            &path_and_query,
            &authorization,
            &wallet,
            upstream_body,
        )
        .await
    {
        Ok(response) => response,
        Err(e) => {
            logger::warning(LogTag::Webserver, &format!("Proxy request failed: {}", e));
            return error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Failed to connect to game server",
                &e.to_string(),
            );
        }
    };

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();
    let payload = upstream.bytes().await.unwrap_or_default();

    if !status.is_success() {
        let message = error_message(&payload);
        logger::warning(
            LogTag::Webserver,
            &format!("Upstream returned {} for {}", status, path_and_query),
        );
        return (
            status,
            axum::Json(json!({
                "error": "API request failed",
                "message": message,
                "status": status.as_u16(),
            })),
        )
            .into_response();
    }

    (status, [(header::CONTENT_TYPE, content_type)], payload).into_response()
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Pull a human-readable message out of an upstream error body
fn error_message(payload: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(payload) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    String::from_utf8_lossy(payload).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_message_field() {
        let body = br#"{"message": "Invalid token", "error": "unauthorized"}"#;
        assert_eq!(error_message(body), "Invalid token");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message(b"service down"), "service down");
    }

    #[test]
    fn test_header_value_trims_and_rejects_empty() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", " Bearer abc ".parse().unwrap());
        headers.insert("x-selected-wallet-address", "".parse().unwrap());

        assert_eq!(
            header_value(&headers, "authorization"),
            Some("Bearer abc".to_string())
        );
        assert_eq!(header_value(&headers, "x-selected-wallet-address"), None);
    }
}
