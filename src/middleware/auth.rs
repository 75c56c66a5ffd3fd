use crate::state::AppState;
use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Bearer-token gate in front of every `/api` route.
///
/// Rejects with 401 before any handler runs unless the request carries
/// `Authorization: Bearer <token>` matching the configured token.
pub async fn require_api_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    match extract_bearer_token(&headers) {
        Ok(token) if constant_time_eq(token.as_bytes(), state.api_token.as_bytes()) => {
            next.run(request).await
        }
        Ok(_) => reject(request.uri().path(), "token mismatch"),
        Err(reason) => reject(request.uri().path(), reason),
    }
}

fn reject(path: &str, reason: &str) -> Response {
    tracing::warn!(path, reason, "Unauthorized request");
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized request" })),
    )
        .into_response()
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or("missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "invalid Authorization header format")?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() {
                Err("empty bearer token")
            } else {
                Ok(token)
            }
        }
        _ => Err("Authorization header must use Bearer token format"),
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
