//! Health & readiness handlers.
//!
//! - GET /healthz  -> simple liveness ("ok")
//! - GET /readyz   -> readiness that checks the bookmark store answers

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::collections::HashMap;

const STORAGE_UNAVAILABLE: &str = "storage unavailable";

/// `GET /healthz`
///
/// Very small liveness probe — always returns 200 OK with a plain JSON body.
/// This endpoint should be cheap and never perform I/O.
pub async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
        }),
    )
}

/// `GET /readyz`
///
/// Pings the repository. HTTP 200 when it answers, HTTP 503 otherwise.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let storage_check = match state.bookmarks.ping().await {
        Ok(()) => CheckStatus {
            ok: true,
            error: None,
        },
        // Detail stays in the log: this route is unauthenticated.
        Err(e) => {
            tracing::warn!("readiness check failed: {}", e);
            CheckStatus {
                ok: false,
                error: Some(STORAGE_UNAVAILABLE.into()),
            }
        }
    };

    let overall_ok = storage_check.ok;
    let mut checks = HashMap::new();
    checks.insert("storage", storage_check);

    let body = ReadyResponse {
        status: if overall_ok {
            "ok".into()
        } else {
            "error".into()
        },
        checks,
    };

    let status = if overall_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: String,
    checks: HashMap<&'static str, CheckStatus>,
}

#[derive(Serialize)]
struct CheckStatus {
    ok: bool,
    error: Option<String>,
}
