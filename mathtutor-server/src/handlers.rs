//! Routing and the per-request business logic: health, feedback, chat, and
//! the static-file fallback. Every response, success or failure, goes out
//! with permissive CORS headers attached by the [`cors`] middleware.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use mathtutor_shared::{ensure_system_prompt, ChatInput, ChatResponse};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/feedback", post(feedback))
        .fallback(fallback)
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Answers preflight requests with an empty 204 and stamps the CORS headers
/// onto every other response, whatever route produced it.
async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(response.headers_mut());
        return response;
    }
    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "time": epoch_seconds() }))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let body = parse_json_body(&body)?;

    let mut messages = ChatInput::from_value(&body)
        .into_messages()
        .ok_or_else(|| ApiError::Validation("messages or prompt is required".to_string()))?;
    ensure_system_prompt(&mut messages, &state.config.system_prompt);

    let raw = state.upstream.send(&messages).await?;
    let reply = crate::upstream::extract_reply(&raw);

    state.chat_log.append(&json!({
        "time": epoch_seconds(),
        "messages": &messages,
        "reply": &reply,
        "usage": raw.get("usage").cloned().unwrap_or_else(|| json!({})),
    }));

    Ok(Json(ChatResponse { reply, raw }))
}

async fn feedback(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let data = parse_json_body(&body)?;
    let extra = match data {
        Value::Object(map) => map,
        other => {
            return Err(ApiError::Internal(format!(
                "feedback body must be a JSON object, got: {other}"
            )))
        }
    };

    let mut record = serde_json::Map::new();
    record.insert("time".to_string(), json!(epoch_seconds()));
    if let Some(ConnectInfo(addr)) = connect_info {
        record.insert("ip".to_string(), json!(addr.ip().to_string()));
    }
    // Caller fields win over time/ip on collision.
    record.extend(extra);

    state.feedback_log.append(&Value::Object(record));
    Ok(Json(json!({ "ok": true })))
}

/// Unmatched paths: GET and HEAD fall through to the static file tree, any
/// other method is a JSON 404.
async fn fallback(State(state): State<Arc<AppState>>, request: Request) -> Response {
    if request.method() == Method::GET || request.method() == Method::HEAD {
        match ServeDir::new(&state.config.static_dir).oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(infallible) => match infallible {},
        }
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" }))).into_response()
    }
}

/// An empty body reads as `{}` (so a bare POST still works); anything else
/// must be valid JSON. A body that fails to parse is an internal failure,
/// not a validation one.
fn parse_json_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_slice(body).map_err(|err| ApiError::Internal(err.to_string()))
}

pub fn epoch_seconds() -> i64 {
    Utc::now().timestamp()
}

pub fn log_startup(addr: &SocketAddr) {
    info!("Serving on http://localhost:{}/", addr.port());
    info!("POST /api/chat with {{messages:[{{role,content}}]}} or {{prompt}}");
}
