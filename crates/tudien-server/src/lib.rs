//! HTTP proxy in front of the remote dictionary.
//!
//! Callers get a fixed status surface: 400 for a missing word, 408 when the
//! upstream call times out, 500 for anything else that goes wrong, and 200
//! with `{ "data": ... }` otherwise, including `{ "exists": false }`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::info;
use tudien_core::{DictionaryService, LookupQuery, ValidationError};
use tudien_types::{FailureReason, LookupOutcome};

type SharedState = Arc<ProxyState>;

pub struct ProxyState {
    pub service: Arc<dyn DictionaryService>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Invalid bind address {0}: {1}")]
    InvalidAddr(String, std::net::AddrParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub async fn serve(bind_addr: &str, service: Arc<dyn DictionaryService>) -> Result<(), ProxyError> {
    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| ProxyError::InvalidAddr(bind_addr.to_string(), e))?;

    let metadata = service.metadata();
    let router = build_router(Arc::new(ProxyState { service }));

    info!(
        %addr,
        provider = %metadata.name,
        upstream = %metadata.base_url,
        "Binding HTTP listener"
    );
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/dictionary/search", get(api_search))
        .route("/api/dictionary/suggest", get(api_suggest))
        .route("/healthz", get(health))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self {
            status: StatusCode::from_u16(value.status_code()).unwrap_or(StatusCode::BAD_REQUEST),
            message: "Word is required",
        }
    }
}

impl From<FailureReason> for ApiError {
    fn from(reason: FailureReason) -> Self {
        let message = match reason {
            FailureReason::Timeout => "Request timeout",
            FailureReason::NetworkError | FailureReason::ServerError => "Internal server error",
        };
        Self {
            status: StatusCode::from_u16(reason.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.message });
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    word: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SuggestParams {
    q: Option<String>,
}

async fn api_search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let query = LookupQuery::parse(params.word.as_deref().unwrap_or_default())?;

    let data = match state.service.lookup(&query).await {
        LookupOutcome::Found { word, entries } => json!({
            "exists": true,
            "word": word,
            "results": entries,
        }),
        LookupOutcome::NotFound => json!({ "exists": false }),
        LookupOutcome::Failed { reason } => {
            tracing::error!("Error fetching dictionary for '{}': {}", query, reason);
            return Err(reason.into());
        }
    };

    Ok(Json(json!({ "data": data })))
}

async fn api_suggest(
    State(state): State<SharedState>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<Value>, ApiError> {
    let query = LookupQuery::parse(params.q.as_deref().unwrap_or_default())?;

    let suggestions = state.service.suggest(&query).await.map_err(|reason| {
        tracing::error!("Error fetching suggestions for '{}': {}", query, reason);
        ApiError::from(reason)
    })?;

    Ok(Json(json!({ "data": { "suggestions": suggestions } })))
}

async fn health(State(state): State<SharedState>) -> impl IntoResponse {
    let metadata = state.service.metadata();
    Json(json!({ "status": "ok", "provider": metadata.name }))
}
