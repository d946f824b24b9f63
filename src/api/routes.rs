use crate::api::api_error::APIError;
use crate::api::model::{PresentRequest, PresentResult};
use crate::api::server::AppState;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;
use std::net::SocketAddr;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .route("/present", post(present))
        .route("/cleanup", post(clean_up))
        .fallback(unknown_path)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

async fn present(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
    WithRejection(Json(payload), _): WithRejection<Json<PresentRequest>, APIError>,
) -> Result<Json<PresentResult>, APIError> {
    let client_addr = client_addr.ip();
    if let Err(err) = payload.validate() {
        tracing::debug!("rejected present from {client_addr}: {err}");
        return Err(err.into());
    }

    state.dns.present(&payload.fqdn, &payload.value).await?;
    tracing::info!("presenting \"{}\" for {client_addr}", payload.fqdn);
    Ok(Json(PresentResult {
        fqdn: payload.fqdn,
        value: payload.value,
    }))
}

async fn clean_up(
    State(state): State<AppState>,
    ConnectInfo(client_addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, APIError> {
    state.dns.clean_up().await?;
    tracing::info!("cleaned up challenge record for {}", client_addr.ip());
    Ok(Json(json!({"ok":"cleaned up"})))
}

#[allow(clippy::unused_async)]
async fn unknown_path() -> impl IntoResponse {
    (StatusCode::BAD_REQUEST, "unknown path")
}
