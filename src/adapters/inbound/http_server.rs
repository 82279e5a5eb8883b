//! Geolocation API Server
//!
//! HTTP surface over the lookup service: one route for explicit addresses,
//! one that resolves the caller's own address, and a health probe.

use crate::adapters::inbound::client_addr::resolve_client_addr;
use crate::application::LookupService;
use crate::domain::entities::GeoRecord;
use crate::domain::errors::LookupError;
use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub provider_status: String,
}

/// Wire shape of every error: `{"error": {"type": ..., "message": ...}}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    kind: &'static str,
    message: String,
}

fn status_for(err: &LookupError) -> StatusCode {
    match err {
        LookupError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
        LookupError::PrivateOrReserved(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LookupError::NotFound(_) => StatusCode::NOT_FOUND,
        LookupError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        LookupError::ProviderUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                kind: self.error_type(),
                message: self.to_string(),
            },
        };
        (status_for(&self), Json(body)).into_response()
    }
}

/// API server state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LookupService>,
}

/// Geolocation API server.
pub struct HttpServer {
    listen_addr: String,
    state: AppState,
}

impl HttpServer {
    pub fn new(service: Arc<LookupService>, listen_addr: String) -> Self {
        Self {
            listen_addr,
            state: AppState { service },
        }
    }

    /// Build the router. Public so tests and embedders can drive the
    /// surface without binding a socket.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/api/v1/geolocate", get(geolocate_client_handler))
            .route("/api/v1/geolocate/:ip", get(geolocate_ip_handler))
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET])
                    .allow_headers(Any),
            )
            .with_state(self.state.clone())
    }

    /// Run the API server until shutdown.
    ///
    /// The final Ok(()) is excluded from coverage since axum::serve runs
    /// until the shutdown signal.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = self.router();

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("geolocation API listening on {}", self.listen_addr);

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;
        Ok(())
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}

// Handler functions

async fn geolocate_ip_handler(
    State(state): State<AppState>,
    Path(ip): Path<String>,
) -> Result<Json<GeoRecord>, LookupError> {
    let record = state.service.geolocate(&ip).await?;
    Ok(Json(record))
}

async fn geolocate_client_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Json<GeoRecord>, LookupError> {
    let forwarded_for = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok());
    let real_ip = headers.get("x-real-ip").and_then(|v| v.to_str().ok());
    let candidate = resolve_client_addr(forwarded_for, real_ip, &addr.ip().to_string());

    tracing::debug!("resolved caller address candidate: {}", candidate);

    let record = state.service.geolocate(&candidate).await?;
    Ok(Json(record))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let available = state.service.provider_health().await;
    Json(HealthResponse {
        status: if available { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.service.provider_name().to_string(),
        provider_status: if available { "available" } else { "unavailable" }.to_string(),
    })
}
