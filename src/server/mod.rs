//! HTTP surface: a single `/checkPrice` handler in front of [`PriceResolver`].

use crate::core::resolver::PriceResolver;
use crate::domain::model::PriceResponse;
use crate::utils::error::{ErrorKind, ResolverError};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<PriceResolver>,
}

#[derive(Debug, Deserialize)]
pub struct CheckPriceParams {
    pub item: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

pub struct ApiError(ResolverError);

impl From<ResolverError> for ApiError {
    fn from(err: ResolverError) -> Self {
        ApiError(err)
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::NoMatch => StatusCode::NOT_FOUND,
        ErrorKind::Upstream | ErrorKind::MalformedResponse => StatusCode::BAD_GATEWAY,
        ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status = status_for(kind);

        match kind {
            ErrorKind::NoMatch | ErrorKind::InvalidInput => {
                tracing::info!("{} ({})", self.0, kind.as_str())
            }
            _ => tracing::error!("❌ {} ({})", self.0, kind.as_str()),
        }

        let body = ErrorBody {
            error: self.0.user_friendly_message(),
            kind: kind.as_str().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn check_price(
    State(state): State<AppState>,
    Query(params): Query<CheckPriceParams>,
) -> Result<Json<PriceResponse>, ApiError> {
    let item = params.item.unwrap_or_default();
    let response = state.resolver.resolve(&item).await?;
    Ok(Json(response))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub fn build_router(resolver: Arc<PriceResolver>) -> Router {
    Router::new()
        .route("/checkPrice", get(check_price))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { resolver })
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve(addr: &str, resolver: Arc<PriceResolver>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Server running on {}", listener.local_addr()?);
    axum::serve(listener, build_router(resolver)).await
}
