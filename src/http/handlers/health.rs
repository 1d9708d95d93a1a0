use axum::extract::State;
use axum::Json;

use crate::http::error::ApiError;
use crate::http::response::HealthBody;
use crate::http::server::AppState;

/// `GET /health`: answers only when the store does.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthBody>, ApiError> {
    if let Err(err) = state.store.ping().await {
        tracing::error!(error = %err, "Health check failed");
        return Err(ApiError::Unavailable);
    }

    Ok(Json(HealthBody {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
