//! Liveness endpoint. Never touches the database.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Which connector backs `/users` ("mysql" or "memory")
    pub backend: &'static str,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        backend: state.connector.backend(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryConnector;

    #[tokio::test]
    async fn reports_backend_without_querying() {
        let connector = Arc::new(MemoryConnector::new());
        let state = Arc::new(AppState {
            connector: connector.clone(),
        });

        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.backend, "memory");
        assert_eq!(connector.executed(), 0);
    }
}
