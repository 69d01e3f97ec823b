use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness probe. Always `{"status": "ok"}`.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
