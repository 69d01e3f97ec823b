//! Axum route handlers for the Match API.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::AppError;
use crate::matching::cache::CacheStatus;
use crate::matching::fingerprint::cache_key;
use crate::matching::models::{
    CandidateMatchRequest, JobMatchRequest, MatchItem, MatchResponse, MatchTarget,
};
use crate::matching::ranking::rank_items;
use crate::state::AppState;

/// Response header reporting whether the body came from the cache.
pub const MATCH_CACHE_HEADER: &str = "x-match-cache";

/// POST /match/jobs
///
/// Ranks `jobs` against `candidate_profile`. Output ids are under `jobId`.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, AppError> {
    let payload = normalize_payload(payload)?;
    let request: JobMatchRequest = parse_request(&payload)?;
    serve_match(
        &state,
        MatchTarget::Jobs,
        &payload,
        request.candidate_profile,
        request.jobs,
    )
    .await
}

/// POST /match/candidates
///
/// Ranks `candidates` against `job_description`. Output ids are under `candidateId`.
pub async fn handle_match_candidates(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, AppError> {
    let payload = normalize_payload(payload)?;
    let request: CandidateMatchRequest = parse_request(&payload)?;
    serve_match(
        &state,
        MatchTarget::Candidates,
        &payload,
        request.job_description,
        request.candidates,
    )
    .await
}

// ────────────────────────────────────────────────────────────────────────────
// Shared pipeline
// ────────────────────────────────────────────────────────────────────────────

/// A `null` body counts as `{}`; any other non-object body is rejected.
fn normalize_payload(payload: Value) -> Result<Value, AppError> {
    match payload {
        Value::Null => Ok(Value::Object(Map::new())),
        Value::Object(_) => Ok(payload),
        other => Err(AppError::Validation(format!(
            "Request body must be a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn parse_request<T: DeserializeOwned>(payload: &Value) -> Result<T, AppError> {
    Ok(serde_json::from_value(payload.clone())?)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Cache lookup → rank on miss → store → respond.
///
/// Ranking is CPU-bound, so it runs on the blocking pool instead of a runtime worker.
async fn serve_match(
    state: &AppState,
    target: MatchTarget,
    payload: &Value,
    reference: String,
    items: Vec<MatchItem>,
) -> Result<Response, AppError> {
    let key = cache_key(payload);

    if let Some(cached) = state.cache.get(target, &key) {
        debug!(endpoint = target.label(), %key, "Match cache hit");
        return Ok(match_response(&cached, CacheStatus::Hit));
    }

    debug!(
        endpoint = target.label(),
        %key,
        items = items.len(),
        cached_entries = state.cache.len(),
        "Match cache miss, ranking"
    );

    let vectorizer = Arc::clone(&state.vectorizer);
    let precision = state.config.score_precision;
    let response = tokio::task::spawn_blocking(move || {
        rank_items(vectorizer.as_ref(), target, &reference, &items, precision)
    })
    .await
    .context("ranking task failed")?;

    let response = Arc::new(response);
    state.cache.insert(target, key, Arc::clone(&response));

    Ok(match_response(&response, CacheStatus::Miss))
}

fn match_response(response: &MatchResponse, status: CacheStatus) -> Response {
    (
        [(MATCH_CACHE_HEADER, status.as_str())],
        Json(response.clone()),
    )
        .into_response()
}
