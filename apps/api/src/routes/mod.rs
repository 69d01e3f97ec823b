pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/match/jobs", post(handlers::handle_match_jobs))
        .route("/match/candidates", post(handlers::handle_match_candidates))
        // No admission control: a large candidate pool is ranked, not refused.
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::matching::handlers::MATCH_CACHE_HEADER;

    fn test_state() -> AppState {
        AppState::new(Config::default()).unwrap()
    }

    async fn post_raw(app: &Router, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn cache_header(response: &Response) -> &str {
        response.headers()[MATCH_CACHE_HEADER].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let app = build_router(test_state());
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_match_jobs_ranks_and_echoes_ids() {
        let app = build_router(test_state());
        let body = json!({
            "candidate_profile": "Rust developer with Kubernetes and distributed systems experience",
            "jobs": [
                {"id": 1, "text": "Frontend React developer"},
                {"id": 2, "text": "Rust engineer for distributed systems on Kubernetes"},
                {"id": null, "text": "Accountant"}
            ]
        });
        let response = post_raw(&app, "/match/jobs", &body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let matches = json["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0]["jobId"], json!(2));
        assert!(matches.iter().any(|m| m["jobId"].is_null()));

        let scores: Vec<f64> = matches.iter().map(|m| m["score"].as_f64().unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[tokio::test]
    async fn test_match_candidates_uses_candidate_id() {
        let app = build_router(test_state());
        let body = json!({
            "job_description": "Python data engineer",
            "candidates": [
                {"id": 10, "text": "Marketing lead"},
                {"id": 11, "text": "Python data pipelines engineer"}
            ]
        });
        let json = body_json(post_raw(&app, "/match/candidates", &body.to_string()).await).await;
        let matches = json["matches"].as_array().unwrap();
        assert_eq!(matches[0]["candidateId"], json!(11));
        assert!(matches[0].get("jobId").is_none());
    }

    #[tokio::test]
    async fn test_repeat_request_served_from_cache_byte_identical() {
        let state = test_state();
        let app = build_router(state.clone());
        let body = r#"{"candidate_profile": "rust", "jobs": [{"id": 1, "text": "rust go"}]}"#;

        let first = post_raw(&app, "/match/jobs", body).await;
        assert_eq!(cache_header(&first), "miss");
        let first = body_bytes(first).await;

        let second = post_raw(&app, "/match/jobs", body).await;
        assert_eq!(cache_header(&second), "hit");
        let second = body_bytes(second).await;

        assert_eq!(first, second);
        assert_eq!(state.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_key_order_shares_cache_entry() {
        let state = test_state();
        let app = build_router(state.clone());

        let a = r#"{"candidate_profile": "rust", "jobs": [{"id": 1, "text": "rust"}]}"#;
        let b = r#"{"jobs": [{"text": "rust", "id": 1}], "candidate_profile": "rust"}"#;

        let first = post_raw(&app, "/match/jobs", a).await;
        assert_eq!(cache_header(&first), "miss");
        let second = post_raw(&app, "/match/jobs", b).await;
        assert_eq!(cache_header(&second), "hit");
        assert_eq!(state.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_same_body_on_both_endpoints_not_shared() {
        let state = test_state();
        let app = build_router(state.clone());
        let body = r#"{"jobs": [], "candidates": []}"#;

        let jobs = post_raw(&app, "/match/jobs", body).await;
        let candidates = post_raw(&app, "/match/candidates", body).await;
        assert_eq!(cache_header(&jobs), "miss");
        assert_eq!(cache_header(&candidates), "miss");
        assert_eq!(state.cache.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_collection_yields_empty_matches() {
        let app = build_router(test_state());
        let response = post_raw(&app, "/match/jobs", r#"{"candidate_profile": "rust", "jobs": []}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"matches": []}));
    }

    #[tokio::test]
    async fn test_missing_and_null_fields_default() {
        let app = build_router(test_state());

        let empty = post_raw(&app, "/match/candidates", "{}").await;
        assert_eq!(body_json(empty).await, json!({"matches": []}));

        let null_body = post_raw(&app, "/match/jobs", "null").await;
        assert_eq!(body_json(null_body).await, json!({"matches": []}));

        let nulls = post_raw(
            &app,
            "/match/jobs",
            r#"{"candidate_profile": null, "jobs": [{"id": 3, "text": null}, {}]}"#,
        )
        .await;
        assert_eq!(
            body_json(nulls).await,
            json!({"matches": [{"jobId": 3, "score": 0.0}, {"jobId": null, "score": 0.0}]})
        );
    }

    #[tokio::test]
    async fn test_degenerate_texts_score_zero() {
        let app = build_router(test_state());
        let body = json!({
            "job_description": "",
            "candidates": [{"id": 1, "text": ""}, {"id": 2, "text": ""}]
        });
        let response = post_raw(&app, "/match/candidates", &body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"matches": [{"candidateId": 1, "score": 0.0}, {"candidateId": 2, "score": 0.0}]})
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_client_error() {
        let app = build_router(test_state());
        let response = post_raw(&app, "/match/jobs", "{not json").await;
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_wrong_shape_is_bad_request() {
        let app = build_router(test_state());

        let response = post_raw(&app, "/match/jobs", r#"{"jobs": "rust"}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");

        let response = post_raw(&app, "/match/candidates", "[1, 2]").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_body_over_two_megabytes_is_ranked() {
        let app = build_router(test_state());
        let filler = "distributed systems engineer rust kubernetes ".repeat(160);
        let candidates: Vec<Value> = (0..400)
            .map(|id| json!({"id": id, "text": format!("{filler} candidate{id}")}))
            .collect();
        let body = json!({
            "job_description": "Rust engineer for distributed systems",
            "candidates": candidates
        })
        .to_string();
        assert!(body.len() > 2 * 1024 * 1024, "body was {} bytes", body.len());

        let response = post_raw(&app, "/match/candidates", &body).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["matches"].as_array().unwrap().len(), 400);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_misses_rank_on_blocking_pool() {
        let state = test_state();
        let app = build_router(state.clone());
        let jobs = r#"{"candidate_profile": "rust", "jobs": [{"id": 1, "text": "rust"}]}"#;
        let candidates = r#"{"job_description": "go", "candidates": [{"id": 2, "text": "go"}]}"#;

        let (a, b, health) = tokio::join!(
            post_raw(&app, "/match/jobs", jobs),
            post_raw(&app, "/match/candidates", candidates),
            app.clone()
                .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()),
        );
        assert_eq!(a.status(), StatusCode::OK);
        assert_eq!(b.status(), StatusCode::OK);
        assert_eq!(health.unwrap().status(), StatusCode::OK);
        assert_eq!(
            body_json(a).await,
            json!({"matches": [{"jobId": 1, "score": 1.0}]})
        );
        assert_eq!(state.cache.len(), 2);
    }

    #[tokio::test]
    async fn test_float_and_large_ids_echoed() {
        let app = build_router(test_state());
        let body = r#"{"candidate_profile": "", "jobs": [{"id": 2.0, "text": ""}, {"id": 18446744073709551615, "text": ""}]}"#;
        let response = post_raw(&app, "/match/jobs", body).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"matches": [
                {"jobId": 2.0, "score": 0.0},
                {"jobId": 18446744073709551615u64, "score": 0.0}
            ]})
        );
    }

    #[tokio::test]
    async fn test_health_unaffected_by_prior_requests() {
        let app = build_router(test_state());
        post_raw(&app, "/match/jobs", r#"{"jobs": "broken"}"#).await;
        post_raw(&app, "/match/jobs", "{}").await;

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }
}
