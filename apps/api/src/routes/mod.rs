pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::agent::handlers as agent;
use crate::candidate::handlers as candidate;
use crate::employer::handlers as employer;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Employer
        .route(
            "/api/v1/jobs",
            get(employer::handle_list_jobs).post(employer::handle_create_job),
        )
        .route(
            "/api/v1/jobs/suggest",
            post(employer::handle_suggest_details),
        )
        .route("/api/v1/jobs/:id", get(employer::handle_get_job))
        .route(
            "/api/v1/employer/dashboard",
            get(employer::handle_dashboard),
        )
        // Candidate profile
        .route(
            "/api/v1/profile",
            get(candidate::handle_get_profile).put(candidate::handle_update_profile),
        )
        .route("/api/v1/profile/skills", post(candidate::handle_add_skill))
        .route(
            "/api/v1/profile/skills/:skill",
            delete(candidate::handle_remove_skill),
        )
        .route(
            "/api/v1/profile/resume",
            post(candidate::handle_upload_resume),
        )
        // Candidate job board & applications
        .route("/api/v1/candidate/jobs", get(candidate::handle_job_board))
        .route(
            "/api/v1/applications",
            get(candidate::handle_list_applications),
        )
        .route(
            "/api/v1/applications/action-required",
            get(candidate::handle_action_required),
        )
        .route(
            "/api/v1/applications/:id",
            patch(candidate::handle_patch_application),
        )
        .route(
            "/api/v1/applications/:id/complete",
            post(candidate::handle_complete_application),
        )
        // Agent
        .route("/api/v1/agent/run", post(agent::handle_run_agent))
        .route("/api/v1/agent/status", get(agent::handle_agent_status))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::agent::{Agent, NoPacer, Pacer, SleepPacer};
    use crate::config::{Config, MatchBackend};
    use crate::matching::{
        KeywordMatchEvaluator, MatchEvaluator, MatchResult, TemplateJobDetailSuggester,
    };
    use crate::models::{Job, UserProfile};
    use crate::store::Store;

    fn test_state() -> AppState {
        state_with(Arc::new(KeywordMatchEvaluator), Arc::new(NoPacer))
    }

    fn state_with(evaluator: Arc<dyn MatchEvaluator>, pacer: Arc<dyn Pacer>) -> AppState {
        let store = Arc::new(Store::seeded());
        let agent = Agent::new(store.clone(), evaluator, pacer);
        AppState {
            store,
            agent,
            suggester: Arc::new(TemplateJobDetailSuggester),
            config: Config {
                gemini_api_key: None,
                match_backend: MatchBackend::Keyword,
                default_match_threshold: 70,
                agent_pacing: false,
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_service() {
        let app = build_router(test_state());
        let response = send(&app, Method::GET, "/health", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "recruit-api");
    }

    #[tokio::test]
    async fn test_unknown_job_is_404_with_error_envelope() {
        let app = build_router(test_state());
        let response = send(&app, Method::GET, "/api/v1/jobs/nope", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_created_job_is_listed_first() {
        let app = build_router(test_state());
        let draft = json!({
            "title": "Rust Engineer",
            "company": "Ferrous",
            "requirements": "Rust\n\nTokio",
            "tags": ["Rust", "Backend"],
            "notice_period": "immediate",
            "custom_questions": [{ "question": "Favourite crate?" }]
        });
        let response = send(&app, Method::POST, "/api/v1/jobs", Some(draft)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["location"], "Remote");
        assert_eq!(created["notice_period"], "immediate");
        assert_eq!(created["requirements"], json!(["Rust", "Tokio"]));

        let jobs = body_json(send(&app, Method::GET, "/api/v1/jobs", None).await).await;
        assert_eq!(jobs.as_array().unwrap().len(), 6);
        assert_eq!(jobs[0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_create_job_without_title_is_rejected() {
        let app = build_router(test_state());
        let draft = json!({ "title": "  ", "company": "Ferrous" });
        let response = send(&app, Method::POST, "/api/v1/jobs", Some(draft)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_suggest_needs_title_and_company() {
        let app = build_router(test_state());
        let response = send(
            &app,
            Method::POST,
            "/api/v1/jobs/suggest",
            Some(json!({ "title": "Data Engineer" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            Method::POST,
            "/api/v1/jobs/suggest",
            Some(json!({ "title": "Data Engineer", "company": "Acme" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["description"].as_str().unwrap().contains("Acme"));
        assert!(json["experience_years"].is_u64());
    }

    #[tokio::test]
    async fn test_profile_skill_lifecycle() {
        let app = build_router(test_state());

        let profile = body_json(
            send(
                &app,
                Method::POST,
                "/api/v1/profile/skills",
                Some(json!({ "skill": " Rust " })),
            )
            .await,
        )
        .await;
        assert!(profile["skills"]
            .as_array()
            .unwrap()
            .contains(&json!("Rust")));

        let response = send(&app, Method::DELETE, "/api/v1/profile/skills/Rust", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, Method::DELETE, "/api/v1/profile/skills/Rust", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_profile_update_rejects_bad_email() {
        let app = build_router(test_state());
        let response = send(
            &app,
            Method::PUT,
            "/api/v1/profile",
            Some(json!({ "email": "not-an-email" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_agent_run_then_complete_parked_application() {
        let app = build_router(test_state());

        let response = send(
            &app,
            Method::POST,
            "/api/v1/agent/run",
            Some(json!({ "threshold": 0, "wait": true })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let run = body_json(response).await;
        assert_eq!(run["started"], true);
        assert_eq!(run["summary"]["candidates"], 3);
        assert_eq!(run["summary"]["applied"], json!(["1", "3"]));
        assert_eq!(run["summary"]["needs_input"], json!(["2"]));

        let pending = body_json(
            send(&app, Method::GET, "/api/v1/applications/action-required", None).await,
        )
        .await;
        let pending = pending.as_array().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0]["job_id"], "2");
        let id = pending[0]["id"].as_str().unwrap().to_string();

        let response = send(
            &app,
            Method::POST,
            &format!("/api/v1/applications/{id}/complete"),
            Some(json!({ "answers": [{ "question_id": "q1", "answer": "Yes, 2 years" }] })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "applied");

        let dashboard =
            body_json(send(&app, Method::GET, "/api/v1/employer/dashboard", None).await).await;
        assert_eq!(dashboard["total_applicants"], 3);

        let status = body_json(send(&app, Method::GET, "/api/v1/agent/status", None).await).await;
        assert_eq!(status["running"], false);
        assert_eq!(status["default_threshold"], 70);
        assert!(!status["logs"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_agent_run_without_body_uses_defaults() {
        let app = build_router(test_state());
        let response = send(&app, Method::POST, "/api/v1/agent/run", None).await;

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let json = body_json(response).await;
        assert_eq!(json["started"], true);
        assert_eq!(json["threshold"], 70);
    }

    #[tokio::test]
    async fn test_agent_run_malformed_body_is_rejected() {
        let app = build_router(test_state());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/agent/run")
            .header("content-type", "application/json")
            .body(Body::from("{\"threshold\":"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiting_run_completes_after_client_goes_away() {
        let state = state_with(Arc::new(KeywordMatchEvaluator), Arc::new(SleepPacer));
        let app = build_router(state.clone());

        // Give up mid-pass, while the first job's cover letter is being drafted.
        let waiting = send(
            &app,
            Method::POST,
            "/api/v1/agent/run",
            Some(json!({ "threshold": 0, "wait": true })),
        );
        assert!(tokio::time::timeout(Duration::from_secs(2), waiting)
            .await
            .is_err());

        tokio::time::sleep(Duration::from_secs(30)).await;

        let console = state.agent.console().view();
        assert!(!console.running);
        assert_eq!(
            console.logs.last().map(|l| l.message.as_str()),
            Some("Agent run complete.")
        );
        let applications = state.store.applications().await;
        let mut job_ids: Vec<&str> = applications.iter().map(|a| a.job_id.as_str()).collect();
        job_ids.sort();
        assert_eq!(job_ids, vec!["1", "2", "3"]);
    }

    struct PanickingEvaluator;

    #[async_trait]
    impl MatchEvaluator for PanickingEvaluator {
        async fn evaluate(&self, _job: &Job, _profile: &UserProfile, _threshold: u8) -> MatchResult {
            panic!("evaluator crashed");
        }

        fn backend(&self) -> &'static str {
            "panicking"
        }
    }

    #[tokio::test]
    async fn test_crashed_waiting_run_is_internal_error() {
        let state = state_with(Arc::new(PanickingEvaluator), Arc::new(NoPacer));
        let app = build_router(state.clone());

        let response = send(
            &app,
            Method::POST,
            "/api/v1/agent/run",
            Some(json!({ "threshold": 0, "wait": true })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["code"], "INTERNAL_ERROR");
        assert!(!state.agent.console().is_running());
    }

    #[tokio::test]
    async fn test_agent_threshold_out_of_range() {
        let app = build_router(test_state());
        let response = send(
            &app,
            Method::POST,
            "/api/v1/agent/run",
            Some(json!({ "threshold": 101 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_patch_application_status() {
        let app = build_router(test_state());
        send(
            &app,
            Method::POST,
            "/api/v1/agent/run",
            Some(json!({ "threshold": 0, "wait": true })),
        )
        .await;
        let apps = body_json(send(&app, Method::GET, "/api/v1/applications", None).await).await;
        let id = apps[0]["id"].as_str().unwrap().to_string();

        let response = send(
            &app,
            Method::PATCH,
            &format!("/api/v1/applications/{id}"),
            Some(json!({ "status": "interview" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "interview");

        let response = send(
            &app,
            Method::PATCH,
            "/api/v1/applications/missing",
            Some(json!({ "status": "rejected" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_job_board_reports_application_status() {
        let app = build_router(test_state());
        send(
            &app,
            Method::POST,
            "/api/v1/agent/run",
            Some(json!({ "threshold": 0, "wait": true })),
        )
        .await;
        let board =
            body_json(send(&app, Method::GET, "/api/v1/candidate/jobs", None).await).await;
        let board = board.as_array().unwrap();
        let job2 = board.iter().find(|c| c["id"] == "2").unwrap();
        assert_eq!(job2["application_status"], "needs_input");
        let job5 = board.iter().find(|c| c["id"] == "5").unwrap();
        assert!(job5["application_status"].is_null());
    }
}
