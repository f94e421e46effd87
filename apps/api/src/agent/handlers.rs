//! Axum route handlers for the auto-apply agent.

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agent::console::ConsoleView;
use crate::agent::runner::RunSummary;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RunAgentRequest {
    /// 0 – 100. Defaults to the configured threshold.
    #[serde(default)]
    pub threshold: Option<u32>,
    /// Run inline and return the summary instead of starting in the background.
    #[serde(default)]
    pub wait: bool,
}

#[derive(Debug, Serialize)]
pub struct RunAgentResponse {
    /// False when a pass was already running; the request was a no-op.
    pub started: bool,
    pub threshold: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
}

#[derive(Debug, Serialize)]
pub struct AgentStatusResponse {
    #[serde(flatten)]
    pub console: ConsoleView,
    pub default_threshold: u8,
}

fn resolve_threshold(requested: Option<u32>, default: u8) -> Result<u8, AppError> {
    match requested {
        None => Ok(default),
        Some(t) if t <= 100 => Ok(t as u8),
        Some(t) => Err(AppError::Validation(format!(
            "threshold must be between 0 and 100, got {t}"
        ))),
    }
}

/// POST /api/v1/agent/run
///
/// Starts a matching pass. A second request while one is active is a no-op
/// reported as `started: false`. The body is optional.
///
/// The pass always runs on its own task: with `wait` the handler only awaits
/// it, so a dropped request never cuts a pass short.
pub async fn handle_run_agent(
    State(state): State<AppState>,
    body: Result<Json<RunAgentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RunAgentResponse>), AppError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => RunAgentRequest::default(),
        Err(rejection) => return Err(AppError::Validation(rejection.body_text())),
    };
    let threshold = resolve_threshold(request.threshold, state.config.default_match_threshold)?;

    let Some(guard) = state.agent.try_begin() else {
        info!("Agent run requested while a pass is active, ignoring");
        return Ok((
            StatusCode::OK,
            Json(RunAgentResponse {
                started: false,
                threshold,
                summary: None,
            }),
        ));
    };

    let agent = state.agent.clone();
    let pass = tokio::spawn(async move { agent.run(guard, threshold).await });

    if request.wait {
        let summary = pass.await.context("agent pass task failed")?;
        return Ok((
            StatusCode::OK,
            Json(RunAgentResponse {
                started: true,
                threshold,
                summary: Some(summary),
            }),
        ));
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(RunAgentResponse {
            started: true,
            threshold,
            summary: None,
        }),
    ))
}

/// GET /api/v1/agent/status
pub async fn handle_agent_status(State(state): State<AppState>) -> Json<AgentStatusResponse> {
    Json(AgentStatusResponse {
        console: state.agent.console().view(),
        default_threshold: state.config.default_match_threshold,
    })
}
