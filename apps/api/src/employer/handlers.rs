//! Axum route handlers for job postings and the employer dashboard.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::employer::job_form::{experience_years_from_suggestion, JobDraft};
use crate::employer::stats::{compute_dashboard, DashboardStats};
use crate::errors::AppError;
use crate::matching::SuggestedJobDetails;
use crate::models::Job;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    #[serde(flatten)]
    pub details: SuggestedJobDetails,
    /// `experience_required` reduced to whole years for the form's numeric field.
    pub experience_years: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.store.jobs().await)
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(state.store.job(&job_id).await?))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(draft): Json<JobDraft>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = state.store.add_job(draft.into_job()?).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// POST /api/v1/jobs/suggest
///
/// AI auto-fill for the posting form. Needs at least a title and a company.
pub async fn handle_suggest_details(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let title = request.title.trim();
    let company = request.company.trim();
    if title.is_empty() || company.is_empty() {
        return Err(AppError::Validation(
            "Please enter at least a Job Title and Company Name for the AI to work.".to_string(),
        ));
    }

    info!("Suggesting job details for '{title}' at '{company}'");
    let details = state.suggester.suggest(title, company).await;
    let experience_years = experience_years_from_suggestion(&details.experience_required);

    Ok(Json(SuggestResponse {
        details,
        experience_years,
    }))
}

/// GET /api/v1/employer/dashboard
pub async fn handle_dashboard(State(state): State<AppState>) -> Json<DashboardStats> {
    let snapshot = state.store.snapshot().await;
    Json(compute_dashboard(&snapshot.jobs, &snapshot.applications))
}
