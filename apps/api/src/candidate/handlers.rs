//! Axum route handlers for the candidate: profile, job board and applications.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::candidate::resume::extract_resume_text;
use crate::errors::AppError;
use crate::models::{
    Application, ApplicationPatch, ApplicationStatus, Job, ProfileUpdate, QuestionAnswer,
    UserProfile,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddSkillRequest {
    pub skill: String,
}

#[derive(Debug, Deserialize)]
pub struct CompleteApplicationRequest {
    pub answers: Vec<QuestionAnswer>,
}

/// A job as the candidate sees it on the board.
#[derive(Debug, Serialize)]
pub struct JobCard {
    #[serde(flatten)]
    pub job: Job,
    pub application_status: Option<ApplicationStatus>,
    /// True while the agent is analysing this job.
    pub is_applying: bool,
}

pub fn build_job_board(
    jobs: Vec<Job>,
    applications: &[Application],
    active_job_id: Option<&str>,
) -> Vec<JobCard> {
    jobs.into_iter()
        .map(|job| JobCard {
            application_status: applications
                .iter()
                .find(|a| a.job_id == job.id)
                .map(|a| a.status),
            is_applying: active_job_id == Some(job.id.as_str()),
            job,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<UserProfile> {
    Json(state.store.profile().await)
}

/// PUT /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    if let Some(email) = &update.email {
        if !email.contains('@') {
            return Err(AppError::Validation(format!("'{email}' is not an email address")));
        }
    }
    if matches!(&update.name, Some(name) if name.trim().is_empty()) {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    Ok(Json(state.store.update_profile(update).await))
}

/// POST /api/v1/profile/skills
///
/// Blank or duplicate skills are ignored; the current profile is returned either way.
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(request): Json<AddSkillRequest>,
) -> Json<UserProfile> {
    Json(state.store.add_skill(&request.skill).await)
}

/// DELETE /api/v1/profile/skills/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(state.store.remove_skill(&skill).await?))
}

/// POST /api/v1/profile/resume (multipart, field `resume`)
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UserProfile>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("resume") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
            .ok_or_else(|| AppError::Validation("resume upload needs a file name".to_string()))?;
        let content_type = field.content_type().map(String::from);
        let data = field.bytes().await?;

        let text = extract_resume_text(&file_name, content_type.as_deref(), data).await;
        return Ok(Json(state.store.attach_resume(file_name, text).await));
    }

    Err(AppError::Validation(
        "multipart field 'resume' is required".to_string(),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Job board & applications
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/candidate/jobs
pub async fn handle_job_board(State(state): State<AppState>) -> Json<Vec<JobCard>> {
    let snapshot = state.store.snapshot().await;
    let active = state.agent.console().active_job_id();
    Json(build_job_board(
        snapshot.jobs,
        &snapshot.applications,
        active.as_deref(),
    ))
}

/// GET /api/v1/applications
pub async fn handle_list_applications(State(state): State<AppState>) -> Json<Vec<Application>> {
    Json(state.store.applications().await)
}

/// GET /api/v1/applications/action-required
pub async fn handle_action_required(State(state): State<AppState>) -> Json<Vec<Application>> {
    let pending = state
        .store
        .applications()
        .await
        .into_iter()
        .filter(|a| a.status == ApplicationStatus::NeedsInput)
        .collect();
    Json(pending)
}

/// PATCH /api/v1/applications/:id
pub async fn handle_patch_application(
    State(state): State<AppState>,
    Path(application_id): Path<String>,
    Json(patch): Json<ApplicationPatch>,
) -> Result<Json<Application>, AppError> {
    if patch.status == Some(ApplicationStatus::NeedsInput) {
        return Err(AppError::Validation(
            "status needs_input is set by the agent only".to_string(),
        ));
    }
    Ok(Json(
        state.store.update_application(&application_id, patch).await?,
    ))
}

/// POST /api/v1/applications/:id/complete
pub async fn handle_complete_application(
    State(state): State<AppState>,
    Path(application_id): Path<String>,
    Json(request): Json<CompleteApplicationRequest>,
) -> Result<Json<Application>, AppError> {
    Ok(Json(
        state
            .store
            .complete_application(&application_id, request.answers)
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::mock_jobs;

    #[test]
    fn test_job_board_marks_status_and_active_job() {
        let jobs = mock_jobs();
        let apps = vec![Application::needs_input(&jobs[1])];
        let board = build_job_board(jobs, &apps, Some("3"));

        assert_eq!(board.len(), 5);
        assert_eq!(board[1].application_status, Some(ApplicationStatus::NeedsInput));
        assert!(board[0].application_status.is_none());
        assert!(board[2].is_applying);
        assert!(!board[0].is_applying);
    }

    #[test]
    fn test_job_card_flattens_job_fields() {
        let board = build_job_board(mock_jobs(), &[], None);
        let json = serde_json::to_value(&board[0]).unwrap();
        assert_eq!(json["title"], "Senior Frontend Engineer");
        assert_eq!(json["is_applying"], false);
        assert!(json["application_status"].is_null());
    }
}
