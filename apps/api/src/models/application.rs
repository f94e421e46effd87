use serde::{Deserialize, Serialize};

use crate::models::job::{CustomQuestion, Job};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Applied,
    Rejected,
    Interview,
    /// Blocked on the candidate answering the job's custom questions.
    NeedsInput,
}

/// Reasoning stored on applications paused for custom questions.
pub const NEEDS_INPUT_REASONING: &str = "Paused: Awaiting user input for custom questions.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub status: ApplicationStatus,
    pub ai_match_score: u8,
    pub ai_reasoning: String,
    pub cover_letter: String,
    pub applied_at: String,
    /// Present only while `status` is `NeedsInput`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_info: Option<Vec<CustomQuestion>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<QuestionAnswer>,
}

impl Application {
    fn for_job(job: &Job, status: ApplicationStatus) -> Self {
        Self {
            id: short_id(),
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            status,
            ai_match_score: 0,
            ai_reasoning: String::new(),
            cover_letter: String::new(),
            applied_at: chrono::Local::now().format("%Y-%m-%d").to_string(),
            missing_info: None,
            answers: Vec::new(),
        }
    }

    /// Application parked until the candidate answers the job's custom questions.
    pub fn needs_input(job: &Job) -> Self {
        Self {
            ai_reasoning: NEEDS_INPUT_REASONING.to_string(),
            missing_info: Some(job.custom_questions.clone()),
            ..Self::for_job(job, ApplicationStatus::NeedsInput)
        }
    }

    pub fn applied(job: &Job, score: u8, reasoning: String, cover_letter: String) -> Self {
        Self {
            ai_match_score: score,
            ai_reasoning: reasoning,
            cover_letter,
            ..Self::for_job(job, ApplicationStatus::Applied)
        }
    }

    pub fn apply_patch(&mut self, patch: ApplicationPatch) {
        if let Some(status) = patch.status {
            self.status = status;
            if status != ApplicationStatus::NeedsInput {
                self.missing_info = None;
            }
        }
        if let Some(score) = patch.ai_match_score {
            self.ai_match_score = score.min(100);
        }
        if let Some(reasoning) = patch.ai_reasoning {
            self.ai_reasoning = reasoning;
        }
        if let Some(cover_letter) = patch.cover_letter {
            self.cover_letter = cover_letter;
        }
    }
}

/// Field patch for an existing application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationPatch {
    pub status: Option<ApplicationStatus>,
    pub ai_match_score: Option<u8>,
    pub ai_reasoning: Option<String>,
    pub cover_letter: Option<String>,
}

/// Nine-character lowercase id, the same shape the employer form uses for jobs.
pub fn short_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..9].to_string()
}
