use serde::Serialize;

use crate::models::{Application, ApplicationStatus, Job};

/// Score above which an applied candidate counts as a verified match.
const VERIFIED_MATCH_SCORE: u8 = 80;

#[derive(Debug, Clone, Serialize)]
pub struct JobApplicants {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub applicants: usize,
    pub custom_question_count: usize,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_applicants: usize,
    pub verified_matches: usize,
    pub active_jobs: usize,
    pub jobs: Vec<JobApplicants>,
}

/// Only submitted (`applied`) applications count as applicants.
pub fn compute_dashboard(jobs: &[Job], applications: &[Application]) -> DashboardStats {
    let applied: Vec<&Application> = applications
        .iter()
        .filter(|a| a.status == ApplicationStatus::Applied)
        .collect();

    let per_job = jobs
        .iter()
        .map(|job| JobApplicants {
            job_id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            applicants: applied.iter().filter(|a| a.job_id == job.id).count(),
            custom_question_count: job.custom_questions.len(),
            tags: job.tags.clone(),
        })
        .collect();

    DashboardStats {
        total_applicants: applied.len(),
        verified_matches: applied
            .iter()
            .filter(|a| a.ai_match_score > VERIFIED_MATCH_SCORE)
            .count(),
        active_jobs: jobs.len(),
        jobs: per_job,
    }
}
