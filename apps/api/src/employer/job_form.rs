//! Employer job-posting form: turns a loosely-typed draft into a `Job`.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::application::short_id;
use crate::models::job::leading_integer;
use crate::models::{CustomQuestion, Job, JobType, NoticePeriod};

const DEFAULT_EXPERIENCE_YEARS: u32 = 3;

fn default_experience() -> u32 {
    DEFAULT_EXPERIENCE_YEARS
}

fn default_notice_period() -> String {
    "30".to_string()
}

fn default_required() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDraft {
    pub question: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

/// Form fields as the employer enters them.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "type")]
    pub job_type: JobType,
    #[serde(default = "default_experience")]
    pub experience: u32,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
    /// One requirement per line.
    #[serde(default)]
    pub requirements: String,
    /// Days, or "immediate".
    #[serde(default = "default_notice_period")]
    pub notice_period: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub custom_questions: Vec<QuestionDraft>,
}

impl JobDraft {
    pub fn into_job(self) -> Result<Job, AppError> {
        let title = self.title.trim().to_string();
        let company = self.company.trim().to_string();
        if title.is_empty() || company.is_empty() {
            return Err(AppError::Validation(
                "Job title and company name are required".to_string(),
            ));
        }

        let location = match self.location.trim() {
            "" => "Remote".to_string(),
            loc => loc.to_string(),
        };

        Ok(Job {
            id: short_id(),
            title,
            company,
            location,
            job_type: self.job_type,
            salary_range: self.salary.trim().to_string(),
            description: self.description.trim().to_string(),
            requirements: split_requirements(&self.requirements),
            tags: normalize_tags(self.tags),
            posted_at: "Just Now".to_string(),
            experience_required: self.experience,
            notice_period: NoticePeriod::parse_input(&self.notice_period),
            custom_questions: build_questions(self.custom_questions),
        })
    }
}

fn split_requirements(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Trimmed, blank-free, first occurrence wins.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

fn build_questions(drafts: Vec<QuestionDraft>) -> Vec<CustomQuestion> {
    drafts
        .into_iter()
        .filter(|q| !q.question.trim().is_empty())
        .map(|q| CustomQuestion {
            id: short_id()[..5].to_string(),
            question: q.question.trim().to_string(),
            required: q.required,
        })
        .collect()
}

/// Years from a suggestion such as "3-5 years"; falls back to 3.
pub fn experience_years_from_suggestion(text: &str) -> u32 {
    leading_integer(text).unwrap_or(DEFAULT_EXPERIENCE_YEARS)
}
