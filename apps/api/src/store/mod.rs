//! In-memory state container: the single owner of jobs, applications and the
//! candidate profile.
//!
//! Reads hand out cloned snapshots. Every write is an explicit operation applied
//! atomically under the write lock, so invariants are checked in one place:
//! - an application's `job_id` references an existing job
//! - at most one application exists per job
//! - a `needs_input` application carries the job's custom questions

pub mod seed;

use std::collections::HashSet;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::{
    Application, ApplicationPatch, ApplicationStatus, Job, ProfileUpdate, QuestionAnswer,
    UserProfile,
};

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub jobs: Vec<Job>,
    pub applications: Vec<Application>,
    pub profile: UserProfile,
}

struct Inner {
    jobs: Vec<Job>,
    applications: Vec<Application>,
    profile: UserProfile,
}

pub struct Store {
    inner: RwLock<Inner>,
}

impl Store {
    pub fn new(jobs: Vec<Job>, profile: UserProfile) -> Self {
        Self {
            inner: RwLock::new(Inner {
                jobs,
                applications: Vec::new(),
                profile,
            }),
        }
    }

    /// Store preloaded with the demo job board and candidate.
    pub fn seeded() -> Self {
        Self::new(seed::mock_jobs(), seed::default_profile())
    }

    // ── Reads ──────────────────────────────────────────────────────────────

    pub async fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().await;
        Snapshot {
            jobs: inner.jobs.clone(),
            applications: inner.applications.clone(),
            profile: inner.profile.clone(),
        }
    }

    pub async fn jobs(&self) -> Vec<Job> {
        self.inner.read().await.jobs.clone()
    }

    pub async fn job(&self, job_id: &str) -> Result<Job, AppError> {
        self.inner
            .read()
            .await
            .jobs
            .iter()
            .find(|j| j.id == job_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
    }

    pub async fn applications(&self) -> Vec<Application> {
        self.inner.read().await.applications.clone()
    }

    pub async fn profile(&self) -> UserProfile {
        self.inner.read().await.profile.clone()
    }

    // ── Writes ─────────────────────────────────────────────────────────────

    /// New postings go to the top of the board.
    pub async fn add_job(&self, job: Job) -> Result<Job, AppError> {
        let mut inner = self.inner.write().await;
        if inner.jobs.iter().any(|j| j.id == job.id) {
            return Err(AppError::Conflict(format!("Job {} already exists", job.id)));
        }
        info!("Posting job {} ({} at {})", job.id, job.title, job.company);
        inner.jobs.insert(0, job.clone());
        Ok(job)
    }

    pub async fn add_application(&self, application: Application) -> Result<Application, AppError> {
        let mut inner = self.inner.write().await;

        let job = inner
            .jobs
            .iter()
            .find(|j| j.id == application.job_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Job {} not found", application.job_id))
            })?;

        if application.status == ApplicationStatus::NeedsInput
            && application.missing_info.as_deref() != Some(job.custom_questions.as_slice())
        {
            return Err(AppError::Validation(format!(
                "Needs-input application for job {} must carry the job's custom questions",
                job.id
            )));
        }

        if inner
            .applications
            .iter()
            .any(|a| a.job_id == application.job_id)
        {
            return Err(AppError::Conflict(format!(
                "Job {} already has an application",
                application.job_id
            )));
        }

        debug!(
            "Recording {:?} application {} for job {}",
            application.status, application.id, application.job_id
        );
        inner.applications.push(application.clone());
        Ok(application)
    }

    pub async fn update_application(
        &self,
        application_id: &str,
        patch: ApplicationPatch,
    ) -> Result<Application, AppError> {
        let mut inner = self.inner.write().await;
        let application = find_application_mut(&mut inner.applications, application_id)?;
        application.apply_patch(patch);
        Ok(application.clone())
    }

    /// Answers a `needs_input` application's custom questions and submits it.
    pub async fn complete_application(
        &self,
        application_id: &str,
        answers: Vec<QuestionAnswer>,
    ) -> Result<Application, AppError> {
        let mut inner = self.inner.write().await;
        let application = find_application_mut(&mut inner.applications, application_id)?;

        if application.status != ApplicationStatus::NeedsInput {
            return Err(AppError::Conflict(format!(
                "Application {application_id} is not awaiting input"
            )));
        }

        let questions = application.missing_info.clone().unwrap_or_default();
        let known: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();

        if let Some(unknown) = answers.iter().find(|a| !known.contains(a.question_id.as_str())) {
            return Err(AppError::Validation(format!(
                "Unknown question id '{}'",
                unknown.question_id
            )));
        }

        let answered: HashSet<&str> = answers
            .iter()
            .filter(|a| !a.answer.trim().is_empty())
            .map(|a| a.question_id.as_str())
            .collect();

        let unanswered: Vec<&str> = questions
            .iter()
            .filter(|q| q.required && !answered.contains(q.id.as_str()))
            .map(|q| q.question.as_str())
            .collect();

        if !unanswered.is_empty() {
            return Err(AppError::Validation(format!(
                "Required questions unanswered: {}",
                unanswered.join("; ")
            )));
        }

        application.answers = answers
            .into_iter()
            .filter(|a| !a.answer.trim().is_empty())
            .map(|a| QuestionAnswer {
                question_id: a.question_id,
                answer: a.answer.trim().to_string(),
            })
            .collect();
        application.status = ApplicationStatus::Applied;
        application.missing_info = None;

        info!(
            "Application {} for job {} completed with {} answers",
            application.id,
            application.job_id,
            application.answers.len()
        );
        Ok(application.clone())
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> UserProfile {
        let mut inner = self.inner.write().await;
        inner.profile.apply(update);
        inner.profile.clone()
    }

    pub async fn add_skill(&self, skill: &str) -> UserProfile {
        let mut inner = self.inner.write().await;
        if !inner.profile.add_skill(skill) {
            debug!("Skill '{skill}' ignored (blank or already present)");
        }
        inner.profile.clone()
    }

    pub async fn remove_skill(&self, skill: &str) -> Result<UserProfile, AppError> {
        let mut inner = self.inner.write().await;
        if !inner.profile.remove_skill(skill) {
            return Err(AppError::NotFound(format!("Skill '{skill}' not in profile")));
        }
        Ok(inner.profile.clone())
    }

    /// Records an uploaded resume. Extracted text, when present, replaces the resume body.
    pub async fn attach_resume(
        &self,
        file_name: String,
        extracted_text: Option<String>,
    ) -> UserProfile {
        let mut inner = self.inner.write().await;
        inner.profile.resume_file_name = Some(file_name);
        if let Some(text) = extracted_text {
            inner.profile.resume_text = text;
        }
        inner.profile.clone()
    }
}

fn find_application_mut<'a>(
    applications: &'a mut [Application],
    application_id: &str,
) -> Result<&'a mut Application, AppError> {
    applications
        .iter_mut()
        .find(|a| a.id == application_id)
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(store_jobs: &[Job], id: &str) -> Job {
        store_jobs.iter().find(|j| j.id == id).cloned().unwrap()
    }

    #[tokio::test]
    async fn test_add_job_prepends() {
        let store = Store::seeded();
        let mut new_job = seed::mock_jobs()[0].clone();
        new_job.id = "new".to_string();
        store.add_job(new_job).await.unwrap();
        assert_eq!(store.jobs().await[0].id, "new");
    }

    #[tokio::test]
    async fn test_add_job_rejects_duplicate_id() {
        let store = Store::seeded();
        let dup = seed::mock_jobs()[0].clone();
        assert!(matches!(store.add_job(dup).await, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_application_must_reference_existing_job() {
        let store = Store::seeded();
        let mut orphan = job(&seed::mock_jobs(), "1");
        orphan.id = "missing".to_string();
        let app = Application::applied(&orphan, 80, String::new(), String::new());
        assert!(matches!(
            store.add_application(app).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_second_application_for_job_conflicts() {
        let store = Store::seeded();
        let j = job(&seed::mock_jobs(), "3");
        store
            .add_application(Application::applied(&j, 80, String::new(), String::new()))
            .await
            .unwrap();
        let second = Application::applied(&j, 90, String::new(), String::new());
        assert!(matches!(
            store.add_application(second).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_needs_input_must_carry_questions() {
        let store = Store::seeded();
        let j = job(&seed::mock_jobs(), "2");
        let mut app = Application::needs_input(&j);
        app.missing_info = Some(vec![]);
        assert!(matches!(
            store.add_application(app).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_application_requires_answers() {
        let store = Store::seeded();
        let j = job(&seed::mock_jobs(), "2");
        let app = store
            .add_application(Application::needs_input(&j))
            .await
            .unwrap();

        let blank = vec![QuestionAnswer {
            question_id: "q1".to_string(),
            answer: "   ".to_string(),
        }];
        assert!(matches!(
            store.complete_application(&app.id, blank).await,
            Err(AppError::Validation(_))
        ));

        let answers = vec![QuestionAnswer {
            question_id: "q1".to_string(),
            answer: " Yes, three years ".to_string(),
        }];
        let done = store.complete_application(&app.id, answers).await.unwrap();
        assert_eq!(done.status, ApplicationStatus::Applied);
        assert!(done.missing_info.is_none());
        assert_eq!(done.answers[0].answer, "Yes, three years");
    }

    #[tokio::test]
    async fn test_complete_rejects_unknown_question() {
        let store = Store::seeded();
        let j = job(&seed::mock_jobs(), "2");
        let app = store
            .add_application(Application::needs_input(&j))
            .await
            .unwrap();
        let answers = vec![QuestionAnswer {
            question_id: "nope".to_string(),
            answer: "x".to_string(),
        }];
        assert!(matches!(
            store.complete_application(&app.id, answers).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_rejects_non_pending_input() {
        let store = Store::seeded();
        let j = job(&seed::mock_jobs(), "1");
        let app = store
            .add_application(Application::applied(&j, 90, String::new(), String::new()))
            .await
            .unwrap();
        assert!(matches!(
            store.complete_application(&app.id, vec![]).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_application_patch() {
        let store = Store::seeded();
        let j = job(&seed::mock_jobs(), "1");
        let app = store
            .add_application(Application::applied(&j, 90, String::new(), String::new()))
            .await
            .unwrap();
        let updated = store
            .update_application(
                &app.id,
                ApplicationPatch {
                    status: Some(ApplicationStatus::Interview),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Interview);
        assert!(matches!(
            store.update_application("zzz", ApplicationPatch::default()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_missing_skill_is_not_found() {
        let store = Store::seeded();
        assert!(store.remove_skill("COBOL").await.is_err());
        let profile = store.remove_skill("Python").await.unwrap();
        assert!(!profile.skills.contains(&"Python".to_string()));
    }

    #[tokio::test]
    async fn test_attach_resume_keeps_text_without_extraction() {
        let store = Store::seeded();
        let before = store.profile().await.resume_text;
        let profile = store.attach_resume("cv.docx".to_string(), None).await;
        assert_eq!(profile.resume_file_name.as_deref(), Some("cv.docx"));
        assert_eq!(profile.resume_text, before);
    }
}
