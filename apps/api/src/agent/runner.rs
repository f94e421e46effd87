//! The matching pass: the candidate's auto-apply agent.
//!
//! Flow: snapshot store → tag pre-filter → per job, in list order:
//!       custom questions → needs-input application,
//!       otherwise evaluator score ≥ threshold → applied application,
//!       below threshold → log only.
//!
//! One pass at a time (`AgentConsole::try_begin`). A pass works on the snapshot
//! taken at its start and writes each application to the store as it goes.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::agent::console::{AgentConsole, LogKind, RunGuard};
use crate::agent::filter::select_candidates;
use crate::agent::pacing::{PacePoint, Pacer};
use crate::matching::MatchEvaluator;
use crate::models::{Application, Job, UserProfile};
use crate::store::Store;

/// What a completed pass did, by job id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub candidates: usize,
    pub applied: Vec<String>,
    pub needs_input: Vec<String>,
    pub below_threshold: Vec<String>,
}

#[derive(Clone)]
pub struct Agent {
    store: Arc<Store>,
    console: Arc<AgentConsole>,
    evaluator: Arc<dyn MatchEvaluator>,
    pacer: Arc<dyn Pacer>,
}

impl Agent {
    pub fn new(
        store: Arc<Store>,
        evaluator: Arc<dyn MatchEvaluator>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self {
            store,
            console: Arc::new(AgentConsole::new()),
            evaluator,
            pacer,
        }
    }

    pub fn console(&self) -> &AgentConsole {
        &self.console
    }

    /// Claims the single agent slot. `None` while another pass is active.
    pub fn try_begin(&self) -> Option<RunGuard> {
        self.console.try_begin()
    }

    /// Runs a pass if none is active; a no-op returning `None` otherwise.
    pub async fn run_exclusive(&self, threshold: u8) -> Option<RunSummary> {
        let guard = self.try_begin()?;
        Some(self.run(guard, threshold).await)
    }

    /// Runs one full pass. The guard is released when the pass ends.
    pub async fn run(&self, _guard: RunGuard, threshold: u8) -> RunSummary {
        let console = &self.console;
        console.push("Agent initializing...", LogKind::Info);
        info!(
            "Agent pass started (threshold={threshold}, evaluator={})",
            self.evaluator.backend()
        );

        console.push("Phase 1: Filtering jobs based on Skills tags...", LogKind::Action);
        self.pacer.pause(PacePoint::AfterFilter).await;

        let snapshot = self.store.snapshot().await;
        let candidates = select_candidates(&snapshot.jobs, &snapshot.applications, &snapshot.profile);

        let mut summary = RunSummary {
            candidates: candidates.len(),
            ..Default::default()
        };

        if candidates.is_empty() {
            console.push(
                "No new relevant jobs found matching your skills. Try adding more skills.",
                LogKind::Warning,
            );
            info!("Agent pass ended: no candidate jobs");
            return summary;
        }

        console.push(
            format!(
                "Found {} potential matches based on tags. Starting deep analysis...",
                candidates.len()
            ),
            LogKind::Success,
        );

        for job in candidates {
            console.set_active_job(Some(job.id.clone()));
            console.push(
                format!("Analyzing: {} at {}", job.title, job.company),
                LogKind::Action,
            );

            if job.has_custom_questions() {
                console.push(
                    "Job requires custom inputs. Saving for manual review.",
                    LogKind::Warning,
                );
                if self.record(job, Application::needs_input(job)).await {
                    summary.needs_input.push(job.id.clone());
                }
                self.pacer.pause(PacePoint::AfterNeedsInput).await;
                continue;
            }

            self.evaluate_job(job, &snapshot.profile, threshold, &mut summary)
                .await;
            self.pacer.pause(PacePoint::BetweenJobs).await;
        }

        console.set_active_job(None);
        console.push("Agent run complete.", LogKind::Info);
        info!(
            "Agent pass complete: {} applied, {} needs input, {} below threshold",
            summary.applied.len(),
            summary.needs_input.len(),
            summary.below_threshold.len()
        );
        summary
    }

    async fn evaluate_job(
        &self,
        job: &Job,
        profile: &UserProfile,
        threshold: u8,
        summary: &mut RunSummary,
    ) {
        let console = &self.console;
        let result = self.evaluator.evaluate(job, profile, threshold).await;
        let passed = result.score >= threshold;

        console.push(
            format!("Score: {}/100. {}", result.score, result.reason),
            if passed { LogKind::Success } else { LogKind::Info },
        );

        if !passed {
            console.push("Skipping - below threshold.", LogKind::Info);
            summary.below_threshold.push(job.id.clone());
            return;
        }

        console.push(
            format!(
                "Match confirmed! Attaching resume: {}",
                profile.resume_attachment_name()
            ),
            LogKind::Action,
        );
        self.pacer.pause(PacePoint::AfterAttachResume).await;
        console.push("Generating cover letter...", LogKind::Action);
        self.pacer.pause(PacePoint::AfterCoverLetter).await;

        let application = Application::applied(job, result.score, result.reason, result.cover_letter);
        if self.record(job, application).await {
            console.push("Application submitted successfully.", LogKind::Success);
            summary.applied.push(job.id.clone());
        }
    }

    /// Writes an application; a rejected write becomes a warning log entry.
    async fn record(&self, job: &Job, application: Application) -> bool {
        match self.store.add_application(application).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Agent could not record application for job {}: {e}", job.id);
                self.console.push(
                    format!("Could not save application for {}: {e}", job.title),
                    LogKind::Warning,
                );
                false
            }
        }
    }
}
