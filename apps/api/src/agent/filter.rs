//! Pre-filter of the matching pass: unapplied jobs sharing at least one tag
//! with the candidate's skills. Any single shared tag qualifies; no weighting.

use std::collections::HashSet;

use crate::models::{Application, Job, UserProfile};

/// True when the job's tags and the skills intersect, case-insensitively.
pub fn shares_tag(job: &Job, skills: &HashSet<String>) -> bool {
    !job.tag_set().is_disjoint(skills)
}

/// Jobs with no existing application whose tags overlap the profile's skills,
/// in job list order.
pub fn select_candidates<'a>(
    jobs: &'a [Job],
    applications: &[Application],
    profile: &UserProfile,
) -> Vec<&'a Job> {
    let applied: HashSet<&str> = applications.iter().map(|a| a.job_id.as_str()).collect();
    let skills = profile.skill_set();

    jobs.iter()
        .filter(|j| !applied.contains(j.id.as_str()))
        .filter(|j| shares_tag(j, &skills))
        .collect()
}
