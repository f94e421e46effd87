//! Match Evaluation: pluggable, trait-based scorer of a profile against one job.
//!
//! `LlmMatchEvaluator` asks the model for a score, reasoning and a cover letter.
//! `KeywordMatchEvaluator` is pure Rust, deterministic and offline.
//!
//! Neither implementation returns an error: a failed model call degrades to
//! `MatchResult::service_error()`, which the agent treats as a below-threshold score.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::matching::prompts::{match_schema, MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM};
use crate::models::{Job, UserProfile};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0 – 100
    pub score: u8,
    pub reason: String,
    pub is_match: bool,
    pub cover_letter: String,
}

impl MatchResult {
    /// Sentinel returned when the evaluator could not produce a real score.
    pub fn service_error() -> Self {
        Self {
            score: 0,
            reason: "Service Error".to_string(),
            is_match: false,
            cover_letter: String::new(),
        }
    }
}

/// Reply shape requested from the model (see `match_schema`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchReply {
    match_score: f64,
    reason: String,
    #[allow(dead_code)]
    is_match: bool,
    draft_cover_letter: String,
}

/// Rounds and clamps a model-provided score into 0–100. NaN maps to 0.
fn clamp_score(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Carried in `AppState` as `Arc<dyn MatchEvaluator>`.
#[async_trait]
pub trait MatchEvaluator: Send + Sync {
    async fn evaluate(&self, job: &Job, profile: &UserProfile, threshold: u8) -> MatchResult;

    /// "llm" | "keyword", for transparency in logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmMatchEvaluator
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmMatchEvaluator(pub LlmClient);

#[async_trait]
impl MatchEvaluator for LlmMatchEvaluator {
    async fn evaluate(&self, job: &Job, profile: &UserProfile, threshold: u8) -> MatchResult {
        let prompt = match build_match_prompt(job, profile, threshold) {
            Ok(prompt) => prompt,
            Err(e) => {
                error!("Failed to build match prompt for job {}: {e}", job.id);
                return MatchResult::service_error();
            }
        };

        let system = format!("{MATCH_SYSTEM} {JSON_ONLY_SYSTEM}");
        let reply = self
            .0
            .call_json::<MatchReply>(&prompt, &system, &match_schema())
            .await;

        into_match_result(reply, threshold, &job.id)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn build_match_prompt(
    job: &Job,
    profile: &UserProfile,
    threshold: u8,
) -> Result<String, serde_json::Error> {
    Ok(MATCH_PROMPT_TEMPLATE
        .replace("{profile_json}", &serde_json::to_string(profile)?)
        .replace("{job_json}", &serde_json::to_string(job)?)
        .replace("{threshold}", &threshold.to_string()))
}

/// Collapses the model call outcome into a well-formed result.
/// `is_match` is recomputed from the clamped score so it always agrees with the threshold.
fn into_match_result(
    reply: Result<MatchReply, LlmError>,
    threshold: u8,
    job_id: &str,
) -> MatchResult {
    match reply {
        Ok(reply) => {
            let score = clamp_score(reply.match_score);
            MatchResult {
                score,
                reason: reply.reason,
                is_match: score >= threshold,
                cover_letter: reply.draft_cover_letter,
            }
        }
        Err(e) => {
            error!("Match evaluation failed for job {job_id}: {e}");
            MatchResult::service_error()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchEvaluator
// ────────────────────────────────────────────────────────────────────────────

/// Pure-Rust keyword scorer. Fast, deterministic, no model call.
///
/// Algorithm:
/// 1. Keywords = job tags followed by requirements, de-duplicated case-insensitively.
/// 2. Per keyword: skill exact match → 1.0, whole-phrase match in resume text → 0.6, else 0.0.
/// 3. score = round(Σ strength / keyword count × 100)
pub struct KeywordMatchEvaluator;

#[async_trait]
impl MatchEvaluator for KeywordMatchEvaluator {
    async fn evaluate(&self, job: &Job, profile: &UserProfile, threshold: u8) -> MatchResult {
        compute_keyword_match(job, profile, threshold)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

fn compute_keyword_match(job: &Job, profile: &UserProfile, threshold: u8) -> MatchResult {
    let keywords = job_keywords(job);
    if keywords.is_empty() {
        return MatchResult {
            score: 0,
            reason: "Job lists no tags or requirements, cannot score fit.".to_string(),
            is_match: false,
            cover_letter: String::new(),
        };
    }

    let skills = profile.skill_set();
    let resume_words = tokenize(&profile.resume_text);

    let mut total = 0.0_f64;
    let mut matched = Vec::new();
    let mut gaps = Vec::new();

    for keyword in &keywords {
        let lower = keyword.to_lowercase();
        let strength = if skills.contains(&lower) {
            1.0
        } else if contains_phrase(&resume_words, &tokenize(&lower)) {
            0.6
        } else {
            0.0
        };
        total += strength;
        if strength > 0.0 {
            matched.push(keyword.as_str());
        } else {
            gaps.push(keyword.as_str());
        }
    }

    let score = clamp_score(total / keywords.len() as f64 * 100.0);
    let is_match = score >= threshold;
    let cover_letter = if is_match {
        draft_cover_letter(job, profile, &matched)
    } else {
        String::new()
    };

    MatchResult {
        score,
        reason: build_reason(score, &matched, &gaps),
        is_match,
        cover_letter,
    }
}

fn job_keywords(job: &Job) -> Vec<String> {
    let mut seen = HashSet::new();
    job.tags
        .iter()
        .chain(job.requirements.iter())
        .map(|k| k.trim())
        .filter(|k| !k.is_empty() && seen.insert(k.to_lowercase()))
        .map(String::from)
        .collect()
}

/// Lower-cased words; keeps `+`, `#` and inner dots so "C++", "C#" and "Node.js" survive.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|w| w.trim_matches('.').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn contains_phrase(words: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty() && words.windows(phrase.len()).any(|w| w == phrase)
}

fn build_reason(score: u8, matched: &[&str], gaps: &[&str]) -> String {
    let top_matched = matched.iter().take(3).copied().collect::<Vec<_>>().join(", ");
    let top_gaps = gaps.iter().take(3).copied().collect::<Vec<_>>().join(", ");

    if matched.is_empty() {
        format!("No overlap with the role's keywords. Missing: {top_gaps}.")
    } else if gaps.is_empty() {
        format!("Covers every listed keyword, including {top_matched}.")
    } else {
        format!("Covers {top_matched}; missing {top_gaps} ({score}/100).")
    }
}

fn draft_cover_letter(job: &Job, profile: &UserProfile, matched: &[&str]) -> String {
    format!(
        "Dear {company} hiring team,\n\n\
         I am excited to apply for the {title} role. With {years} years of experience \
         and hands-on work with {skills}, I am confident I can contribute from day one.\n\n\
         Best regards,\n{name}",
        company = job.company,
        title = job.title,
        years = profile.experience_years,
        skills = matched.iter().take(3).copied().collect::<Vec<_>>().join(", "),
        name = profile.name,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
