//! Job-detail suggestions for employers drafting a posting.
//!
//! Same no-fail contract as the match evaluator: a failed model call returns
//! `SuggestedJobDetails::fallback()` so the employer can fill the form manually.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::matching::prompts::{suggest_schema, SUGGEST_PROMPT_TEMPLATE, SUGGEST_SYSTEM};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct SuggestedJobDetails {
    pub description: String,
    pub requirements: Vec<String>,
    pub salary_range: String,
    /// Free text such as "3-5 years".
    pub experience_required: String,
}

impl SuggestedJobDetails {
    pub fn fallback() -> Self {
        Self {
            description: "Could not generate suggestions.".to_string(),
            requirements: vec!["Manual requirement entry needed".to_string()],
            salary_range: "TBD".to_string(),
            experience_required: "1-3 years".to_string(),
        }
    }
}

#[async_trait]
pub trait JobDetailSuggester: Send + Sync {
    async fn suggest(&self, title: &str, company: &str) -> SuggestedJobDetails;
}

pub struct LlmJobDetailSuggester(pub LlmClient);

#[async_trait]
impl JobDetailSuggester for LlmJobDetailSuggester {
    async fn suggest(&self, title: &str, company: &str) -> SuggestedJobDetails {
        let prompt = SUGGEST_PROMPT_TEMPLATE
            .replace("{title}", title)
            .replace("{company}", company);
        let system = format!("{SUGGEST_SYSTEM} {JSON_ONLY_SYSTEM}");

        let reply = self
            .0
            .call_json::<SuggestedJobDetails>(&prompt, &system, &suggest_schema())
            .await;
        or_fallback(reply, title)
    }
}

fn or_fallback(reply: Result<SuggestedJobDetails, LlmError>, title: &str) -> SuggestedJobDetails {
    reply.unwrap_or_else(|e| {
        error!("Job detail suggestion failed for '{title}': {e}");
        SuggestedJobDetails::fallback()
    })
}

/// Offline suggester: a generic posting filled in with the title and company.
pub struct TemplateJobDetailSuggester;

#[async_trait]
impl JobDetailSuggester for TemplateJobDetailSuggester {
    async fn suggest(&self, title: &str, company: &str) -> SuggestedJobDetails {
        SuggestedJobDetails {
            description: format!(
                "{company} is hiring a {title} to join a growing team. \
                 You will own meaningful projects end to end and work closely \
                 with product and engineering peers."
            ),
            requirements: vec![
                format!("Proven experience as a {title}"),
                "Strong communication skills".to_string(),
                "Comfort working in a fast-moving team".to_string(),
            ],
            salary_range: "TBD".to_string(),
            experience_required: "1-3 years".to_string(),
        }
    }
}
