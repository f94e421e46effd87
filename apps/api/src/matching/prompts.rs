// Prompt constants and response schemas for the matching collaborators.
// Reuses the JSON-only fragment from llm_client::prompts.

use serde_json::{json, Value};

/// System instruction for match evaluation.
pub const MATCH_SYSTEM: &str = "Act as a recruitment AI. \
    You score how well a candidate fits a job and draft a short cover letter. \
    Base the score only on the candidate and job data provided.";

/// Match prompt template. Replace: {profile_json}, {job_json}, {threshold}
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Candidate: {profile_json}
Job: {job_json}

Task:
1. Score match 0-100.
2. If score >= {threshold}, isMatch = true.
3. Short reasoning.
4. Draft short cover letter."#;

/// System instruction for employer job-detail suggestions.
pub const SUGGEST_SYSTEM: &str = "You are an experienced technical recruiter \
    who writes clear, professional job postings.";

/// Suggestion prompt template. Replace: {title}, {company}
pub const SUGGEST_PROMPT_TEMPLATE: &str = r#"I am an employer creating a job posting for a "{title}" at "{company}".
Suggest a professional job description, a list of 5 key technical requirements, a competitive salary range (e.g. $100k - $120k), and required experience level (e.g. 3-5 years)."#;

/// Response schema for match evaluation (Gemini OpenAPI subset).
pub fn match_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "matchScore": { "type": "NUMBER" },
            "reason": { "type": "STRING" },
            "isMatch": { "type": "BOOLEAN" },
            "draftCoverLetter": { "type": "STRING" }
        },
        "required": ["matchScore", "reason", "isMatch", "draftCoverLetter"]
    })
}

/// Response schema for job-detail suggestions.
pub fn suggest_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "description": { "type": "STRING" },
            "requirements": { "type": "ARRAY", "items": { "type": "STRING" } },
            "salaryRange": { "type": "STRING" },
            "experienceRequired": { "type": "STRING" }
        },
        "required": ["description", "requirements", "salaryRange", "experienceRequired"]
    })
}
