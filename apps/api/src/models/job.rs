use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
}

/// Notice period in days, or the `"immediate"` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoticePeriod {
    Days(u32),
    Immediate(ImmediateMarker),
}

/// Serializes as the literal string `"immediate"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImmediateMarker {
    Immediate,
}

impl NoticePeriod {
    pub const IMMEDIATE: NoticePeriod = NoticePeriod::Immediate(ImmediateMarker::Immediate);

    /// Parses free-form employer input: "immediate" (any case) is the sentinel,
    /// otherwise the leading integer in days. Anything unparseable falls back to 30.
    pub fn parse_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("immediate") {
            return Self::IMMEDIATE;
        }
        match leading_integer(trimmed) {
            Some(days) if days > 0 => NoticePeriod::Days(days),
            _ => NoticePeriod::Days(30),
        }
    }
}

/// Parses the leading run of ASCII digits, e.g. "3-5 years" → 3.
pub fn leading_integer(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// An employer-defined question that blocks automatic application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomQuestion {
    pub id: String,
    pub question: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub salary_range: String,
    pub description: String,
    pub requirements: Vec<String>,
    /// Coarse filtering keywords, compared case-insensitively against profile skills.
    pub tags: Vec<String>,
    pub posted_at: String,
    pub experience_required: u32,
    pub notice_period: NoticePeriod,
    pub custom_questions: Vec<CustomQuestion>,
}

impl Job {
    pub fn has_custom_questions(&self) -> bool {
        !self.custom_questions.is_empty()
    }

    /// Lower-cased tag set used by the agent's pre-filter.
    pub fn tag_set(&self) -> HashSet<String> {
        self.tags.iter().map(|t| t.to_lowercase()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_period_immediate_any_case() {
        assert_eq!(NoticePeriod::parse_input("Immediate"), NoticePeriod::IMMEDIATE);
        assert_eq!(NoticePeriod::parse_input(" IMMEDIATE "), NoticePeriod::IMMEDIATE);
    }

    #[test]
    fn test_notice_period_days_and_fallback() {
        assert_eq!(NoticePeriod::parse_input("45"), NoticePeriod::Days(45));
        assert_eq!(NoticePeriod::parse_input("60 days"), NoticePeriod::Days(60));
        assert_eq!(NoticePeriod::parse_input("soon"), NoticePeriod::Days(30));
        assert_eq!(NoticePeriod::parse_input(""), NoticePeriod::Days(30));
    }

    #[test]
    fn test_notice_period_serde_shapes() {
        assert_eq!(
            serde_json::to_value(NoticePeriod::IMMEDIATE).unwrap(),
            serde_json::json!("immediate")
        );
        assert_eq!(
            serde_json::to_value(NoticePeriod::Days(15)).unwrap(),
            serde_json::json!(15)
        );
        let parsed: NoticePeriod = serde_json::from_str(r#""immediate""#).unwrap();
        assert_eq!(parsed, NoticePeriod::IMMEDIATE);
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("3-5 years"), Some(3));
        assert_eq!(leading_integer("10+"), Some(10));
        assert_eq!(leading_integer("senior"), None);
    }

    #[test]
    fn test_job_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(JobType::FullTime).unwrap(),
            serde_json::json!("full_time")
        );
    }
}
