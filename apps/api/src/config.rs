use anyhow::{bail, Context, Result};

/// Which collaborator implementation backs match evaluation and job suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchBackend {
    Llm,
    Keyword,
}

impl MatchBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "llm" | "gemini" => Ok(MatchBackend::Llm),
            "keyword" => Ok(MatchBackend::Keyword),
            other => bail!("MATCH_BACKEND must be 'llm' or 'keyword', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Only required (and only present) for the `llm` backend.
    pub gemini_api_key: Option<String>,
    pub match_backend: MatchBackend,
    pub default_match_threshold: u8,
    pub agent_pacing: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let match_backend = MatchBackend::parse(
            &std::env::var("MATCH_BACKEND").unwrap_or_else(|_| "llm".to_string()),
        )?;

        let gemini_api_key = api_key_for(match_backend, std::env::var("GEMINI_API_KEY").ok())?;

        let default_match_threshold = std::env::var("DEFAULT_MATCH_THRESHOLD")
            .unwrap_or_else(|_| "65".to_string())
            .parse::<u8>()
            .context("DEFAULT_MATCH_THRESHOLD must be an integer between 0 and 100")?;
        if default_match_threshold > 100 {
            bail!("DEFAULT_MATCH_THRESHOLD must be between 0 and 100");
        }

        Ok(Config {
            gemini_api_key,
            match_backend,
            default_match_threshold,
            agent_pacing: parse_switch(
                &std::env::var("AGENT_PACING").unwrap_or_else(|_| "on".to_string()),
            )
            .context("AGENT_PACING must be 'on' or 'off'")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// The key is kept only for the `llm` backend, where it is required.
fn api_key_for(backend: MatchBackend, key: Option<String>) -> Result<Option<String>> {
    match backend {
        MatchBackend::Llm => key
            .filter(|k| !k.trim().is_empty())
            .map(Some)
            .context("Required environment variable 'GEMINI_API_KEY' is not set"),
        MatchBackend::Keyword => Ok(None),
    }
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        other => bail!("unrecognised switch value '{other}'"),
    }
}
