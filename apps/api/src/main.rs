mod agent;
mod candidate;
mod config;
mod employer;
mod errors;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::agent::{Agent, NoPacer, Pacer, SleepPacer};
use crate::config::{Config, MatchBackend};
use crate::llm_client::LlmClient;
use crate::matching::{
    JobDetailSuggester, KeywordMatchEvaluator, LlmJobDetailSuggester, LlmMatchEvaluator,
    MatchEvaluator, TemplateJobDetailSuggester,
};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruit API v{}", env!("CARGO_PKG_VERSION"));

    // Evaluator and suggester share one backend choice
    let (evaluator, suggester): (Arc<dyn MatchEvaluator>, Arc<dyn JobDetailSuggester>) =
        match (config.match_backend, config.gemini_api_key.as_deref()) {
            (MatchBackend::Llm, Some(api_key)) => {
                let llm = LlmClient::new(api_key.to_string())?;
                info!("LLM client initialized (model: {})", llm_client::MODEL);
                (
                    Arc::new(LlmMatchEvaluator(llm.clone())),
                    Arc::new(LlmJobDetailSuggester(llm)),
                )
            }
            (MatchBackend::Llm, None) => {
                anyhow::bail!("GEMINI_API_KEY is required for the llm backend")
            }
            (MatchBackend::Keyword, _) => (
                Arc::new(KeywordMatchEvaluator),
                Arc::new(TemplateJobDetailSuggester),
            ),
        };
    info!("Match evaluator: {}", evaluator.backend());

    let pacer: Arc<dyn Pacer> = if config.agent_pacing {
        Arc::new(SleepPacer)
    } else {
        Arc::new(NoPacer)
    };

    let store = Arc::new(Store::seeded());
    let agent = Agent::new(store.clone(), evaluator, pacer);

    // Build app state
    let state = AppState {
        store,
        agent,
        suggester,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
