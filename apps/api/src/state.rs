use std::sync::Arc;

use crate::agent::Agent;
use crate::config::Config;
use crate::matching::JobDetailSuggester;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    /// Owns the agent console; handlers start passes and read the log from here.
    pub agent: Agent,
    /// Pluggable auto-fill for the job posting form. Swap via MATCH_BACKEND.
    pub suggester: Arc<dyn JobDetailSuggester>,
    pub config: Config,
}
