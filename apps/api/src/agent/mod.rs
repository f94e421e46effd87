// Auto-apply agent: tag pre-filter, per-job evaluation, paced log stream.
// Model calls go through the MatchEvaluator collaborator, never llm_client directly.

pub mod console;
pub mod filter;
pub mod handlers;
pub mod pacing;
pub mod runner;

pub use pacing::{NoPacer, Pacer, SleepPacer};
pub use runner::Agent;
