// External collaborators of the agent and the employer form.
// Model calls go through llm_client; both traits are infallible by contract.

pub mod evaluator;
pub mod prompts;
pub mod suggester;

pub use evaluator::{KeywordMatchEvaluator, LlmMatchEvaluator, MatchEvaluator, MatchResult};
pub use suggester::{
    JobDetailSuggester, LlmJobDetailSuggester, SuggestedJobDetails, TemplateJobDetailSuggester,
};
