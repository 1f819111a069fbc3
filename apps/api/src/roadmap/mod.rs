// Roadmap Generation: profile → prompt → completion backend → validated analysis.
// All model calls go through llm_client; nothing here talks HTTP.

use thiserror::Error;

pub mod export;
pub mod generator;
pub mod prompts;
pub mod schema;

pub use generator::RoadmapGenerator;

/// Why a generation attempt produced no analysis. There are no partial
/// results: every variant means the whole document was discarded.
#[derive(Debug, Clone, Error)]
pub enum GenerationFailure {
    #[error("The roadmap service returned an empty response")]
    EmptyResponse,

    #[error("The roadmap service returned malformed JSON: {0}")]
    InvalidJson(String),

    #[error("Could not reach the roadmap service: {0}")]
    TransportError(String),

    #[error("The roadmap did not match the expected format: {0}")]
    SchemaViolation(String),
}

impl GenerationFailure {
    /// Stable machine-readable reason code.
    pub fn reason(&self) -> &'static str {
        match self {
            GenerationFailure::EmptyResponse => "empty-response",
            GenerationFailure::InvalidJson(_) => "invalid-json",
            GenerationFailure::TransportError(_) => "transport-error",
            GenerationFailure::SchemaViolation(_) => "schema-violation",
        }
    }
}
