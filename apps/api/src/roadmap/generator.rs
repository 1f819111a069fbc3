//! Roadmap Generator: turns one submitted profile into one validated
//! `SkillGapAnalysis` via a single completion call.
//!
//! Flow: build prompt → backend.complete() → parse + validate → return.
//!
//! The backend may retry a failed transport once; this layer never retries,
//! caches, or repairs a reply.

use std::sync::Arc;

use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{
    ChatMessage, CompletionBackend, CompletionRequest, JsonSchemaSpec, ResponseFormat,
};
use crate::models::analysis::SkillGapAnalysis;
use crate::models::profile::UserProfile;
use crate::roadmap::prompts::{NONE_LISTED, ROADMAP_PROMPT_TEMPLATE, ROADMAP_SYSTEM};
use crate::roadmap::schema::{
    analysis_json_schema, check_expectations, parse_analysis, SCHEMA_NAME,
};
use crate::roadmap::GenerationFailure;

#[derive(Clone)]
pub struct RoadmapGenerator {
    backend: Arc<dyn CompletionBackend>,
}

impl RoadmapGenerator {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Generates the analysis for `profile`. All-or-nothing.
    pub async fn generate(
        &self,
        profile: &UserProfile,
    ) -> Result<SkillGapAnalysis, GenerationFailure> {
        info!(
            "Generating roadmap for {} ({}, {}) with model {}",
            profile.name,
            profile.sector,
            profile.level,
            self.backend.model()
        );

        let request = build_roadmap_request(profile);
        let text = self.backend.complete(&request).await.map_err(|e| {
            warn!("Roadmap call failed: {e}");
            GenerationFailure::TransportError(e.to_string())
        })?;

        let analysis = parse_analysis(&text).inspect_err(|failure| {
            warn!(
                "Rejected roadmap reply ({}): {failure}",
                failure.reason()
            );
        })?;

        for note in check_expectations(&analysis) {
            warn!("Accepted roadmap with deviation: {note}");
        }

        info!(
            "Roadmap generated: {} weeks, readiness={}, baseline={}",
            analysis.roadmap.len(),
            analysis.readiness_score,
            analysis.baseline_score
        );
        Ok(analysis)
    }
}

/// Builds the full request: system + user messages and the JSON Schema
/// response format.
pub fn build_roadmap_request(profile: &UserProfile) -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            ChatMessage::system(format!("{ROADMAP_SYSTEM} {JSON_ONLY_INSTRUCTION}")),
            ChatMessage::user(build_roadmap_prompt(profile)),
        ],
        response_format: Some(ResponseFormat::JsonSchema {
            json_schema: JsonSchemaSpec {
                name: SCHEMA_NAME.to_string(),
                strict: false,
                schema: analysis_json_schema(),
            },
        }),
    }
}

/// Fills the roadmap template with the profile fields. Only the template is
/// scanned for placeholders, so user text is embedded exactly as given.
pub fn build_roadmap_prompt(profile: &UserProfile) -> String {
    fill_placeholders(ROADMAP_PROMPT_TEMPLATE, |name| match name {
        "sector" => Some(profile.sector.label().to_string()),
        "goal" => Some(profile.goal.trim().to_string()),
        "skills" => Some(join_or_none(&profile.skills)),
        "certificates" => Some(join_or_none(&profile.certificates)),
        "level" => Some(profile.level.to_string()),
        "study_hours" => Some(profile.study_hours_per_day.to_string()),
        _ => None,
    })
}

/// Replaces each `{name}` in `template` for which `value_for` has a value.
/// Unknown braces are copied through untouched.
fn fill_placeholders(template: &str, value_for: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let filled = after
            .find('}')
            .and_then(|end| value_for(&after[..end]).map(|value| (end, value)));
        match filled {
            Some((end, value)) => {
                out.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn join_or_none(items: &[String]) -> String {
    let items: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        NONE_LISTED.to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedBackend;
    use crate::llm_client::{LlmError, Role};
    use crate::models::fixtures::{ava, sample_analysis, sample_analysis_json};

    fn generator(backend: ScriptedBackend) -> (RoadmapGenerator, Arc<ScriptedBackend>) {
        let backend = Arc::new(backend);
        (RoadmapGenerator::new(backend.clone()), backend)
    }

    #[test]
    fn test_goal_with_braces_is_embedded_verbatim() {
        let mut profile = ava();
        profile.goal = "Teach {level} learners about {skills}".to_string();
        let prompt = build_roadmap_prompt(&profile);

        assert!(prompt.contains("- Goal: Teach {level} learners about {skills}"));
        assert!(prompt.contains("Level: Beginner"));
        assert!(prompt.contains("Current Skills: SQL"));
    }

    #[test]
    fn test_json_example_braces_survive_filling() {
        let prompt = build_roadmap_prompt(&ava());
        assert!(prompt.contains("\"missingSkills\": [\"Python\"]"));
        assert!(prompt.trim_end().ends_with('}'));
    }

    #[test]
    fn test_prompt_embeds_every_profile_field() {
        let mut profile = ava();
        profile.certificates = vec!["Google Data Analytics".to_string()];
        let prompt = build_roadmap_prompt(&profile);

        assert!(prompt.contains("expert in Healthcare Informatics"));
        assert!(prompt.contains("Goal: Become a clinical data analyst"));
        assert!(prompt.contains("Current Skills: SQL"));
        assert!(prompt.contains("Certificates: Google Data Analytics"));
        assert!(prompt.contains("Level: Beginner"));
        assert!(prompt.contains("2 hours per day"));
        assert!(prompt.contains("readinessScore"));
        assert!(prompt.contains("baselineScore"));
        for placeholder in ["{sector}", "{goal}", "{skills}", "{level}", "{study_hours}"] {
            assert!(!prompt.contains(placeholder), "unfilled {placeholder}");
        }
    }

    #[test]
    fn test_prompt_marks_empty_lists() {
        let prompt = build_roadmap_prompt(&ava());
        assert!(prompt.contains("Certificates: None listed"));
    }

    #[test]
    fn test_request_carries_schema_format() {
        let request = build_roadmap_request(&ava());
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1].role, Role::User);
        match request.response_format {
            Some(ResponseFormat::JsonSchema { json_schema }) => {
                assert_eq!(json_schema.name, "skill_gap_analysis");
                assert_eq!(json_schema.schema["type"], "object");
            }
            other => panic!("unexpected format: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_returns_parsed_document_unmodified() {
        let (generator, backend) =
            generator(ScriptedBackend::new().with_reply(sample_analysis_json()));
        let analysis = generator.generate(&ava()).await.unwrap();
        assert_eq!(analysis, sample_analysis());
        assert_eq!(analysis.readiness_score, 30.0);
        assert_eq!(analysis.baseline_score, 8.0);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_reply_is_empty_response() {
        let (generator, _) = generator(ScriptedBackend::new().with_reply(""));
        let failure = generator.generate(&ava()).await.unwrap_err();
        assert_eq!(failure.reason(), "empty-response");
    }

    #[tokio::test]
    async fn test_garbage_reply_is_invalid_json() {
        let (generator, _) =
            generator(ScriptedBackend::new().with_reply("Sure! Here is your roadmap:"));
        let failure = generator.generate(&ava()).await.unwrap_err();
        assert_eq!(failure.reason(), "invalid-json");
    }

    #[tokio::test]
    async fn test_backend_error_is_transport_error_without_retry() {
        let (generator, backend) = generator(
            ScriptedBackend::new()
                .with_error(LlmError::Api {
                    status: 503,
                    message: "overloaded".to_string(),
                })
                .with_reply(sample_analysis_json()),
        );
        let failure = generator.generate(&ava()).await.unwrap_err();
        assert_eq!(failure.reason(), "transport-error");
        assert!(failure.to_string().contains("overloaded"));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_schema_violation() {
        let (generator, _) = generator(
            ScriptedBackend::new().with_reply(r#"{"missingSkills": [], "recommendation": "x"}"#),
        );
        let failure = generator.generate(&ava()).await.unwrap_err();
        assert_eq!(failure.reason(), "schema-violation");
    }
}
