//! Response contract for roadmap generation.
//!
//! The JSON Schema is sent with every request as the `response_format`, and
//! `parse_analysis` checks the reply against the same contract before it is
//! trusted: JSON syntax first, then shape, then field constraints.

use serde_json::{json, Value};

use crate::llm_client::strip_json_fences;
use crate::models::analysis::SkillGapAnalysis;
use crate::roadmap::GenerationFailure;

pub const SCHEMA_NAME: &str = "skill_gap_analysis";
pub const EXPECTED_WEEKS: usize = 4;
const SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// JSON Schema for `SkillGapAnalysis`.
pub fn analysis_json_schema() -> Value {
    let strings = json!({"type": "array", "items": {"type": "string"}});
    let course = json!({
        "type": "object",
        "properties": {
            "title": {"type": "string"},
            "platform": {"type": "string"},
            "url": {"type": "string"},
            "thumbnail": {"type": "string"}
        },
        "required": ["title", "platform"]
    });
    let step = json!({
        "type": "object",
        "properties": {
            "week": {"type": "integer", "minimum": 1},
            "topic": {"type": "string"},
            "description": {"type": "string"},
            "resources": strings,
            "tasks": strings,
            "suggestedCourses": {"type": "array", "items": course}
        },
        "required": ["week", "topic", "description", "tasks"]
    });
    let project = json!({
        "type": "object",
        "properties": {
            "title": {"type": "string"},
            "difficulty": {"type": "string"},
            "description": {"type": "string"}
        }
    });

    json!({
        "type": "object",
        "properties": {
            "missingSkills": strings,
            "recommendation": {"type": "string"},
            "roadmap": {
                "type": "array",
                "items": step,
                "minItems": EXPECTED_WEEKS,
                "maxItems": EXPECTED_WEEKS
            },
            "projectIdea": {"type": "string"},
            "featuredProjects": {"type": "array", "items": project},
            "readinessScore": {"type": "number", "minimum": 0, "maximum": 100},
            "baselineScore": {"type": "number", "minimum": 0, "maximum": 100}
        },
        "required": [
            "missingSkills",
            "recommendation",
            "roadmap",
            "projectIdea",
            "readinessScore",
            "baselineScore"
        ]
    })
}

/// Parses one reply payload into a validated analysis. All-or-nothing:
/// any failure discards the whole document.
pub fn parse_analysis(text: &str) -> Result<SkillGapAnalysis, GenerationFailure> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(GenerationFailure::EmptyResponse);
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|e| GenerationFailure::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(GenerationFailure::SchemaViolation(
            "top-level value is not an object".to_string(),
        ));
    }

    let analysis: SkillGapAnalysis = serde_json::from_value(value)
        .map_err(|e| GenerationFailure::SchemaViolation(e.to_string()))?;

    let violations = validate_analysis(&analysis);
    if !violations.is_empty() {
        return Err(GenerationFailure::SchemaViolation(violations.join("; ")));
    }
    Ok(analysis)
}

/// Hard constraints. A document breaking any of these is rejected.
pub fn validate_analysis(analysis: &SkillGapAnalysis) -> Vec<String> {
    let mut violations = Vec::new();

    if analysis.roadmap.is_empty() {
        violations.push("roadmap is empty".to_string());
    }
    for (idx, step) in analysis.roadmap.iter().enumerate() {
        if step.week < 1 {
            violations.push(format!("roadmap[{idx}].week must be >= 1"));
        }
    }
    for (field, score) in [
        ("readinessScore", analysis.readiness_score),
        ("baselineScore", analysis.baseline_score),
    ] {
        if !score.is_finite() || !SCORE_RANGE.contains(&score) {
            violations.push(format!("{field} {score} is outside 0-100"));
        }
    }

    violations
}

/// Soft expectations. Logged, never enforced.
pub fn check_expectations(analysis: &SkillGapAnalysis) -> Vec<String> {
    let mut notes = Vec::new();

    if analysis.roadmap.len() != EXPECTED_WEEKS {
        notes.push(format!(
            "roadmap has {} weeks, expected {EXPECTED_WEEKS}",
            analysis.roadmap.len()
        ));
    }
    let in_order = analysis
        .roadmap
        .iter()
        .enumerate()
        .all(|(idx, step)| step.week as usize == idx + 1);
    if !in_order {
        notes.push("roadmap weeks are not numbered 1..n in order".to_string());
    }
    if analysis.readiness_score < analysis.baseline_score {
        notes.push(format!(
            "readinessScore {} is below baselineScore {}",
            analysis.readiness_score, analysis.baseline_score
        ));
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{sample_analysis, sample_analysis_json};

    fn sample_value() -> Value {
        serde_json::to_value(sample_analysis()).unwrap()
    }

    #[test]
    fn test_parse_round_trip_reproduces_document() {
        let parsed = parse_analysis(&sample_analysis_json()).unwrap();
        assert_eq!(parsed, sample_analysis());
    }

    #[test]
    fn test_parse_accepts_fenced_json() {
        let fenced = format!("```json\n{}\n```", sample_analysis_json());
        assert_eq!(parse_analysis(&fenced).unwrap(), sample_analysis());
    }

    #[test]
    fn test_empty_and_whitespace_payloads() {
        assert!(matches!(parse_analysis(""), Err(GenerationFailure::EmptyResponse)));
        assert!(matches!(parse_analysis("  \n "), Err(GenerationFailure::EmptyResponse)));
    }

    #[test]
    fn test_malformed_json_is_invalid_json() {
        let err = parse_analysis("{\"missingSkills\": [").unwrap_err();
        assert_eq!(err.reason(), "invalid-json");
    }

    #[test]
    fn test_non_object_is_schema_violation() {
        let err = parse_analysis("[1, 2, 3]").unwrap_err();
        assert_eq!(err.reason(), "schema-violation");
    }

    #[test]
    fn test_missing_required_field_is_schema_violation() {
        let mut value = sample_value();
        value.as_object_mut().unwrap().remove("readinessScore");
        let err = parse_analysis(&value.to_string()).unwrap_err();
        match err {
            GenerationFailure::SchemaViolation(detail) => {
                assert!(detail.contains("readinessScore"), "{detail}")
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn test_step_missing_tasks_is_schema_violation() {
        let mut value = sample_value();
        value["roadmap"][2].as_object_mut().unwrap().remove("tasks");
        let err = parse_analysis(&value.to_string()).unwrap_err();
        assert_eq!(err.reason(), "schema-violation");
    }

    #[test]
    fn test_out_of_range_score_is_rejected_not_clamped() {
        let mut value = sample_value();
        value["readinessScore"] = json!(140);
        let err = parse_analysis(&value.to_string()).unwrap_err();
        match err {
            GenerationFailure::SchemaViolation(detail) => {
                assert!(detail.contains("readinessScore"))
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn test_week_zero_is_rejected() {
        let mut value = sample_value();
        value["roadmap"][0]["week"] = json!(0);
        assert!(parse_analysis(&value.to_string()).is_err());
    }

    #[test]
    fn test_empty_roadmap_is_rejected() {
        let mut value = sample_value();
        value["roadmap"] = json!([]);
        assert!(parse_analysis(&value.to_string()).is_err());
    }

    #[test]
    fn test_three_week_roadmap_is_accepted_with_note() {
        let mut analysis = sample_analysis();
        analysis.roadmap.truncate(3);
        let json = serde_json::to_string(&analysis).unwrap();
        let parsed = parse_analysis(&json).unwrap();
        assert_eq!(parsed.roadmap.len(), 3);
        assert_eq!(check_expectations(&parsed).len(), 1);
    }

    #[test]
    fn test_readiness_below_baseline_is_noted() {
        let mut analysis = sample_analysis();
        analysis.readiness_score = 3.0;
        assert!(validate_analysis(&analysis).is_empty());
        let notes = check_expectations(&analysis);
        assert!(notes.iter().any(|n| n.contains("below baselineScore")));
    }

    #[test]
    fn test_sample_meets_every_expectation() {
        assert!(check_expectations(&sample_analysis()).is_empty());
    }

    #[test]
    fn test_optional_arrays_may_be_absent() {
        let mut value = sample_value();
        value.as_object_mut().unwrap().remove("featuredProjects");
        for step in value["roadmap"].as_array_mut().unwrap() {
            let step = step.as_object_mut().unwrap();
            step.remove("resources");
            step.remove("suggestedCourses");
        }
        let parsed = parse_analysis(&value.to_string()).unwrap();
        assert!(parsed.featured_projects.is_empty());
        assert!(parsed.roadmap[0].suggested_courses.is_empty());
    }

    #[test]
    fn test_schema_lists_required_fields() {
        let schema = analysis_json_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required.len(), 6);
        assert!(required.contains(&"baselineScore"));
        let step_required = &schema["properties"]["roadmap"]["items"]["required"];
        assert_eq!(
            step_required,
            &json!(["week", "topic", "description", "tasks"])
        );
    }
}
