use serde::{Deserialize, Serialize};

/// A video course suggested for one roadmap week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub platform: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnail: String,
}

/// A portfolio project idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub description: String,
}

/// One week of the learning roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub week: u32,
    pub topic: String,
    pub description: String,
    #[serde(default)]
    pub resources: Vec<String>,
    pub tasks: Vec<String>,
    #[serde(default)]
    pub suggested_courses: Vec<Course>,
}

/// The generated skill-gap report and roadmap for one submitted profile.
///
/// Scores are taken as produced: readiness is expected to be at least the
/// baseline, but nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapAnalysis {
    pub missing_skills: Vec<String>,
    pub recommendation: String,
    pub roadmap: Vec<RoadmapStep>,
    pub project_idea: String,
    #[serde(default)]
    pub featured_projects: Vec<Project>,
    pub readiness_score: f64,
    pub baseline_score: f64,
}

impl SkillGapAnalysis {
    /// Readiness points gained over the unprepared baseline.
    pub fn advantage_over_baseline(&self) -> f64 {
        self.readiness_score - self.baseline_score
    }
}
