//! Shared test fixtures.

use crate::models::analysis::{Course, Project, RoadmapStep, SkillGapAnalysis};
use crate::models::profile::{Sector, SkillLevel, UserProfile};

pub fn ava() -> UserProfile {
    UserProfile {
        name: "Ava".to_string(),
        goal: "Become a clinical data analyst".to_string(),
        skills: vec!["SQL".to_string()],
        certificates: vec![],
        sector: Sector::Healthcare,
        study_hours_per_day: 2.0,
        level: SkillLevel::Beginner,
    }
}

fn step(week: u32, topic: &str) -> RoadmapStep {
    RoadmapStep {
        week,
        topic: topic.to_string(),
        description: format!("Week {week}: {topic}"),
        resources: vec![format!("{topic} reading list")],
        tasks: vec![format!("Complete a {topic} exercise")],
        suggested_courses: vec![Course {
            title: format!("{topic} Fundamentals"),
            platform: "Coursera".to_string(),
            url: "https://www.coursera.org".to_string(),
            thumbnail: String::new(),
        }],
    }
}

/// A four-week analysis with readiness 30 and baseline 8.
pub fn sample_analysis() -> SkillGapAnalysis {
    SkillGapAnalysis {
        missing_skills: vec![
            "Python".to_string(),
            "HL7/FHIR".to_string(),
            "Data Visualization".to_string(),
        ],
        recommendation: "Build on SQL with Python and clinical data standards.".to_string(),
        roadmap: vec![
            step(1, "Python for Data"),
            step(2, "Clinical Data Standards"),
            step(3, "Visualization"),
            step(4, "Capstone Analysis"),
        ],
        project_idea: "Readmission risk dashboard from a public EHR dataset".to_string(),
        featured_projects: vec![Project {
            title: "Readmission Dashboard".to_string(),
            difficulty: "Intermediate".to_string(),
            description: "Analyze 30-day readmissions with SQL and Python.".to_string(),
        }],
        readiness_score: 30.0,
        baseline_score: 8.0,
    }
}

pub fn sample_analysis_json() -> String {
    serde_json::to_string(&sample_analysis()).expect("fixture serializes")
}
