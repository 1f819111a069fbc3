use std::fmt;

use serde::{Deserialize, Serialize};

/// The professional domain a user is targeting.
/// Serialized as the human-readable label the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "Healthcare Informatics")]
    Healthcare,
    #[serde(rename = "Agricultural Technology")]
    Agriculture,
    #[serde(rename = "Urban & Smart City Systems")]
    SmartCity,
}

impl Sector {
    pub const ALL: [Sector; 3] = [Sector::Healthcare, Sector::Agriculture, Sector::SmartCity];

    pub fn label(&self) -> &'static str {
        match self {
            Sector::Healthcare => "Healthcare Informatics",
            Sector::Agriculture => "Agricultural Technology",
            Sector::SmartCity => "Urban & Smart City Systems",
        }
    }

    /// Starter skills offered as quick picks on the assessment form.
    pub fn suggested_skills(&self) -> &'static [&'static str] {
        match self {
            Sector::Healthcare => &[
                "Python",
                "Data Analysis",
                "HL7/FHIR",
                "Medical Ethics",
                "Machine Learning",
                "SQL",
            ],
            Sector::Agriculture => &[
                "IoT",
                "Remote Sensing",
                "GIS",
                "Python",
                "Sustainable Farming",
                "Drone Operation",
            ],
            Sector::SmartCity => &[
                "Urban Planning",
                "Data Visualization",
                "AutoCAD",
                "Network Security",
                "Public Policy",
                "BIM",
            ],
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

/// A submitted skills/goal assessment. Never mutated after submission:
/// resubmitting replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub goal: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certificates: Vec<String>,
    pub sector: Sector,
    pub study_hours_per_day: f64,
    pub level: SkillLevel,
}

impl UserProfile {
    /// Checks the fields the roadmap prompt depends on.
    /// Returns a user-facing message for the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be empty".to_string());
        }
        if self.goal.trim().is_empty() {
            return Err("goal cannot be empty".to_string());
        }
        if !self.study_hours_per_day.is_finite() || self.study_hours_per_day <= 0.0 {
            return Err("studyHoursPerDay must be a positive number".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::ava;

    #[test]
    fn test_sector_serializes_as_label() {
        let json = serde_json::to_string(&Sector::SmartCity).unwrap();
        assert_eq!(json, r#""Urban & Smart City Systems""#);
        let back: Sector = serde_json::from_str(r#""Agricultural Technology""#).unwrap();
        assert_eq!(back, Sector::Agriculture);
    }

    #[test]
    fn test_profile_uses_camel_case_fields() {
        let value = serde_json::to_value(ava()).unwrap();
        assert_eq!(value["studyHoursPerDay"], 2.0);
        assert_eq!(value["sector"], "Healthcare Informatics");
        assert_eq!(value["level"], "Beginner");
    }

    #[test]
    fn test_profile_missing_lists_default_to_empty() {
        let json = r#"{
            "name": "Kai",
            "goal": "Drone mapping specialist",
            "sector": "Agricultural Technology",
            "studyHoursPerDay": 1.5,
            "level": "Intermediate"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.skills.is_empty());
        assert!(profile.certificates.is_empty());
    }

    #[test]
    fn test_validate_accepts_complete_profile() {
        assert!(ava().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_goal() {
        let mut p = ava();
        p.goal = "   ".to_string();
        assert!(p.validate().unwrap_err().contains("goal"));
    }

    #[test]
    fn test_validate_rejects_non_positive_hours() {
        let mut p = ava();
        p.study_hours_per_day = 0.0;
        assert!(p.validate().is_err());
        p.study_hours_per_day = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_every_sector_has_suggestions() {
        for sector in Sector::ALL {
            assert_eq!(sector.suggested_skills().len(), 6);
        }
    }
}
