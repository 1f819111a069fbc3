use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::analysis::SkillGapAnalysis;
use crate::models::profile::UserProfile;

/// A stored user record, keyed by email in the account store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub email: String,
    /// Salted digest produced by `accounts::credentials`.
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<SkillGapAnalysis>,
    /// Bumped on every write. Guards read-modify-write cycles that span a
    /// slow operation (roadmap generation) or another process.
    #[serde(default)]
    pub revision: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserAccount {
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            email,
            password_hash,
            profile: None,
            analysis: None,
            revision: 0,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub(crate) fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Some(Utc::now());
    }
}
