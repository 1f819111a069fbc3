//! Profile Session Reconciliation.
//!
//! Joins the account store and the roadmap generator:
//! - works out which view a session should see,
//! - runs a profile submission through generation and persists the outcome,
//! - resets an assessment.
//!
//! Submissions that have not produced a stored analysis (in flight, or
//! failed) are kept in memory per account. A failed generation never
//! touches what is already persisted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::accounts::{AccountError, AccountStore, Session};
use crate::models::analysis::SkillGapAnalysis;
use crate::models::profile::UserProfile;
use crate::roadmap::export::render_roadmap_to_md;
use crate::roadmap::{GenerationFailure, RoadmapGenerator};

pub mod handlers;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("A roadmap is already being generated for this account")]
    GenerationInProgress,

    #[error(transparent)]
    Generation(#[from] GenerationFailure),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("Generation task failed: {0}")]
    Task(String),
}

/// The screen a session should be on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Auth,
    CollectProfile {
        email: String,
    },
    Loading {
        email: String,
        profile: UserProfile,
    },
    Dashboard {
        email: String,
        profile: UserProfile,
        analysis: Option<SkillGapAnalysis>,
    },
}

/// A submitted profile that has no stored analysis yet.
#[derive(Debug, Clone)]
struct Pending {
    profile: UserProfile,
    generating: bool,
}

type PendingMap = HashMap<String, Pending>;

#[derive(Clone)]
pub struct Planner {
    accounts: AccountStore,
    generator: RoadmapGenerator,
    pending: Arc<Mutex<PendingMap>>,
}

impl Planner {
    pub fn new(accounts: AccountStore, generator: RoadmapGenerator) -> Self {
        Self {
            accounts,
            generator,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Resolves the current session pointer into a view.
    pub fn current_view(&self) -> Result<View, PlannerError> {
        let Some((session, account)) = self.accounts.current_account()? else {
            return Ok(View::Auth);
        };
        let email = session.email().to_string();

        if let Some(pending) = self.lock_pending().get(&email) {
            return Ok(if pending.generating {
                View::Loading {
                    email,
                    profile: pending.profile.clone(),
                }
            } else {
                View::Dashboard {
                    email,
                    profile: pending.profile.clone(),
                    analysis: None,
                }
            });
        }

        Ok(match account.profile {
            Some(profile) => View::Dashboard {
                email,
                profile,
                analysis: account.analysis,
            },
            None => View::CollectProfile { email },
        })
    }

    /// Generates a roadmap for `profile` and stores both on success.
    ///
    /// Only one generation per account runs at a time. The work runs on its
    /// own task, so it completes and persists even if the caller goes away.
    pub async fn submit_profile(
        &self,
        session: &Session,
        profile: UserProfile,
    ) -> Result<SkillGapAnalysis, PlannerError> {
        profile.validate().map_err(PlannerError::InvalidProfile)?;

        let email = session.email().to_string();
        let account = self
            .accounts
            .account(&email)?
            .ok_or_else(|| AccountError::NotFound(email.clone()))?;

        let guard = self.begin_generation(&email, &profile)?;
        let planner = self.clone();
        let revision = account.revision;

        let job = tokio::spawn(async move {
            let outcome = planner.run_generation(&guard.email, revision, profile).await;
            drop(guard);
            outcome
        });

        job.await.map_err(|e| {
            error!("Roadmap generation task for {email} did not complete: {e}");
            PlannerError::Task(e.to_string())
        })?
    }

    /// Clears the stored profile and analysis for the account. Not allowed
    /// while a generation is running.
    pub fn reset(&self, session: &Session) -> Result<(), PlannerError> {
        let email = session.email();
        {
            let mut pending = self.lock_pending();
            if is_generating(&pending, email) {
                return Err(PlannerError::GenerationInProgress);
            }
            pending.remove(email);
        }
        self.accounts.save_profile_and_analysis(email, None, None)?;
        info!("Reset assessment for {email}");
        Ok(())
    }

    /// Drops unsaved state for a session that is logging out. A running
    /// generation is left to finish.
    pub fn forget(&self, session: &Session) {
        let mut pending = self.lock_pending();
        if pending.get(session.email()).is_some_and(|p| !p.generating) {
            pending.remove(session.email());
        }
    }

    /// Moves the account to `new_email`, optionally replacing its password,
    /// and carries unsaved state along. Not allowed while a generation is
    /// running, since that job writes under the old email.
    pub fn rename(
        &self,
        session: &Session,
        new_email: &str,
        new_password: Option<&str>,
    ) -> Result<Session, PlannerError> {
        let old_email = session.email();
        let mut pending = self.lock_pending();
        if is_generating(&pending, old_email) {
            warn!("Refused rename of {old_email} while a roadmap is being generated");
            return Err(PlannerError::GenerationInProgress);
        }
        let renamed = self
            .accounts
            .rename_and_repassword(old_email, new_email, new_password)?;
        if let Some(entry) = pending.remove(old_email) {
            pending.insert(renamed.email().to_string(), entry);
        }
        Ok(renamed)
    }

    /// Markdown export of the stored roadmap, if there is one. A submission
    /// that has not been stored hides the old roadmap, as the dashboard does.
    pub fn export_markdown(&self, session: &Session) -> Result<Option<String>, PlannerError> {
        if self.lock_pending().contains_key(session.email()) {
            return Ok(None);
        }
        let account = self
            .accounts
            .account(session.email())?
            .ok_or_else(|| AccountError::NotFound(session.email().to_string()))?;
        Ok(match (account.profile, account.analysis) {
            (Some(profile), Some(analysis)) => Some(render_roadmap_to_md(&profile, &analysis)),
            _ => None,
        })
    }

    fn begin_generation(
        &self,
        email: &str,
        profile: &UserProfile,
    ) -> Result<InFlight, PlannerError> {
        let mut pending = self.lock_pending();
        if is_generating(&pending, email) {
            warn!("Refused second roadmap submission for {email} while one is in flight");
            return Err(PlannerError::GenerationInProgress);
        }
        pending.insert(
            email.to_string(),
            Pending {
                profile: profile.clone(),
                generating: true,
            },
        );
        Ok(InFlight {
            pending: self.pending.clone(),
            email: email.to_string(),
        })
    }

    async fn run_generation(
        &self,
        email: &str,
        revision: u64,
        profile: UserProfile,
    ) -> Result<SkillGapAnalysis, PlannerError> {
        let analysis = match self.generator.generate(&profile).await {
            Ok(analysis) => analysis,
            Err(failure) => {
                warn!("Roadmap generation failed for {email}: {failure}");
                return Err(failure.into());
            }
        };

        self.accounts.save_if_unchanged(
            email,
            revision,
            Some(profile),
            Some(analysis.clone()),
        )?;
        self.lock_pending().remove(email);

        info!("Stored roadmap for {email}");
        Ok(analysis)
    }

    fn lock_pending(&self) -> MutexGuard<'_, PendingMap> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn is_generating(pending: &PendingMap, email: &str) -> bool {
    pending.get(email).is_some_and(|p| p.generating)
}

/// Marks an account's generation as finished when dropped, whatever the
/// outcome.
struct InFlight {
    pending: Arc<Mutex<PendingMap>>,
    email: String,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = pending.get_mut(&self.email) {
            entry.generating = false;
        }
    }
}
