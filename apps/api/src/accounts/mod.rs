//! Account Store: email-keyed user records plus the current-session pointer.
//!
//! The full user map lives as one JSON blob under `USERS_KEY`; the session
//! pointer is a bare email string under `SESSION_KEY`. Callers never read the
//! pointer directly: they get an explicit `Session` back from signup/login or
//! from `current_account()` and pass it along.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::account::UserAccount;
use crate::models::analysis::SkillGapAnalysis;
use crate::models::profile::UserProfile;
use crate::storage::{KeyValueStore, StoreError};

pub mod credentials;
pub mod handlers;

pub const USERS_KEY: &str = "planify_users_db";
pub const SESSION_KEY: &str = "planify_current_session";

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("An account already exists for {0}")]
    AlreadyExists(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No account found for {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Account {email} changed concurrently (expected revision {expected}, found {found})")]
    Conflict {
        email: String,
        expected: u64,
        found: u64,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// An authenticated session, identified by the account email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    email: String,
}

impl Session {
    pub fn email(&self) -> &str {
        &self.email
    }
}

type Users = BTreeMap<String, UserAccount>;

/// Email → account map over a key-value substrate.
///
/// All mutations run under one lock, so within a process every
/// read-modify-write of the user blob is serialized.
#[derive(Clone)]
pub struct AccountStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl AccountStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Inserts a new account and opens a session for it.
    pub fn create_account(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        let email = normalize_email(email)?;
        require_password(password)?;

        let _guard = self.lock();
        let mut users = self.load_users()?;
        if users.contains_key(&email) {
            return Err(AccountError::AlreadyExists(email));
        }

        let account = UserAccount::new(email.clone(), credentials::hash_password(password));
        users.insert(email.clone(), account);
        self.store_users(&users)?;
        self.kv.set(SESSION_KEY, &email)?;

        info!("Created account {email}");
        Ok(Session { email })
    }

    /// Verifies credentials and opens a session. A failed attempt leaves the
    /// existing session pointer untouched.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        let email = normalize_email(email)?;

        let _guard = self.lock();
        let users = self.load_users()?;
        let account = users
            .get(&email)
            .ok_or_else(|| AccountError::NotFound(email.clone()))?;

        if !credentials::verify_password(password, &account.password_hash) {
            warn!("Rejected login for {email}: credential mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        self.kv.set(SESSION_KEY, &email)?;
        info!("Opened session for {email}");
        Ok(Session { email })
    }

    /// Resolves the session pointer. A pointer to a missing account reads as
    /// logged out.
    pub fn current_account(&self) -> Result<Option<(Session, UserAccount)>, AccountError> {
        let Some(email) = self.kv.get(SESSION_KEY)? else {
            return Ok(None);
        };
        match self.load_users()?.remove(&email) {
            Some(account) => Ok(Some((Session { email }, account))),
            None => {
                warn!("Session pointer references missing account {email}");
                Ok(None)
            }
        }
    }

    pub fn account(&self, email: &str) -> Result<Option<UserAccount>, AccountError> {
        Ok(self.load_users()?.remove(email))
    }

    /// Moves an account to a new email, optionally replacing its password,
    /// and points the session at the new key.
    ///
    /// Renaming onto a different existing account fails with `AlreadyExists`
    /// and changes nothing.
    pub fn rename_and_repassword(
        &self,
        old_email: &str,
        new_email: &str,
        new_password: Option<&str>,
    ) -> Result<Session, AccountError> {
        let new_email = normalize_email(new_email)?;
        let new_password = new_password.filter(|p| !p.is_empty());

        let _guard = self.lock();
        let mut users = self.load_users()?;
        if !users.contains_key(old_email) {
            return Err(AccountError::NotFound(old_email.to_string()));
        }
        if new_email != old_email && users.contains_key(&new_email) {
            return Err(AccountError::AlreadyExists(new_email));
        }

        let mut account = users
            .remove(old_email)
            .ok_or_else(|| AccountError::NotFound(old_email.to_string()))?;
        account.email = new_email.clone();
        if let Some(password) = new_password {
            account.password_hash = credentials::hash_password(password);
        }
        account.touch();
        users.insert(new_email.clone(), account);

        self.store_users(&users)?;
        self.kv.set(SESSION_KEY, &new_email)?;

        info!(
            "Renamed account {old_email} -> {new_email} (password changed: {})",
            new_password.is_some()
        );
        Ok(Session { email: new_email })
    }

    /// Logs out. The account record stays.
    pub fn detach_session(&self) -> Result<(), AccountError> {
        self.kv.remove(SESSION_KEY)?;
        Ok(())
    }

    /// Overwrites the stored profile and analysis. Does nothing if the
    /// account does not exist.
    pub fn save_profile_and_analysis(
        &self,
        email: &str,
        profile: Option<UserProfile>,
        analysis: Option<SkillGapAnalysis>,
    ) -> Result<(), AccountError> {
        let _guard = self.lock();
        let mut users = self.load_users()?;
        let Some(account) = users.get_mut(email) else {
            return Ok(());
        };
        account.profile = profile;
        account.analysis = analysis;
        account.touch();
        self.store_users(&users)
    }

    /// Like `save_profile_and_analysis`, but only if the account is still at
    /// `expected_revision`. Returns the new revision.
    pub fn save_if_unchanged(
        &self,
        email: &str,
        expected_revision: u64,
        profile: Option<UserProfile>,
        analysis: Option<SkillGapAnalysis>,
    ) -> Result<u64, AccountError> {
        let _guard = self.lock();
        let mut users = self.load_users()?;
        let account = users
            .get_mut(email)
            .ok_or_else(|| AccountError::NotFound(email.to_string()))?;
        if account.revision != expected_revision {
            return Err(AccountError::Conflict {
                email: email.to_string(),
                expected: expected_revision,
                found: account.revision,
            });
        }
        account.profile = profile;
        account.analysis = analysis;
        account.touch();
        let revision = account.revision;
        self.store_users(&users)?;
        Ok(revision)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_users(&self) -> Result<Users, AccountError> {
        match self.kv.get(USERS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw).map_err(StoreError::from)?),
            None => Ok(Users::new()),
        }
    }

    fn store_users(&self, users: &Users) -> Result<(), AccountError> {
        let raw = serde_json::to_string(users).map_err(StoreError::from)?;
        self.kv.set(USERS_KEY, &raw)?;
        Ok(())
    }
}

fn normalize_email(email: &str) -> Result<String, AccountError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AccountError::Validation("email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(AccountError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(email.to_string())
}

fn require_password(password: &str) -> Result<(), AccountError> {
    if password.is_empty() {
        return Err(AccountError::Validation("password is required".to_string()));
    }
    Ok(())
}
