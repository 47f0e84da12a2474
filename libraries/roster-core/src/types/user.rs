//! User types and field validation

use crate::error::{Result, RosterError};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Store-assigned user identifier
pub type UserId = i64;

/// Minimum number of characters in a user name
pub const NAME_MIN_CHARS: usize = 5;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Lowercase only: uppercase addresses are rejected.
        Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Check that a name is present and at least [`NAME_MIN_CHARS`] characters long
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().count() < NAME_MIN_CHARS {
        return Err(RosterError::InvalidName);
    }
    Ok(())
}

/// Check that an email matches `local-part@domain.tld`
pub fn validate_email(email: &str) -> Result<()> {
    if !email_regex().is_match(email) {
        return Err(RosterError::InvalidEmail);
    }
    Ok(())
}

/// A user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Positive, assigned by the store on insert
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Lowercase email address
    pub email: String,
    /// Insert time (UTC)
    pub created_at: DateTime<Utc>,
    /// Last write time (UTC), never before `created_at`
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Construct a validated user with both timestamps set to now.
    ///
    /// Persisted timestamps are owned by the storage gateway; the ones set
    /// here only matter until the row is written.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        if id <= 0 {
            return Err(RosterError::InvalidId);
        }

        let candidate = NewUser::new(name, email)?;
        let now = Utc::now();

        Ok(Self {
            id,
            name: candidate.name,
            email: candidate.email,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite the mutable fields. `id` and `created_at` never change.
    pub fn apply(&mut self, changes: NewUser) {
        self.name = changes.name;
        self.email = changes.email;
    }
}

/// Validated name and email for a user that has no row yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    /// Validate name and email
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let email = email.into();

        validate_name(&name)?;
        validate_email(&email)?;

        Ok(Self { name, email })
    }

    /// Validated name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated email
    pub fn email(&self) -> &str {
        &self.email
    }
}
