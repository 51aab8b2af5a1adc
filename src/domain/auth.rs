//! Local demo accounts.
//!
//! Credentials never leave the machine. Passwords are stored as an unsalted
//! SHA-256 hex digest and compared locally; this is a convenience gate, not
//! a security boundary.

use crate::domain::errors::AuthError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

pub const MIN_PASSWORD_LEN: usize = 8;

/// The logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Session {
    pub fn for_user(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            email: format!("{}@local", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub pw_hash: String,
    pub created_at: DateTime<Utc>,
}

pub type UserMap = BTreeMap<String, UserRecord>;

pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Validate a signup form against the existing users and build the record
/// to store. Checks run in a fixed order and the first failure wins.
pub fn register(
    users: &UserMap,
    username: &str,
    password: &str,
    confirm: &str,
    now: DateTime<Utc>,
) -> Result<(String, UserRecord), AuthError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if password != confirm {
        return Err(AuthError::PasswordMismatch);
    }
    if users.contains_key(username) {
        return Err(AuthError::DuplicateUser {
            username: username.to_string(),
        });
    }

    Ok((
        username.to_string(),
        UserRecord {
            pw_hash: hash_password(password),
            created_at: now,
        },
    ))
}

/// Check a login attempt and return the session to open.
pub fn authenticate(users: &UserMap, username: &str, password: &str) -> Result<Session, AuthError> {
    let username = username.trim();
    let user = users.get(username).ok_or_else(|| AuthError::UnknownUser {
        username: username.to_string(),
    })?;

    if hash_password(password) != user.pw_hash {
        return Err(AuthError::WrongPassword);
    }

    Ok(Session::for_user(username))
}
