//! Account business logic - registration and authentication.
//!
//! The identity store is deliberately thin: usernames are unique, passwords
//! are stored as SHA-256 hex digests, and the rest of the engine only ever
//! sees the opaque `user.id`. Credential policy (strength, rotation, real
//! KDFs) is out of scope for the engine.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a password.
#[must_use]
pub fn hash_credential(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Registers a new account, rejecting empty or duplicate usernames.
///
/// # Errors
/// Returns `Error::Config` for an empty/whitespace username and
/// `Error::UsernameTaken` when the name is already registered.
pub async fn register(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::Config {
            message: "Username cannot be empty".to_string(),
        });
    }

    let existing = User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::UsernameTaken {
            username: username.to_string(),
        });
    }

    let account = user::ActiveModel {
        username: Set(username.to_string()),
        credential: Set(hash_credential(password)),
        ..Default::default()
    };

    let result = account.insert(db).await?;
    Ok(result)
}

/// Authenticates a username/password pair.
///
/// # Errors
/// Returns `Error::InvalidCredentials` for an unknown username or a digest
/// mismatch; the two cases are indistinguishable to the caller.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model> {
    let account = User::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(db)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if account.credential != hash_credential(password) {
        return Err(Error::InvalidCredentials);
    }

    Ok(account)
}
