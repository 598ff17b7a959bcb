//! Credential business logic - user registration and authentication.
//!
//! Passwords are hashed with bcrypt on a blocking thread so the async runtime
//! is never stalled by the deliberately slow hash. Unknown emails and wrong
//! passwords produce the same `Error::InvalidCredentials`.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, SqlErr, prelude::*};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Fields needed to register a user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Login email; trimmed and lower-cased before storage
    pub email: String,
    /// Plaintext password, only its hash is stored
    pub password: String,
    /// Contact phone, may be empty
    pub phone: String,
}

/// The request-scoped identity returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    /// Display name of the user
    pub name: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registers a new user and returns the generated user id.
///
/// Fails with `Error::DuplicateEmail` when the email is taken, including when a
/// concurrent signup wins the race and the unique index rejects this insert.
#[instrument(skip(db, new_user, bcrypt_cost), fields(email = %new_user.email))]
pub async fn register(db: &DatabaseConnection, new_user: NewUser, bcrypt_cost: u32) -> Result<i64> {
    let NewUser {
        name,
        email,
        password,
        phone,
    } = new_user;

    let email = normalize_email(&email);
    if name.trim().is_empty() || email.is_empty() || password.is_empty() {
        return Err(Error::validation("name, email and password are required"));
    }

    let existing = User::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(db)
        .await
        .map_err(Error::from_store)?;
    if existing.is_some() {
        return Err(Error::DuplicateEmail);
    }

    let password_hash = hash_password(password, bcrypt_cost).await?;

    let model = user::ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email),
        password_hash: Set(password_hash),
        phone: Set(phone.trim().to_string()),
        ..Default::default()
    };

    let inserted = model.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::DuplicateEmail,
        _ => Error::from_store(e),
    })?;

    info!("Registered user {}", inserted.id);
    Ok(inserted.id)
}

/// Verifies an email and password pair.
///
/// An unknown email still pays for one bcrypt round at `bcrypt_cost`, so both
/// failure cases take about as long as each other.
#[instrument(skip(db, email, password))]
pub async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    bcrypt_cost: u32,
) -> Result<AuthenticatedUser> {
    let email = normalize_email(email);
    let Some(found) = User::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(db)
        .await
        .map_err(Error::from_store)?
    else {
        if let Err(e) = hash_password(password.to_string(), bcrypt_cost).await {
            warn!("Dummy hash for unknown email failed: {e}");
        }
        warn!("Login attempt failed");
        return Err(Error::InvalidCredentials);
    };

    if !verify_password(password.to_string(), found.password_hash.clone()).await? {
        warn!("Login attempt failed");
        return Err(Error::InvalidCredentials);
    }

    Ok(AuthenticatedUser {
        user_id: found.id,
        name: found.name,
    })
}

async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?
        .map_err(Into::into)
}

async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?
        .map_err(Into::into)
}
