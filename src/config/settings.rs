//! Application settings loaded from environment variables.
//!
//! `.env` is read first by the binary (via `dotenvy`), so every value here can
//! come from either the real environment or that file. Unset values fall back
//! to defaults suitable for local development.

use crate::errors::{Error, Result};
use std::{env, fmt::Display, str::FromStr};
use tracing::{debug, info};

const DEFAULT_PORT: &str = "5000";
const DEFAULT_DATABASE_URL: &str = "sqlite://data/food_ninja.sqlite?mode=rwc";
const DEFAULT_DOCUMENT_DATABASE_URL: &str = "sqlite://data/food_ninja_documents.sqlite?mode=rwc";
const DEFAULT_SEED_PATH: &str = "seed.toml";
const DEFAULT_BCRYPT_COST: &str = "10";

/// Runtime configuration for the API server
#[derive(Debug, Clone)]
pub struct Settings {
    /// TCP port to listen on
    pub port: u16,
    /// Connection URL of the relational store
    pub database_url: String,
    /// Connection URL of the document store
    pub document_database_url: String,
    /// TOML file with the gazetteer and catalog seed data
    pub seed_path: String,
    /// bcrypt work factor used at signup
    pub bcrypt_cost: u32,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through an arbitrary lookup, used by `from_env` and tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| {
                debug!("{key} not set, using default: {default}");
                default.to_string()
            })
        };

        let bcrypt_cost: u32 = parse(&get("BCRYPT_COST", DEFAULT_BCRYPT_COST), "BCRYPT_COST")?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(Error::Config {
                message: format!("BCRYPT_COST must be between 4 and 31, got {bcrypt_cost}"),
            });
        }

        let settings = Self {
            port: parse(&get("PORT", DEFAULT_PORT), "PORT")?,
            database_url: get("DATABASE_URL", DEFAULT_DATABASE_URL),
            document_database_url: get("DOCUMENT_DATABASE_URL", DEFAULT_DOCUMENT_DATABASE_URL),
            seed_path: get("SEED_PATH", DEFAULT_SEED_PATH),
            bcrypt_cost,
        };
        info!(port = settings.port, seed_path = %settings.seed_path, "Settings loaded");
        Ok(settings)
    }
}

fn parse<T>(value: &str, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|e| Error::Config {
        message: format!("Invalid {key} value {value:?}: {e}"),
    })
}
