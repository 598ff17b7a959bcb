/// Database connections and table management for both stores
pub mod database;

/// Seed data and zip-code gazetteer loading from TOML
pub mod seed;

/// Application settings from environment variables
pub mod settings;
