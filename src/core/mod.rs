//! Core business logic - framework-agnostic adapters over the two stores.

/// Restaurant listing, zip-radius search, menus and reviews
pub mod catalog;
/// User registration and authentication
pub mod credentials;
/// Append-only event logging
pub mod events;
/// Zip gazetteer and spherical distance helpers
pub mod geo;
/// Two-phase order placement
pub mod orders;
/// Rating/review writes
pub mod reviews;
