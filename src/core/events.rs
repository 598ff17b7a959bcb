//! Event log writer - append-only user event documents.
//!
//! Logging is a side channel: [`record_event_detached`] never blocks or fails
//! the request that triggered it.

use crate::{
    entities::event_log,
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::{debug, warn};

/// Appends one event log entry and returns it.
///
/// The entry is stored even when `event_type` is blank.
pub async fn record_event(
    db: &DatabaseConnection,
    event_type: &str,
    user_id: Option<i64>,
) -> Result<event_log::Model> {
    let event_type = event_type.trim();
    let entry = event_log::ActiveModel {
        event_type: Set(event_type.to_string()),
        user_id: Set(user_id),
        timestamp: Set(Utc::now()),
        ..Default::default()
    };
    entry.insert(db).await.map_err(Error::from_store)
}

/// Records an event on a background task; failures are only logged.
pub fn record_event_detached(db: DatabaseConnection, event_type: &'static str, user_id: Option<i64>) {
    tokio::spawn(async move {
        match record_event(&db, event_type, user_id).await {
            Ok(entry) => debug!("Recorded {event_type} event {}", entry.id),
            Err(e) => warn!("Failed to record {event_type} event: {e}"),
        }
    });
}
