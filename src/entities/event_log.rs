//! Event log document - append-only record of user events such as logins.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event log document model; never updated after insert
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_logs")]
pub struct Model {
    /// Generated identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Event name, e.g. `"login"` or `"signup"`
    pub event_type: String,
    /// Acting user, absent for anonymous events
    pub user_id: Option<i64>,
    /// When the event was recorded
    pub timestamp: DateTimeUtc,
}

/// No relations; documents stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
