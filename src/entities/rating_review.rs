//! Rating/review document attached to a restaurant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rating and review document model; append-only
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rating_reviews")]
pub struct Model {
    /// Generated identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Reviewed restaurant
    pub restaurant_id: i64,
    pub user_id: i64,
    /// Between 1 and 5 inclusive
    pub rating: i32,
    /// Review text
    pub review: String,
    /// When the review was written
    pub created_at: DateTimeUtc,
}

/// No relations; documents stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
