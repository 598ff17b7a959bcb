//! Restaurant entity - the canonical restaurant listing in the relational store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Restaurant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurants")]
pub struct Model {
    /// Restaurant identifier, shared with the document store copy
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Cuisine category (e.g. "Pizza", "Thai")
    pub category: String,
    /// Price band such as "$" or "$$"
    pub price_range: String,
    /// Street address for display
    pub full_address: String,
    /// Zip code of the street address
    pub zip_code: String,
    /// Latitude in degrees
    #[sea_orm(column_type = "Double")]
    pub lat: f64,
    /// Longitude in degrees
    #[sea_orm(column_type = "Double")]
    pub lng: f64,
    /// Average rating score
    #[sea_orm(column_type = "Double")]
    pub score: f64,
    /// Number of ratings behind `score`
    pub rating_count: i64,
}

/// Defines relationships between Restaurant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One restaurant receives many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
