//! Restaurant location document - the search-oriented copy of a restaurant.
//!
//! The geo-point is kept as (longitude, latitude), the order geo engines use.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Restaurant search document model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurant_locations")]
pub struct Model {
    /// Same identifier as the relational restaurant row
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Cuisine category
    pub category: String,
    /// Price band such as "$$"
    pub price_range: String,
    /// Street address for display
    pub full_address: String,
    /// Zip code of the street address, not used for search
    pub zip_code: String,
    /// Geo-point longitude
    #[sea_orm(column_type = "Double")]
    pub lng: f64,
    /// Geo-point latitude
    #[sea_orm(column_type = "Double")]
    pub lat: f64,
    /// Average rating score
    #[sea_orm(column_type = "Double")]
    pub score: f64,
    /// Number of ratings behind `score`
    pub rating_count: i64,
}

impl Model {
    /// Geo-point in (longitude, latitude) order.
    #[must_use]
    pub const fn geo_point(&self) -> (f64, f64) {
        (self.lng, self.lat)
    }
}

/// No relations; documents stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
