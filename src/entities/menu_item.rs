//! Menu item document - one dish offered by a restaurant.
//!
//! Lives in the document store. `restaurant_id` is a plain number with no
//! integrity check against the relational restaurant listing.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu item document model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    /// Generated identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Restaurant whose menu lists this item
    pub restaurant_id: i64,
    /// Menu section (e.g. "Sides")
    pub category: String,
    /// Item name as shown on the menu
    pub name: String,
    /// Free text, empty when absent
    pub description: String,
    /// Price as display text, e.g. `"16.99 USD"`
    pub price: String,
}

impl Model {
    /// Numeric value of the price text, taken from its first run of digits and dots.
    ///
    /// `"16.99 USD"` yields `Some(16.99)`; text without digits yields `None`.
    #[must_use]
    pub fn price_amount(&self) -> Option<f64> {
        parse_price(&self.price)
    }
}

/// Extracts the leading numeric part of a price string.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit() || c == '.')?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// No relations; documents stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
