//! Order line entity - one item/quantity/price entry of an order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_lines")]
pub struct Model {
    /// Generated identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Parent order header
    pub order_id: i64,
    /// Menu item name
    pub item_name: String,
    /// Always at least 1
    pub quantity: i32,
    /// Unit price
    #[sea_orm(column_type = "Double")]
    pub price: f64,
}

/// Defines relationships between OrderLine and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to exactly one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
