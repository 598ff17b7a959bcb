//! Database configuration module for both backing stores.
//!
//! The relational store holds users, restaurants, orders and order lines; the
//! document store holds menus, restaurant search documents, reviews and event
//! logs. Both are reached through SeaORM connections and their tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs.

use crate::config::settings::Settings;
use crate::entities::{
    EventLog, MenuItem, Order, OrderLine, RatingReview, Restaurant, RestaurantLocation, User,
};
use crate::errors::{Error, Result};
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, sea_query::TableCreateStatement,
};
use tracing::{info, instrument};

/// The two independent stores every adapter works against.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Relational store: users, restaurants, orders, order lines
    pub relational: DatabaseConnection,
    /// Document store: menus, restaurant locations, reviews, logs
    pub documents: DatabaseConnection,
}

impl Stores {
    /// Wraps two already open connections.
    #[must_use]
    pub const fn new(relational: DatabaseConnection, documents: DatabaseConnection) -> Self {
        Self {
            relational,
            documents,
        }
    }

    /// Connects to both stores named in the settings and ensures their tables exist.
    #[instrument(skip(settings))]
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let relational = Database::connect(&settings.database_url)
            .await
            .map_err(Error::from_store)?;
        let documents = Database::connect(&settings.document_database_url)
            .await
            .map_err(Error::from_store)?;

        let stores = Self::new(relational, documents);
        stores.create_tables().await?;
        info!("Connected to relational and document stores");
        Ok(stores)
    }

    /// Creates all tables that do not exist yet, in dependency order.
    pub async fn create_tables(&self) -> Result<()> {
        create_relational_tables(&self.relational).await?;
        create_document_tables(&self.documents).await
    }

    /// Checks that both stores answer a trivial query.
    pub async fn ping(&self) -> Result<()> {
        Restaurant::find()
            .one(&self.relational)
            .await
            .map_err(Error::from_store)?;
        MenuItem::find()
            .one(&self.documents)
            .await
            .map_err(Error::from_store)?;
        Ok(())
    }
}

async fn execute_all(db: &DatabaseConnection, tables: Vec<TableCreateStatement>) -> Result<()> {
    let builder = db.get_database_backend();
    for mut table in tables {
        table.if_not_exists();
        db.execute(builder.build(&table)).await?;
    }
    Ok(())
}

/// Creates the relational tables. Orders follow users and restaurants, lines follow orders.
pub async fn create_relational_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());
    execute_all(
        db,
        vec![
            schema.create_table_from_entity(User),
            schema.create_table_from_entity(Restaurant),
            schema.create_table_from_entity(Order),
            schema.create_table_from_entity(OrderLine),
        ],
    )
    .await
}

/// Creates the document store tables.
pub async fn create_document_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());
    execute_all(
        db,
        vec![
            schema.create_table_from_entity(MenuItem),
            schema.create_table_from_entity(RestaurantLocation),
            schema.create_table_from_entity(RatingReview),
            schema.create_table_from_entity(EventLog),
        ],
    )
    .await
}
