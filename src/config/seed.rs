//! Seed data loading from a TOML file.
//!
//! The seed file carries the static zip-code gazetteer and the initial
//! restaurant catalog with its menus. The gazetteer is loaded into memory on
//! every start; the catalog is written to each store only when it holds no
//! restaurants yet.

use crate::config::database::Stores;
use crate::core::geo::Gazetteer;
use crate::entities::{Restaurant, RestaurantLocation, menu_item, restaurant, restaurant_location};
use crate::errors::{Error, Result};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};

/// Contents of the seed file
#[derive(Debug, Deserialize, Default)]
pub struct SeedData {
    /// Zip code gazetteer entries
    #[serde(default)]
    pub zip_codes: Vec<ZipCodeSeed>,
    /// Restaurants written to both stores
    #[serde(default)]
    pub restaurants: Vec<RestaurantSeed>,
    /// Menu items written to the document store
    #[serde(default)]
    pub menu_items: Vec<MenuItemSeed>,
}

/// One gazetteer entry
#[derive(Debug, Deserialize, Clone)]
pub struct ZipCodeSeed {
    /// Five digit zip code
    pub zip: String,
    /// Latitude of the zip code centre
    pub lat: f64,
    /// Longitude of the zip code centre
    pub lng: f64,
}

/// One restaurant
#[derive(Debug, Deserialize, Clone)]
pub struct RestaurantSeed {
    /// Shared identifier in both stores
    pub id: i64,
    /// Display name
    pub name: String,
    /// Cuisine, e.g. `"Pizza"`
    pub category: String,
    /// Price band, e.g. `"$$"`
    pub price_range: String,
    /// Street address for display
    pub full_address: String,
    /// Zip code of the address
    pub zip_code: String,
    /// Latitude of the restaurant
    pub lat: f64,
    /// Longitude of the restaurant
    pub lng: f64,
    /// Average rating, zero when unrated
    #[serde(default)]
    pub score: f64,
    /// Number of ratings behind `score`
    #[serde(default)]
    pub rating_count: i64,
}

/// One menu item
#[derive(Debug, Deserialize, Clone)]
pub struct MenuItemSeed {
    /// Restaurant the item belongs to
    pub restaurant_id: i64,
    /// Menu section, e.g. `"Sides"`
    pub category: String,
    /// Item name as shown on the menu
    pub name: String,
    /// Optional description, empty when absent
    #[serde(default)]
    pub description: String,
    /// Display price, e.g. `"16.99 USD"`
    pub price: String,
}

impl SeedData {
    /// Builds the in-memory gazetteer from the zip code entries.
    #[must_use]
    pub fn gazetteer(&self) -> Gazetteer {
        self.zip_codes
            .iter()
            .map(|z| (z.zip.clone(), (z.lat, z.lng)))
            .collect()
    }
}

/// Loads seed data from a TOML file
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or is not valid seed TOML.
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SeedData> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load seed data from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read seed file {}: {e}", path_ref.display()),
    })?;
    parse_seed(&contents)
}

/// Parses seed data from TOML text.
pub fn parse_seed(contents: &str) -> Result<SeedData> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed TOML: {e}"),
    })
}

/// Writes the restaurant catalog and menus into each store that holds no restaurants yet.
///
/// Each store is checked on its own, so a start that failed half-way is
/// completed on the next one. Returns the number of restaurants written to
/// the store that needed them (zero when both were already seeded).
#[instrument(skip(stores, seed))]
pub async fn seed_catalog(stores: &Stores, seed: &SeedData) -> Result<usize> {
    if seed.restaurants.is_empty() {
        return Ok(0);
    }

    let relational = seed_relational(&stores.relational, seed).await?;
    let documents = seed_documents(&stores.documents, seed).await?;
    Ok(relational.max(documents))
}

async fn seed_relational(db: &DatabaseConnection, seed: &SeedData) -> Result<usize> {
    let existing = Restaurant::find().count(db).await?;
    if existing > 0 {
        info!("Relational store already holds {existing} restaurants, skipping seed");
        return Ok(0);
    }

    let txn = db.begin().await?;
    restaurant::Entity::insert_many(seed.restaurants.iter().map(|r| restaurant::ActiveModel {
        id: Set(r.id),
        name: Set(r.name.clone()),
        category: Set(r.category.clone()),
        price_range: Set(r.price_range.clone()),
        full_address: Set(r.full_address.clone()),
        zip_code: Set(r.zip_code.clone()),
        lat: Set(r.lat),
        lng: Set(r.lng),
        score: Set(r.score),
        rating_count: Set(r.rating_count),
    }))
    .exec_without_returning(&txn)
    .await?;
    txn.commit().await?;

    info!("Seeded {} restaurants", seed.restaurants.len());
    Ok(seed.restaurants.len())
}

async fn seed_documents(db: &DatabaseConnection, seed: &SeedData) -> Result<usize> {
    let existing = RestaurantLocation::find().count(db).await?;
    if existing > 0 {
        info!("Document store already holds {existing} restaurants, skipping seed");
        return Ok(0);
    }

    let txn = db.begin().await?;
    restaurant_location::Entity::insert_many(seed.restaurants.iter().map(|r| {
        restaurant_location::ActiveModel {
            id: Set(r.id),
            name: Set(r.name.clone()),
            category: Set(r.category.clone()),
            price_range: Set(r.price_range.clone()),
            full_address: Set(r.full_address.clone()),
            zip_code: Set(r.zip_code.clone()),
            lng: Set(r.lng),
            lat: Set(r.lat),
            score: Set(r.score),
            rating_count: Set(r.rating_count),
        }
    }))
    .exec_without_returning(&txn)
    .await?;

    if !seed.menu_items.is_empty() {
        menu_item::Entity::insert_many(seed.menu_items.iter().map(|m| menu_item::ActiveModel {
            restaurant_id: Set(m.restaurant_id),
            category: Set(m.category.clone()),
            name: Set(m.name.clone()),
            description: Set(m.description.clone()),
            price: Set(m.price.clone()),
            ..Default::default()
        }))
        .exec_without_returning(&txn)
        .await?;
    }
    txn.commit().await?;

    info!(
        "Seeded {} restaurant documents and {} menu items",
        seed.restaurants.len(),
        seed.menu_items.len()
    );
    Ok(seed.restaurants.len())
}
