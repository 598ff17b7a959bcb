//! Shared test utilities.
//!
//! Helpers for setting up in-memory stores and creating test users, orders
//! and search documents with sensible defaults.

use crate::{
    config::{
        database::Stores,
        seed::{parse_seed, seed_catalog},
    },
    core::{
        credentials::{self, NewUser},
        geo::Gazetteer,
        orders::{NewOrder, NewOrderLine},
    },
    entities::restaurant_location,
    errors::Result,
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set};

/// Lowest cost bcrypt accepts, keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

/// Small catalog: one restaurant in Manhattan, one in Boston.
pub const SAMPLE_SEED: &str = r#"
[[zip_codes]]
zip = "10001"
lat = 40.7506
lng = -73.9972

[[zip_codes]]
zip = "90210"
lat = 34.0901
lng = -118.4065

[[restaurants]]
id = 1
name = "Slice Palace"
category = "Pizza"
price_range = "$"
full_address = "350 5th Ave, New York, NY 10118"
zip_code = "10118"
lat = 40.7484
lng = -73.9857
score = 4.5
rating_count = 120

[[restaurants]]
id = 2
name = "Harbor Chowder"
category = "Seafood"
price_range = "$$"
full_address = "1 Long Wharf, Boston, MA 02110"
zip_code = "02110"
lat = 42.3601
lng = -71.0509

[[menu_items]]
restaurant_id = 1
category = "Pizza"
name = "Margherita"
description = "Tomato, mozzarella, basil"
price = "16.99 USD"

[[menu_items]]
restaurant_id = 1
category = "Sides"
name = "Garlic Knots"
price = "5.50 USD"

[[menu_items]]
restaurant_id = 2
category = "Soup"
name = "Clam Chowder"
price = "9.00 USD"
"#;

/// Creates in-memory `SQLite` relational and document stores with all tables.
pub async fn setup_test_stores() -> Result<Stores> {
    let relational = Database::connect("sqlite::memory:").await?;
    let documents = Database::connect("sqlite::memory:").await?;
    let stores = Stores::new(relational, documents);
    stores.create_tables().await?;
    Ok(stores)
}

/// In-memory stores seeded with [`SAMPLE_SEED`].
pub async fn setup_seeded_stores() -> Result<Stores> {
    let stores = setup_test_stores().await?;
    seed_catalog(&stores, &parse_seed(SAMPLE_SEED)?).await?;
    Ok(stores)
}

/// Gazetteer built from [`SAMPLE_SEED`].
#[must_use]
pub fn test_gazetteer() -> Gazetteer {
    parse_seed(SAMPLE_SEED)
        .map(|seed| seed.gazetteer())
        .unwrap_or_default()
}

/// Registers a user named "Test User" and returns its id.
pub async fn create_test_user(db: &DatabaseConnection, email: &str, password: &str) -> Result<i64> {
    credentials::register(
        db,
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: "555-0100".to_string(),
        },
        TEST_BCRYPT_COST,
    )
    .await
}

/// Seeded stores plus one registered user.
/// Returns (stores, `user_id`).
pub async fn setup_with_user() -> Result<(Stores, i64)> {
    let stores = setup_seeded_stores().await?;
    let user_id = create_test_user(&stores.relational, "diner@example.com", "secret-pass").await?;
    Ok((stores, user_id))
}

/// An order with `line_count` lines of quantity 2 at 4.25 each.
#[must_use]
pub fn test_order(user_id: i64, restaurant_id: i64, line_count: usize) -> NewOrder {
    let lines: Vec<NewOrderLine> = (0..line_count)
        .map(|i| NewOrderLine {
            item_name: format!("Item {i}"),
            quantity: 2,
            price: 4.25,
        })
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let total_price = lines.len() as f64 * 8.5;
    NewOrder {
        user_id,
        restaurant_id,
        lines,
        total_price,
        status: None,
        created_at: None,
    }
}

/// Installs a trigger that makes the store reject order lines with this item name.
pub async fn reject_line_named(db: &DatabaseConnection, item_name: &str) -> Result<()> {
    db.execute_unprepared(&format!(
        "CREATE TRIGGER reject_{item_name} BEFORE INSERT ON order_lines \
         WHEN NEW.item_name = '{item_name}' \
         BEGIN SELECT RAISE(ABORT, 'order line rejected'); END;"
    ))
    .await?;
    Ok(())
}

/// Inserts a restaurant search document at the given position.
pub async fn insert_location(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
    lat: f64,
    lng: f64,
) -> Result<restaurant_location::Model> {
    let model = restaurant_location::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        category: Set("Test".to_string()),
        price_range: Set("$".to_string()),
        full_address: Set(String::new()),
        zip_code: Set(String::new()),
        lng: Set(lng),
        lat: Set(lat),
        score: Set(0.0),
        rating_count: Set(0),
    };
    Ok(model.insert(db).await?)
}
