//! Catalog business logic - read-only restaurant, menu and review queries.
//!
//! Listing reads the relational restaurant table. Zip search, menus and
//! reviews read the document store.

use crate::{
    config::database::Stores,
    core::geo::{self, Gazetteer, SEARCH_RADIUS_MILES},
    entities::{
        MenuItem, RatingReview, Restaurant, RestaurantLocation, menu_item, rating_review,
        restaurant, restaurant_location,
    },
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, QuerySelect, prelude::*};
use tracing::{debug, instrument};

/// Upper bound for the unfiltered restaurant listing
pub const MAX_LISTING: u64 = 100;

/// Returns up to `limit` restaurants in store order.
///
/// No ordering is promised; callers must not depend on it.
pub async fn list_restaurants(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<restaurant::Model>> {
    Restaurant::find()
        .limit(limit.min(MAX_LISTING))
        .all(db)
        .await
        .map_err(Error::from_store)
}

/// Finds every restaurant within the search radius of a zip code's centre.
///
/// A malformed zip is a validation error, an unresolvable one is
/// `Error::UnknownZip`. An empty result is a valid answer, distinct from a
/// store failure, which surfaces as `Error::StoreUnavailable` or `Error::Database`.
#[instrument(skip(stores, gazetteer))]
pub async fn search_by_zip(
    stores: &Stores,
    gazetteer: &Gazetteer,
    zip_code: &str,
) -> Result<Vec<restaurant_location::Model>> {
    let zip_code = zip_code.trim();
    if !geo::is_well_formed_zip(zip_code) {
        return Err(Error::validation(format!(
            "zip code must be five digits, got {zip_code:?}"
        )));
    }
    let center = gazetteer.resolve(zip_code).ok_or_else(|| Error::UnknownZip {
        zip: zip_code.to_string(),
    })?;

    find_within_radius(&stores.documents, center, SEARCH_RADIUS_MILES).await
}

/// Restaurants whose geo-point lies within `radius_miles` of `center` (latitude, longitude).
pub async fn find_within_radius(
    db: &DatabaseConnection,
    center: (f64, f64),
    radius_miles: f64,
) -> Result<Vec<restaurant_location::Model>> {
    let bbox = geo::bounding_box(center, radius_miles);
    let lng_filter = bbox
        .lng_ranges
        .iter()
        .fold(Condition::any(), |cond, &(min_lng, max_lng)| {
            cond.add(restaurant_location::Column::Lng.between(min_lng, max_lng))
        });

    let candidates = RestaurantLocation::find()
        .filter(restaurant_location::Column::Lat.between(bbox.min_lat, bbox.max_lat))
        .filter(lng_filter)
        .all(db)
        .await
        .map_err(Error::from_store)?;

    let found: Vec<_> = candidates
        .into_iter()
        .filter(|r| {
            let (lng, lat) = r.geo_point();
            geo::within_radius(center, (lat, lng), radius_miles)
        })
        .collect();

    debug!("{} restaurants within {radius_miles} miles", found.len());
    Ok(found)
}

/// Returns the menu of a restaurant, empty if it has none.
pub async fn get_menu(db: &DatabaseConnection, restaurant_id: i64) -> Result<Vec<menu_item::Model>> {
    MenuItem::find()
        .filter(menu_item::Column::RestaurantId.eq(restaurant_id))
        .order_by_asc(menu_item::Column::Id)
        .all(db)
        .await
        .map_err(Error::from_store)
}

/// Returns all reviews of a restaurant, newest first.
pub async fn get_reviews(
    db: &DatabaseConnection,
    restaurant_id: i64,
) -> Result<Vec<rating_review::Model>> {
    RatingReview::find()
        .filter(rating_review::Column::RestaurantId.eq(restaurant_id))
        .order_by_desc(rating_review::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Error::from_store)
}
