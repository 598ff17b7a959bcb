//! Review business logic - appends rating/review documents.

use crate::{
    entities::rating_review,
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Lowest accepted rating
pub const MIN_RATING: i32 = 1;
/// Highest accepted rating
pub const MAX_RATING: i32 = 5;

/// A review as submitted by a user
#[derive(Debug, Clone)]
pub struct NewReview {
    /// Reviewed restaurant
    pub restaurant_id: i64,
    pub user_id: i64,
    /// Between [`MIN_RATING`] and [`MAX_RATING`]
    pub rating: i32,
    /// Review text, must not be blank
    pub review: String,
}

/// Stores a review and returns the stored document.
///
/// Fails with `Error::InvalidRating` when the rating is outside 1..=5 or the
/// review text is blank.
#[instrument(skip(db, new_review), fields(restaurant_id = new_review.restaurant_id, rating = new_review.rating))]
pub async fn add_review(db: &DatabaseConnection, new_review: NewReview) -> Result<rating_review::Model> {
    if !(MIN_RATING..=MAX_RATING).contains(&new_review.rating) {
        return Err(Error::InvalidRating {
            message: format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                new_review.rating
            ),
        });
    }
    if new_review.review.trim().is_empty() {
        return Err(Error::InvalidRating {
            message: "review text is required".to_string(),
        });
    }

    let document = rating_review::ActiveModel {
        restaurant_id: Set(new_review.restaurant_id),
        user_id: Set(new_review.user_id),
        rating: Set(new_review.rating),
        review: Set(new_review.review.trim().to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let stored = document.insert(db).await.map_err(Error::from_store)?;
    info!("Stored review {}", stored.id);
    Ok(stored)
}
