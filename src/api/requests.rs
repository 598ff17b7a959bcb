//! Request and response bodies of the JSON API.
//!
//! Required fields are `Option`s so that a missing field is reported as a
//! validation error by the handler, not as a deserializer rejection.

use crate::{
    core::{
        credentials::NewUser,
        orders::{NewOrder, NewOrderLine},
        reviews::NewReview,
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| Error::validation(format!("{field} is required")))
}

fn required_text(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(Error::validation(format!("{field} is required"))),
    }
}

/// Accepts a user id as a number, a numeric string, an empty string or null.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawId::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Body of `POST /signup`
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Display name
    pub name: Option<String>,
    /// Login email, unique per user
    pub email: Option<String>,
    /// Plaintext password, hashed before storage
    pub password: Option<String>,
    /// Contact phone, optional
    pub phone: Option<String>,
}

impl SignupRequest {
    /// Checks required fields and builds the registration command.
    pub fn into_new_user(self) -> Result<NewUser> {
        Ok(NewUser {
            name: required_text(self.name, "name")?,
            email: required_text(self.email, "email")?,
            password: required_text(self.password, "password")?,
            phone: self.phone.unwrap_or_default(),
        })
    }
}

/// Body of `POST /login`
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: Option<String>,
    /// Plaintext password
    pub password: Option<String>,
}

/// One line of an order body; accepts both `itemName` and `item_name`.
#[derive(Debug, Deserialize)]
pub struct OrderLineRequest {
    /// Menu item name
    #[serde(alias = "itemName")]
    pub item_name: Option<String>,
    /// Defaults to 1
    pub quantity: Option<i32>,
    /// Unit price
    pub price: Option<f64>,
}

/// Body of `POST /orders`
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    /// Ordering user
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<i64>,
    /// Restaurant the order goes to
    #[serde(default, deserialize_with = "lenient_id")]
    pub restaurant_id: Option<i64>,
    /// Ordered items
    #[serde(default, alias = "items", alias = "lines")]
    pub orders: Vec<OrderLineRequest>,
    /// Defaults to the sum of quantity × price over the lines
    pub total_price: Option<f64>,
    /// Defaults to `"pending"`
    pub status: Option<String>,
    /// Order time; defaults to now
    #[serde(alias = "timestamp")]
    pub timestamps: Option<DateTime<Utc>>,
}

impl PlaceOrderRequest {
    /// Checks required fields and builds the order command.
    pub fn into_new_order(self) -> Result<NewOrder> {
        let user_id = required(self.user_id, "user_id")?;
        let restaurant_id = required(self.restaurant_id, "restaurant_id")?;
        if self.orders.is_empty() {
            return Err(Error::InvalidOrder {
                message: "orders must contain at least one item".to_string(),
            });
        }

        let lines = self
            .orders
            .into_iter()
            .map(|line| {
                Ok(NewOrderLine {
                    item_name: required_text(line.item_name, "itemName")?,
                    quantity: line.quantity.unwrap_or(1),
                    price: required(line.price, "price")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let total_price = match self.total_price {
            Some(total) => total,
            None => lines.iter().map(|l| f64::from(l.quantity) * l.price).sum(),
        };

        Ok(NewOrder {
            user_id,
            restaurant_id,
            lines,
            total_price,
            status: self.status,
            created_at: self.timestamps,
        })
    }
}

/// Body of `POST /ratingreviews`
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// Reviewed restaurant
    #[serde(default, deserialize_with = "lenient_id")]
    pub restaurant_id: Option<i64>,
    /// Reviewing user
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<i64>,
    /// Star rating, 1 to 5
    pub rating: Option<i32>,
    /// Review text
    pub review: Option<String>,
}

impl ReviewRequest {
    /// Missing fields are rating errors, matching the review validation.
    pub fn into_new_review(self) -> Result<NewReview> {
        let missing = |field: &str| Error::InvalidRating {
            message: format!("{field} is required"),
        };
        Ok(NewReview {
            restaurant_id: self.restaurant_id.ok_or_else(|| missing("restaurant_id"))?,
            user_id: self.user_id.ok_or_else(|| missing("user_id"))?,
            rating: self.rating.ok_or_else(|| missing("rating"))?,
            review: self.review.ok_or_else(|| missing("review"))?,
        })
    }
}

/// Body of `POST /logs`
#[derive(Debug, Deserialize)]
pub struct LogRequest {
    /// Event name, e.g. `"login"`; stored as given
    pub event_type: Option<String>,
    /// Acting user; blank or absent for anonymous events
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<i64>,
}

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human readable outcome
    pub message: String,
    /// Set on signup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Set on order placement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
}

impl MessageResponse {
    /// A response carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_id: None,
            order_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_body_from_frontend() {
        let body = json!({
            "user_id": "3",
            "restaurant_id": 1,
            "orders": [
                {"itemName": "Margherita", "quantity": 2, "price": 16.99},
                {"item_name": "Garlic Knots", "quantity": 1, "price": 5.5}
            ],
            "total_price": 39.48,
            "status": "pending"
        });
        let request: PlaceOrderRequest = serde_json::from_value(body).unwrap();
        let order = request.into_new_order().unwrap();
        assert_eq!(order.user_id, 3);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[1].item_name, "Garlic Knots");
        assert_eq!(order.total_price, 39.48);
    }

    #[test]
    fn test_order_body_missing_user() {
        let request: PlaceOrderRequest = serde_json::from_value(json!({
            "restaurant_id": 1,
            "orders": [{"itemName": "Margherita", "quantity": 1, "price": 16.99}]
        }))
        .unwrap();
        assert!(matches!(
            request.into_new_order(),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_total_defaults_to_line_sum() {
        let request: PlaceOrderRequest = serde_json::from_value(json!({
            "user_id": 1,
            "restaurant_id": 1,
            "orders": [{"itemName": "Soup", "quantity": 3, "price": 2.0}]
        }))
        .unwrap();
        assert_eq!(request.into_new_order().unwrap().total_price, 6.0);
    }

    #[test]
    fn test_log_user_id_forms() {
        let empty: LogRequest =
            serde_json::from_value(json!({"event_type": "login", "user_id": ""})).unwrap();
        assert_eq!(empty.user_id, None);

        let number: LogRequest =
            serde_json::from_value(json!({"event_type": "login", "user_id": 12})).unwrap();
        assert_eq!(number.user_id, Some(12));

        let absent: LogRequest = serde_json::from_value(json!({"event_type": "login"})).unwrap();
        assert_eq!(absent.user_id, None);

        assert!(
            serde_json::from_value::<LogRequest>(json!({"event_type": "x", "user_id": "abc"}))
                .is_err()
        );
    }
}
