//! Order business logic - two-phase order placement.
//!
//! An order is one header row plus one line row per ordered item. The header
//! identifier is generated by the store, so lines can only be written after the
//! header insert returns. Both phases run inside one database transaction:
//! either the header and every line commit together, or nothing survives.
//!
//! A line failure rolls the transaction back explicitly, which undoes the
//! header and any lines already written, and reports
//! `Error::PartialOrderFailure`. If the future is dropped mid-way the
//! uncommitted transaction is rolled back when it is dropped.

use crate::{
    entities::{Order, OrderLine, order, order_line},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseTransaction, QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Status given to orders that do not specify one
pub const DEFAULT_STATUS: &str = "pending";

/// One requested item of an order
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLine {
    /// Menu item name
    pub item_name: String,
    /// At least 1
    pub quantity: i32,
    /// Unit price
    pub price: f64,
}

/// Everything needed to place an order
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Ordering user, must exist
    pub user_id: i64,
    /// Restaurant, must exist
    pub restaurant_id: i64,
    /// At least one line
    pub lines: Vec<NewOrderLine>,
    /// Total as submitted by the client
    pub total_price: f64,
    /// Defaults to [`DEFAULT_STATUS`]
    pub status: Option<String>,
    /// Order time; defaults to now
    pub created_at: Option<DateTime<Utc>>,
}

/// An order header with all of its lines
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithLines {
    /// Header row
    #[serde(flatten)]
    pub order: order::Model,
    /// Line rows in insertion order
    pub lines: Vec<order_line::Model>,
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidOrder {
        message: message.into(),
    }
}

/// Checks every precondition that can be decided without touching the store.
pub fn validate(new_order: &NewOrder) -> Result<()> {
    if new_order.lines.is_empty() {
        return Err(invalid("an order needs at least one line"));
    }
    if !new_order.total_price.is_finite() || new_order.total_price < 0.0 {
        return Err(invalid(format!(
            "total price must be a non-negative number, got {}",
            new_order.total_price
        )));
    }
    for (index, line) in new_order.lines.iter().enumerate() {
        if line.item_name.trim().is_empty() {
            return Err(invalid(format!("line {index} has no item name")));
        }
        if line.quantity < 1 {
            return Err(invalid(format!(
                "line {index} quantity must be at least 1, got {}",
                line.quantity
            )));
        }
        if !line.price.is_finite() || line.price < 0.0 {
            return Err(invalid(format!(
                "line {index} price must be a non-negative number, got {}",
                line.price
            )));
        }
    }
    Ok(())
}

/// Places an order and returns the new order id.
///
/// # Errors
/// * `Error::InvalidOrder` - preconditions failed, or the user or restaurant does not exist
/// * `Error::PartialOrderFailure` - a line insert failed; header and written lines were rolled back
/// * `Error::StoreUnavailable` - the store could not be reached
#[instrument(skip(db, new_order), fields(user_id = new_order.user_id, restaurant_id = new_order.restaurant_id, lines = new_order.lines.len()))]
pub async fn place_order<C>(db: &C, new_order: NewOrder) -> Result<i64>
where
    C: TransactionTrait,
{
    validate(&new_order)?;

    let txn = db.begin().await.map_err(Error::from_store)?;

    let header = order::ActiveModel {
        user_id: Set(new_order.user_id),
        restaurant_id: Set(new_order.restaurant_id),
        total_price: Set(new_order.total_price),
        status: Set(new_order
            .status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS.to_string())),
        created_at: Set(new_order.created_at.unwrap_or_else(Utc::now)),
        ..Default::default()
    };

    let order_id = match header.insert(&txn).await {
        Ok(model) => model.id,
        Err(e) => {
            let err = match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    invalid("unknown user or restaurant")
                }
                _ => Error::from_store(e),
            };
            // nothing was written; dropping the transaction would also roll back
            rollback(txn).await;
            return Err(err);
        }
    };

    let expected = new_order.lines.len();
    if let Err((written, e)) = insert_lines(&txn, order_id, new_order.lines).await {
        error!(
            "Line insert failed for order {order_id} after {written} of {expected} lines: {e}"
        );
        if !rollback(txn).await {
            compensate(db, order_id).await;
        }
        return Err(match Error::from_store(e) {
            unavailable @ Error::StoreUnavailable { .. } => unavailable,
            _ => Error::PartialOrderFailure { written, expected },
        });
    }

    txn.commit().await.map_err(Error::from_store)?;

    info!("Placed order {order_id} with {expected} lines");
    Ok(order_id)
}

/// Inserts every line for `order_id`, reporting how many were written on failure.
async fn insert_lines(
    txn: &DatabaseTransaction,
    order_id: i64,
    lines: Vec<NewOrderLine>,
) -> std::result::Result<(), (usize, DbErr)> {
    for (written, line) in lines.into_iter().enumerate() {
        let model = order_line::ActiveModel {
            order_id: Set(order_id),
            item_name: Set(line.item_name.trim().to_string()),
            quantity: Set(line.quantity),
            price: Set(line.price),
            ..Default::default()
        };
        model.insert(txn).await.map_err(|e| (written, e))?;
    }
    Ok(())
}

/// Rolls back, returning whether the store acknowledged it.
async fn rollback(txn: DatabaseTransaction) -> bool {
    match txn.rollback().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Explicit rollback failed: {e}");
            false
        }
    }
}

/// Compensating delete for when a rollback could not be confirmed.
async fn compensate<C>(db: &C, order_id: i64)
where
    C: TransactionTrait,
{
    match discard_order(db, order_id).await {
        Ok(removed) => info!("Compensating delete for order {order_id}, removed: {removed}"),
        Err(e) => error!("Compensating delete for order {order_id} failed: {e}"),
    }
}

/// Removes an order and all of its lines in one transaction.
///
/// Returns whether an order was deleted.
#[instrument(skip(db))]
pub async fn discard_order<C>(db: &C, order_id: i64) -> Result<bool>
where
    C: TransactionTrait,
{
    let txn = db.begin().await.map_err(Error::from_store)?;
    OrderLine::delete_many()
        .filter(order_line::Column::OrderId.eq(order_id))
        .exec(&txn)
        .await
        .map_err(Error::from_store)?;
    let deleted = Order::delete_by_id(order_id)
        .exec(&txn)
        .await
        .map_err(Error::from_store)?;
    txn.commit().await.map_err(Error::from_store)?;
    Ok(deleted.rows_affected > 0)
}

/// Reads an order header together with its lines.
pub async fn get_order(db: &DatabaseConnection, order_id: i64) -> Result<Option<OrderWithLines>> {
    let Some(found) = Order::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Error::from_store)?
    else {
        return Ok(None);
    };

    let lines = found
        .find_related(OrderLine)
        .order_by_asc(order_line::Column::Id)
        .all(db)
        .await
        .map_err(Error::from_store)?;

    Ok(Some(OrderWithLines {
        order: found,
        lines,
    }))
}
