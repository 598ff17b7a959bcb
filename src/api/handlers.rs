//! Route handlers. Each one validates its input, calls exactly one adapter and
//! serializes the result.

use super::{
    AppState,
    requests::{
        LogRequest, LoginRequest, MessageResponse, PlaceOrderRequest, ReviewRequest, SignupRequest,
    },
};
use crate::{
    core::{catalog, credentials, events, orders, reviews},
    entities::{menu_item, rating_review, restaurant, restaurant_location},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;

type Body<T> = std::result::Result<Json<T>, JsonRejection>;
type PathParam<T> = std::result::Result<Path<T>, PathRejection>;

/// Checks both stores, `GET /ping`.
pub async fn ping(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    state.stores.ping().await?;
    Ok(Json(json!({ "message": "Relational and document stores connected" })))
}

/// Unfiltered restaurant listing, `GET /restaurants`.
pub async fn list_restaurants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<restaurant::Model>>> {
    let restaurants =
        catalog::list_restaurants(&state.stores.relational, catalog::MAX_LISTING).await?;
    Ok(Json(restaurants))
}

/// Restaurants within the search radius of a zip code, `GET /restaurants/{zip_code}`.
pub async fn search_restaurants(
    State(state): State<Arc<AppState>>,
    Path(zip_code): Path<String>,
) -> Result<Json<Vec<restaurant_location::Model>>> {
    let found = catalog::search_by_zip(&state.stores, &state.gazetteer, &zip_code).await?;
    Ok(Json(found))
}

/// `GET /menus/{restaurant_id}`
pub async fn get_menu(
    State(state): State<Arc<AppState>>,
    restaurant_id: PathParam<i64>,
) -> Result<Json<Vec<menu_item::Model>>> {
    let Path(restaurant_id) = restaurant_id?;
    Ok(Json(
        catalog::get_menu(&state.stores.documents, restaurant_id).await?,
    ))
}

/// `GET /reviews/{restaurant_id}`
pub async fn get_reviews(
    State(state): State<Arc<AppState>>,
    restaurant_id: PathParam<i64>,
) -> Result<Json<Vec<rating_review::Model>>> {
    let Path(restaurant_id) = restaurant_id?;
    Ok(Json(
        catalog::get_reviews(&state.stores.documents, restaurant_id).await?,
    ))
}

/// Registers a user, `POST /signup`.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    body: Body<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(request) = body?;
    let new_user = request.into_new_user()?;

    let user_id = credentials::register(
        &state.stores.relational,
        new_user,
        state.settings.bcrypt_cost,
    )
    .await?;
    events::record_event_detached(state.stores.documents.clone(), "signup", Some(user_id));

    let mut response = MessageResponse::new("User created successfully");
    response.user_id = Some(user_id);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Checks credentials and returns the user id and name, `POST /login`.
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Body<LoginRequest>,
) -> Result<Json<Value>> {
    let Json(request) = body?;
    let (Some(email), Some(password)) = (request.email, request.password) else {
        return Err(Error::validation("email and password are required"));
    };

    let user = credentials::authenticate(
        &state.stores.relational,
        &email,
        &password,
        state.settings.bcrypt_cost,
    )
    .await?;
    events::record_event_detached(state.stores.documents.clone(), "login", Some(user.user_id));

    Ok(Json(json!({
        "message": "Login successful",
        "user_id": user.user_id,
        "name": user.name,
    })))
}

/// Places an order with all of its lines, `POST /orders`.
pub async fn place_order(
    State(state): State<Arc<AppState>>,
    body: Body<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(request) = body?;
    let new_order = request.into_new_order()?;

    // detached so a dropped connection cannot interrupt the write half-way
    let db = state.stores.relational.clone();
    let order_id = tokio::spawn(async move { orders::place_order(&db, new_order).await })
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))??;

    let mut response = MessageResponse::new("Order created successfully");
    response.order_id = Some(order_id);
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /orders/{order_id}`
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    order_id: PathParam<i64>,
) -> Result<Json<orders::OrderWithLines>> {
    let Path(order_id) = order_id?;
    orders::get_order(&state.stores.relational, order_id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::NotFound {
            what: format!("order {order_id}"),
        })
}

/// `POST /ratingreviews`
pub async fn add_review(
    State(state): State<Arc<AppState>>,
    body: Body<ReviewRequest>,
) -> Result<(StatusCode, Json<rating_review::Model>)> {
    let Json(request) = body?;
    let stored = reviews::add_review(&state.stores.documents, request.into_new_review()?).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// `POST /logs`
pub async fn record_log(
    State(state): State<Arc<AppState>>,
    body: Body<LogRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(request) = body?;
    let event_type = request.event_type.unwrap_or_default();
    events::record_event(&state.stores.documents, &event_type, request.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Log created successfully")),
    ))
}
