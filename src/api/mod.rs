//! HTTP API layer - axum router over the core adapters.
//!
//! Stateless request/response mapping: every route parses its input, calls a
//! single adapter and turns the outcome into JSON with the matching status.

/// Error to response conversion
pub mod error;
/// Route handlers
pub mod handlers;
/// Request and response bodies
pub mod requests;

use crate::{
    config::{database::Stores, settings::Settings},
    core::geo::Gazetteer,
    errors::Result,
};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use std::{sync::Arc, time::Duration};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Shared, read-only state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    /// Relational and document store connections
    pub stores: Stores,
    /// Zip code gazetteer for radius search
    pub gazetteer: Gazetteer,
    /// Runtime settings
    pub settings: Settings,
}

impl AppState {
    /// Wraps the state for sharing across handlers.
    #[must_use]
    pub fn new(stores: Stores, gazetteer: Gazetteer, settings: Settings) -> Arc<Self> {
        Arc::new(Self {
            stores,
            gazetteer,
            settings,
        })
    }
}

/// Builds the application router with CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/restaurants", get(handlers::list_restaurants))
        .route("/restaurants/{zip_code}", get(handlers::search_restaurants))
        .route("/menus/{restaurant_id}", get(handlers::get_menu))
        .route("/reviews/{restaurant_id}", get(handlers::get_reviews))
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/orders", post(handlers::place_order))
        .route("/orders/{order_id}", get(handlers::get_order))
        .route("/ratingreviews", post(handlers::add_review))
        .route("/logs", post(handlers::record_log))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured port and serves until Ctrl+C or SIGTERM.
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let address = format!("0.0.0.0:{}", state.settings.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::config::settings::Settings;
    use crate::entities::{Order, OrderLine};
    use crate::test_utils::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use sea_orm::{EntityTrait, PaginatorTrait};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_app() -> Result<(Router, Arc<AppState>)> {
        let stores = setup_seeded_stores().await?;
        let mut settings = Settings::from_lookup(|_| None)?;
        settings.bcrypt_cost = TEST_BCRYPT_COST;
        let state = AppState::new(stores, test_gazetteer(), settings);
        Ok((router(Arc::clone(&state)), state))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_signup_and_login_flow() -> Result<()> {
        let (app, _) = test_app().await?;
        let signup = json!({"name": "Ada", "email": "a@x.com", "password": "pw-123", "phone": "555"});

        let (status, body) = send(&app, "POST", "/signup", Some(signup.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = body["user_id"].as_i64().unwrap();

        let (status, body) = send(&app, "POST", "/signup", Some(signup)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email already exists");

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "a@x.com", "password": "pw-123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"].as_i64(), Some(user_id));
        assert_eq!(body["name"], "Ada");

        let (wrong_status, wrong_body) = send(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "a@x.com", "password": "nope"})),
        )
        .await;
        let (unknown_status, unknown_body) = send(
            &app,
            "POST",
            "/login",
            Some(json!({"email": "b@x.com", "password": "pw-123"})),
        )
        .await;
        assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
        assert_eq!(wrong_status, unknown_status);
        assert_eq!(wrong_body, unknown_body);
        Ok(())
    }

    #[tokio::test]
    async fn test_restaurant_routes() -> Result<()> {
        let (app, _) = test_app().await?;

        let (status, body) = send(&app, "GET", "/restaurants", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(&app, "GET", "/restaurants/10001", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Slice Palace");

        let (status, body) = send(&app, "GET", "/restaurants/90210", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, _) = send(&app, "GET", "/restaurants/99999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/restaurants/12ab", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_menu_and_reviews() -> Result<()> {
        let (app, _) = test_app().await?;

        let (status, body) = send(&app, "GET", "/menus/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["price"], "16.99 USD");

        let (status, _) = send(
            &app,
            "POST",
            "/ratingreviews",
            Some(json!({"restaurant_id": 1, "user_id": 1, "rating": 6, "review": "wow"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "POST",
            "/ratingreviews",
            Some(json!({"restaurant_id": 1, "user_id": 1, "rating": 5, "review": "wow"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["rating"], 5);

        let (status, body) = send(&app, "GET", "/reviews/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_order_routes() -> Result<()> {
        let (app, state) = test_app().await?;
        let user_id =
            create_test_user(&state.stores.relational, "diner@example.com", "pw").await?;

        let (status, body) = send(
            &app,
            "POST",
            "/orders",
            Some(json!({
                "user_id": user_id,
                "restaurant_id": 1,
                "orders": [
                    {"itemName": "Margherita", "quantity": 2, "price": 16.99},
                    {"itemName": "Garlic Knots", "quantity": 1, "price": 5.5}
                ],
                "total_price": 39.48,
                "status": "pending"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let order_id = body["order_id"].as_i64().unwrap();

        let (status, body) = send(&app, "GET", &format!("/orders/{order_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lines"].as_array().unwrap().len(), 2);
        assert_eq!(body["total_price"], 39.48);

        let (status, _) = send(
            &app,
            "POST",
            "/orders",
            Some(json!({"user_id": user_id, "restaurant_id": 1, "orders": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "POST", "/orders", Some(json!({"restaurant_id": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/orders/4242", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        assert_eq!(Order::find().count(&state.stores.relational).await?, 1);
        assert_eq!(OrderLine::find().count(&state.stores.relational).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_order_is_server_error() -> Result<()> {
        let (app, state) = test_app().await?;
        let user_id =
            create_test_user(&state.stores.relational, "diner@example.com", "pw").await?;
        reject_line_named(&state.stores.relational, "poison").await?;

        let (status, body) = send(
            &app,
            "POST",
            "/orders",
            Some(json!({
                "user_id": user_id,
                "restaurant_id": 1,
                "orders": [
                    {"itemName": "Margherita", "quantity": 1, "price": 16.99},
                    {"itemName": "poison", "quantity": 1, "price": 1.0}
                ],
                "total_price": 17.99
            })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Server error");
        assert_eq!(Order::find().count(&state.stores.relational).await?, 0);
        Ok(())
    }

    fn order_request(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/orders")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Polls the request once, drops it, then gives any spawned placement time to settle.
    async fn abandon(
        app: &Router,
        request: Request<Body>,
        db: &sea_orm::DatabaseConnection,
    ) -> (u64, u64) {
        let _ = tokio::time::timeout(Duration::ZERO, app.clone().oneshot(request)).await;
        tokio::time::sleep(Duration::from_millis(200)).await;
        (
            Order::find().count(db).await.unwrap(),
            OrderLine::find().count(db).await.unwrap(),
        )
    }

    #[tokio::test]
    async fn test_abandoned_order_request_is_all_or_nothing() -> Result<()> {
        let (app, state) = test_app().await?;
        let db = &state.stores.relational;
        let user_id = create_test_user(db, "diner@example.com", "pw").await?;

        let body = json!({
            "user_id": user_id,
            "restaurant_id": 1,
            "orders": [
                {"itemName": "Margherita", "quantity": 1, "price": 16.99},
                {"itemName": "Garlic Knots", "quantity": 1, "price": 5.5},
                {"itemName": "Soda", "quantity": 2, "price": 2.0}
            ]
        });
        let (headers, lines) = abandon(&app, order_request(&body), db).await;
        assert!(headers <= 1);
        assert_eq!(lines, headers * 3);

        reject_line_named(db, "poison").await?;
        let body = json!({
            "user_id": user_id,
            "restaurant_id": 1,
            "orders": [
                {"itemName": "Margherita", "quantity": 1, "price": 16.99},
                {"itemName": "poison", "quantity": 1, "price": 1.0}
            ]
        });
        let (after_headers, after_lines) = abandon(&app, order_request(&body), db).await;
        assert_eq!((after_headers, after_lines), (headers, lines));
        Ok(())
    }

    #[tokio::test]
    async fn test_logs_and_ping() -> Result<()> {
        let (app, _) = test_app().await?;

        let (status, _) = send(
            &app,
            "POST",
            "/logs",
            Some(json!({"event_type": "login", "user_id": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&app, "POST", "/logs", Some(json!({"user_id": 4}))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&app, "GET", "/ping", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "POST", "/signup", Some(json!({"name": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("email"));
        Ok(())
    }
}
