//! HTTP surface: JSON routes over the order system.

pub mod auth;
mod error;
mod orders;
mod products;
mod users;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use error::{AppError, Result};

use crate::app_system::OrderSystem;
use crate::auth::TokenSigner;
use crate::clients::{OrderClient, ProductClient, UserClient};

/// Shared handler state: clients for each store plus the token signer.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderClient,
    pub products: ProductClient,
    pub users: UserClient,
    pub tokens: Arc<TokenSigner>,
}

impl AppState {
    pub fn new(system: &OrderSystem, tokens: TokenSigner) -> Self {
        Self {
            orders: system.order_client.clone(),
            products: system.product_client.clone(),
            users: system.user_client.clone(),
            tokens: Arc::new(tokens),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(orders::router())
        .merge(products::router())
        .merge(users::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_system::{OrderSettings, StockPolicy};
    use axum::body::Body;
    use axum::http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    };
    use chrono::Duration;
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(settings: OrderSettings) -> Router {
        let system = OrderSystem::new(16, settings);
        let tokens = TokenSigner::new(
            SecretString::from("http-test-secret-0123456789abcdef".to_string()),
            Duration::hours(1),
        );
        router(AppState::new(&system, tokens))
    }

    async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    /// Registers a user and returns a token for them.
    async fn login_as(app: &Router, email: &str, is_admin: bool) -> String {
        let (status, _) = send(
            app,
            "POST",
            "/users",
            None,
            Some(json!({
                "name": "Sam",
                "email": email,
                "password": "hunter22",
                "phone": "555-0100",
                "isAdmin": is_admin,
                "city": "Springfield",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            app,
            "POST",
            "/users/login",
            None,
            Some(json!({ "email": email, "password": "hunter22" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"], "Sam");
        body["token"].as_str().unwrap().to_string()
    }

    async fn create_product(app: &Router, admin_token: &str, price: &str, stock: i64) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/products",
            Some(admin_token),
            Some(json!({ "name": "Lamp", "price": price, "countInStock": stock, "category": "home" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    fn order_body(lines: Value) -> Value {
        json!({
            "shippingAddress1": "1 Main St",
            "city": "Springfield",
            "zip": "12345",
            "country": "US",
            "phone": "555-0100",
            "orderItems": lines,
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(OrderSettings::default());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_order_lifecycle_over_http() {
        let app = app(OrderSettings::default());
        let token = login_as(&app, "admin@example.com", true).await;
        let product_id = create_product(&app, &token, "10.00", 5).await;

        let (status, order) = send(
            &app,
            "POST",
            "/orders",
            Some(&token),
            Some(order_body(json!([{ "product": product_id, "quantity": 2 }]))),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{order}");
        assert_eq!(order["totalPrice"], "20.00");
        assert_eq!(order["status"], "pending");
        let order_id = order["id"].as_str().unwrap().to_string();

        let (_, product) = send(&app, "GET", &format!("/products/{product_id}"), None, None).await;
        assert_eq!(product["countInStock"], 3);

        let (status, detail) = send(&app, "GET", &format!("/orders/{order_id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["user"]["name"], "Sam");
        assert_eq!(detail["orderItems"][0]["product"]["id"], product_id.as_str());
        assert_eq!(detail["orderItems"][0]["quantity"], 2);

        let (_, list) = send(&app, "GET", "/orders", None, None).await;
        assert_eq!(list[0]["user"]["name"], "Sam");
        assert!(list[0]["orderItems"][0].is_string());

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/orders/{order_id}"),
            None,
            Some(json!({ "status": "shipped" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "shipped");

        let (status, deleted) = send(&app, "DELETE", &format!("/orders/{order_id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["id"], order_id.as_str());

        let (status, body) = send(&app, "GET", &format!("/orders/{order_id}"), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains(&order_id));
    }

    #[tokio::test]
    async fn test_order_requires_token() {
        let app = app(OrderSettings::default());
        let body = order_body(json!([{ "product": "p", "quantity": 1 }]));

        let (status, response) = send(&app, "POST", "/orders", None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(response["message"], "Login first");

        let (status, _) = send(&app, "POST", "/orders", Some("forged.token"), Some(body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_order_rejections_are_bad_requests() {
        let app = app(OrderSettings {
            stock_policy: StockPolicy::AtomicReserve,
            compensate_on_failure: true,
        });
        let token = login_as(&app, "admin@example.com", true).await;
        let product_id = create_product(&app, &token, "10.00", 1).await;

        let (status, body) = send(
            &app,
            "POST",
            "/orders",
            Some(&token),
            Some(order_body(json!([{ "product": product_id, "quantity": 4 }]))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            format!("Insufficient stock for product ID {product_id}. Available stock: 1, Requested: 4")
        );

        let (status, body) = send(
            &app,
            "POST",
            "/orders",
            Some(&token),
            Some(order_body(json!([{ "product": "missing", "quantity": 1 }]))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Product with ID missing not found.");

        let (status, _) = send(&app, "POST", "/orders", Some(&token), Some(json!({ "city": "x" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_product_admin_and_filters() {
        let app = app(OrderSettings::default());
        let customer = login_as(&app, "customer@example.com", false).await;

        let (status, body) = send(
            &app,
            "POST",
            "/products",
            Some(&customer),
            Some(json!({ "name": "Lamp", "price": "1.00", "countInStock": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Admin access required");

        let admin = login_as(&app, "admin@example.com", true).await;
        let product_id = create_product(&app, &admin, "3.50", 2).await;

        let (_, home) = send(&app, "GET", "/products?categories=home,garden", None, None).await;
        assert_eq!(home.as_array().unwrap().len(), 1);
        let (_, toys) = send(&app, "GET", "/products?categories=toys", None, None).await;
        assert!(toys.as_array().unwrap().is_empty());
        let (_, featured) = send(&app, "GET", "/products/featured", None, None).await;
        assert!(featured.as_array().unwrap().is_empty());

        let (status, product) = send(
            &app,
            "PUT",
            &format!("/products/{product_id}/stock"),
            Some(&admin),
            Some(json!({ "countInStock": 40 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(product["countInStock"], 40);

        let (status, _) = send(&app, "GET", "/products/nope", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_product_update_and_delete() {
        let app = app(OrderSettings::default());
        let admin = login_as(&app, "admin@example.com", true).await;
        let customer = login_as(&app, "customer@example.com", false).await;
        let product_id = create_product(&app, &admin, "3.50", 2).await;
        let uri = format!("/products/{product_id}");

        let (status, _) = send(&app, "PUT", &uri, Some(&customer), Some(json!({ "price": "1.00" }))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = send(&app, "DELETE", &uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, updated) = send(
            &app,
            "PUT",
            &uri,
            Some(&admin),
            Some(json!({ "price": "4.25", "isFeatured": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["price"], "4.25");
        assert_eq!(updated["name"], "Lamp");
        assert_eq!(updated["countInStock"], 2);

        let (_, featured) = send(&app, "GET", "/products/featured", None, None).await;
        assert_eq!(featured[0]["id"], product_id.as_str());

        let (status, _) = send(&app, "PUT", &uri, Some(&admin), Some(json!({ "price": "-1" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, deleted) = send(&app, "DELETE", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["id"], product_id.as_str());

        let (status, _) = send(&app, "GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "PUT", &uri, Some(&admin), Some(json!({ "name": "Gone" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_user_registration_and_login_failures() {
        let app = app(OrderSettings::default());
        login_as(&app, "sam@example.com", false).await;

        let (status, users) = send(&app, "GET", "/users", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(users[0].get("passwordHash").is_none());

        let (status, _) = send(
            &app,
            "POST",
            "/users",
            None,
            Some(json!({ "name": "Sam", "email": "sam@example.com", "password": "x", "phone": "1" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(
            &app,
            "POST",
            "/users/login",
            None,
            Some(json!({ "email": "sam@example.com", "password": "wrong" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");

        let (status, _) = send(
            &app,
            "POST",
            "/users/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "hunter22" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
