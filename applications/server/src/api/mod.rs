/// API route modules
pub mod auth;
pub mod health;
pub mod inventory;

use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use serde::Serialize;

pub const NO_DATA_FOUND: &str = "No data found!";

/// Response body shared by every endpoint: a message and optional payload
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn with_data(message: &'static str, data: T) -> Self {
        Self {
            message,
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn message(message: &'static str) -> Self {
        Self {
            message,
            data: None,
        }
    }
}

/// Build the `/api` router
///
/// Protected handlers verify the bearer token themselves, after their body
/// has passed validation.
pub fn router(app_state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route(
            "/inventory",
            post(inventory::create_inventory).get(inventory::list_inventory),
        )
        .route("/inventory/bulk", put(inventory::update_inventory_bulk))
        .route("/inventory/:code/:size", put(inventory::update_inventory))
        .route("/inventory/code/:code", get(inventory::list_inventory_by_code))
        .route(
            "/inventory/checkForOrderFulfilment",
            post(inventory::check_order_fulfilment),
        )
        .route(
            "/inventory/minimumPriceForOrder",
            post(inventory::minimum_price_for_order),
        );

    Router::new().nest("/api", routes).with_state(app_state)
}
