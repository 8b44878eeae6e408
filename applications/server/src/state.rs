/// Shared application state
use crate::services::{AuthService, InventoryService, UserService};
use apparel_core::DataStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub users: UserService,
    pub inventory: InventoryService,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>, auth_service: Arc<AuthService>) -> Self {
        Self {
            users: UserService::new(Arc::clone(&store), Arc::clone(&auth_service)),
            inventory: InventoryService::new(store),
            auth_service,
        }
    }
}
