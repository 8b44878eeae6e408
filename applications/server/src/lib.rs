//! Apparel Server Library
//!
//! REST backend for apparel inventory: account registration and login with
//! role-based access, inventory management and order fulfilment checks.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AuthService, UserService};
pub use state::AppState;
