/// Server services
pub mod auth;
pub mod users;

pub use apparel_core::InventoryService;
pub use auth::{AuthService, Identity};
pub use users::{NewAccount, SeedOutcome, UserService};
