//! Apparel Core
//!
//! Domain types, the store abstraction, and the inventory rules shared by the
//! apparel inventory server and its storage backends.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `InventoryRecord`, `UserAccount`, `Role`, `ApparelSize`
//! - **Store**: the `DataStore` trait (whole-snapshot `load` / `save_all`) and
//!   an in-memory implementation
//! - **Inventory Logic**: `InventoryService`, which owns uniqueness, ownership,
//!   bulk updates and order fulfilment
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use apparel_core::{ApparelSize, InventoryService, MemoryStore, NewRecord, UserId};
//! use std::sync::Arc;
//!
//! # async fn example() -> apparel_core::Result<()> {
//! let inventory = InventoryService::new(Arc::new(MemoryStore::default()));
//!
//! let vendor = UserId::new("vendor-1");
//! let record = inventory
//!     .create(
//!         NewRecord {
//!             title: "Linen shirt".to_string(),
//!             description: None,
//!             code: "P1".to_string(),
//!             size: ApparelSize::M,
//!             quantity: 10,
//!             price: 99.99,
//!         },
//!         &vendor,
//!     )
//!     .await?;
//! assert_eq!(record.vendor_id, vendor);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod inventory;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use inventory::{BulkOutcome, BulkStatus, BulkUpdate, InventoryService, Listing, OrderLine};
pub use store::{DataStore, MemoryStore};
pub use types::{
    ApparelSize, Dataset, InventoryRecord, NewRecord, RecordId, RecordPatch, Role, UserAccount,
    UserId,
};
