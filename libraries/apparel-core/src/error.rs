/// Core error types for the apparel inventory
use crate::types::ApparelSize;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for the apparel inventory
#[derive(Error, Debug)]
pub enum CoreError {
    /// A record with the same code and size is already stocked
    #[error("Product already exists")]
    ProductExists {
        /// Product code of the rejected record
        code: String,
        /// Size of the rejected record
        size: ApparelSize,
    },

    /// No record owned by the caller matches the code and size
    #[error("No record found to update")]
    NoRecordToUpdate {
        /// Requested product code
        code: String,
        /// Requested size
        size: ApparelSize,
    },

    /// An account with this email is already registered
    #[error("Email already exists")]
    EmailExists(String),

    /// Email unknown or password mismatch
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// An order line names stock that does not exist
    #[error("Products with code {code} and size {size} not available")]
    ProductUnavailable {
        /// Requested product code
        code: String,
        /// Requested size
        size: ApparelSize,
    },

    /// An order line asks for more than is in stock
    #[error("Insufficient stock for {code} size {size}")]
    InsufficientStock {
        /// Requested product code
        code: String,
        /// Requested size
        size: ApparelSize,
    },

    /// Storage backend errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether the error is an unexpected fault rather than a business-rule rejection
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::Io(_) | Self::Serialization(_)
        )
    }
}
