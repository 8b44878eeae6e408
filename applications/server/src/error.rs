/// Server error types
use apparel_core::CoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

pub const NO_TOKEN_FOUND: &str = "No Token Found!";
pub const INVALID_TOKEN: &str = "Invalid Token";
pub const NOT_AUTHORIZED: &str = "User not authorized for this action";
pub const SOMETHING_WENT_WRONG: &str = "Whoops! something went wrong";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Authorization failed: {0}")]
    Forbidden(String),

    #[error("Order cannot be fulfilled")]
    Unfulfillable,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<apparel_storage::StorageError> for ServerError {
    fn from(err: apparel_storage::StorageError) -> Self {
        ServerError::Core(err.into())
    }
}

impl ServerError {
    /// Whether the error is an unexpected fault rather than a rejected request
    pub fn is_internal(&self) -> bool {
        match self {
            ServerError::Core(e) => e.is_internal(),
            ServerError::Internal(_)
            | ServerError::Config(_)
            | ServerError::Io(_)
            | ServerError::Bcrypt(_) => true,
            ServerError::Validation(_)
            | ServerError::Auth(_)
            | ServerError::Forbidden(_)
            | ServerError::Unfulfillable
            | ServerError::Jwt(_) => false,
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ServerError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ServerError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ServerError::Unfulfillable => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Jwt(_) => (StatusCode::UNAUTHORIZED, INVALID_TOKEN.to_string()),
            ServerError::Core(e) => match e {
                CoreError::ProductExists { .. } => (StatusCode::CONFLICT, e.to_string()),
                CoreError::NoRecordToUpdate { .. } => (StatusCode::NOT_FOUND, e.to_string()),
                CoreError::EmailExists(_)
                | CoreError::InvalidCredentials
                | CoreError::ProductUnavailable { .. }
                | CoreError::InsufficientStock { .. } => (StatusCode::BAD_REQUEST, e.to_string()),
                CoreError::Storage(_) | CoreError::Io(_) | CoreError::Serialization(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SOMETHING_WENT_WRONG.to_string(),
                ),
            },
            ServerError::Internal(_)
            | ServerError::Config(_)
            | ServerError::Io(_)
            | ServerError::Bcrypt(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SOMETHING_WENT_WRONG.to_string(),
            ),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if self.is_internal() {
            tracing::error!("Unhandled error: {:?}", self);
            let body = Json(json!({
                "status": status.as_u16(),
                "message": message,
            }));
            return (status, body).into_response();
        }

        if let ServerError::Jwt(ref e) = self {
            tracing::warn!("Token verification failed: {}", e);
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Log unexpected faults together with the operation that hit them
pub trait LogFailure<T> {
    fn log_failure(self, operation: &'static str) -> Result<T>;
}

impl<T, E> LogFailure<T> for std::result::Result<T, E>
where
    E: Into<ServerError>,
{
    fn log_failure(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            if err.is_internal() {
                tracing::error!(api_method = operation, error = %err, "Error inside handler");
            }
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apparel_core::ApparelSize;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ServerError::Core(CoreError::ProductExists {
                    code: "P1".to_string(),
                    size: ApparelSize::M,
                }),
                StatusCode::CONFLICT,
            ),
            (
                ServerError::Core(CoreError::EmailExists("a@b.co".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServerError::Core(CoreError::NoRecordToUpdate {
                    code: "P1".to_string(),
                    size: ApparelSize::M,
                }),
                StatusCode::NOT_FOUND,
            ),
            (ServerError::Unfulfillable, StatusCode::BAD_REQUEST),
            (
                ServerError::Auth(NO_TOKEN_FOUND.to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ServerError::Forbidden(NOT_AUTHORIZED.to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                ServerError::Core(CoreError::storage("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let (_, message) = ServerError::Internal("secret detail".to_string()).status_and_message();
        assert_eq!(message, SOMETHING_WENT_WRONG);
    }
}
