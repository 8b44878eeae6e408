/// Authentication guard
///
/// Handlers take a `BearerToken` and verify it only after their request body
/// has been validated, so a malformed body is reported before a missing or
/// bad token.
use crate::{
    error::{Result, ServerError, NOT_AUTHORIZED, NO_TOKEN_FOUND},
    services::{AuthService, Identity},
};
use apparel_core::{Role, UserId};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Verified caller identity
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    /// Reject the request unless the caller's role passes `allowed`
    pub fn require(&self, allowed: impl Fn(&Role) -> bool) -> Result<()> {
        if allowed(&self.0.role) {
            Ok(())
        } else {
            tracing::debug!("Role {} rejected for user {}", self.0.role, self.0.id);
            Err(ServerError::Forbidden(NOT_AUTHORIZED.to_string()))
        }
    }
}

/// Raw token from the `Authorization` header, not yet verified
#[derive(Debug, Clone, Default)]
pub struct BearerToken(Option<String>);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// Verify the token and return the caller it identifies
    pub fn authenticate(&self, auth_service: &AuthService) -> Result<AuthenticatedUser> {
        let token = self
            .0
            .as_deref()
            .ok_or_else(|| ServerError::Auth(NO_TOKEN_FOUND.to_string()))?;

        let identity = auth_service.verify_identity(token)?;
        Ok(AuthenticatedUser(identity))
    }
}

/// Never rejects; a missing header surfaces when `authenticate` runs
#[axum::async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Infallible> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(|value| value.trim_start_matches("Bearer").trim())
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        Ok(Self(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_service() -> AuthService {
        AuthService::new("unit-secret".to_string(), 1)
    }

    #[test]
    fn test_missing_token() {
        let err = BearerToken::default()
            .authenticate(&auth_service())
            .unwrap_err();
        assert!(matches!(err, ServerError::Auth(ref m) if m == NO_TOKEN_FOUND));
    }

    #[test]
    fn test_valid_token() {
        let auth_service = auth_service();
        let token = auth_service
            .create_token(&UserId::new("vendor-1"), Role::Vendor)
            .unwrap();

        let user = BearerToken::new(token).authenticate(&auth_service).unwrap();
        assert_eq!(user.user_id(), &UserId::new("vendor-1"));
        assert!(user.require(Role::can_manage_inventory).is_ok());
        assert!(user.require(Role::can_register_accounts).is_err());
    }

    #[test]
    fn test_invalid_token() {
        let err = BearerToken::new("not.a.token")
            .authenticate(&auth_service())
            .unwrap_err();
        assert!(matches!(err, ServerError::Jwt(_)));
    }
}
