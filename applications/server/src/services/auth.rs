/// Authentication service - JWT and password handling
use crate::error::{Result, ServerError};
use apparel_core::{Role, UserId};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// bcrypt work factor for stored passwords
pub const PASSWORD_HASH_COST: u32 = 10;

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub role: Role,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

/// Caller identity carried by a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub role: Role,
}

impl AuthService {
    pub fn new(secret: String, expiration_hours: u64) -> Self {
        Self {
            secret,
            token_expiration: Duration::hours(expiration_hours as i64),
        }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, PASSWORD_HASH_COST).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Create a signed token for `user_id` acting as `role`
    pub fn create_token(&self, user_id: &UserId, role: Role) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.token_expiration;

        let claims = Claims {
            id: user_id.as_str().to_string(),
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify a token and return the identity it carries
    pub fn verify_identity(&self, token: &str) -> Result<Identity> {
        let claims = self.verify_token(token)?;
        Ok(Identity {
            id: UserId::new(claims.id),
            role: claims.role,
        })
    }
}
