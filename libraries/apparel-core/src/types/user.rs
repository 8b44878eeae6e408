/// User account types
use super::ids::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Access role carried by every account and identity token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, registers other accounts and sees every vendor's stock
    Admin,
    /// Manages its own stock
    Vendor,
    /// Read and order checks only
    User,
}

impl Role {
    /// Every role
    pub const ALL: [Role; 3] = [Role::Admin, Role::Vendor, Role::User];

    /// Wire label of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Vendor => "vendor",
            Role::User => "user",
        }
    }

    /// May register new accounts
    pub fn can_register_accounts(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Vendor | Role::User => false,
        }
    }

    /// May create and update inventory records
    pub fn can_manage_inventory(&self) -> bool {
        match self {
            Role::Admin | Role::Vendor => true,
            Role::User => false,
        }
    }

    /// Sees records of every vendor instead of only its own
    pub fn sees_all_vendors(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Vendor | Role::User => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label does not name a known role
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Login email, unique across accounts
    pub email: String,

    /// Salted password hash
    #[serde(rename = "password")]
    pub password_hash: String,

    /// Access role
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.can_register_accounts());
        assert!(!Role::Vendor.can_register_accounts());
        assert!(Role::Vendor.can_manage_inventory());
        assert!(!Role::User.can_manage_inventory());
        assert!(!Role::User.sees_all_vendors());
    }

    #[test]
    fn test_account_stores_hash_under_password_key() {
        let account = UserAccount {
            id: UserId::new("u1"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$10$hash".to_string(),
            role: Role::Vendor,
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["password"], "$2b$10$hash");
        assert_eq!(json["role"], "vendor");
    }
}
