/// The whole persisted document
use super::{InventoryRecord, Role, UserAccount};
use serde::{Deserialize, Serialize};

/// Every account and every inventory record, read and written as one unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Registered accounts, in registration order
    #[serde(default)]
    pub users: Vec<UserAccount>,

    /// Inventory records, in creation order
    #[serde(default)]
    pub inventory: Vec<InventoryRecord>,
}

impl Dataset {
    /// Find an account by login email
    pub fn find_user_by_email(&self, email: &str) -> Option<&UserAccount> {
        self.users.iter().find(|user| user.email == email)
    }

    /// Whether any admin account exists
    pub fn has_admin(&self) -> bool {
        self.users.iter().any(|user| user.role == Role::Admin)
    }
}
