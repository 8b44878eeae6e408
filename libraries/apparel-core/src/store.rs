//! Store trait for the whole-document persistence model

use crate::error::Result;
use crate::types::Dataset;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Whole-snapshot storage of the dataset
///
/// Every operation loads a fresh snapshot, mutates it in memory and hands the
/// full snapshot back to `save_all`. Implementations must not merge: the last
/// `save_all` wins, even if it was computed from an older snapshot.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Read the complete dataset
    async fn load(&self) -> Result<Dataset>;

    /// Replace the complete dataset
    async fn save_all(&self, data: &Dataset) -> Result<()>;
}

/// In-process store, used by tests and ephemeral deployments
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Dataset>,
}

impl MemoryStore {
    /// Create a store seeded with `data`
    pub fn with_data(data: Dataset) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn load(&self) -> Result<Dataset> {
        Ok(self.data.read().await.clone())
    }

    async fn save_all(&self, data: &Dataset) -> Result<()> {
        *self.data.write().await = data.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, UserAccount, UserId};

    #[tokio::test]
    async fn test_last_writer_wins() {
        let store = MemoryStore::default();

        let mut first = store.load().await.unwrap();
        let mut second = store.load().await.unwrap();

        first.users.push(UserAccount {
            id: UserId::new("a"),
            name: "First".to_string(),
            email: "first@example.com".to_string(),
            password_hash: "x".to_string(),
            role: Role::User,
        });
        second.users.push(UserAccount {
            id: UserId::new("b"),
            name: "Second".to_string(),
            email: "second@example.com".to_string(),
            password_hash: "x".to_string(),
            role: Role::User,
        });

        store.save_all(&first).await.unwrap();
        store.save_all(&second).await.unwrap();

        let stored = store.load().await.unwrap();
        assert_eq!(stored.users.len(), 1);
        assert_eq!(stored.users[0].id, UserId::new("b"));
    }
}
