/// User service - registration, login and admin bootstrap
use crate::{
    config::AdminSettings,
    error::{Result, ServerError},
    services::AuthService,
};
use apparel_core::{CoreError, DataStore, Role, UserAccount, UserId};
use std::sync::Arc;

/// Account details as submitted for registration
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Outcome of the admin bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    AlreadyPresent,
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn DataStore>,
    auth: Arc<AuthService>,
}

impl UserService {
    pub fn new(store: Arc<dyn DataStore>, auth: Arc<AuthService>) -> Self {
        Self { store, auth }
    }

    /// Register a new account; emails are unique across all accounts
    pub async fn register(&self, account: NewAccount) -> Result<UserAccount> {
        let mut data = self.store.load().await?;

        if data.find_user_by_email(&account.email).is_some() {
            return Err(CoreError::EmailExists(account.email).into());
        }

        let password_hash = self.auth.hash_password(&account.password)?;
        let user = UserAccount {
            id: UserId::generate(),
            name: account.name,
            email: account.email,
            password_hash,
            role: account.role,
        };

        data.users.push(user.clone());
        self.store.save_all(&data).await?;

        tracing::info!("Registered {} account {}", user.role, user.id);
        Ok(user)
    }

    /// Check credentials and return the matching account
    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount> {
        let data = self.store.load().await?;

        let user = data
            .find_user_by_email(email)
            .ok_or(ServerError::Core(CoreError::InvalidCredentials))?;

        if !self.auth.verify_password(password, &user.password_hash)? {
            return Err(CoreError::InvalidCredentials.into());
        }

        Ok(user.clone())
    }

    /// Create the bootstrap admin unless an admin already exists
    pub async fn seed_admin(&self, admin: &AdminSettings) -> Result<SeedOutcome> {
        let mut data = self.store.load().await?;

        if data.has_admin() {
            tracing::info!("Admin user already exists");
            return Ok(SeedOutcome::AlreadyPresent);
        }

        let password_hash = self.auth.hash_password(&admin.password)?;
        data.users.push(UserAccount {
            id: UserId::generate(),
            name: admin.name.clone(),
            email: admin.email.clone(),
            password_hash,
            role: Role::Admin,
        });
        self.store.save_all(&data).await?;

        tracing::info!("Admin user created successfully");
        Ok(SeedOutcome::Created)
    }

    /// All stored accounts, in registration order
    pub async fn list_accounts(&self) -> Result<Vec<UserAccount>> {
        Ok(self.store.load().await?.users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apparel_core::MemoryStore;

    fn service() -> (UserService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let auth = Arc::new(AuthService::new("secret".to_string(), 1));
        (UserService::new(store.clone(), auth), store)
    }

    fn vendor(email: &str) -> NewAccount {
        NewAccount {
            name: "Vendor".to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
            role: Role::Vendor,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let (users, store) = service();

        let user = users.register(vendor("v@example.com")).await.unwrap();
        assert_ne!(user.password_hash, "password123");

        let stored = store.load().await.unwrap();
        assert_eq!(stored.users, vec![user]);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let (users, store) = service();
        users.register(vendor("v@example.com")).await.unwrap();

        let err = users.register(vendor("v@example.com")).await.unwrap_err();
        assert!(matches!(err, ServerError::Core(CoreError::EmailExists(_))));
        assert_eq!(store.load().await.unwrap().users.len(), 1);
    }

    #[tokio::test]
    async fn test_login() {
        let (users, _) = service();
        let registered = users.register(vendor("v@example.com")).await.unwrap();

        let user = users.login("v@example.com", "password123").await.unwrap();
        assert_eq!(user.id, registered.id);

        let err = users.login("v@example.com", "wrongpass").await.unwrap_err();
        assert!(matches!(err, ServerError::Core(CoreError::InvalidCredentials)));

        let err = users.login("nobody@example.com", "password123").await.unwrap_err();
        assert!(matches!(err, ServerError::Core(CoreError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        let (users, store) = service();
        let admin = AdminSettings {
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password: "adminpass".to_string(),
        };

        assert_eq!(users.seed_admin(&admin).await.unwrap(), SeedOutcome::Created);
        assert_eq!(
            users.seed_admin(&admin).await.unwrap(),
            SeedOutcome::AlreadyPresent
        );

        let stored = store.load().await.unwrap();
        assert_eq!(stored.users.len(), 1);
        assert_eq!(stored.users[0].role, Role::Admin);
        assert!(users.login("admin@example.com", "adminpass").await.is_ok());
    }
}
