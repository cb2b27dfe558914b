use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::{User, UserId, UserRole};

/// Validated, normalized data for a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub slug: String,
    pub name: Option<String>,
    pub role: UserRole,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    async fn record_login(&self, user_id: UserId) -> Result<(), UserRepositoryError>;

    /// Marks the user deleted together with every skill and professional
    /// experience they own, in one transaction.
    async fn soft_delete_cascade(&self, user_id: UserId) -> Result<(), UserRepositoryError>;
}
