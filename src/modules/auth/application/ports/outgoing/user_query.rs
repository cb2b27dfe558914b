// application/ports/outgoing/user_query.rs
use async_trait::async_trait;

use crate::auth::application::domain::entities::{User, UserId};
use crate::shared::crud::SlugLookup;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Read side of the user store. Soft-deleted users are invisible.
///
/// Slug matching follows the shared lookup policy: case-insensitive, first
/// match wins.
#[async_trait]
pub trait UserQuery: SlugLookup<User> {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError>;
    async fn username_exists(&self, username: &str) -> Result<bool, UserQueryError>;
}
