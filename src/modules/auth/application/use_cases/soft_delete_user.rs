use async_trait::async_trait;
use tracing::info;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::{UserRepository, UserRepositoryError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SoftDeleteUserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ISoftDeleteUserUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<(), SoftDeleteUserError>;
}

#[derive(Clone)]
pub struct SoftDeleteUserUseCase<R>
where
    R: UserRepository,
{
    repository: R,
}

impl<R> SoftDeleteUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ISoftDeleteUserUseCase for SoftDeleteUserUseCase<R>
where
    R: UserRepository,
{
    async fn execute(&self, user_id: UserId) -> Result<(), SoftDeleteUserError> {
        self.repository
            .soft_delete_cascade(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => SoftDeleteUserError::UserNotFound,
                other => SoftDeleteUserError::RepositoryError(other.to_string()),
            })?;

        info!(user_id = %user_id, "User soft-deleted with owned portfolio records");
        Ok(())
    }
}
