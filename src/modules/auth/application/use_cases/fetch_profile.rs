use async_trait::async_trait;
use tracing::warn;

use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::ports::outgoing::UserQuery;
use crate::shared::crud::SlugResolver;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchUserProfileError {
    #[error("User not found")]
    NotFound,
}

#[async_trait]
pub trait FetchUserProfileUseCase: Send + Sync {
    /// Case-insensitive slug lookup; the first match wins.
    async fn by_slug(&self, slug: &str) -> Result<User, FetchUserProfileError>;

    /// Lookup failures of any kind surface as `NotFound`.
    async fn by_id(&self, user_id: UserId) -> Result<User, FetchUserProfileError>;
}

#[derive(Clone)]
pub struct FetchUserProfileService<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> FetchUserProfileService<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> FetchUserProfileUseCase for FetchUserProfileService<Q>
where
    Q: UserQuery,
{
    async fn by_slug(&self, slug: &str) -> Result<User, FetchUserProfileError> {
        SlugResolver::new(&self.query, "user")
            .resolve::<User>(slug)
            .await
            .map_err(|_| FetchUserProfileError::NotFound)
    }

    async fn by_id(&self, user_id: UserId) -> Result<User, FetchUserProfileError> {
        match self.query.find_by_id(user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(FetchUserProfileError::NotFound),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "User lookup failed, treating as not found");
                Err(FetchUserProfileError::NotFound)
            }
        }
    }
}
