use super::sea_orm_entity::users::{Column as UserColumn, Entity as UserEntity};
use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::ports::outgoing::{UserQuery, UserQueryError};
use crate::shared::crud::{SlugLookup, StoreError};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SlugLookup<User> for UserQueryPostgres {
    async fn matching_slug(&self, slug: &str) -> Result<Vec<User>, StoreError> {
        let models = UserEntity::find()
            .filter(Expr::expr(Func::lower(Expr::col(UserColumn::Slug))).eq(slug.to_lowercase()))
            .filter(UserColumn::IsDeleted.eq(false))
            .order_by_desc(UserColumn::DateJoined)
            .all(&*self.db)
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        Ok(models.iter().map(|m| m.to_domain()).collect())
    }
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find_by_id(user_id.value())
            .filter(UserColumn::IsDeleted.eq(false))
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        Ok(user.map(|m| m.to_domain()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .filter(UserColumn::IsDeleted.eq(false))
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        Ok(user.map(|m| m.to_domain()))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserQueryError> {
        // Deleted accounts still hold their username.
        let count = UserEntity::find()
            .filter(UserColumn::Username.eq(username))
            .count(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }
}
