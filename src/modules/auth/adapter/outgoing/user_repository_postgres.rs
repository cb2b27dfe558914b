use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::ports::outgoing::{NewUser, UserRepository, UserRepositoryError};
use crate::modules::experience::adapter::outgoing::sea_orm_entity::{
    Column as ExperienceColumn, Entity as ExperienceEntity,
};
use crate::modules::skill::adapter::outgoing::sea_orm_entity::{
    Column as SkillColumn, Entity as SkillEntity,
};

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_db_err(e: DbErr) -> UserRepositoryError {
        UserRepositoryError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email),
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            slug: Set(user.slug),
            name: Set(user.name),
            nick_name: Set(None),
            gender: Set(None),
            image: Set(None),
            dob: Set(None),
            website: Set(None),
            contact: Set(None),
            contact_email: Set(None),
            address: Set(None),
            about: Set(None),
            is_staff: Set(user.role.is_staff()),
            is_superuser: Set(user.role.is_superuser()),
            is_active: Set(true),
            is_deleted: Set(false),
            last_login: Set(None),
            date_joined: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("23505")
                || err_str.contains("duplicate key")
                || err_str.contains("unique constraint")
            {
                return UserRepositoryError::UserAlreadyExists;
            }
            Self::map_db_err(e)
        })?;

        Ok(inserted.to_domain())
    }

    async fn record_login(&self, user_id: UserId) -> Result<(), UserRepositoryError> {
        let res = UserEntity::update_many()
            .col_expr(UserColumn::LastLogin, Expr::value(Utc::now().fixed_offset()))
            .filter(UserColumn::Id.eq(user_id.value()))
            .exec(&*self.db)
            .await
            .map_err(Self::map_db_err)?;

        if res.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }

        Ok(())
    }

    async fn soft_delete_cascade(&self, user_id: UserId) -> Result<(), UserRepositoryError> {
        let owner_uuid: Uuid = user_id.into();
        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        let user_res = match UserEntity::update_many()
            .col_expr(UserColumn::IsDeleted, Expr::value(true))
            .col_expr(UserColumn::IsActive, Expr::value(false))
            .filter(UserColumn::Id.eq(owner_uuid))
            .filter(UserColumn::IsDeleted.eq(false))
            .exec(&txn)
            .await
        {
            Ok(res) => res,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(Self::map_db_err(e));
            }
        };

        if user_res.rows_affected == 0 {
            let _ = txn.rollback().await;
            return Err(UserRepositoryError::UserNotFound);
        }

        if let Err(e) = SkillEntity::update_many()
            .col_expr(SkillColumn::IsDeleted, Expr::value(true))
            .filter(SkillColumn::UserId.eq(owner_uuid))
            .filter(SkillColumn::IsDeleted.eq(false))
            .exec(&txn)
            .await
        {
            let _ = txn.rollback().await;
            return Err(Self::map_db_err(e));
        }

        if let Err(e) = ExperienceEntity::update_many()
            .col_expr(ExperienceColumn::IsDeleted, Expr::value(true))
            .filter(ExperienceColumn::UserId.eq(owner_uuid))
            .filter(ExperienceColumn::IsDeleted.eq(false))
            .exec(&txn)
            .await
        {
            let _ = txn.rollback().await;
            return Err(Self::map_db_err(e));
        }

        txn.commit().await.map_err(Self::map_db_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::adapter::outgoing::sea_orm_entity::users::sample_model;
    use crate::auth::application::domain::entities::UserRole;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn new_user() -> NewUser {
        NewUser {
            email: "test@example.com".to_string(),
            username: "test".to_string(),
            password_hash: "hashed_password".to_string(),
            slug: Uuid::new_v4().to_string(),
            name: Some("Test User".to_string()),
            role: UserRole::Regular,
        }
    }

    fn exec(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        // Arrange
        let model = sample_model(Uuid::new_v4(), "test@example.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();
        let repository = UserRepositoryPostgres::new(Arc::new(db));

        // Act
        let user = repository.create_user(new_user()).await.unwrap();

        // Assert
        assert_eq!(user.id.value(), model.id);
        assert_eq!(user.email, "test@example.com");
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_key_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom(
                "duplicate key value violates unique constraint".to_string(),
            )])
            .into_connection();
        let repository = UserRepositoryPostgres::new(Arc::new(db));

        let result = repository.create_user(new_user()).await;

        assert!(matches!(result, Err(UserRepositoryError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_create_user_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection timeout".to_string())])
            .into_connection();
        let repository = UserRepositoryPostgres::new(Arc::new(db));

        match repository.create_user(new_user()).await.unwrap_err() {
            UserRepositoryError::DatabaseError(msg) => assert!(msg.contains("connection timeout")),
            other => panic!("Expected DatabaseError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_record_login_unknown_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(0)])
            .into_connection();
        let repository = UserRepositoryPostgres::new(Arc::new(db));

        let result = repository.record_login(UserId::from(Uuid::new_v4())).await;

        assert!(matches!(result, Err(UserRepositoryError::UserNotFound)));
    }

    // ─────────────────────────────────────────────
    // soft_delete_cascade
    // ─────────────────────────────────────────────

    #[tokio::test]
    async fn test_soft_delete_cascade_marks_owned_records() {
        // users, skills, professional_experiences
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(1), exec(3), exec(2)])
            .into_connection();
        let repository = UserRepositoryPostgres::new(Arc::new(db));

        let result = repository
            .soft_delete_cascade(UserId::from(Uuid::new_v4()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_soft_delete_cascade_missing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(0)])
            .into_connection();
        let repository = UserRepositoryPostgres::new(Arc::new(db));

        let result = repository
            .soft_delete_cascade(UserId::from(Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(UserRepositoryError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_soft_delete_cascade_child_failure_is_reported() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![exec(1)])
            .append_exec_errors(vec![DbErr::Custom("skills table locked".to_string())])
            .into_connection();
        let repository = UserRepositoryPostgres::new(Arc::new(db));

        match repository
            .soft_delete_cascade(UserId::from(Uuid::new_v4()))
            .await
            .unwrap_err()
        {
            UserRepositoryError::DatabaseError(msg) => assert!(msg.contains("skills table locked")),
            other => panic!("Expected DatabaseError, got {other:?}"),
        }
    }
}
