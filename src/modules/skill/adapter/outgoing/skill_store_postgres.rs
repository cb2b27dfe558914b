use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::{ActiveModel as SkillActiveModel, Column, Entity as SkillEntity};
use crate::auth::application::domain::entities::UserId;
use crate::modules::skill::application::domain::entities::{Skill, SkillDraft};
use crate::shared::crud::{PageRequest, PageResult, RecordStore, SlugLookup, StoreError};

#[derive(Debug, Clone)]
pub struct SkillStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl SkillStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Live rows, newest first.
    fn ordered() -> Select<SkillEntity> {
        SkillEntity::find()
            .filter(Column::IsDeleted.eq(false))
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Id)
    }
}

fn map_db_err(e: DbErr) -> StoreError {
    let message = e.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("23505") || lowered.contains("duplicate key") {
        return StoreError::Duplicate(message);
    }
    StoreError::DatabaseError(message)
}

#[async_trait]
impl SlugLookup<Skill> for SkillStorePostgres {
    async fn matching_slug(&self, slug: &str) -> Result<Vec<Skill>, StoreError> {
        let models = Self::ordered()
            .filter(Expr::expr(Func::lower(Expr::col(Column::Slug))).eq(slug.to_lowercase()))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.iter().map(|m| m.to_domain()).collect())
    }
}

#[async_trait]
impl RecordStore<Skill> for SkillStorePostgres {
    async fn list(&self, page: Option<PageRequest>) -> Result<PageResult<Skill>, StoreError> {
        let Some(page) = page else {
            let models = Self::ordered().all(&*self.db).await.map_err(map_db_err)?;
            return Ok(PageResult::whole(
                models.iter().map(|m| m.to_domain()).collect(),
            ));
        };

        let total = Self::ordered().count(&*self.db).await.map_err(map_db_err)?;
        let models = Self::ordered()
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(PageResult {
            items: models.iter().map(|m| m.to_domain()).collect(),
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Skill>, StoreError> {
        let model = Self::ordered()
            .filter(Column::Id.eq(id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(|m| m.to_domain()))
    }

    async fn has_duplicate(
        &self,
        owner: UserId,
        value: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        let mut query = SkillEntity::find()
            .filter(Column::UserId.eq(owner.value()))
            .filter(Column::IsDeleted.eq(false))
            .filter(Expr::expr(Func::lower(Expr::col(Column::Title))).eq(value.trim().to_lowercase()));

        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }

        let count = query.count(&*self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn insert(&self, owner: UserId, slug: String, draft: SkillDraft) -> Result<Skill, StoreError> {
        let active = SkillActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner.value()),
            title: Set(draft.title),
            slug: Set(slug),
            image: Set(draft.image),
            level: Set(draft.level.map(i16::from)),
            is_deleted: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(inserted.to_domain())
    }

    async fn update(&self, current: &Skill, draft: SkillDraft) -> Result<Skill, StoreError> {
        let active = SkillActiveModel {
            id: Set(current.id),
            title: Set(draft.title),
            image: Set(draft.image),
            level: Set(draft.level.map(i16::from)),
            ..Default::default()
        };

        let updated = active.update(&*self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreError::NotFound,
            other => map_db_err(other),
        })?;

        Ok(updated.to_domain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::skill::adapter::outgoing::sea_orm_entity::{sample_model, Model as SkillModel};
    use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait, RuntimeErr, Value};
    use std::collections::BTreeMap;

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    fn draft(title: &str) -> SkillDraft {
        SkillDraft {
            title: title.to_string(),
            image: None,
            level: Some(80),
        }
    }

    #[test]
    fn ordering_is_total() {
        let sql = SkillStorePostgres::ordered()
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.ends_with(r#"ORDER BY "skills"."created_at" DESC, "skills"."id" ASC"#));
    }

    #[tokio::test]
    async fn find_by_id_returns_live_row_or_none() {
        let owner = Uuid::new_v4();
        let model = sample_model(owner, "Rust", "rust-1a2b3c4d");
        let id = model.id;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model], Vec::<SkillModel>::new()])
            .into_connection();
        let store = SkillStorePostgres::new(Arc::new(db));

        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.owner, UserId::from(owner));

        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn matching_slug_returns_rows_in_order() {
        let owner = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                sample_model(owner, "Go", "go-1a2b3c4d"),
                sample_model(owner, "go", "GO-1A2B3C4D"),
            ]])
            .into_connection();
        let store = SkillStorePostgres::new(Arc::new(db));

        let found = store.matching_slug("Go-1A2b3c4d").await.unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].title, "Go");
    }

    #[tokio::test]
    async fn list_without_page_returns_whole_collection() {
        let owner = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                sample_model(owner, "Rust", "rust"),
                sample_model(owner, "Go", "go"),
            ]])
            .into_connection();
        let store = SkillStorePostgres::new(Arc::new(db));

        let result = store.list(None).await.unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.num_pages(), 1);
    }

    #[tokio::test]
    async fn list_with_page_counts_then_fetches() {
        let owner = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(5)]])
            .append_query_results(vec![vec![sample_model(owner, "Rust", "rust")]])
            .into_connection();
        let store = SkillStorePostgres::new(Arc::new(db));

        let result = store
            .list(Some(PageRequest {
                page: 3,
                per_page: 2,
            }))
            .await
            .unwrap();

        assert_eq!(result.total, 5);
        assert_eq!(result.page, 3);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.num_pages(), 3);
    }

    #[tokio::test]
    async fn has_duplicate_is_true_when_rows_match() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(1)]])
            .append_query_results(vec![vec![count_row(0)]])
            .into_connection();
        let store = SkillStorePostgres::new(Arc::new(db));
        let owner = UserId::from(Uuid::new_v4());

        assert!(store.has_duplicate(owner, "go", None).await.unwrap());
        assert!(!store
            .has_duplicate(owner, "go", Some(Uuid::new_v4()))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn insert_returns_saved_skill() {
        let owner = Uuid::new_v4();
        let saved: SkillModel = sample_model(owner, "Rust", "rust-1a2b3c4d");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![saved.clone()]])
            .into_connection();
        let store = SkillStorePostgres::new(Arc::new(db));

        let skill = store
            .insert(UserId::from(owner), "rust-1a2b3c4d".to_string(), draft("Rust"))
            .await
            .unwrap();

        assert_eq!(skill.id, saved.id);
        assert_eq!(skill.slug, "rust-1a2b3c4d");
    }

    #[tokio::test]
    async fn insert_unique_violation_is_duplicate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"skills_slug_key\"".into(),
            ))])
            .into_connection();
        let store = SkillStorePostgres::new(Arc::new(db));

        let result = store
            .insert(UserId::from(Uuid::new_v4()), "rust".to_string(), draft("Rust"))
            .await;

        assert!(matches!(result, Err(StoreError::Duplicate(_))));
    }

    #[tokio::test]
    async fn update_keeps_slug() {
        let owner = Uuid::new_v4();
        let current = sample_model(owner, "Rust", "rust-1a2b3c4d");
        let mut updated = current.clone();
        updated.title = "Rust (async)".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![updated]])
            .into_connection();
        let store = SkillStorePostgres::new(Arc::new(db));

        let skill = store
            .update(&current.to_domain(), draft("Rust (async)"))
            .await
            .unwrap();

        assert_eq!(skill.title, "Rust (async)");
        assert_eq!(skill.slug, "rust-1a2b3c4d");
    }
}
