use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::{
    ActiveModel as ExperienceActiveModel, Column, Entity as ExperienceEntity,
    Model as ExperienceModel,
};
use crate::auth::application::domain::entities::UserId;
use crate::modules::experience::application::domain::entities::{
    ProfessionalExperience, ProfessionalExperienceDraft,
};
use crate::modules::experience::application::ports::outgoing::ExperienceQuery;
use crate::shared::crud::{PageRequest, PageResult, RecordStore, SlugLookup, StoreError};

#[derive(Debug, Clone)]
pub struct ExperienceStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl ExperienceStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Live rows, current positions first, then newest start date. Creation
    /// time and id break ties so pages never overlap.
    fn ordered() -> Select<ExperienceEntity> {
        ExperienceEntity::find()
            .filter(Column::IsDeleted.eq(false))
            .order_by_desc(Column::CurrentlyWorking)
            .order_by_desc(Column::StartDate)
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

fn to_domain_list(models: Vec<ExperienceModel>) -> Result<Vec<ProfessionalExperience>, StoreError> {
    models
        .iter()
        .map(|m| m.to_domain().map_err(StoreError::DatabaseError))
        .collect()
}

#[async_trait]
impl ExperienceQuery for ExperienceStorePostgres {
    async fn current_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Option<ProfessionalExperience>, StoreError> {
        let model = Self::ordered()
            .filter(Column::UserId.eq(owner.value()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        model
            .map(|m| m.to_domain().map_err(StoreError::DatabaseError))
            .transpose()
    }
}

#[async_trait]
impl SlugLookup<ProfessionalExperience> for ExperienceStorePostgres {
    async fn matching_slug(&self, slug: &str) -> Result<Vec<ProfessionalExperience>, StoreError> {
        let models = Self::ordered()
            .filter(Expr::expr(Func::lower(Expr::col(Column::Slug))).eq(slug.to_lowercase()))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        to_domain_list(models)
    }
}

#[async_trait]
impl RecordStore<ProfessionalExperience> for ExperienceStorePostgres {
    async fn list(
        &self,
        page: Option<PageRequest>,
    ) -> Result<PageResult<ProfessionalExperience>, StoreError> {
        let Some(page) = page else {
            let models = Self::ordered().all(&*self.db).await.map_err(map_db_err)?;
            return Ok(PageResult::whole(to_domain_list(models)?));
        };

        let total = Self::ordered().count(&*self.db).await.map_err(map_db_err)?;
        let models = Self::ordered()
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(PageResult {
            items: to_domain_list(models)?,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProfessionalExperience>, StoreError> {
        let model = Self::ordered()
            .filter(Column::Id.eq(id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        model
            .map(|m| m.to_domain().map_err(StoreError::DatabaseError))
            .transpose()
    }

    async fn has_duplicate(
        &self,
        owner: UserId,
        value: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        let mut query = ExperienceEntity::find()
            .filter(Column::UserId.eq(owner.value()))
            .filter(Column::IsDeleted.eq(false))
            .filter(
                Expr::expr(Func::lower(Expr::col(Column::Company)))
                    .eq(value.trim().to_lowercase()),
            );

        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }

        let count = query.count(&*self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn insert(
        &self,
        owner: UserId,
        slug: String,
        draft: ProfessionalExperienceDraft,
    ) -> Result<ProfessionalExperience, StoreError> {
        let active = ExperienceActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner.value()),
            company: Set(draft.company),
            slug: Set(slug),
            company_image: Set(draft.company_image),
            company_url: Set(draft.company_url),
            address: Set(draft.address),
            designation: Set(draft.designation),
            job_type: Set(draft.job_type.to_string()),
            start_date: Set(draft.start_date),
            end_date: Set(draft.end_date),
            currently_working: Set(draft.currently_working),
            description: Set(draft.description),
            is_deleted: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active.insert(&*self.db).await.map_err(map_db_err)?;
        inserted.to_domain().map_err(StoreError::DatabaseError)
    }

    async fn update(
        &self,
        current: &ProfessionalExperience,
        draft: ProfessionalExperienceDraft,
    ) -> Result<ProfessionalExperience, StoreError> {
        let active = ExperienceActiveModel {
            id: Set(current.id),
            company: Set(draft.company),
            company_image: Set(draft.company_image),
            company_url: Set(draft.company_url),
            address: Set(draft.address),
            designation: Set(draft.designation),
            job_type: Set(draft.job_type.to_string()),
            start_date: Set(draft.start_date),
            end_date: Set(draft.end_date),
            currently_working: Set(draft.currently_working),
            description: Set(draft.description),
            ..Default::default()
        };

        let updated = active.update(&*self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => StoreError::NotFound,
            other => map_db_err(other),
        })?;

        updated.to_domain().map_err(StoreError::DatabaseError)
    }
}
