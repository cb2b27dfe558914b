use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::{
    ActiveModel as MediaActiveModel, Column, Entity as MediaEntity, Model as MediaModel,
};
use crate::modules::experience::adapter::outgoing::sea_orm_entity::{
    Column as ExperienceColumn, Entity as ExperienceEntity,
};
use crate::multimedia::application::domain::entities::{
    AttachmentTarget, MediaAttachment, NewMediaAttachment,
};
use crate::multimedia::application::ports::outgoing::{MediaStore, MediaStoreError};

#[derive(Debug, Clone)]
pub struct MediaStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl MediaStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Attachments carrying `slug` whose parent is still live. Rows left behind
/// by a soft-deleted parent never match.
fn live_by_slug(slug: &str) -> Select<MediaEntity> {
    let live_experiences = Query::select()
        .column(ExperienceColumn::Id)
        .from(ExperienceEntity)
        .and_where(ExperienceColumn::IsDeleted.eq(false))
        .to_owned();

    MediaEntity::find()
        .filter(Column::Slug.eq(slug.trim()))
        .filter(Column::Target.eq(AttachmentTarget::ProfessionalExperience.as_str()))
        .filter(Column::ParentId.in_subquery(live_experiences))
        .order_by_asc(Column::CreatedAt)
}

fn map_db_err(e: sea_orm::DbErr) -> MediaStoreError {
    MediaStoreError::DatabaseError(e.to_string())
}

fn to_domain_list(models: Vec<MediaModel>) -> Result<Vec<MediaAttachment>, MediaStoreError> {
    models
        .iter()
        .map(|m| m.to_domain().map_err(MediaStoreError::DatabaseError))
        .collect()
}

#[async_trait]
impl MediaStore for MediaStorePostgres {
    async fn attach(&self, media: NewMediaAttachment) -> Result<MediaAttachment, MediaStoreError> {
        let active = MediaActiveModel {
            id: Set(Uuid::new_v4()),
            slug: Set(media.slug),
            target: Set(media.target.to_string()),
            parent_id: Set(media.parent_id),
            object_key: Set(media.file.object_key),
            original_name: Set(media.file.original_name),
            mime_type: Set(media.file.mime_type),
            size_bytes: Set(media.file.size_bytes as i64),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let inserted = active.insert(&*self.db).await.map_err(map_db_err)?;

        inserted.to_domain().map_err(MediaStoreError::DatabaseError)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Vec<MediaAttachment>, MediaStoreError> {
        let models = live_by_slug(slug)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        to_domain_list(models)
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, MediaStoreError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = MediaEntity::delete_many()
            .filter(Column::Id.is_in(ids.to_vec()))
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }

    async fn list_for_parent(
        &self,
        target: AttachmentTarget,
        parent_id: Uuid,
    ) -> Result<Vec<MediaAttachment>, MediaStoreError> {
        let models = MediaEntity::find()
            .filter(Column::Target.eq(target.as_str()))
            .filter(Column::ParentId.eq(parent_id))
            .order_by_asc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        to_domain_list(models)
    }
}
