use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::multimedia::application::domain::entities::{AttachmentTarget, MediaAttachment};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "media_attachments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub slug: String,

    pub target: String,
    pub parent_id: Uuid,

    pub object_key: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> Result<MediaAttachment, String> {
        Ok(MediaAttachment {
            id: self.id,
            slug: self.slug.clone(),
            target: self.target.parse::<AttachmentTarget>()?,
            parent_id: self.parent_id,
            object_key: self.object_key.clone(),
            original_name: self.original_name.clone(),
            mime_type: self.mime_type.clone(),
            size_bytes: self.size_bytes.max(0) as u64,
            created_at: self.created_at.into(),
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
