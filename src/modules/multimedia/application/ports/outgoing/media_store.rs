use async_trait::async_trait;
use uuid::Uuid;

use crate::multimedia::application::domain::entities::{
    AttachmentTarget, MediaAttachment, NewMediaAttachment,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum MediaStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn attach(&self, media: NewMediaAttachment) -> Result<MediaAttachment, MediaStoreError>;

    /// Exact slug match. Media slugs are generated, never typed by users.
    async fn find_by_slug(&self, slug: &str) -> Result<Vec<MediaAttachment>, MediaStoreError>;

    /// Returns the number of rows removed.
    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, MediaStoreError>;

    async fn list_for_parent(
        &self,
        target: AttachmentTarget,
        parent_id: Uuid,
    ) -> Result<Vec<MediaAttachment>, MediaStoreError>;
}
