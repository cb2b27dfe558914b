use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use super::resource::Resource;
use crate::auth::application::domain::entities::UserId;

//
// ──────────────────────────────────────────────────────────
// Paging
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1) as u64) * self.per_page as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> PageResult<T> {
    /// Unpaginated result holding the whole collection.
    pub fn whole(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            items,
            page: 1,
            per_page: total as u32,
            total,
        }
    }

    /// Always at least one, so an empty collection still has a first page.
    pub fn num_pages(&self) -> u32 {
        if self.per_page == 0 || self.total == 0 {
            return 1;
        }
        self.total.div_ceil(self.per_page as u64) as u32
    }
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

//
// ──────────────────────────────────────────────────────────
// Ports
// ──────────────────────────────────────────────────────────
//

/// Case-insensitive slug lookup. Matches come back in the collection's
/// default ordering.
#[async_trait]
pub trait SlugLookup<T>: Send + Sync {
    async fn matching_slug(&self, slug: &str) -> Result<Vec<T>, StoreError>;
}

/// Persistence for one resource collection. Soft-deleted rows are invisible.
#[async_trait]
pub trait RecordStore<R: Resource>: SlugLookup<R> {
    /// Ordered collection, paginated when a page is requested.
    async fn list(&self, page: Option<PageRequest>) -> Result<PageResult<R>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<R>, StoreError>;

    /// Whether another record of `owner` already carries `value` in the
    /// resource's unique field.
    async fn has_duplicate(
        &self,
        owner: UserId,
        value: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError>;

    async fn insert(&self, owner: UserId, slug: String, draft: R::Draft) -> Result<R, StoreError>;

    /// Applies the draft to an existing record. The slug never changes.
    async fn update(&self, current: &R, draft: R::Draft) -> Result<R, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        let page = PageRequest {
            page: 3,
            per_page: 4,
        };
        assert_eq!(page.offset(), 8);
    }

    #[test]
    fn num_pages_rounds_up_and_never_drops_below_one() {
        let result = PageResult::<u8> {
            items: vec![],
            page: 1,
            per_page: 4,
            total: 9,
        };
        assert_eq!(result.num_pages(), 3);

        let empty = PageResult::<u8>::whole(vec![]);
        assert_eq!(empty.num_pages(), 1);
    }
}
