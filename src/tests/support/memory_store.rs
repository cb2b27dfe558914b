//! In-memory record and media stores for controller and route tests.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::modules::experience::application::domain::entities::{
    ProfessionalExperience, ProfessionalExperienceDraft,
};
use crate::modules::experience::application::ports::outgoing::ExperienceQuery;
use crate::modules::skill::application::domain::entities::{Skill, SkillDraft};
use crate::multimedia::application::domain::entities::{
    AttachmentTarget, MediaAttachment, NewMediaAttachment,
};
use crate::multimedia::application::ports::outgoing::{MediaStore, MediaStoreError};
use crate::shared::crud::{PageRequest, PageResult, RecordStore, Resource, SlugLookup, StoreError};

/// What the in-memory store needs to know about a resource.
pub trait MemoryRecord: Resource {
    fn from_draft(owner: UserId, slug: String, draft: Self::Draft) -> Self;

    fn apply(&mut self, draft: Self::Draft);

    /// Value compared by the uniqueness check.
    fn unique_value(&self) -> &str;

    /// The collection's default ordering.
    fn ordering(a: &Self, b: &Self) -> Ordering;
}

impl MemoryRecord for Skill {
    fn from_draft(owner: UserId, slug: String, draft: SkillDraft) -> Self {
        let now = Utc::now();
        Skill {
            id: Uuid::new_v4(),
            owner,
            title: draft.title,
            slug,
            image: draft.image,
            level: draft.level,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: SkillDraft) {
        self.title = draft.title;
        self.image = draft.image;
        self.level = draft.level;
        self.updated_at = Utc::now();
    }

    fn unique_value(&self) -> &str {
        &self.title
    }

    fn ordering(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id))
    }
}

impl MemoryRecord for ProfessionalExperience {
    fn from_draft(owner: UserId, slug: String, draft: ProfessionalExperienceDraft) -> Self {
        let now = Utc::now();
        ProfessionalExperience {
            id: Uuid::new_v4(),
            owner,
            company: draft.company,
            slug,
            company_image: draft.company_image,
            company_url: draft.company_url,
            address: draft.address,
            designation: draft.designation,
            job_type: draft.job_type,
            start_date: draft.start_date,
            end_date: draft.end_date,
            currently_working: draft.currently_working,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, draft: ProfessionalExperienceDraft) {
        self.company = draft.company;
        self.company_image = draft.company_image;
        self.company_url = draft.company_url;
        self.address = draft.address;
        self.designation = draft.designation;
        self.job_type = draft.job_type;
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
        self.currently_working = draft.currently_working;
        self.description = draft.description;
        self.updated_at = Utc::now();
    }

    fn unique_value(&self) -> &str {
        &self.company
    }

    fn ordering(a: &Self, b: &Self) -> Ordering {
        b.currently_working
            .cmp(&a.currently_working)
            .then(b.start_date.cmp(&a.start_date))
            .then(b.created_at.cmp(&a.created_at))
            .then(a.id.cmp(&b.id))
    }
}

pub struct InMemoryStore<R> {
    records: Mutex<Vec<R>>,
    unavailable: AtomicBool,
}

impl<R: MemoryRecord> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            unavailable: AtomicBool::new(false),
        }
    }
}

impl<R: MemoryRecord> InMemoryStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a database error from now on.
    pub fn go_down(&self) {
        self.unavailable.store(true, AtomicOrdering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<R> {
        self.sorted()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::DatabaseError("store is down".to_string()));
        }
        Ok(())
    }

    fn sorted(&self) -> Vec<R> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(R::ordering);
        records
    }
}

#[async_trait]
impl<R: MemoryRecord> SlugLookup<R> for InMemoryStore<R> {
    async fn matching_slug(&self, slug: &str) -> Result<Vec<R>, StoreError> {
        self.check()?;
        Ok(self
            .sorted()
            .into_iter()
            .filter(|r| r.slug().eq_ignore_ascii_case(slug))
            .collect())
    }
}

#[async_trait]
impl<R: MemoryRecord> RecordStore<R> for InMemoryStore<R> {
    async fn list(&self, page: Option<PageRequest>) -> Result<PageResult<R>, StoreError> {
        self.check()?;
        let records = self.sorted();

        let Some(page) = page else {
            return Ok(PageResult::whole(records));
        };

        let total = records.len() as u64;
        let items = records
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect();

        Ok(PageResult {
            items,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<R>, StoreError> {
        self.check()?;
        Ok(self.sorted().into_iter().find(|r| r.id() == id))
    }

    async fn has_duplicate(
        &self,
        owner: UserId,
        value: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        self.check()?;
        let value = value.trim().to_lowercase();
        Ok(self.records.lock().unwrap().iter().any(|r| {
            r.owner() == owner
                && Some(r.id()) != exclude
                && r.unique_value().to_lowercase() == value
        }))
    }

    async fn insert(&self, owner: UserId, slug: String, draft: R::Draft) -> Result<R, StoreError> {
        self.check()?;
        let record = R::from_draft(owner, slug, draft);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, current: &R, draft: R::Draft) -> Result<R, StoreError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id() == current.id())
            .ok_or(StoreError::NotFound)?;
        record.apply(draft);
        Ok(record.clone())
    }
}

#[async_trait]
impl ExperienceQuery for InMemoryStore<ProfessionalExperience> {
    async fn current_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Option<ProfessionalExperience>, StoreError> {
        self.check()?;
        Ok(self.sorted().into_iter().find(|e| e.owner == owner))
    }
}

#[derive(Default)]
pub struct InMemoryMediaStore {
    media: Mutex<Vec<MediaAttachment>>,
    reject_attach: AtomicBool,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `attach` fails from now on; other calls keep working.
    pub fn reject_attachments(&self) {
        self.reject_attach.store(true, AtomicOrdering::SeqCst);
    }

    pub fn all(&self) -> Vec<MediaAttachment> {
        self.media.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn attach(&self, media: NewMediaAttachment) -> Result<MediaAttachment, MediaStoreError> {
        if self.reject_attach.load(AtomicOrdering::SeqCst) {
            return Err(MediaStoreError::DatabaseError("disk full".to_string()));
        }

        let attachment = MediaAttachment {
            id: Uuid::new_v4(),
            slug: media.slug,
            target: media.target,
            parent_id: media.parent_id,
            object_key: media.file.object_key,
            original_name: media.file.original_name,
            mime_type: media.file.mime_type,
            size_bytes: media.file.size_bytes,
            created_at: Utc::now(),
        };
        self.media.lock().unwrap().push(attachment.clone());
        Ok(attachment)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Vec<MediaAttachment>, MediaStoreError> {
        Ok(self
            .media
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.slug == slug)
            .cloned()
            .collect())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<u64, MediaStoreError> {
        let mut media = self.media.lock().unwrap();
        let before = media.len();
        media.retain(|m| !ids.contains(&m.id));
        Ok((before - media.len()) as u64)
    }

    async fn list_for_parent(
        &self,
        target: AttachmentTarget,
        parent_id: Uuid,
    ) -> Result<Vec<MediaAttachment>, MediaStoreError> {
        Ok(self
            .media
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.target == target && m.parent_id == parent_id)
            .cloned()
            .collect())
    }
}
