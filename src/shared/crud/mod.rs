//! Generic list / detail / create / update handling shared by every
//! portfolio resource.

pub mod action;
pub mod context;
pub mod controller;
pub mod messages;
pub mod resource;
pub mod slug;
pub mod store;
pub mod urls;

pub use action::Action;
pub use context::{ContextBuilder, ContextError, PageContext, SiteMeta};
pub use controller::{
    ControllerConfig, CrudError, MediaBinding, Outcome, Page, ResourceController, ViewRequest,
};
pub use messages::{Level, MessageTemplates, Notification, NotificationSink};
pub use resource::{FormErrors, Resource, UniqueRule};
pub use slug::{slugify, unique_slug, ResolveError, SlugResolver};
pub use store::{PageRequest, PageResult, RecordStore, SlugLookup, StoreError};
pub use urls::{RouteError, UrlReverser};
