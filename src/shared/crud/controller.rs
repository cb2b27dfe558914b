use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use super::action::Action;
use super::context::{ContextBuilder, ContextError, PageContext};
use super::messages::{MessageTemplates, Notification, NotificationSink};
use super::resource::{FormErrors, Resource};
use super::slug::{unique_slug, ResolveError, SlugResolver};
use super::store::{PageRequest, PageResult, RecordStore, StoreError};
use super::urls::{RouteError, UrlReverser};
use crate::auth::application::domain::entities::UserId;
use crate::multimedia::application::domain::entities::{
    AttachmentTarget, MediaAttachment, NewMediaAttachment, UploadedFile,
};
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::ports::outgoing::MediaStore;

pub const MEDIA_DELETED_MESSAGE: &str = "Media Deleted Successfully!";
pub const MEDIA_NOT_FOUND_MESSAGE: &str = "Media not found!";

//
// ──────────────────────────────────────────────────────────
// Outcomes & errors
// ──────────────────────────────────────────────────────────
//

/// A template name plus the fully built context to render it with.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page {
    #[schema(example = "portfolios/skills/skills.html")]
    pub template: String,
    #[schema(value_type = Object)]
    pub context: PageContext,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Rendered(Page),
    Redirect(String),
    /// The form was rejected; re-render with the entered data and errors.
    ValidationFailed { page: Page, errors: FormErrors },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CrudError {
    #[error("{0}")]
    NotFound(String),

    #[error("Empty list and allow_empty is false")]
    EmptyList,

    #[error("You do not have permission to modify this record")]
    Forbidden,

    #[error("Action '{0}' is not supported here")]
    UnsupportedAction(Action),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error(transparent)]
    Route(#[from] RouteError),
}

impl From<ResolveError> for CrudError {
    fn from(e: ResolveError) -> Self {
        CrudError::NotFound(e.to_string())
    }
}

//
// ──────────────────────────────────────────────────────────
// Configuration
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    pub slug: Option<String>,
    pub page: Option<u32>,
    /// Caller-supplied context values; they win over everything else.
    pub overrides: PageContext,
}

impl ViewRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_page(mut self, page: Option<u32>) -> Self {
        self.page = page;
        self
    }

    pub fn with_overrides(mut self, overrides: PageContext) -> Self {
        self.overrides = overrides;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub template: &'static str,
    /// Named route to redirect to after a successful write.
    pub success_route: &'static str,
    pub lookup_field: &'static str,
    /// Substitute the saved record's lookup value into the success route.
    pub redirect_with_lookup: bool,
    pub paginate_by: Option<u32>,
    pub allow_empty: bool,
    pub messages: MessageTemplates,
}

impl ControllerConfig {
    pub fn new(template: &'static str, success_route: &'static str) -> Self {
        Self {
            template,
            success_route,
            lookup_field: "slug",
            redirect_with_lookup: false,
            paginate_by: None,
            allow_empty: true,
            messages: MessageTemplates::default(),
        }
    }

    pub fn paginate_by(mut self, per_page: u32) -> Self {
        self.paginate_by = Some(per_page.max(1));
        self
    }

    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    pub fn messages(mut self, messages: MessageTemplates) -> Self {
        self.messages = messages;
        self
    }

    pub fn redirect_with_lookup(mut self) -> Self {
        self.redirect_with_lookup = true;
        self
    }
}

/// Child media handling for resources that accept uploads.
#[derive(Clone)]
pub struct MediaBinding {
    pub store: Arc<dyn MediaStore>,
    pub policy: UploadPolicy,
    pub target: AttachmentTarget,
    pub media_prefix: String,
}

#[derive(Serialize)]
struct FormState<'a, I: Serialize> {
    data: &'a I,
    errors: &'a FormErrors,
}

#[derive(Serialize)]
struct MediaView<'a> {
    #[serde(flatten)]
    media: &'a MediaAttachment,
    url: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Controller
// ──────────────────────────────────────────────────────────
//

/// List, detail, create and update for one resource type.
pub struct ResourceController<R: Resource> {
    config: ControllerConfig,
    store: Arc<dyn RecordStore<R>>,
    media: Option<MediaBinding>,
    context: ContextBuilder,
    urls: Arc<UrlReverser>,
}

impl<R: Resource> ResourceController<R> {
    pub fn new(
        config: ControllerConfig,
        store: Arc<dyn RecordStore<R>>,
        context: ContextBuilder,
        urls: Arc<UrlReverser>,
    ) -> Self {
        Self {
            config,
            store,
            media: None,
            context,
            urls,
        }
    }

    pub fn with_media(mut self, media: MediaBinding) -> Self {
        self.media = Some(media);
        self
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Read branch: render the page for `action`.
    pub async fn get(&self, action: Action, request: ViewRequest) -> Result<Outcome, CrudError> {
        if action == Action::Delete {
            return Err(CrudError::UnsupportedAction(action));
        }

        let object = self.entry_object(action, request.slug.as_deref()).await?;
        let collection = if action.shows_collection() {
            Some(self.load_collection(request.page).await?)
        } else {
            None
        };

        let page = match action {
            Action::Create => {
                let blank = R::Input::default();
                let errors = FormErrors::new();
                let form = Some(FormState {
                    data: &blank,
                    errors: &errors,
                });
                self.render(action, None, collection.as_ref(), form, request.overrides)
                    .await
            }
            Action::Update => {
                let input = object.as_ref().map(R::to_input);
                let errors = FormErrors::new();
                let form = input.as_ref().map(|data| FormState {
                    data,
                    errors: &errors,
                });
                self.render(action, object.as_ref(), None, form, request.overrides)
                    .await
            }
            _ => {
                self.render::<R::Input>(
                    action,
                    object.as_ref(),
                    collection.as_ref(),
                    None,
                    request.overrides,
                )
                .await
            }
        };

        Ok(Outcome::Rendered(page))
    }

    /// Write branch: validate, persist, attach uploads, then redirect.
    pub async fn post(
        &self,
        action: Action,
        request: ViewRequest,
        actor: UserId,
        input: R::Input,
        sink: &mut dyn NotificationSink,
    ) -> Result<Outcome, CrudError> {
        if !matches!(action, Action::Create | Action::Update) {
            return Err(CrudError::UnsupportedAction(action));
        }

        let object = self.entry_object(action, request.slug.as_deref()).await?;
        if let Some(current) = &object {
            if current.owner() != actor {
                warn!(
                    model = R::MODEL_NAME,
                    slug = %current.slug(),
                    actor = %actor,
                    "Rejected write to a record owned by another user"
                );
                return Err(CrudError::Forbidden);
            }
        }

        let mut errors = FormErrors::new();
        let draft = match R::clean(&input) {
            Ok(draft) => Some(draft),
            Err(form_errors) => {
                errors.merge(form_errors);
                None
            }
        };
        self.check_uploads(R::uploads(&input), &mut errors);

        let draft = match draft {
            Some(draft) if errors.is_empty() => draft,
            _ => {
                return Ok(self
                    .invalid(action, object.as_ref(), &request, &input, errors, sink)
                    .await)
            }
        };

        let rule = R::unique_rule(&draft);
        if let Some(rule) = &rule {
            let exclude = object.as_ref().map(R::id);
            match self.store.has_duplicate(actor, &rule.value, exclude).await {
                Ok(false) => {}
                Ok(true) => {
                    errors.add(rule.field, rule.message);
                    return Ok(self
                        .invalid(action, object.as_ref(), &request, &input, errors, sink)
                        .await);
                }
                Err(e) => {
                    error!(
                        model = R::MODEL_NAME,
                        error = %e,
                        "Uniqueness check failed"
                    );
                    errors.add_non_field(persist_failure_message(R::MODEL_NAME));
                    return Ok(self
                        .invalid(action, object.as_ref(), &request, &input, errors, sink)
                        .await);
                }
            }
        }

        let saved = match &object {
            None => {
                let slug = unique_slug(R::slug_source(&draft));
                self.store.insert(actor, slug, draft).await
            }
            Some(current) => self.store.update(current, draft).await,
        };

        let saved = match saved {
            Ok(saved) => saved,
            Err(StoreError::Duplicate(detail)) => {
                warn!(model = R::MODEL_NAME, detail = %detail, "Duplicate rejected by store");
                match &rule {
                    Some(rule) => errors.add(rule.field, rule.message),
                    None => errors.add_non_field(persist_failure_message(R::MODEL_NAME)),
                }
                return Ok(self
                    .invalid(action, object.as_ref(), &request, &input, errors, sink)
                    .await);
            }
            Err(e) => {
                error!(
                    model = R::MODEL_NAME,
                    action = %action,
                    error = %e,
                    "Failed to persist record"
                );
                errors.add_non_field(persist_failure_message(R::MODEL_NAME));
                return Ok(self
                    .invalid(action, object.as_ref(), &request, &input, errors, sink)
                    .await);
            }
        };

        info!(
            model = R::MODEL_NAME,
            action = %action,
            slug = %saved.slug(),
            "Record saved"
        );

        self.attach_uploads(&saved, R::uploads(&input), sink).await;

        sink.push(Notification::success(
            self.config.messages.success_message(R::MODEL_NAME, Some(action)),
        ));

        Ok(Outcome::Redirect(self.success_url(Some(&saved))?))
    }

    /// Deletes every media attachment carrying `slug`. Attachments whose
    /// parent is gone are invisible; a parent owned by someone else makes
    /// the whole request `Forbidden`.
    pub async fn delete_media(
        &self,
        actor: UserId,
        slug: &str,
        sink: &mut dyn NotificationSink,
    ) -> Result<Outcome, CrudError> {
        let Some(media) = &self.media else {
            return Err(CrudError::UnsupportedAction(Action::Delete));
        };

        let found = match media.store.find_by_slug(slug).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!(slug = %slug, error = %e, "Media lookup failed, treating as not found");
                Vec::new()
            }
        };

        let mut matches = Vec::with_capacity(found.len());
        let mut parents: Vec<(Uuid, bool)> = Vec::new();
        for attachment in found {
            let known = parents
                .iter()
                .find(|(id, _)| *id == attachment.parent_id)
                .map(|(_, visible)| *visible);
            let visible = match known {
                Some(visible) => visible,
                None => {
                    let visible = self.media_parent_visible(actor, attachment.parent_id).await?;
                    parents.push((attachment.parent_id, visible));
                    visible
                }
            };
            if visible {
                matches.push(attachment);
            }
        }

        if matches.is_empty() {
            sink.push(Notification::error(MEDIA_NOT_FOUND_MESSAGE));
            return Err(CrudError::NotFound(MEDIA_NOT_FOUND_MESSAGE.to_string()));
        }

        let ids: Vec<Uuid> = matches.iter().map(|m| m.id).collect();
        match media.store.delete_many(&ids).await {
            Ok(removed) => {
                info!(slug = %slug, removed, "Media deleted");
                sink.push(Notification::success(MEDIA_DELETED_MESSAGE));
                Ok(Outcome::Redirect(self.success_url(None)?))
            }
            Err(e) => {
                error!(slug = %slug, error = %e, "Failed to delete media");
                sink.push(Notification::error(
                    self.config.messages.error_message("Media", Some(Action::Delete)),
                ));
                Err(CrudError::StoreUnavailable(e.to_string()))
            }
        }
    }

    //
    // ── helpers ──────────────────────────────────────────────
    //

    /// Whether the parent record exists. Errors with `Forbidden` when it
    /// belongs to another user.
    async fn media_parent_visible(&self, actor: UserId, parent_id: Uuid) -> Result<bool, CrudError> {
        match self.store.find_by_id(parent_id).await {
            Ok(Some(parent)) if parent.owner() != actor => {
                warn!(
                    model = R::MODEL_NAME,
                    slug = %parent.slug(),
                    actor = %actor,
                    "Rejected media delete on a record owned by another user"
                );
                Err(CrudError::Forbidden)
            }
            Ok(Some(_)) => Ok(true),
            Ok(None) => Ok(false),
            Err(e) => {
                warn!(
                    parent_id = %parent_id,
                    error = %e,
                    "Media parent lookup failed, hiding its media"
                );
                Ok(false)
            }
        }
    }

    /// Detail and update need their record; a missing or unresolvable slug
    /// is a 404 rather than an implicit create.
    async fn entry_object(&self, action: Action, slug: Option<&str>) -> Result<Option<R>, CrudError> {
        if !action.targets_object() {
            return Ok(None);
        }

        let resolver = SlugResolver::new(self.store.as_ref(), R::CONTEXT_NAME);
        match resolver.resolve_optional::<R>(slug).await {
            Some(object) => Ok(Some(object)),
            None => Err(CrudError::NotFound(format!(
                "No {} matches the given query",
                R::MODEL_NAME
            ))),
        }
    }

    async fn load_collection(&self, page: Option<u32>) -> Result<PageResult<R>, CrudError> {
        let request = self.config.paginate_by.map(|per_page| PageRequest {
            page: page.unwrap_or(1).max(1),
            per_page,
        });

        let result = self.store.list(request).await.map_err(|e| {
            error!(model = R::MODEL_NAME, error = %e, "Failed to load collection");
            CrudError::StoreUnavailable(e.to_string())
        })?;

        if result.total == 0 && !self.config.allow_empty {
            return Err(CrudError::EmptyList);
        }

        if let Some(request) = request {
            if request.page > 1 && request.page > result.num_pages() {
                return Err(CrudError::NotFound("Invalid page".to_string()));
            }
        }

        Ok(result)
    }

    fn check_uploads(&self, uploads: &[UploadedFile], errors: &mut FormErrors) {
        if uploads.is_empty() {
            return;
        }

        let Some(media) = &self.media else {
            errors.add("media", "Attachments are not accepted here.");
            return;
        };

        for file in uploads {
            if let Err(violation) = media.policy.validate(file) {
                errors.add("media", format!("{}: {}", file.original_name, violation));
            }
        }
    }

    /// The parent is already saved; a failed attachment is reported but does
    /// not undo it.
    async fn attach_uploads(&self, saved: &R, uploads: &[UploadedFile], sink: &mut dyn NotificationSink) {
        let Some(media) = &self.media else {
            return;
        };

        for file in uploads {
            let stem = file
                .original_name
                .rsplit_once('.')
                .map(|(stem, _)| stem)
                .unwrap_or(&file.original_name);

            let new_media = NewMediaAttachment {
                slug: unique_slug(stem),
                target: media.target,
                parent_id: saved.id(),
                file: file.clone(),
            };

            if let Err(e) = media.store.attach(new_media).await {
                error!(
                    parent = %saved.slug(),
                    file = %file.original_name,
                    error = %e,
                    "Failed to attach media"
                );
                sink.push(Notification::error(format!(
                    "Could not attach {}",
                    file.original_name
                )));
            }
        }
    }

    async fn invalid(
        &self,
        action: Action,
        object: Option<&R>,
        request: &ViewRequest,
        input: &R::Input,
        errors: FormErrors,
        sink: &mut dyn NotificationSink,
    ) -> Outcome {
        sink.push(Notification::error(
            self.config.messages.error_message(R::MODEL_NAME, Some(action)),
        ));

        let collection = if action.shows_collection() {
            match self.load_collection(request.page).await {
                Ok(collection) => Some(collection),
                Err(e) => {
                    warn!(model = R::MODEL_NAME, error = %e, "Collection unavailable on re-render");
                    None
                }
            }
        } else {
            None
        };

        let form = Some(FormState {
            data: input,
            errors: &errors,
        });
        let page = self
            .render(action, object, collection.as_ref(), form, request.overrides.clone())
            .await;

        Outcome::ValidationFailed { page, errors }
    }

    async fn render<I: Serialize>(
        &self,
        action: Action,
        object: Option<&R>,
        collection: Option<&PageResult<R>>,
        form: Option<FormState<'_, I>>,
        mut overrides: PageContext,
    ) -> Page {
        // Caller overrides win over the view flag and action.
        overrides
            .entry(action.view_flag())
            .or_insert(Value::Bool(true));
        overrides
            .entry("action")
            .or_insert_with(|| Value::String(action.to_string()));

        let base = self.base_context(object, collection, form).await;
        let context = self
            .context
            .build(base, R::MODEL_NAME, Some(action), overrides);

        Page {
            template: self.config.template.to_string(),
            context,
        }
    }

    async fn base_context<I: Serialize>(
        &self,
        object: Option<&R>,
        collection: Option<&PageResult<R>>,
        form: Option<FormState<'_, I>>,
    ) -> Result<PageContext, ContextError> {
        let mut context = PageContext::new();
        context.insert(
            "model_name".to_string(),
            Value::String(R::MODEL_NAME.to_string()),
        );

        if let Some(object) = object {
            let value = serde_json::to_value(object)?;
            context.insert("object".to_string(), value.clone());
            context.insert(R::CONTEXT_NAME.to_string(), value);

            if let Some(media) = &self.media {
                let attachments = match media.store.list_for_parent(media.target, object.id()).await {
                    Ok(attachments) => attachments,
                    Err(e) => {
                        warn!(parent = %object.slug(), error = %e, "Media listing failed");
                        Vec::new()
                    }
                };
                let views: Vec<MediaView> = attachments
                    .iter()
                    .map(|m| MediaView {
                        media: m,
                        url: m.url(&media.media_prefix),
                    })
                    .collect();
                context.insert("media".to_string(), serde_json::to_value(views)?);
            }
        }

        if let Some(collection) = collection {
            let num_pages = collection.num_pages();
            context.insert(
                "object_list".to_string(),
                serde_json::to_value(&collection.items)?,
            );
            context.insert(
                "page_obj".to_string(),
                json!({
                    "number": collection.page,
                    "per_page": collection.per_page,
                    "total": collection.total,
                    "num_pages": num_pages,
                    "has_next": collection.page < num_pages,
                    "has_previous": collection.page > 1,
                }),
            );
            context.insert(
                "is_paginated".to_string(),
                Value::Bool(self.config.paginate_by.is_some() && num_pages > 1),
            );
        }

        if let Some(form) = form {
            context.insert("form".to_string(), serde_json::to_value(form)?);
        }

        Ok(context)
    }

    fn success_url(&self, saved: Option<&R>) -> Result<String, CrudError> {
        let url = match saved {
            Some(record) if self.config.redirect_with_lookup => self.urls.reverse(
                self.config.success_route,
                &[(self.config.lookup_field, record.slug())],
            )?,
            _ => self.urls.reverse(self.config.success_route, &[])?,
        };
        Ok(url)
    }
}

fn persist_failure_message(model_name: &str) -> String {
    format!("Could not save {model_name}. Please try again.")
}
