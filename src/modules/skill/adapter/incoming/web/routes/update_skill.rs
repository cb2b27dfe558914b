use crate::api::schemas::{ErrorResponse, RejectedFormResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{ActiveUser, AuthenticatedUser};
use crate::modules::skill::application::domain::entities::SkillInput;
use crate::shared::api::page_response;
use crate::shared::crud::{Action, Notification, Page, ViewRequest};
use crate::shared::flash::Flash;
use crate::AppState;
use actix_web::{get, post, web, Responder};

/// Skill edit form
///
/// Renders the form pre-filled with the stored skill.
#[utoipa::path(
    get,
    path = "/portfolio/skills/{slug}/update",
    tag = "skills",
    security(("bearer_auth" = [])),
    params(
        ("slug" = String, Path, description = "Skill slug, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Pre-filled form", body = inline(SuccessResponse<Page>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No skill with this slug", body = ErrorResponse),
    )
)]
#[get("/portfolio/skills/{slug}/update")]
pub async fn update_skill_form_handler(
    _user: AuthenticatedUser,
    path: web::Path<String>,
    flash: Flash,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = ViewRequest::new().with_slug(path.into_inner());
    let result = data.skills.get(Action::Update, request).await;

    page_response(result, Vec::new(), &flash)
}

/// Update a skill
///
/// Only the owner may update. The slug stays as first generated.
#[utoipa::path(
    post,
    path = "/portfolio/skills/{slug}/update",
    tag = "skills",
    security(("bearer_auth" = [])),
    params(
        ("slug" = String, Path, description = "Skill slug, matched case-insensitively")
    ),
    request_body = SkillInput,
    responses(
        (status = 303, description = "Updated, redirect to the skills page"),
        (status = 401, description = "Missing or invalid token, or inactive account", body = ErrorResponse),
        (status = 403, description = "Skill belongs to another user", body = ErrorResponse),
        (status = 404, description = "No skill with this slug", body = ErrorResponse),
        (status = 422, description = "Form rejected, page re-rendered", body = RejectedFormResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/portfolio/skills/{slug}/update")]
pub async fn update_skill_handler(
    user: ActiveUser,
    path: web::Path<String>,
    flash: Flash,
    data: web::Data<AppState>,
    req: web::Json<SkillInput>,
) -> impl Responder {
    let mut notifications: Vec<Notification> = Vec::new();
    let result = data
        .skills
        .post(
            Action::Update,
            ViewRequest::new().with_slug(path.into_inner()),
            user.user_id,
            req.into_inner(),
            &mut notifications,
        )
        .await;

    page_response(result, notifications, &flash)
}
