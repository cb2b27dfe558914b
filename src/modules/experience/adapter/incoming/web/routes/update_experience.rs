use crate::api::schemas::{ErrorResponse, RejectedFormResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{ActiveUser, AuthenticatedUser};
use crate::modules::experience::application::domain::entities::ProfessionalExperienceInput;
use crate::shared::api::page_response;
use crate::shared::crud::{Action, Notification, Page, ViewRequest};
use crate::shared::flash::Flash;
use crate::AppState;
use actix_web::{get, post, web, Responder};

/// Professional experience edit form
#[utoipa::path(
    get,
    path = "/portfolio/professional-experiences/{slug}/update",
    tag = "professional-experiences",
    security(("bearer_auth" = [])),
    params(
        ("slug" = String, Path, description = "Experience slug, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Pre-filled form", body = inline(SuccessResponse<Page>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No experience with this slug", body = ErrorResponse),
    )
)]
#[get("/portfolio/professional-experiences/{slug}/update")]
pub async fn update_experience_form_handler(
    _user: AuthenticatedUser,
    path: web::Path<String>,
    flash: Flash,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = ViewRequest::new().with_slug(path.into_inner());
    let result = data.experiences.get(Action::Update, request).await;

    page_response(result, Vec::new(), &flash)
}

/// Update a professional experience
///
/// New files under `media` are attached; existing attachments are kept.
#[utoipa::path(
    post,
    path = "/portfolio/professional-experiences/{slug}/update",
    tag = "professional-experiences",
    security(("bearer_auth" = [])),
    params(
        ("slug" = String, Path, description = "Experience slug, matched case-insensitively")
    ),
    request_body = ProfessionalExperienceInput,
    responses(
        (status = 303, description = "Updated, redirect to the experiences page"),
        (status = 401, description = "Missing or invalid token, or inactive account", body = ErrorResponse),
        (status = 403, description = "Experience belongs to another user", body = ErrorResponse),
        (status = 404, description = "No experience with this slug", body = ErrorResponse),
        (status = 422, description = "Form rejected, page re-rendered", body = RejectedFormResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/portfolio/professional-experiences/{slug}/update")]
pub async fn update_experience_handler(
    user: ActiveUser,
    path: web::Path<String>,
    flash: Flash,
    data: web::Data<AppState>,
    req: web::Json<ProfessionalExperienceInput>,
) -> impl Responder {
    let mut notifications: Vec<Notification> = Vec::new();
    let result = data
        .experiences
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
