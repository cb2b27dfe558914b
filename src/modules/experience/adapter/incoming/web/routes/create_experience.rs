use crate::api::schemas::{ErrorResponse, RejectedFormResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{ActiveUser, AuthenticatedUser};
use crate::modules::experience::application::domain::entities::ProfessionalExperienceInput;
use crate::shared::api::{page_response, PageQuery};
use crate::shared::crud::{Action, Notification, Page, ViewRequest};
use crate::shared::flash::Flash;
use crate::AppState;
use actix_web::{get, post, web, Responder};

/// Professional experience form
#[utoipa::path(
    get,
    path = "/portfolio/professional-experiences/create",
    tag = "professional-experiences",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Blank form", body = inline(SuccessResponse<Page>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[get("/portfolio/professional-experiences/create")]
pub async fn create_experience_form_handler(
    _user: AuthenticatedUser,
    query: web::Query<PageQuery>,
    flash: Flash,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = ViewRequest::new().with_page(query.page);
    let result = data.experiences.get(Action::Create, request).await;

    page_response(result, Vec::new(), &flash)
}

/// Create a professional experience
///
/// Files listed under `media` must already be in object storage; each one
/// becomes a media attachment of the new experience.
#[utoipa::path(
    post,
    path = "/portfolio/professional-experiences/create",
    tag = "professional-experiences",
    security(("bearer_auth" = [])),
    request_body = ProfessionalExperienceInput,
    responses(
        (status = 303, description = "Created, redirect to the experiences page"),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or inactive account", body = ErrorResponse),
        (status = 422, description = "Form rejected, page re-rendered", body = RejectedFormResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/portfolio/professional-experiences/create")]
pub async fn create_experience_handler(
    user: ActiveUser,
    flash: Flash,
    data: web::Data<AppState>,
    req: web::Json<ProfessionalExperienceInput>,
) -> impl Responder {
    let mut notifications: Vec<Notification> = Vec::new();
    let result = data
        .experiences
        .post(
            Action::Create,
            ViewRequest::new(),
            user.user_id,
            req.into_inner(),
            &mut notifications,
        )
        .await;

    page_response(result, notifications, &flash)
}
