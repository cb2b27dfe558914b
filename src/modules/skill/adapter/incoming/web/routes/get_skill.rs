use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::page_response;
use crate::shared::crud::{Action, Page, ViewRequest};
use crate::shared::flash::Flash;
use crate::AppState;
use actix_web::{get, web, Responder};

/// Skill detail
#[utoipa::path(
    get,
    path = "/portfolio/skills/{slug}",
    tag = "skills",
    security(("bearer_auth" = [])),
    params(
        ("slug" = String, Path, description = "Skill slug, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Skill page", body = inline(SuccessResponse<Page>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No skill with this slug", body = ErrorResponse),
    )
)]
#[get("/portfolio/skills/{slug}")]
pub async fn get_skill_handler(
    _user: AuthenticatedUser,
    path: web::Path<String>,
    flash: Flash,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = ViewRequest::new().with_slug(path.into_inner());
    let result = data.skills.get(Action::Detail, request).await;

    page_response(result, Vec::new(), &flash)
}
