use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::{page_response, PageQuery};
use crate::shared::crud::{Action, Page, ViewRequest};
use crate::shared::flash::Flash;
use crate::AppState;
use actix_web::{get, web, Responder};

/// List skills
///
/// Renders the skills page with every skill, newest first.
#[utoipa::path(
    get,
    path = "/portfolio/skills",
    tag = "skills",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Skills page", body = inline(SuccessResponse<Page>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/portfolio/skills")]
pub async fn list_skills_handler(
    _user: AuthenticatedUser,
    query: web::Query<PageQuery>,
    flash: Flash,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = ViewRequest::new().with_page(query.page);
    let result = data.skills.get(Action::List, request).await;

    page_response(result, Vec::new(), &flash)
}
