use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::ActiveUser;
use crate::shared::api::page_response;
use crate::shared::crud::Notification;
use crate::shared::flash::Flash;
use crate::AppState;
use actix_web::{post, web, Responder};
use tracing::info;

/// Delete experience media
///
/// Removes every attachment carrying the slug and redirects to the
/// experiences page. Only the owner of the parent experience may do this;
/// the parent itself is left untouched.
#[utoipa::path(
    post,
    path = "/portfolio/professional-experiences/media/{slug}/delete",
    tag = "professional-experiences",
    security(("bearer_auth" = [])),
    params(
        ("slug" = String, Path, description = "Media slug")
    ),
    responses(
        (status = 303, description = "Deleted, redirect to the experiences page"),
        (status = 401, description = "Missing or invalid token, or inactive account", body = ErrorResponse),
        (status = 403, description = "Parent experience owned by another user", body = ErrorResponse),
        (status = 404, description = "No media with this slug", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/portfolio/professional-experiences/media/{slug}/delete")]
pub async fn delete_experience_media_handler(
    user: ActiveUser,
    path: web::Path<String>,
    flash: Flash,
    data: web::Data<AppState>,
) -> impl Responder {
    let slug = path.into_inner();
    info!(user_id = %user.user_id, slug = %slug, "Media delete requested");

    let mut notifications: Vec<Notification> = Vec::new();
    let result = data
        .experiences
        .delete_media(user.user_id, &slug, &mut notifications)
        .await;

    page_response(result, notifications, &flash)
}
