use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::use_cases::soft_delete_user::SoftDeleteUserError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{delete, web, Responder};
use tracing::{error, warn};

/// Delete own account
///
/// Soft deletes the account together with its skills and professional
/// experiences.
#[utoipa::path(
    delete,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Account already gone", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/api/users/me")]
pub async fn soft_delete_user_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.soft_delete_user_use_case.execute(user.user_id).await {
        Ok(()) => ApiResponse::no_content(),

        Err(SoftDeleteUserError::UserNotFound) => {
            warn!(user_id = %user.user_id, "Soft delete for missing user");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }

        Err(SoftDeleteUserError::RepositoryError(e)) => {
            error!(user_id = %user.user_id, error = %e, "Database error soft deleting user");
            ApiResponse::internal_error()
        }
    }
}
