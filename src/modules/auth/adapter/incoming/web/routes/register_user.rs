use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::use_cases::create_user::{CreateUserError, CreateUserInput};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    #[schema(example = "jane@example.com")]
    pub email: String,

    #[schema(example = "SecurePass123!")]
    pub password: String,

    /// Derived from the email when omitted
    #[schema(example = "jane")]
    pub username: Option<String>,

    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RegisteredUser {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "jane")]
    pub username: String,
    #[schema(example = "0b6b0c1e-9f4e-4a0e-8f2a-6c1d3e5f7a9b")]
    pub slug: String,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Account created", body = inline(SuccessResponse<RegisteredUser>)),
        (status = 400, description = "Invalid email, password or username", body = ErrorResponse),
        (status = 409, description = "Email or username already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let input = CreateUserInput {
        email: dto.email,
        password: dto.password,
        username: dto.username,
        name: dto.name,
        role: UserRole::Regular,
    };

    match data.create_user_use_case.execute(input).await {
        Ok(user) => {
            info!(user_id = %user.id, "User registered");
            ApiResponse::created(RegisteredUser {
                id: user.id.to_string(),
                email: user.email,
                username: user.username,
                slug: user.slug,
            })
        }
        Err(CreateUserError::InvalidEmail(msg)) => ApiResponse::bad_request("INVALID_EMAIL", &msg),
        Err(CreateUserError::InvalidPassword(msg)) => {
            ApiResponse::bad_request("INVALID_PASSWORD", &msg)
        }
        Err(CreateUserError::InvalidUsername(msg)) => {
            ApiResponse::bad_request("INVALID_USERNAME", &msg)
        }
        Err(CreateUserError::UserAlreadyExists) => {
            warn!("Registration rejected: account already exists");
            ApiResponse::conflict("USER_ALREADY_EXISTS", "Email or username is already taken")
        }
        Err(CreateUserError::HashingFailed(e)) => {
            error!(error = %e, "Password hashing failed");
            ApiResponse::internal_error()
        }
        Err(CreateUserError::RepositoryError(e)) => {
            error!(error = %e, "Failed to persist user");
            ApiResponse::internal_error()
        }
    }
}
