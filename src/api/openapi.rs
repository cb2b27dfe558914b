use crate::api::schemas::{ErrorDetail, ErrorResponse, RejectedFormResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

// Auth
use crate::auth::adapter::incoming::web::routes::{
    CurrentExperience, LoginRequestDto, LoginResponse, LoginUserInfo, RegisterUserRequest,
    RegisteredUser, UserProfileResponse,
};

// Portfolio
use crate::modules::experience::application::domain::entities::{
    JobType, ProfessionalExperienceInput,
};
use crate::modules::skill::application::domain::entities::SkillInput;
use crate::multimedia::application::domain::entities::UploadedFile;
use crate::shared::crud::Page;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio CMS API",
        version = "1.0.0",
        description = "API documentation for the Portfolio Content Management System",
        contact(
            name = "API Support",
            email = "support@example.com"
        )
    ),
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,

        // User endpoints
        crate::auth::adapter::incoming::web::routes::fetch_user_handler,
        crate::auth::adapter::incoming::web::routes::soft_delete_user_handler,

        // Skill endpoints
        crate::modules::skill::adapter::incoming::web::routes::list_skills_handler,
        crate::modules::skill::adapter::incoming::web::routes::create_skill_form_handler,
        crate::modules::skill::adapter::incoming::web::routes::create_skill_handler,
        crate::modules::skill::adapter::incoming::web::routes::get_skill_handler,
        crate::modules::skill::adapter::incoming::web::routes::update_skill_form_handler,
        crate::modules::skill::adapter::incoming::web::routes::update_skill_handler,

        // Professional experience endpoints
        crate::modules::experience::adapter::incoming::web::routes::list_experiences_handler,
        crate::modules::experience::adapter::incoming::web::routes::create_experience_form_handler,
        crate::modules::experience::adapter::incoming::web::routes::create_experience_handler,
        crate::modules::experience::adapter::incoming::web::routes::get_experience_handler,
        crate::modules::experience::adapter::incoming::web::routes::update_experience_form_handler,
        crate::modules::experience::adapter::incoming::web::routes::update_experience_handler,
        crate::modules::experience::adapter::incoming::web::routes::delete_experience_media_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<Page>,
            ErrorResponse,
            RejectedFormResponse,
            ErrorDetail,
            Page,

            // Auth DTOs
            RegisterUserRequest,
            RegisteredUser,
            LoginRequestDto,
            LoginResponse,
            LoginUserInfo,
            UserProfileResponse,
            CurrentExperience,

            // Portfolio forms
            SkillInput,
            ProfessionalExperienceInput,
            JobType,
            UploadedFile
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "skills", description = "Skill management endpoints"),
        (name = "professional-experiences", description = "Professional experience and media endpoints"),
        (name = "health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            )
        }
    }
}
