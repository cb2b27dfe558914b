pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::auth;
pub use modules::multimedia;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::JwtTokenService;
use crate::auth::adapter::outgoing::security::Argon2Hasher;
use crate::auth::adapter::outgoing::{UserQueryPostgres, UserRepositoryPostgres};
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::auth::application::use_cases::{
    create_user::{CreateUserUseCase, ICreateUserUseCase},
    fetch_profile::{FetchUserProfileService, FetchUserProfileUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    soft_delete_user::{ISoftDeleteUserUseCase, SoftDeleteUserUseCase},
};
use crate::modules::experience::adapter::outgoing::ExperienceStorePostgres;
use crate::modules::experience::application::controller as experience_controller;
use crate::modules::experience::application::domain::entities::ProfessionalExperience;
use crate::modules::experience::application::use_cases::current_experience::{
    CurrentExperienceService, ICurrentExperienceUseCase,
};
use crate::modules::skill::adapter::outgoing::SkillStorePostgres;
use crate::modules::skill::application::controller as skill_controller;
use crate::modules::skill::application::domain::entities::Skill;
use crate::multimedia::adapter::outgoing::MediaStorePostgres;
use crate::shared::api::{custom_json_config, custom_query_config};
use crate::shared::config::{load_dotenv, AppConfig, MediaUrls};
use crate::shared::crud::{ContextBuilder, ResourceController, UrlReverser};
use crate::shared::flash::session_middleware;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub fetch_user_profile_use_case: Arc<dyn FetchUserProfileUseCase + Send + Sync>,
    pub soft_delete_user_use_case: Arc<dyn ISoftDeleteUserUseCase + Send + Sync>,
    pub current_experience_use_case: Arc<dyn ICurrentExperienceUseCase + Send + Sync>,
    pub skills: Arc<ResourceController<Skill>>,
    pub experiences: Arc<ResourceController<ProfessionalExperience>>,
    pub media_urls: MediaUrls,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    let rust_env = load_dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(environment = %rust_env, "Starting application...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt).await.map_err(|e| {
        error!(error = %e, "Failed to connect to database");
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
    })?;
    let db_arc = Arc::new(conn);

    // Auth
    let jwt_service = JwtTokenService::new(config.jwt.clone());
    let password_hasher = Argon2Hasher::new(config.argon2).map_err(|e| {
        error!(error = %e, "Invalid Argon2 parameters");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));

    let create_user_use_case = CreateUserUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        Arc::new(password_hasher.clone()),
    );
    let login_user_use_case = LoginUserUseCase::new(
        Arc::new(user_query.clone()),
        Arc::new(user_repo.clone()),
        Arc::new(password_hasher),
        Arc::new(jwt_service.clone()),
    );
    let fetch_user_profile_use_case = FetchUserProfileService::new(user_query);
    let soft_delete_user_use_case = SoftDeleteUserUseCase::new(user_repo);

    // Portfolio resources
    let urls = Arc::new(experience_controller::register_routes(
        skill_controller::register_routes(UrlReverser::new()),
    ));
    let context = ContextBuilder::new(config.site.clone());

    let skills = skill_controller::build_controller(
        Arc::new(SkillStorePostgres::new(Arc::clone(&db_arc))),
        context.clone(),
        Arc::clone(&urls),
    );
    let experience_store = Arc::new(ExperienceStorePostgres::new(Arc::clone(&db_arc)));
    let current_experience_use_case = CurrentExperienceService::new(experience_store.clone());
    let experiences = experience_controller::build_controller(
        experience_store,
        Arc::new(MediaStorePostgres::new(Arc::clone(&db_arc))),
        config.upload_policy.clone(),
        &config.media_urls.media_url,
        context,
        urls,
    );

    let state = AppState {
        create_user_use_case: Arc::new(create_user_use_case),
        login_user_use_case: Arc::new(login_user_use_case),
        fetch_user_profile_use_case: Arc::new(fetch_user_profile_use_case),
        soft_delete_user_use_case: Arc::new(soft_delete_user_use_case),
        current_experience_use_case: Arc::new(current_experience_use_case),
        skills: Arc::new(skills),
        experiences: Arc::new(experiences),
        media_urls: config.media_urls.clone(),
    };

    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let session_key = config.session_key.clone();
    let secure_cookies = config.is_production();
    let db_for_server = Arc::clone(&db_arc);
    let openapi = ApiDoc::openapi();

    let server_url = config.server_url();
    info!(address = %server_url, "Server listening");

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(session_key.clone(), secure_cookies))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::auth::adapter::incoming::web::routes as auth_routes;
    use crate::modules::experience::adapter::incoming::web::routes as experience_routes;
    use crate::modules::skill::adapter::incoming::web::routes as skill_routes;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(auth_routes::register_user_handler);
    cfg.service(auth_routes::login_user_handler);
    cfg.service(auth_routes::soft_delete_user_handler);
    cfg.service(auth_routes::fetch_user_handler);
    // Skills (create before {slug})
    cfg.service(skill_routes::list_skills_handler);
    cfg.service(skill_routes::create_skill_form_handler);
    cfg.service(skill_routes::create_skill_handler);
    cfg.service(skill_routes::get_skill_handler);
    cfg.service(skill_routes::update_skill_form_handler);
    cfg.service(skill_routes::update_skill_handler);
    // Professional experiences
    cfg.service(experience_routes::list_experiences_handler);
    cfg.service(experience_routes::create_experience_form_handler);
    cfg.service(experience_routes::create_experience_handler);
    cfg.service(experience_routes::delete_experience_media_handler);
    cfg.service(experience_routes::get_experience_handler);
    cfg.service(experience_routes::update_experience_form_handler);
    cfg.service(experience_routes::update_experience_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
        std::process::exit(1);
    }
}
