use crate::api::schemas::{ErrorResponse, RejectedFormResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{ActiveUser, AuthenticatedUser};
use crate::modules::skill::application::domain::entities::SkillInput;
use crate::shared::api::{page_response, PageQuery};
use crate::shared::crud::{Action, Notification, Page, ViewRequest};
use crate::shared::flash::Flash;
use crate::AppState;
use actix_web::{get, post, web, Responder};

/// Skill form
///
/// Renders a blank skill form next to the current skills.
#[utoipa::path(
    get,
    path = "/portfolio/skills/create",
    tag = "skills",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Blank form", body = inline(SuccessResponse<Page>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[get("/portfolio/skills/create")]
pub async fn create_skill_form_handler(
    _user: AuthenticatedUser,
    query: web::Query<PageQuery>,
    flash: Flash,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = ViewRequest::new().with_page(query.page);
    let result = data.skills.get(Action::Create, request).await;

    page_response(result, Vec::new(), &flash)
}

/// Create a skill
///
/// Redirects to the skills page on success. A title the caller already
/// uses, in any letter case, re-renders the form with a field error.
#[utoipa::path(
    post,
    path = "/portfolio/skills/create",
    tag = "skills",
    security(("bearer_auth" = [])),
    request_body = SkillInput,
    responses(
        (status = 303, description = "Created, redirect to the skills page"),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or inactive account", body = ErrorResponse),
        (status = 422, description = "Form rejected, page re-rendered", body = RejectedFormResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/portfolio/skills/create")]
pub async fn create_skill_handler(
    user: ActiveUser,
    flash: Flash,
    data: web::Data<AppState>,
    req: web::Json<SkillInput>,
) -> impl Responder {
    let mut notifications: Vec<Notification> = Vec::new();
    let result = data
        .skills
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::cookie::Key;
    use actix_web::{http::header, http::StatusCode, test, App};
    use serde_json::json;
    use uuid::Uuid;

    use crate::auth::application::domain::entities::{User, UserId};
    use crate::auth::application::use_cases::fetch_profile::{
        FetchUserProfileError, FetchUserProfileUseCase,
    };
    use crate::modules::skill::application::domain::entities::Skill;
    use crate::shared::flash::session_middleware;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::test_helpers::{bearer_for, token_provider_data};
    use crate::tests::support::memory_store::InMemoryStore;

    #[actix_web::test]
    async fn test_create_skill_redirects_to_list() {
        let store = Arc::new(InMemoryStore::<Skill>::new());
        let owner = UserId::from(Uuid::new_v4());
        let app_state = TestAppStateBuilder::default()
            .with_skill_store(store.clone())
            .build();

        let app = test::init_service(
            App::new()
                .wrap(session_middleware(Key::generate(), false))
                .app_data(app_state)
                .app_data(token_provider_data())
                .service(create_skill_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/portfolio/skills/create")
            .insert_header(("Authorization", bearer_for(owner)))
            .set_json(json!({ "title": "Rust", "level": 90 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/portfolio/skills"
        );

        let saved = store.all();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "Rust");
        assert_eq!(saved[0].owner, owner);
        assert!(saved[0].slug.starts_with("rust-"));
    }

    #[actix_web::test]
    async fn test_create_skill_duplicate_title_any_case() {
        let store = Arc::new(InMemoryStore::<Skill>::new());
        let owner = UserId::from(Uuid::new_v4());
        let app_state = TestAppStateBuilder::default()
            .with_skill_store(store.clone())
            .build();

        let app = test::init_service(
            App::new()
                .wrap(session_middleware(Key::generate(), false))
                .app_data(app_state)
                .app_data(token_provider_data())
                .service(create_skill_handler),
        )
        .await;

        let first = test::TestRequest::post()
            .uri("/portfolio/skills/create")
            .insert_header(("Authorization", bearer_for(owner)))
            .set_json(json!({ "title": "Go" }))
            .to_request();
        let resp = test::call_service(&app, first).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let second = test::TestRequest::post()
            .uri("/portfolio/skills/create")
            .insert_header(("Authorization", bearer_for(owner)))
            .set_json(json!({ "title": "go" }))
            .to_request();
        let resp = test::call_service(&app, second).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(
            body["data"]["context"]["form"]["errors"]["fields"]["title"][0],
            "This skill already exists!"
        );
        assert_eq!(body["data"]["context"]["form"]["data"]["title"], "go");
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_create_skill_blank_title() {
        let store = Arc::new(InMemoryStore::<Skill>::new());
        let app_state = TestAppStateBuilder::default()
            .with_skill_store(store.clone())
            .build();

        let app = test::init_service(
            App::new()
                .wrap(session_middleware(Key::generate(), false))
                .app_data(app_state)
                .app_data(token_provider_data())
                .service(create_skill_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/portfolio/skills/create")
            .insert_header(("Authorization", bearer_for(UserId::from(Uuid::new_v4()))))
            .set_json(json!({ "title": "   ", "level": 140 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let fields = &body["data"]["context"]["form"]["errors"]["fields"];
        assert_eq!(fields["title"][0], "This field is required.");
        assert!(fields["level"].is_array());
        assert_eq!(store.len(), 0);
    }

    #[actix_web::test]
    async fn test_create_form_is_blank() {
        let app_state = TestAppStateBuilder::default().build();

        let app = test::init_service(
            App::new()
                .wrap(session_middleware(Key::generate(), false))
                .app_data(app_state)
                .app_data(token_provider_data())
                .service(create_skill_form_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/portfolio/skills/create")
            .insert_header(("Authorization", bearer_for(UserId::from(Uuid::new_v4()))))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["context"]["create_view"], true);
        assert_eq!(body["data"]["context"]["form"]["data"]["title"], "");
    }

    struct SoftDeletedOwner;

    #[async_trait::async_trait]
    impl FetchUserProfileUseCase for SoftDeletedOwner {
        async fn by_slug(&self, _slug: &str) -> Result<User, FetchUserProfileError> {
            Err(FetchUserProfileError::NotFound)
        }

        async fn by_id(&self, _user_id: UserId) -> Result<User, FetchUserProfileError> {
            Err(FetchUserProfileError::NotFound)
        }
    }

    #[actix_web::test]
    async fn test_create_skill_rejects_token_of_deleted_account() {
        let store = Arc::new(InMemoryStore::<Skill>::new());
        let app_state = TestAppStateBuilder::default()
            .with_skill_store(store.clone())
            .with_fetch_user_profile(SoftDeletedOwner)
            .build();

        let app = test::init_service(
            App::new()
                .wrap(session_middleware(Key::generate(), false))
                .app_data(app_state)
                .app_data(token_provider_data())
                .service(create_skill_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/portfolio/skills/create")
            .insert_header(("Authorization", bearer_for(UserId::from(Uuid::new_v4()))))
            .set_json(json!({ "title": "Rust" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(store.len(), 0);
    }
}
