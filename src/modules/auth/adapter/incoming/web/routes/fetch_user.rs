use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::domain::entities::User;
use crate::auth::application::use_cases::fetch_profile::FetchUserProfileError;
use crate::modules::experience::application::domain::entities::ProfessionalExperience;
use crate::shared::api::ApiResponse;
use crate::shared::config::MediaUrls;
use crate::AppState;
use actix_web::{get, web, Responder};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Public portfolio owner profile.
#[derive(Serialize, ToSchema)]
pub struct UserProfileResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    #[schema(example = "jane-doe")]
    pub slug: String,
    #[schema(example = "jane")]
    pub username: String,
    #[schema(example = "JD")]
    pub display_name: String,
    pub name: Option<String>,
    pub nick_name: Option<String>,
    #[schema(example = "Female")]
    pub gender: Option<String>,
    #[schema(example = "/static/icons/user/avatar-female.png")]
    pub avatar_url: String,
    pub website: Option<String>,
    pub contact: Option<String>,
    #[schema(example = "jane@example.com")]
    pub contact_email: String,
    pub address: Option<String>,
    pub about: Option<String>,
    pub date_joined: DateTime<Utc>,
    /// Ongoing role, or the latest one when nothing is ongoing
    pub current_experience: Option<CurrentExperience>,
}

#[derive(Serialize, ToSchema)]
pub struct CurrentExperience {
    #[schema(example = "acme-corp-1a2b3c4d")]
    pub slug: String,
    #[schema(example = "Acme Corp")]
    pub company: String,
    #[schema(example = "Backend Engineer")]
    pub designation: String,
    #[schema(example = "Full Time")]
    pub job_type: String,
    pub company_url: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub currently_working: bool,
}

impl From<ProfessionalExperience> for CurrentExperience {
    fn from(experience: ProfessionalExperience) -> Self {
        Self {
            job_type: experience.job_type.as_str().to_string(),
            slug: experience.slug,
            company: experience.company,
            designation: experience.designation,
            company_url: experience.company_url,
            start_date: experience.start_date,
            end_date: experience.end_date,
            currently_working: experience.currently_working,
        }
    }
}

impl UserProfileResponse {
    fn from_user(
        user: User,
        current_experience: Option<ProfessionalExperience>,
        urls: &MediaUrls,
    ) -> Self {
        Self {
            id: user.id.to_string(),
            display_name: user.display_name().to_string(),
            avatar_url: user.avatar_url(&urls.media_url, &urls.static_url),
            contact_email: user.contact_email().to_string(),
            gender: user.gender.map(|g| g.as_str().to_string()),
            slug: user.slug,
            username: user.username,
            name: user.name,
            nick_name: user.nick_name,
            website: user.website,
            contact: user.contact,
            address: user.address,
            about: user.about,
            date_joined: user.date_joined,
            current_experience: current_experience.map(CurrentExperience::from),
        }
    }
}

/// Fetch a public profile
///
/// Slugs match case-insensitively. The profile carries the owner's current
/// professional experience when there is one.
#[utoipa::path(
    get,
    path = "/api/users/{slug}",
    tag = "users",
    params(("slug" = String, Path, description = "Profile slug")),
    responses(
        (status = 200, description = "Profile found", body = inline(SuccessResponse<UserProfileResponse>)),
        (status = 404, description = "No active user with this slug", body = ErrorResponse),
    )
)]
#[get("/api/users/{slug}")]
pub async fn fetch_user_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let slug = path.into_inner();

    match data.fetch_user_profile_use_case.by_slug(&slug).await {
        Ok(user) => {
            let current = data.current_experience_use_case.for_owner(user.id).await;
            ApiResponse::success(UserProfileResponse::from_user(
                user,
                current,
                &data.media_urls,
            ))
        }
        Err(FetchUserProfileError::NotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::{sample_user, Gender, UserId};
    use crate::auth::application::use_cases::fetch_profile::FetchUserProfileUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::modules::experience::application::domain::entities::{
        JobType, ProfessionalExperience, ProfessionalExperienceDraft,
    };
    use crate::shared::crud::RecordStore;
    use crate::tests::support::memory_store::InMemoryStore;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct MockFetchProfile(Option<User>);

    #[async_trait]
    impl FetchUserProfileUseCase for MockFetchProfile {
        async fn by_slug(&self, slug: &str) -> Result<User, FetchUserProfileError> {
            self.0
                .clone()
                .filter(|u| u.slug.eq_ignore_ascii_case(slug))
                .ok_or(FetchUserProfileError::NotFound)
        }

        async fn by_id(&self, _user_id: UserId) -> Result<User, FetchUserProfileError> {
            self.0.clone().ok_or(FetchUserProfileError::NotFound)
        }
    }

    async fn get_profile(mock: MockFetchProfile, uri: &str) -> (u16, serde_json::Value) {
        let app_state = TestAppStateBuilder::default()
            .with_fetch_user_profile(mock)
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(fetch_user_handler)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_fetch_user_returns_public_profile() {
        // Arrange
        let mut user = sample_user("jane@example.com");
        user.slug = "jane-doe".to_string();
        user.nick_name = Some("JD".to_string());
        user.gender = Some(Gender::Female);

        // Act
        let (status, body) = get_profile(MockFetchProfile(Some(user)), "/api/users/Jane-Doe").await;

        // Assert
        assert_eq!(status, 200);
        assert_eq!(body["data"]["slug"], "jane-doe");
        assert_eq!(body["data"]["display_name"], "JD");
        assert_eq!(body["data"]["gender"], "Female");
        assert_eq!(
            body["data"]["avatar_url"],
            "/static/icons/user/avatar-female.png"
        );
        assert_eq!(body["data"]["contact_email"], "jane@example.com");
        assert!(body["data"].get("password_hash").is_none());
        assert!(body["data"].get("email").is_none());
    }

    #[actix_web::test]
    async fn test_fetch_user_uploaded_avatar_uses_media_url() {
        let mut user = sample_user("jane@example.com");
        user.slug = "jane-doe".to_string();
        user.image = Some("users/jane.png".to_string());

        let app_state = TestAppStateBuilder::default()
            .with_fetch_user_profile(MockFetchProfile(Some(user)))
            .with_media_urls(MediaUrls {
                media_url: "https://cdn.example.com/media/".to_string(),
                static_url: "/static/".to_string(),
            })
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(fetch_user_handler)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/users/jane-doe").to_request(),
        )
        .await;
        let body: serde_json::Value = test::read_body_json(resp).await;

        assert_eq!(
            body["data"]["avatar_url"],
            "https://cdn.example.com/media/users/jane.png"
        );
    }

    #[actix_web::test]
    async fn test_fetch_user_unknown_slug() {
        let (status, body) = get_profile(MockFetchProfile(None), "/api/users/nobody").await;

        assert_eq!(status, 404);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_fetch_user_shows_current_experience() {
        let mut user = sample_user("jane@example.com");
        user.slug = "jane-doe".to_string();
        let experiences = Arc::new(InMemoryStore::<ProfessionalExperience>::new());
        let history = [("Initech", 2023, false), ("Acme Corp", 2019, true)];
        for (company, year, currently_working) in history {
            experiences
                .insert(
                    user.id,
                    company.to_lowercase(),
                    ProfessionalExperienceDraft {
                        company: company.to_string(),
                        company_image: None,
                        company_url: None,
                        address: None,
                        designation: "Backend Engineer".to_string(),
                        job_type: JobType::FullTime,
                        start_date: chrono::NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
                        end_date: None,
                        currently_working,
                        description: None,
                    },
                )
                .await
                .unwrap();
        }

        let app_state = TestAppStateBuilder::default()
            .with_fetch_user_profile(MockFetchProfile(Some(user)))
            .with_experience_store(experiences)
            .build();
        let app =
            test::init_service(App::new().app_data(app_state).service(fetch_user_handler)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/users/jane-doe").to_request(),
        )
        .await;
        let body: serde_json::Value = test::read_body_json(resp).await;

        let current = &body["data"]["current_experience"];
        assert_eq!(current["company"], "Acme Corp");
        assert_eq!(current["job_type"], "Full Time");
        assert_eq!(current["currently_working"], true);
    }

    #[actix_web::test]
    async fn test_fetch_user_without_experience_has_null_current() {
        let mut user = sample_user("jane@example.com");
        user.slug = "jane-doe".to_string();

        let (status, body) = get_profile(MockFetchProfile(Some(user)), "/api/users/jane-doe").await;

        assert_eq!(status, 200);
        assert!(body["data"]["current_experience"].is_null());
    }
}
