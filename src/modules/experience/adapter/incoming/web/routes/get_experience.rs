use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::page_response;
use crate::shared::crud::{Action, Page, ViewRequest};
use crate::shared::flash::Flash;
use crate::AppState;
use actix_web::{get, web, Responder};

/// Professional experience detail
///
/// The page context lists the experience's media with public URLs.
#[utoipa::path(
    get,
    path = "/portfolio/professional-experiences/{slug}",
    tag = "professional-experiences",
    security(("bearer_auth" = [])),
    params(
        ("slug" = String, Path, description = "Experience slug, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Experience page", body = inline(SuccessResponse<Page>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No experience with this slug", body = ErrorResponse),
    )
)]
#[get("/portfolio/professional-experiences/{slug}")]
pub async fn get_experience_handler(
    _user: AuthenticatedUser,
    path: web::Path<String>,
    flash: Flash,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = ViewRequest::new().with_slug(path.into_inner());
    let result = data.experiences.get(Action::Detail, request).await;

    page_response(result, Vec::new(), &flash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::cookie::Key;
    use actix_web::{http::StatusCode, test, App};
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::auth::application::domain::entities::UserId;
    use crate::modules::experience::application::domain::entities::{
        JobType, ProfessionalExperience, ProfessionalExperienceDraft,
    };
    use crate::multimedia::application::domain::entities::{
        AttachmentTarget, NewMediaAttachment, UploadedFile,
    };
    use crate::multimedia::application::ports::outgoing::MediaStore;
    use crate::shared::crud::RecordStore;
    use crate::shared::flash::session_middleware;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::test_helpers::{bearer_for, token_provider_data};
    use crate::tests::support::memory_store::{InMemoryMediaStore, InMemoryStore};

    #[actix_web::test]
    async fn test_get_experience_lists_media() {
        let store = Arc::new(InMemoryStore::<ProfessionalExperience>::new());
        let media = Arc::new(InMemoryMediaStore::new());
        let owner = UserId::from(Uuid::new_v4());

        let experience = store
            .insert(
                owner,
                "acme-corp-1a2b3c4d".to_string(),
                ProfessionalExperienceDraft {
                    company: "Acme Corp".to_string(),
                    company_image: None,
                    company_url: None,
                    address: None,
                    designation: "Backend Engineer".to_string(),
                    job_type: JobType::PartTime,
                    start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                    end_date: None,
                    currently_working: true,
                    description: None,
                },
            )
            .await
            .unwrap();
        media
            .attach(NewMediaAttachment {
                slug: "offer-letter-1a2b3c4d".to_string(),
                target: AttachmentTarget::ProfessionalExperience,
                parent_id: experience.id,
                file: UploadedFile {
                    object_key: "experiences/offer-letter.pdf".to_string(),
                    original_name: "offer-letter.pdf".to_string(),
                    mime_type: "application/pdf".to_string(),
                    size_bytes: 1024,
                },
            })
            .await
            .unwrap();

        let app_state = TestAppStateBuilder::default()
            .with_experience_store(store)
            .with_media_store(media)
            .build();

        let app = test::init_service(
            App::new()
                .wrap(session_middleware(Key::generate(), false))
                .app_data(app_state)
                .app_data(token_provider_data())
                .service(get_experience_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/portfolio/professional-experiences/Acme-Corp-1a2b3c4d")
            .insert_header(("Authorization", bearer_for(owner)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let context = &body["data"]["context"];
        assert_eq!(context["professional_experience"]["job_type"], "Part Time");
        assert_eq!(context["media"][0]["slug"], "offer-letter-1a2b3c4d");
        assert_eq!(context["media"][0]["url"], "/media/experiences/offer-letter.pdf");
        assert_eq!(context["page_title"], "Professional Experience Detail");
    }
}
