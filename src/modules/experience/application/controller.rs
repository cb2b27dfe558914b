use std::sync::Arc;

use crate::modules::experience::application::domain::entities::ProfessionalExperience;
use crate::multimedia::application::domain::entities::AttachmentTarget;
use crate::multimedia::application::domain::policies::UploadPolicy;
use crate::multimedia::application::ports::outgoing::MediaStore;
use crate::shared::crud::{
    ContextBuilder, ControllerConfig, MediaBinding, RecordStore, ResourceController, UrlReverser,
};

pub const TEMPLATE: &str = "portfolios/professional-experiences/professional-experiences.html";
pub const PAGINATE_BY: u32 = 4;

pub const ROUTE_LIST: &str = "portfolios:professional_experiences";
pub const ROUTE_CREATE: &str = "portfolios:professional_experience_create";
pub const ROUTE_DETAIL: &str = "portfolios:professional_experience_detail";
pub const ROUTE_UPDATE: &str = "portfolios:professional_experience_update";
pub const ROUTE_MEDIA_DELETE: &str = "portfolios:professional_experience_media_delete";

pub fn register_routes(urls: UrlReverser) -> UrlReverser {
    urls.route(ROUTE_LIST, "/portfolio/professional-experiences")
        .route(ROUTE_CREATE, "/portfolio/professional-experiences/create")
        .route(ROUTE_DETAIL, "/portfolio/professional-experiences/{slug}")
        .route(ROUTE_UPDATE, "/portfolio/professional-experiences/{slug}/update")
        .route(
            ROUTE_MEDIA_DELETE,
            "/portfolio/professional-experiences/media/{slug}/delete",
        )
}

pub fn config() -> ControllerConfig {
    ControllerConfig::new(TEMPLATE, ROUTE_LIST).paginate_by(PAGINATE_BY)
}

pub fn build_controller(
    store: Arc<dyn RecordStore<ProfessionalExperience>>,
    media: Arc<dyn MediaStore>,
    policy: UploadPolicy,
    media_prefix: &str,
    context: ContextBuilder,
    urls: Arc<UrlReverser>,
) -> ResourceController<ProfessionalExperience> {
    ResourceController::new(config(), store, context, urls).with_media(MediaBinding {
        store: media,
        policy,
        target: AttachmentTarget::ProfessionalExperience,
        media_prefix: media_prefix.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginates_by_four() {
        assert_eq!(config().paginate_by, Some(4));
        assert!(config().allow_empty);
    }

    #[test]
    fn media_delete_route_reverses() {
        let urls = register_routes(UrlReverser::new());

        assert_eq!(
            urls.reverse(ROUTE_MEDIA_DELETE, &[("slug", "offer-1a2b3c4d")])
                .unwrap(),
            "/portfolio/professional-experiences/media/offer-1a2b3c4d/delete"
        );
    }
}
