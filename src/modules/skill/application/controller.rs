use std::sync::Arc;

use crate::modules::skill::application::domain::entities::Skill;
use crate::shared::crud::{
    Action, ContextBuilder, ControllerConfig, MessageTemplates, RecordStore, ResourceController,
    UrlReverser,
};

pub const TEMPLATE: &str = "portfolios/skills/skills.html";

pub const ROUTE_LIST: &str = "portfolios:skills";
pub const ROUTE_CREATE: &str = "portfolios:skill_create";
pub const ROUTE_DETAIL: &str = "portfolios:skill_detail";
pub const ROUTE_UPDATE: &str = "portfolios:skill_update";

pub fn register_routes(urls: UrlReverser) -> UrlReverser {
    urls.route(ROUTE_LIST, "/portfolio/skills")
        .route(ROUTE_CREATE, "/portfolio/skills/create")
        .route(ROUTE_DETAIL, "/portfolio/skills/{slug}")
        .route(ROUTE_UPDATE, "/portfolio/skills/{slug}/update")
}

pub fn config() -> ControllerConfig {
    ControllerConfig::new(TEMPLATE, ROUTE_LIST).messages(
        MessageTemplates::new()
            .success_for(Action::Update, "Skill has been updated successfully."),
    )
}

pub fn build_controller(
    store: Arc<dyn RecordStore<Skill>>,
    context: ContextBuilder,
    urls: Arc<UrlReverser>,
) -> ResourceController<Skill> {
    ResourceController::new(config(), store, context, urls)
}
