use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::auth::application::domain::entities::UserId;
use crate::modules::experience::application::domain::entities::ProfessionalExperience;
use crate::modules::experience::application::ports::outgoing::ExperienceQuery;

#[async_trait]
pub trait ICurrentExperienceUseCase: Send + Sync {
    /// The experience shown on a profile. Lookup failures are logged and
    /// read as "none".
    async fn for_owner(&self, owner: UserId) -> Option<ProfessionalExperience>;
}

#[derive(Clone)]
pub struct CurrentExperienceService {
    query: Arc<dyn ExperienceQuery>,
}

impl CurrentExperienceService {
    pub fn new(query: Arc<dyn ExperienceQuery>) -> Self {
        Self { query }
    }
}

#[async_trait]
impl ICurrentExperienceUseCase for CurrentExperienceService {
    async fn for_owner(&self, owner: UserId) -> Option<ProfessionalExperience> {
        match self.query.current_for_owner(owner).await {
            Ok(current) => current,
            Err(e) => {
                warn!(owner = %owner, error = %e, "Current experience lookup failed");
                None
            }
        }
    }
}
