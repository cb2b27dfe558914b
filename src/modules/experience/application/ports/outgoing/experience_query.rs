use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::modules::experience::application::domain::entities::ProfessionalExperience;
use crate::shared::crud::StoreError;

#[async_trait]
pub trait ExperienceQuery: Send + Sync {
    /// First live experience of `owner` in the collection's ordering: ongoing
    /// roles before past ones, then the latest start date.
    async fn current_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Option<ProfessionalExperience>, StoreError>;
}
