use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::modules::experience::application::domain::entities::{JobType, ProfessionalExperience};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "professional_experiences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    pub company: String,

    #[sea_orm(unique)]
    pub slug: String,

    pub company_image: Option<String>,
    pub company_url: Option<String>,
    pub address: Option<String>,

    pub designation: String,
    pub job_type: String,

    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub currently_working: bool,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub is_deleted: bool,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> Result<ProfessionalExperience, String> {
        Ok(ProfessionalExperience {
            id: self.id,
            owner: UserId::from(self.user_id),
            company: self.company.clone(),
            slug: self.slug.clone(),
            company_image: self.company_image.clone(),
            company_url: self.company_url.clone(),
            address: self.address.clone(),
            designation: self.designation.clone(),
            job_type: self.job_type.parse::<JobType>()?,
            start_date: self.start_date,
            end_date: self.end_date,
            currently_working: self.currently_working,
            description: self.description.clone(),
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::UserId",
        to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Column::Id"
    )]
    User,
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        #[cfg(feature = "no_db_triggers")]
        {
            use chrono::Utc;
            use sea_orm::ActiveValue::Set;

            if !_insert {
                self.updated_at = Set(Utc::now().into());
            }
        }

        Ok(self)
    }
}

#[cfg(test)]
pub(crate) fn sample_model(owner: Uuid, company: &str, slug: &str) -> Model {
    let now = chrono::Utc::now().fixed_offset();
    Model {
        id: Uuid::new_v4(),
        user_id: owner,
        company: company.to_string(),
        slug: slug.to_string(),
        company_image: None,
        company_url: None,
        address: None,
        designation: "Backend Engineer".to_string(),
        job_type: "Full Time".to_string(),
        start_date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap_or_default(),
        end_date: None,
        currently_working: true,
        description: None,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}
