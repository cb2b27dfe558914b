use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::modules::skill::application::domain::entities::Skill;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub user_id: Uuid,

    pub title: String,

    #[sea_orm(unique)]
    pub slug: String,

    pub image: Option<String>,

    pub level: Option<i16>,

    pub is_deleted: bool,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> Skill {
        Skill {
            id: self.id,
            owner: UserId::from(self.user_id),
            title: self.title.clone(),
            slug: self.slug.clone(),
            image: self.image.clone(),
            level: self.level.and_then(|l| u8::try_from(l).ok()),
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
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
pub(crate) fn sample_model(owner: Uuid, title: &str, slug: &str) -> Model {
    let now = chrono::Utc::now().fixed_offset();
    Model {
        id: Uuid::new_v4(),
        user_id: owner,
        title: title.to_string(),
        slug: slug.to_string(),
        image: None,
        level: Some(80),
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}
