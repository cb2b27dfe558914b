use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Gender, User, UserId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    #[sea_orm(unique)]
    pub slug: String,

    pub name: Option<String>,
    pub nick_name: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub dob: Option<Date>,
    pub website: Option<String>,
    pub contact: Option<String>,
    pub contact_email: Option<String>,
    pub address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub about: Option<String>,

    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub is_deleted: bool,

    pub last_login: Option<DateTimeWithTimeZone>,
    pub date_joined: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> User {
        User {
            id: UserId::from(self.id),
            email: self.email.clone(),
            username: self.username.clone(),
            password_hash: self.password_hash.clone(),
            slug: self.slug.clone(),
            name: self.name.clone(),
            nick_name: self.nick_name.clone(),
            // Unknown values read back as "not set" rather than failing the row.
            gender: self.gender.as_deref().and_then(|g| g.parse::<Gender>().ok()),
            image: self.image.clone(),
            dob: self.dob,
            website: self.website.clone(),
            contact: self.contact.clone(),
            contact_email: self.contact_email.clone(),
            address: self.address.clone(),
            about: self.about.clone(),
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            is_active: self.is_active,
            last_login: self.last_login.map(Into::into),
            date_joined: self.date_joined.into(),
            updated_at: self.updated_at.into(),
            is_deleted: self.is_deleted,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

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
pub(crate) fn sample_model(id: Uuid, email: &str) -> Model {
    let now = chrono::Utc::now().fixed_offset();
    Model {
        id,
        email: email.to_string(),
        username: email.split('@').next().unwrap_or_default().to_string(),
        password_hash: "$argon2id$stub".to_string(),
        slug: id.to_string(),
        name: None,
        nick_name: None,
        gender: Some("Female".to_string()),
        image: None,
        dob: None,
        website: None,
        contact: None,
        contact_email: None,
        address: None,
        about: None,
        is_staff: false,
        is_superuser: false,
        is_active: true,
        is_deleted: false,
        last_login: None,
        date_joined: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_domain_parses_gender_and_keeps_unknown_as_none() {
        let mut model = sample_model(Uuid::new_v4(), "jane@example.com");
        assert_eq!(model.to_domain().gender, Some(Gender::Female));

        model.gender = Some("robot".to_string());
        assert_eq!(model.to_domain().gender, None);
    }
}
