use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::templating::file_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<UserId> for Uuid {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(rename = "Do not mention")]
    DoNotMention,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::DoNotMention => "Do not mention",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            "Do not mention" => Ok(Gender::DoNotMention),
            other => Err(format!("Unknown gender: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub slug: String,
    pub name: Option<String>,
    pub nick_name: Option<String>,
    pub gender: Option<Gender>,
    pub image: Option<String>,
    pub dob: Option<NaiveDate>,
    pub website: Option<String>,
    pub contact: Option<String>,
    pub contact_email: Option<String>,
    pub address: Option<String>,
    pub about: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl User {
    /// Nick name, then name, then username, then email.
    pub fn display_name(&self) -> &str {
        non_blank(&self.nick_name)
            .or_else(|| non_blank(&self.name))
            .or_else(|| Some(self.username.trim()).filter(|u| !u.is_empty()))
            .unwrap_or(&self.email)
    }

    /// Uploaded image, else a static avatar matching the gender.
    pub fn avatar_url(&self, media_prefix: &str, static_prefix: &str) -> String {
        if let Some(url) = file_url(media_prefix, self.image.as_deref()) {
            return url;
        }

        let avatar = match self.gender {
            Some(Gender::Male) => "icons/user/avatar-male.png",
            Some(Gender::Female) => "icons/user/avatar-female.png",
            _ => "icons/user/avatar-default.png",
        };
        format!("{}/{}", static_prefix.trim_end_matches('/'), avatar)
    }

    pub fn contact_email(&self) -> &str {
        non_blank(&self.contact_email).unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    Regular,
    Staff,
    Superuser,
}

impl UserRole {
    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Staff | UserRole::Superuser)
    }

    pub fn is_superuser(&self) -> bool {
        matches!(self, UserRole::Superuser)
    }
}

#[cfg(test)]
pub(crate) fn sample_user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::from(Uuid::new_v4()),
        email: email.to_string(),
        username: email.split('@').next().unwrap_or_default().to_string(),
        password_hash: "$argon2id$stub".to_string(),
        slug: Uuid::new_v4().to_string(),
        name: None,
        nick_name: None,
        gender: None,
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
        last_login: None,
        date_joined: now,
        updated_at: now,
        is_deleted: false,
    }
}
