use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::templating::file_url;

/// Parent resource a media file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentTarget {
    ProfessionalExperience,
}

impl AttachmentTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentTarget::ProfessionalExperience => "professional_experience",
        }
    }
}

impl fmt::Display for AttachmentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional_experience" => Ok(AttachmentTarget::ProfessionalExperience),
            other => Err(format!("Unknown attachment target: {other}")),
        }
    }
}

/// A file already placed in object storage, submitted with a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadedFile {
    pub object_key: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaAttachment {
    pub id: Uuid,
    pub slug: String,
    pub target: AttachmentTarget,
    pub parent_id: Uuid,
    pub object_key: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

impl MediaAttachment {
    pub fn url(&self, media_prefix: &str) -> Option<String> {
        file_url(media_prefix, Some(&self.object_key))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMediaAttachment {
    pub slug: String,
    pub target: AttachmentTarget,
    pub parent_id: Uuid,
    pub file: UploadedFile,
}
