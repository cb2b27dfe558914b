use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::shared::crud::{FormErrors, Resource, UniqueRule};

pub const TITLE_MAX_LEN: usize = 150;
pub const LEVEL_MAX: i32 = 100;
pub const DUPLICATE_TITLE_MESSAGE: &str = "This skill already exists!";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub id: Uuid,
    pub owner: UserId,
    pub title: String,
    pub slug: String,
    pub image: Option<String>,
    pub level: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Skill form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SkillInput {
    #[serde(default)]
    #[schema(example = "Rust")]
    pub title: String,

    /// Object key of an already uploaded image
    #[serde(default)]
    #[schema(example = "skills/rust.png")]
    pub image: Option<String>,

    /// Proficiency, 0 to 100
    #[serde(default)]
    #[schema(example = 85)]
    pub level: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDraft {
    pub title: String,
    pub image: Option<String>,
    pub level: Option<u8>,
}

fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Resource for Skill {
    const MODEL_NAME: &'static str = "Skill";
    const CONTEXT_NAME: &'static str = "skill";

    type Input = SkillInput;
    type Draft = SkillDraft;

    fn id(&self) -> Uuid {
        self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn owner(&self) -> UserId {
        self.owner
    }

    fn clean(input: &SkillInput) -> Result<SkillDraft, FormErrors> {
        let mut errors = FormErrors::new();

        let title = input.title.trim().to_string();
        if title.is_empty() {
            errors.add("title", "This field is required.");
        } else if title.chars().count() > TITLE_MAX_LEN {
            errors.add(
                "title",
                format!("Ensure this value has at most {TITLE_MAX_LEN} characters."),
            );
        }

        let level = match input.level {
            None => None,
            Some(level) if (0..=LEVEL_MAX).contains(&level) => Some(level as u8),
            Some(_) => {
                errors.add("level", format!("Level must be between 0 and {LEVEL_MAX}."));
                None
            }
        };

        errors.into_result(SkillDraft {
            title,
            image: blank_to_none(&input.image),
            level,
        })
    }

    fn slug_source(draft: &SkillDraft) -> &str {
        &draft.title
    }

    fn unique_rule(draft: &SkillDraft) -> Option<UniqueRule> {
        Some(UniqueRule {
            field: "title",
            value: draft.title.clone(),
            message: DUPLICATE_TITLE_MESSAGE,
        })
    }

    fn to_input(&self) -> SkillInput {
        SkillInput {
            title: self.title.clone(),
            image: self.image.clone(),
            level: self.level.map(i32::from),
        }
    }
}
