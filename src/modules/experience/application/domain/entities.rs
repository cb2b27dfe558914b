use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::multimedia::application::domain::entities::UploadedFile;
use crate::shared::crud::{FormErrors, Resource, UniqueRule};

pub const COMPANY_MAX_LEN: usize = 150;
pub const DESIGNATION_MAX_LEN: usize = 150;
pub const DUPLICATE_COMPANY_MESSAGE: &str = "This company already exists!";

const REQUIRED: &str = "This field is required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum JobType {
    #[serde(rename = "Full Time")]
    FullTime,
    #[serde(rename = "Part Time")]
    PartTime,
    Contractual,
    Internship,
    Freelance,
}

impl JobType {
    pub const ALL: [JobType; 5] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contractual,
        JobType::Internship,
        JobType::Freelance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full Time",
            JobType::PartTime => "Part Time",
            JobType::Contractual => "Contractual",
            JobType::Internship => "Internship",
            JobType::Freelance => "Freelance",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|job_type| job_type.as_str() == s)
            .ok_or_else(|| format!("Unknown job type: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfessionalExperience {
    pub id: Uuid,
    pub owner: UserId,
    pub company: String,
    pub slug: String,
    pub company_image: Option<String>,
    pub company_url: Option<String>,
    pub address: Option<String>,
    pub designation: String,
    pub job_type: JobType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub currently_working: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Professional experience form as submitted, with any files uploaded
/// alongside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProfessionalExperienceInput {
    #[schema(example = "Acme Corp")]
    pub company: String,
    #[schema(example = "companies/acme.png")]
    pub company_image: Option<String>,
    #[schema(example = "https://acme.example.com")]
    pub company_url: Option<String>,
    pub address: Option<String>,
    #[schema(example = "Backend Engineer")]
    pub designation: String,
    #[schema(example = "Full Time")]
    pub job_type: String,
    #[schema(example = "2021-03-01")]
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub currently_working: bool,
    pub description: Option<String>,
    pub media: Vec<UploadedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionalExperienceDraft {
    pub company: String,
    pub company_image: Option<String>,
    pub company_url: Option<String>,
    pub address: Option<String>,
    pub designation: String,
    pub job_type: JobType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub currently_working: bool,
    pub description: Option<String>,
}

fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required_text(errors: &mut FormErrors, field: &str, value: &str, max_len: usize) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else if value.chars().count() > max_len {
        errors.add(
            field,
            format!("Ensure this value has at most {max_len} characters."),
        );
    }
    value.to_string()
}

impl Resource for ProfessionalExperience {
    const MODEL_NAME: &'static str = "Professional Experience";
    const CONTEXT_NAME: &'static str = "professional_experience";

    type Input = ProfessionalExperienceInput;
    type Draft = ProfessionalExperienceDraft;

    fn id(&self) -> Uuid {
        self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn owner(&self) -> UserId {
        self.owner
    }

    fn clean(input: &ProfessionalExperienceInput) -> Result<ProfessionalExperienceDraft, FormErrors> {
        let mut errors = FormErrors::new();

        let company = required_text(&mut errors, "company", &input.company, COMPANY_MAX_LEN);
        let designation = required_text(
            &mut errors,
            "designation",
            &input.designation,
            DESIGNATION_MAX_LEN,
        );

        let job_type = match input.job_type.trim() {
            "" => {
                errors.add("job_type", REQUIRED);
                None
            }
            raw => match raw.parse::<JobType>() {
                Ok(job_type) => Some(job_type),
                Err(_) => {
                    errors.add(
                        "job_type",
                        format!("Select a valid choice. {raw} is not one of the available choices."),
                    );
                    None
                }
            },
        };

        let company_url = blank_to_none(&input.company_url);
        if let Some(url) = &company_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.add("company_url", "Enter a valid URL.");
            }
        }

        if input.start_date.is_none() {
            errors.add("start_date", REQUIRED);
        }

        if let Some(end_date) = input.end_date {
            if input.currently_working {
                errors.add(
                    "end_date",
                    "Leave the end date empty while you are still working here.",
                );
            } else if input.start_date.is_some_and(|start| end_date < start) {
                errors.add("end_date", "End date cannot be before the start date.");
            }
        }

        let (Some(job_type), Some(start_date)) = (job_type, input.start_date) else {
            return Err(errors);
        };

        errors.into_result(ProfessionalExperienceDraft {
            company,
            company_image: blank_to_none(&input.company_image),
            company_url,
            address: blank_to_none(&input.address),
            designation,
            job_type,
            start_date,
            end_date: input.end_date,
            currently_working: input.currently_working,
            description: blank_to_none(&input.description),
        })
    }

    fn slug_source(draft: &ProfessionalExperienceDraft) -> &str {
        &draft.company
    }

    fn unique_rule(draft: &ProfessionalExperienceDraft) -> Option<UniqueRule> {
        Some(UniqueRule {
            field: "company",
            value: draft.company.clone(),
            message: DUPLICATE_COMPANY_MESSAGE,
        })
    }

    fn uploads(input: &ProfessionalExperienceInput) -> &[UploadedFile] {
        &input.media
    }

    fn to_input(&self) -> ProfessionalExperienceInput {
        ProfessionalExperienceInput {
            company: self.company.clone(),
            company_image: self.company_image.clone(),
            company_url: self.company_url.clone(),
            address: self.address.clone(),
            designation: self.designation.clone(),
            job_type: self.job_type.to_string(),
            start_date: Some(self.start_date),
            end_date: self.end_date,
            currently_working: self.currently_working,
            description: self.description.clone(),
            media: Vec::new(),
        }
    }
}
