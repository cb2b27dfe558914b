use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::multimedia::application::domain::entities::UploadedFile;

/// A record type served through [`ResourceController`](super::controller::ResourceController).
///
/// Implementors describe their form rules and uniqueness policy; the controller
/// owns the request flow around them.
pub trait Resource: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Human-readable model name used in titles and notification text.
    const MODEL_NAME: &'static str;

    /// Context key under which a resolved record is exposed, next to `object`.
    const CONTEXT_NAME: &'static str;

    /// Submitted form payload. `Default` is the blank create form.
    type Input: Clone + fmt::Debug + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Cleaned field values ready to be persisted.
    type Draft: Clone + fmt::Debug + Send + Sync + 'static;

    fn id(&self) -> Uuid;

    fn slug(&self) -> &str;

    fn owner(&self) -> UserId;

    /// Binds submitted data to the form rules.
    fn clean(input: &Self::Input) -> Result<Self::Draft, FormErrors>;

    /// Text the slug is derived from when the record is first saved.
    fn slug_source(draft: &Self::Draft) -> &str;

    /// Value that must be unique per owner, compared case-insensitively.
    fn unique_rule(_draft: &Self::Draft) -> Option<UniqueRule> {
        None
    }

    /// Files submitted alongside the form that become child media once the
    /// record is saved.
    fn uploads(_input: &Self::Input) -> &[UploadedFile] {
        &[]
    }

    /// Pre-populated form for an existing record.
    fn to_input(&self) -> Self::Input;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueRule {
    pub field: &'static str,
    pub value: String,
    pub message: &'static str,
}

/// Field-level and form-level validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub non_field: Vec<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    pub fn merge(&mut self, other: FormErrors) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
        self.non_field.extend(other.non_field);
    }

    /// `Ok(value)` when no error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_groups_messages_by_field() {
        let mut errors = FormErrors::new();
        errors.add("title", "This field is required.");
        errors.add("title", "Too long.");

        assert_eq!(errors.field("title").map(|m| m.len()), Some(2));
        assert!(errors.field("level").is_none());
    }

    #[test]
    fn into_result_is_ok_only_without_errors() {
        assert_eq!(FormErrors::new().into_result(5), Ok(5));

        let mut errors = FormErrors::new();
        errors.add_non_field("Could not save");
        assert!(errors.into_result(5).is_err());
    }

    #[test]
    fn serialization_skips_empty_sections() {
        let mut errors = FormErrors::new();
        errors.add("company", "This company already exists!");

        let value = serde_json::to_value(&errors).unwrap();
        assert!(value.get("non_field").is_none());
        assert_eq!(
            value["fields"]["company"][0],
            "This company already exists!"
        );
    }
}
