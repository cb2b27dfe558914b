use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// A one-shot user-facing message, shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Where the controller reports outcomes.
pub trait NotificationSink {
    fn push(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn push(&mut self, notification: Notification) {
        Vec::push(self, notification);
    }
}

/// Success and error text per action.
///
/// Resolution order: action override, controller-wide override, text derived
/// from model and action, then the bare `SUCCESS` / `ERROR` fallback when no
/// action applies.
#[derive(Debug, Clone, Default)]
pub struct MessageTemplates {
    success_by_action: HashMap<Action, String>,
    error_by_action: HashMap<Action, String>,
    success: Option<String>,
    error: Option<String>,
}

impl MessageTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_for(mut self, action: Action, message: impl Into<String>) -> Self {
        self.success_by_action.insert(action, message.into());
        self
    }

    pub fn error_for(mut self, action: Action, message: impl Into<String>) -> Self {
        self.error_by_action.insert(action, message.into());
        self
    }

    pub fn success(mut self, message: impl Into<String>) -> Self {
        self.success = Some(message.into());
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn success_message(&self, model_name: &str, action: Option<Action>) -> String {
        let Some(action) = action else {
            return self
                .success
                .clone()
                .unwrap_or_else(|| "SUCCESS".to_string());
        };

        self.success_by_action
            .get(&action)
            .or(self.success.as_ref())
            .cloned()
            .unwrap_or_else(|| format!("{model_name} {} successfully", action.past_tense()))
    }

    pub fn error_message(&self, model_name: &str, action: Option<Action>) -> String {
        let Some(action) = action else {
            return self.error.clone().unwrap_or_else(|| "ERROR".to_string());
        };

        self.error_by_action
            .get(&action)
            .or(self.error.as_ref())
            .cloned()
            .unwrap_or_else(|| format!("Failed to {action} {model_name}"))
    }
}
