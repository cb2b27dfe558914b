use serde::Serialize;
use std::fmt;

/// The operation a controller invocation is performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    List,
    Detail,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Detail => "detail",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Past-tense form used in derived notification text ("Created", "Updated").
    pub fn past_tense(&self) -> &'static str {
        match self {
            Action::List => "Listed",
            Action::Detail => "Viewed",
            Action::Create => "Created",
            Action::Update => "Updated",
            Action::Delete => "Deleted",
        }
    }

    /// Context flag set on every rendered page, e.g. `create_view`.
    pub fn view_flag(&self) -> String {
        format!("{}_view", self.as_str())
    }

    /// Detail, update and delete operate on one resolved record.
    pub fn targets_object(&self) -> bool {
        matches!(self, Action::Detail | Action::Update | Action::Delete)
    }

    /// List and create pages show the collection.
    pub fn shows_collection(&self) -> bool {
        matches!(self, Action::List | Action::Create)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
