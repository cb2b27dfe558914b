use chrono::{Datelike, Utc};
use serde_json::{Map, Value};
use std::env;
use tracing::warn;

use super::action::Action;
use crate::shared::templating::var_to_title;

/// Per-request template context. Never persisted.
pub type PageContext = Map<String, Value>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ContextError {
    #[error("Failed to serialize context value: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ContextError {
    fn from(e: serde_json::Error) -> Self {
        ContextError::Serialization(e.to_string())
    }
}

/// Site-wide page metadata attached to every rendered page.
#[derive(Debug, Clone)]
pub struct SiteMeta {
    pub description: String,
    pub keywords: String,
    pub author: String,
    /// Falls back to "{author}, {current year}".
    pub copyright: Option<String>,
    pub robots: String,
    pub googlebot: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            description: "Personal portfolio".to_string(),
            keywords: "portfolio, skills, professional experience".to_string(),
            author: "Portfolio Owner".to_string(),
            copyright: None,
            robots: "index, follow".to_string(),
            googlebot: "index, follow".to_string(),
        }
    }
}

impl SiteMeta {
    /// Reads `SITE_*` overrides; unset or blank variables keep the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: String| {
            env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(fallback)
        };

        Self {
            description: read("SITE_DESCRIPTION", defaults.description),
            keywords: read("SITE_KEYWORDS", defaults.keywords),
            author: read("SITE_AUTHOR", defaults.author),
            copyright: env::var("SITE_COPYRIGHT")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            robots: read("SITE_ROBOTS", defaults.robots),
            googlebot: read("SITE_GOOGLEBOT", defaults.googlebot),
        }
    }

    pub fn copyright_line(&self) -> String {
        match &self.copyright {
            Some(copyright) => copyright.clone(),
            None => format!("{}, {}", self.author, Utc::now().year()),
        }
    }

    fn apply(&self, context: &mut PageContext) {
        let entries = [
            ("meta_description", self.description.clone()),
            ("meta_keywords", self.keywords.clone()),
            ("meta_author", self.author.clone()),
            ("meta_copyright", self.copyright_line()),
            ("meta_robots", self.robots.clone()),
            ("meta_googlebot", self.googlebot.clone()),
        ];
        for (key, value) in entries {
            context.insert(key.to_string(), Value::String(value));
        }
    }
}

/// Merges page metadata in a fixed order, later layers winning:
/// base context, site defaults, titles, view extras, caller overrides.
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    site: SiteMeta,
    additional: PageContext,
}

impl ContextBuilder {
    pub fn new(site: SiteMeta) -> Self {
        Self {
            site,
            additional: PageContext::new(),
        }
    }

    /// View-specific values merged after the defaults.
    pub fn with_additional(mut self, additional: PageContext) -> Self {
        self.additional = additional;
        self
    }

    pub fn site(&self) -> &SiteMeta {
        &self.site
    }

    pub fn build(
        &self,
        base: Result<PageContext, ContextError>,
        model_name: &str,
        action: Option<Action>,
        overrides: PageContext,
    ) -> PageContext {
        let mut context = base.unwrap_or_else(|e| {
            warn!(
                model = model_name,
                error = %e,
                "Base context unavailable, starting from an empty context"
            );
            PageContext::new()
        });

        self.site.apply(&mut context);

        let title = page_title(model_name, action);
        context.insert("head_title".to_string(), Value::String(title.clone()));
        context.insert("page_title".to_string(), Value::String(title));

        for (key, value) in &self.additional {
            context.insert(key.clone(), value.clone());
        }

        context.extend(overrides);
        context
    }
}

fn page_title(model_name: &str, action: Option<Action>) -> String {
    match action {
        Some(action) => var_to_title(&format!("{model_name} {action}")),
        None => "Home".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> PageContext {
        match value {
            Value::Object(map) => map,
            _ => PageContext::new(),
        }
    }

    #[test]
    fn defaults_and_titles_are_always_present() {
        let builder = ContextBuilder::new(SiteMeta::default());

        let context = builder.build(
            Ok(PageContext::new()),
            "Professional Experience",
            Some(Action::Update),
            PageContext::new(),
        );

        for key in [
            "meta_description",
            "meta_keywords",
            "meta_author",
            "meta_copyright",
            "meta_robots",
            "meta_googlebot",
        ] {
            assert!(context.contains_key(key), "missing {key}");
        }
        assert_eq!(context["page_title"], "Professional Experience Update");
        assert_eq!(context["head_title"], "Professional Experience Update");
        assert_eq!(context["meta_robots"], "index, follow");
    }

    #[test]
    fn missing_action_titles_the_page_home() {
        let builder = ContextBuilder::default();
        let context = builder.build(Ok(PageContext::new()), "Skill", None, PageContext::new());
        assert_eq!(context["page_title"], "Home");
    }

    #[test]
    fn copyright_defaults_to_author_and_year() {
        let site = SiteMeta {
            author: "Jane Doe".to_string(),
            ..SiteMeta::default()
        };
        let line = site.copyright_line();
        assert!(line.starts_with("Jane Doe, "));
        assert_eq!(line.len(), "Jane Doe, ".len() + 4);
    }

    #[test]
    fn overrides_win_over_every_other_layer() {
        let builder = ContextBuilder::new(SiteMeta::default())
            .with_additional(map(json!({ "page_title": "From view", "extra": 1 })));

        let context = builder.build(
            Ok(map(json!({ "meta_author": "from base" }))),
            "Skill",
            Some(Action::List),
            map(json!({ "page_title": "From caller", "meta_author": "Caller" })),
        );

        assert_eq!(context["page_title"], "From caller");
        assert_eq!(context["meta_author"], "Caller");
        assert_eq!(context["head_title"], "Skill List");
        assert_eq!(context["extra"], 1);
    }

    #[test]
    fn additional_context_overrides_defaults() {
        let builder = ContextBuilder::new(SiteMeta::default())
            .with_additional(map(json!({ "meta_robots": "noindex" })));

        let context = builder.build(
            Ok(PageContext::new()),
            "Skill",
            Some(Action::List),
            PageContext::new(),
        );

        assert_eq!(context["meta_robots"], "noindex");
    }

    #[test]
    fn failed_base_context_is_replaced_by_defaults() {
        let builder = ContextBuilder::default();

        let context = builder.build(
            Err(ContextError::Serialization("boom".into())),
            "Skill",
            Some(Action::Detail),
            PageContext::new(),
        );

        assert!(!context.contains_key("object"));
        assert_eq!(context["page_title"], "Skill Detail");
    }
}
