use tracing::{debug, warn};
use uuid::Uuid;

use super::store::{SlugLookup, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("No {collection} matches the given query")]
    NotFound { collection: &'static str },
}

/// Maps a human-readable slug to exactly one stored record.
///
/// Lookups are case-insensitive. When the store holds several matches the
/// first one in the collection's default ordering wins. Store failures are
/// logged and reported as "not found" so callers never see infrastructure
/// errors on this path.
pub struct SlugResolver<'a, S: ?Sized> {
    lookup: &'a S,
    collection: &'static str,
}

impl<'a, S: ?Sized> SlugResolver<'a, S> {
    pub fn new(lookup: &'a S, collection: &'static str) -> Self {
        Self { lookup, collection }
    }

    pub async fn resolve<T>(&self, slug: &str) -> Result<T, ResolveError>
    where
        S: SlugLookup<T>,
    {
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(self.not_found());
        }

        match self.lookup.matching_slug(slug).await {
            Ok(matches) => {
                if matches.len() > 1 {
                    debug!(
                        collection = self.collection,
                        slug = %slug,
                        matches = matches.len(),
                        "Several records share a slug, using the first"
                    );
                }
                matches.into_iter().next().ok_or_else(|| self.not_found())
            }
            Err(StoreError::NotFound) => Err(self.not_found()),
            Err(e) => {
                warn!(
                    collection = self.collection,
                    slug = %slug,
                    error = %e,
                    "Slug lookup failed, treating as not found"
                );
                Err(self.not_found())
            }
        }
    }

    /// Best-effort variant used at controller entry.
    pub async fn resolve_optional<T>(&self, slug: Option<&str>) -> Option<T>
    where
        S: SlugLookup<T>,
    {
        match slug {
            Some(slug) => self.resolve(slug).await.ok(),
            None => None,
        }
    }

    fn not_found(&self) -> ResolveError {
        ResolveError::NotFound {
            collection: self.collection,
        }
    }
}

/// Lower-case ASCII alphanumerics joined by single hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Slug for a new record: the slugified text plus a short random token so two
/// records with the same text never collide.
pub fn unique_slug(text: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    let token = &token[..8];
    let base = slugify(text);

    if base.is_empty() {
        token.to_string()
    } else {
        format!("{base}-{token}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedLookup {
        result: Result<Vec<String>, StoreError>,
    }

    #[async_trait]
    impl SlugLookup<String> for FixedLookup {
        async fn matching_slug(&self, _slug: &str) -> Result<Vec<String>, StoreError> {
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn resolve_returns_first_match() {
        let lookup = FixedLookup {
            result: Ok(vec!["first".into(), "second".into()]),
        };
        let resolver = SlugResolver::new(&lookup, "skill");

        let found: String = resolver.resolve("go-1a2b3c4d").await.unwrap();
        assert_eq!(found, "first");
    }

    #[tokio::test]
    async fn resolve_without_matches_is_not_found() {
        let lookup = FixedLookup { result: Ok(vec![]) };
        let resolver = SlugResolver::new(&lookup, "skill");

        let result: Result<String, _> = resolver.resolve("missing").await;
        assert_eq!(
            result,
            Err(ResolveError::NotFound {
                collection: "skill"
            })
        );
    }

    #[tokio::test]
    async fn store_failure_collapses_to_not_found() {
        let lookup = FixedLookup {
            result: Err(StoreError::DatabaseError("connection refused".into())),
        };
        let resolver = SlugResolver::new(&lookup, "skill");

        let result: Result<String, _> = resolver.resolve("go").await;
        assert!(matches!(result, Err(ResolveError::NotFound { .. })));
    }

    #[tokio::test]
    async fn resolve_optional_without_slug_is_none() {
        let lookup = FixedLookup {
            result: Ok(vec!["unused".into()]),
        };
        let resolver = SlugResolver::new(&lookup, "skill");

        let result: Option<String> = resolver.resolve_optional(None).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn blank_slug_is_not_found_without_hitting_the_store() {
        let lookup = FixedLookup {
            result: Ok(vec!["would match".into()]),
        };
        let resolver = SlugResolver::new(&lookup, "skill");

        let result: Result<String, _> = resolver.resolve("   ").await;
        assert!(result.is_err());
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Rust & Go -- Systems "), "rust-go-systems");
        assert_eq!(slugify("C++"), "c");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn unique_slug_appends_token() {
        let slug = unique_slug("Acme Corp");
        assert!(slug.starts_with("acme-corp-"));
        assert_eq!(slug.len(), "acme-corp-".len() + 8);

        let bare = unique_slug("!!!");
        assert_eq!(bare.len(), 8);
    }

    #[test]
    fn unique_slugs_differ_for_same_text() {
        assert_ne!(unique_slug("Go"), unique_slug("Go"));
    }
}
