use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("No route named '{0}'")]
    UnknownRoute(String),

    #[error("Route '{route}' is missing parameter '{param}'")]
    MissingParam { route: String, param: String },
}

/// Named routes resolved to paths, e.g. `portfolios:skill_detail` with
/// `slug = go-1a2b` becomes `/portfolio/skills/go-1a2b`.
#[derive(Debug, Clone, Default)]
pub struct UrlReverser {
    routes: HashMap<&'static str, &'static str>,
}

impl UrlReverser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, name: &'static str, pattern: &'static str) -> Self {
        self.routes.insert(name, pattern);
        self
    }

    pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let pattern = self
            .routes
            .get(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        let mut path = pattern.to_string();
        for (key, value) in params {
            path = path.replace(&format!("{{{key}}}"), value);
        }

        if let Some(start) = path.find('{') {
            let param = path[start + 1..]
                .split('}')
                .next()
                .unwrap_or_default()
                .to_string();
            return Err(RouteError::MissingParam {
                route: name.to_string(),
                param,
            });
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reverser() -> UrlReverser {
        UrlReverser::new()
            .route("portfolios:skills", "/portfolio/skills")
            .route("portfolios:skill_detail", "/portfolio/skills/{slug}")
    }

    #[test]
    fn reverse_plain_route() {
        assert_eq!(
            reverser().reverse("portfolios:skills", &[]),
            Ok("/portfolio/skills".to_string())
        );
    }

    #[test]
    fn reverse_substitutes_params() {
        assert_eq!(
            reverser().reverse("portfolios:skill_detail", &[("slug", "go-1a2b3c4d")]),
            Ok("/portfolio/skills/go-1a2b3c4d".to_string())
        );
    }

    #[test]
    fn reverse_reports_unknown_and_incomplete_routes() {
        assert_eq!(
            reverser().reverse("portfolios:nope", &[]),
            Err(RouteError::UnknownRoute("portfolios:nope".to_string()))
        );
        assert_eq!(
            reverser().reverse("portfolios:skill_detail", &[]),
            Err(RouteError::MissingParam {
                route: "portfolios:skill_detail".to_string(),
                param: "slug".to_string(),
            })
        );
    }
}
