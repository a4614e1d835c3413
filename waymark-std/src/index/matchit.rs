//! Matchit-based route index.
//!
//! Radix-tree lookup for large tables. `:name` segments are registered as
//! matchit `{name}` parameters. Overlapping patterns are resolved by matchit's
//! priority rules (static before parameter) rather than registration order,
//! and patterns matchit considers conflicting are rejected at build time.

use matchit::{Match, Router as InnerRouter};
use waymark_core::{
    ConfigError, IndexHit, Params, Pattern, RouteIndex, RouteIndexBuilder, Segment,
};

/// A route index based on `matchit`.
pub struct MatchitIndex {
    router: InnerRouter<usize>,
}

impl RouteIndex for MatchitIndex {
    fn lookup(&self, path: &str) -> Option<IndexHit> {
        let Match { value, params } = self.router.at(path).ok()?;
        // Parameters never bind an empty segment.
        if params.iter().any(|(_, v)| v.is_empty()) {
            return None;
        }
        Some(IndexHit {
            slot: *value,
            params: params.iter().collect::<Params>(),
        })
    }
}

/// Builder for `MatchitIndex`.
pub struct MatchitIndexBuilder {
    router: InnerRouter<usize>,
}

impl Default for MatchitIndexBuilder {
    fn default() -> Self {
        Self {
            router: InnerRouter::new(),
        }
    }
}

/// Render a pattern in matchit's route syntax.
fn to_matchit(pattern: &Pattern) -> String {
    if pattern.segments().is_empty() {
        return "/".to_string();
    }

    let mut route = String::with_capacity(pattern.as_str().len() + 2);
    for segment in pattern.segments() {
        route.push('/');
        match segment {
            Segment::Literal(text) => route.push_str(&text.replace('{', "{{").replace('}', "}}")),
            Segment::Param(name) => {
                route.push('{');
                route.push_str(name);
                route.push('}');
            }
        }
    }
    route
}

impl RouteIndexBuilder for MatchitIndexBuilder {
    type Index = MatchitIndex;

    fn insert(&mut self, pattern: &Pattern, slot: usize) -> Result<(), ConfigError> {
        self.router
            .insert(to_matchit(pattern), slot)
            .map_err(|e| {
                // matchit errors if the route conflicts with an existing one
                ConfigError::Index(format!("{}: {}", pattern, e))
            })
    }

    fn build(self) -> Result<Self::Index, ConfigError> {
        Ok(MatchitIndex {
            router: self.router,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(patterns: &[&str]) -> Result<MatchitIndex, ConfigError> {
        let mut builder = MatchitIndexBuilder::default();
        for (slot, pattern) in patterns.iter().enumerate() {
            builder.insert(&Pattern::parse(pattern).unwrap(), slot)?;
        }
        builder.build()
    }

    #[test]
    fn test_to_matchit_syntax() {
        let pattern = Pattern::parse("/editor/:id").unwrap();
        assert_eq!(to_matchit(&pattern), "/editor/{id}");
        assert_eq!(to_matchit(&Pattern::parse("/").unwrap()), "/");
    }

    #[test]
    fn test_matchit_lookup() {
        let index = index(&["/", "/about", "/editor/:id", "/view/:id"]).unwrap();

        assert_eq!(index.lookup("/").unwrap().slot, 0);
        assert_eq!(index.lookup("/about").unwrap().slot, 1);

        let hit = index.lookup("/view/xyz").unwrap();
        assert_eq!(hit.slot, 3);
        assert_eq!(hit.params.get("id"), Some("xyz"));

        assert!(index.lookup("/editor").is_none());
        assert!(index.lookup("/nonexistent").is_none());
    }

    #[test]
    fn test_conflicting_params_rejected() {
        let result = index(&["/editor/:id", "/editor/:slug"]);
        assert!(matches!(result, Err(ConfigError::Index(_))));
    }
}
