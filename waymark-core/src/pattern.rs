//! Path patterns.
//!
//! A pattern is a `/`-separated template whose segments are either literal
//! text or a single `:name` parameter token:
//!
//! | pattern | matches | params |
//! |---------|---------|--------|
//! | `/` | `/` | - |
//! | `/about` | `/about` | - |
//! | `/editor/:id` | `/editor/abc123` | `id = "abc123"` |
//!
//! Matching is segment-by-segment and case-sensitive. There is no prefix
//! matching and no wildcard segment: segment counts must agree exactly.

use crate::{error::PatternError, params::Params};
use std::fmt;

/// One segment of a parsed [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Literal(String),
    /// Matches any single non-empty segment and binds it under this name.
    Param(String),
}

impl Segment {
    /// Classify one raw segment of `pattern`.
    fn parse(pattern: &str, raw: &str) -> Result<Self, PatternError> {
        if raw.is_empty() {
            return Err(PatternError::EmptySegment(pattern.to_string()));
        }

        match raw.strip_prefix(':') {
            Some("") => Err(PatternError::EmptyParameterName(pattern.to_string())),
            Some(name) if is_param_name(name) => Ok(Segment::Param(name.to_string())),
            Some(name) => Err(PatternError::InvalidParameterName {
                pattern: pattern.to_string(),
                name: name.to_string(),
            }),
            None if raw.contains(':') => Err(PatternError::MisplacedColon {
                pattern: pattern.to_string(),
                segment: raw.to_string(),
            }),
            None => Ok(Segment::Literal(raw.to_string())),
        }
    }

    /// Returns the parameter name if this is a parameter segment.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Param(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }
}

fn is_param_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A validated path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse and validate a pattern.
    ///
    /// ```
    /// use waymark_core::{Pattern, Segment};
    ///
    /// let pattern = Pattern::parse("/editor/:id").unwrap();
    /// assert_eq!(
    ///     pattern.segments(),
    ///     &[Segment::Literal("editor".into()), Segment::Param("id".into())]
    /// );
    /// assert!(Pattern::parse("editor").is_err());
    /// ```
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        let rest = source
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(source.to_string()))?;

        if rest.is_empty() {
            return Ok(Self {
                source: source.to_string(),
                segments: Vec::new(),
            });
        }
        if rest.ends_with('/') {
            return Err(PatternError::TrailingSlash(source.to_string()));
        }

        let mut segments: Vec<Segment> = Vec::new();
        for raw in rest.split('/') {
            let segment = Segment::parse(source, raw)?;
            if let Some(name) = segment.param_name() {
                if segments.iter().any(|s| s.param_name() == Some(name)) {
                    return Err(PatternError::DuplicateParameter {
                        pattern: source.to_string(),
                        name: name.to_string(),
                    });
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The pattern text as registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The parsed segments (empty for the root pattern).
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameter segments, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    /// Returns true if the pattern has no parameter segments.
    pub fn is_static(&self) -> bool {
        self.param_names().next().is_none()
    }

    /// Match a normalized path against this pattern.
    ///
    /// Returns the bound parameters on success.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let rest = path.strip_prefix('/')?;

        let mut params = Params::new();
        let mut parts = (!rest.is_empty()).then(|| rest.split('/')).into_iter().flatten();

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(text) if text == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => params.insert(name.as_str(), part),
            }
        }

        // Any left-over path segment is a count mismatch.
        match parts.next() {
            Some(_) => None,
            None => Some(params),
        }
    }

    /// Substitute parameters back into the pattern.
    ///
    /// Returns the first parameter name for which `lookup` yields `None`.
    pub fn fill<'a, F>(&self, mut lookup: F) -> Result<String, &str>
    where
        F: FnMut(&str) -> Option<&'a str>,
    {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(name) => out.push_str(lookup(name).ok_or(name.as_str())?),
            }
        }
        Ok(out)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let pattern = Pattern::parse("/").unwrap();
        assert!(pattern.segments().is_empty());
        assert!(pattern.is_static());
    }

    #[test]
    fn test_parse_param() {
        let pattern = Pattern::parse("/view/:id").unwrap();
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id"]);
        assert!(!pattern.is_static());
        assert_eq!(pattern.to_string(), "/view/:id");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Pattern::parse("about"),
            Err(PatternError::MissingLeadingSlash("about".to_string()))
        );
        assert_eq!(
            Pattern::parse("/about/"),
            Err(PatternError::TrailingSlash("/about/".to_string()))
        );
        assert_eq!(
            Pattern::parse("/a//b"),
            Err(PatternError::EmptySegment("/a//b".to_string()))
        );
        assert_eq!(
            Pattern::parse("/editor/:"),
            Err(PatternError::EmptyParameterName("/editor/:".to_string()))
        );
        assert!(matches!(
            Pattern::parse("/editor/:i-d"),
            Err(PatternError::InvalidParameterName { .. })
        ));
        assert!(matches!(
            Pattern::parse("/editor/doc:id"),
            Err(PatternError::MisplacedColon { .. })
        ));
        assert!(matches!(
            Pattern::parse("/:id/x/:id"),
            Err(PatternError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn test_matches_static() {
        let pattern = Pattern::parse("/about").unwrap();
        assert_eq!(pattern.matches("/about"), Some(Params::new()));
        assert_eq!(pattern.matches("/About"), None);
        assert_eq!(pattern.matches("/about/team"), None);
        assert_eq!(pattern.matches("/"), None);
    }

    #[test]
    fn test_matches_root() {
        let pattern = Pattern::parse("/").unwrap();
        assert_eq!(pattern.matches("/"), Some(Params::new()));
        assert_eq!(pattern.matches("/about"), None);
        assert_eq!(pattern.matches(""), None);
    }

    #[test]
    fn test_matches_param() {
        let pattern = Pattern::parse("/editor/:id").unwrap();
        let params = pattern.matches("/editor/abc123").unwrap();
        assert_eq!(params.get("id"), Some("abc123"));

        assert_eq!(pattern.matches("/editor"), None);
        assert_eq!(pattern.matches("/editor/"), None);
        assert_eq!(pattern.matches("/editor/a/b"), None);
        assert_eq!(pattern.matches("editor/abc"), None);
    }

    #[test]
    fn test_fill() {
        let pattern = Pattern::parse("/editor/:id").unwrap();
        assert_eq!(
            pattern.fill(|name| (name == "id").then_some("42")),
            Ok("/editor/42".to_string())
        );
        assert_eq!(pattern.fill(|_| None), Err("id"));

        let root = Pattern::parse("/").unwrap();
        assert_eq!(root.fill(|_| None), Ok("/".to_string()));
    }
}
