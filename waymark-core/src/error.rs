//! Error types for Waymark.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`WaymarkError`] - Top-level error type for all Waymark operations
//! - [`ConfigError`] - Start-up errors while building a route table
//! - [`PatternError`] - Malformed path patterns
//! - [`NotFound`] - No route matched a path
//! - [`ViewLoadError`] - A lazy view failed to load
//! - [`HrefError`] - Reverse routing failures
//! - [`RouteError`] / [`NavigationError`] - Failures of a full navigation

use std::{sync::Arc, time::Duration};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A reference-counted error, shared by every caller waiting on the same load.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Waymark operations.
#[derive(Error, Debug)]
pub enum WaymarkError {
    /// The route configuration was rejected at start-up.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A navigation failed.
    #[error("navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised while parsing a path pattern such as `/editor/:id`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Patterns must be absolute.
    #[error("pattern `{0}` must start with `/`")]
    MissingLeadingSlash(String),

    /// Only the root pattern may end with `/`.
    #[error("pattern `{0}` must not end with `/`")]
    TrailingSlash(String),

    /// Two consecutive slashes.
    #[error("pattern `{0}` contains an empty segment")]
    EmptySegment(String),

    /// A lone `:` with no name after it.
    #[error("pattern `{0}` contains a parameter with no name")]
    EmptyParameterName(String),

    /// Parameter names are restricted to ASCII alphanumerics and `_`.
    #[error("pattern `{pattern}` has invalid parameter name `{name}`")]
    InvalidParameterName {
        /// The offending pattern.
        pattern: String,
        /// The rejected name.
        name: String,
    },

    /// A `:` somewhere other than the start of a segment.
    #[error("pattern `{pattern}` has `:` inside literal segment `{segment}`")]
    MisplacedColon {
        /// The offending pattern.
        pattern: String,
        /// The segment containing the colon.
        segment: String,
    },

    /// The same parameter name bound twice.
    #[error("pattern `{pattern}` binds parameter `{name}` more than once")]
    DuplicateParameter {
        /// The offending pattern.
        pattern: String,
        /// The repeated name.
        name: String,
    },
}

/// Errors that make a route configuration unusable.
///
/// These are raised when the table is built, never on first navigation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A route was registered with an empty name.
    #[error("route name must not be empty (pattern `{0}`)")]
    EmptyName(String),

    /// Two routes share a name.
    #[error("route name `{0}` is registered more than once")]
    DuplicateName(String),

    /// A route's pattern could not be parsed.
    #[error("route `{name}` has an invalid pattern")]
    InvalidPattern {
        /// The route name.
        name: String,
        /// The underlying parse error.
        #[source]
        source: PatternError,
    },

    /// The index backend rejected a pattern.
    #[error("route index rejected configuration: {0}")]
    Index(String),
}

/// No route's pattern matches the path.
///
/// Not fatal: applications usually render a "page not found" view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no route matches path `{path}`")]
pub struct NotFound {
    /// The path that failed to match.
    pub path: String,
}

impl NotFound {
    /// Create a new `NotFound` for the given path.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// A lazily loaded view could not be produced.
///
/// Cloneable so that every caller attached to the same in-flight load
/// observes the same failure.
#[derive(Error, Debug, Clone)]
pub enum ViewLoadError {
    /// The loader returned an error.
    #[error("failed to load view for route `{route}`")]
    Failed {
        /// The route whose view failed to load.
        route: String,
        /// The loader's error.
        #[source]
        source: SharedError,
    },

    /// The loader did not finish within the configured deadline.
    #[error("loading view for route `{route}` timed out after {after:?}")]
    TimedOut {
        /// The route whose view failed to load.
        route: String,
        /// The deadline that elapsed.
        after: Duration,
    },
}

impl ViewLoadError {
    /// Name of the route whose view failed to load.
    pub fn route(&self) -> &str {
        match self {
            ViewLoadError::Failed { route, .. } | ViewLoadError::TimedOut { route, .. } => route,
        }
    }
}

/// Errors building a URL from a route name and parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HrefError {
    /// No route has this name.
    #[error("no route named `{0}`")]
    UnknownRoute(String),

    /// The pattern needs a parameter that was not supplied.
    #[error("route `{route}` requires parameter `{param}`")]
    MissingParameter {
        /// The route name.
        route: String,
        /// The missing parameter.
        param: String,
    },

    /// A parameter value would not round-trip as a single segment.
    #[error("parameter `{param}` of route `{route}` has invalid value `{value}`")]
    InvalidParameter {
        /// The route name.
        route: String,
        /// The parameter name.
        param: String,
        /// The rejected value.
        value: String,
    },
}

/// Errors from matching a path and resolving its view in one step.
#[derive(Error, Debug, Clone)]
pub enum RouteError {
    /// Nothing matched.
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// The matched route's view failed to load.
    #[error(transparent)]
    ViewLoad(#[from] ViewLoadError),
}

/// Errors from a navigation driven through hooks.
#[derive(Error, Debug)]
pub enum NavigationError {
    /// Matching or view resolution failed.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// The target URL could not be built.
    #[error(transparent)]
    Href(#[from] HrefError),

    /// A hook stopped the navigation.
    #[error("navigation to route `{route}` was aborted by a hook")]
    Aborted {
        /// The route that was being entered.
        route: String,
    },

    /// A hook failed.
    #[error("navigation hook failed for route `{route}`")]
    Hook {
        /// The route that was being entered.
        route: String,
        /// The hook's error.
        #[source]
        source: BoxError,
    },

    /// A prefetch named a route that does not exist.
    #[error("no route named `{0}`")]
    UnknownRoute(String),
}

impl NavigationError {
    /// Returns true if the navigation failed because nothing matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavigationError::Route(RouteError::NotFound(_)))
    }
}

impl From<NotFound> for NavigationError {
    fn from(err: NotFound) -> Self {
        NavigationError::Route(RouteError::NotFound(err))
    }
}

impl From<ViewLoadError> for NavigationError {
    fn from(err: ViewLoadError) -> Self {
        NavigationError::Route(RouteError::ViewLoad(err))
    }
}

// Convenience conversions
impl From<BoxError> for WaymarkError {
    fn from(err: BoxError) -> Self {
        WaymarkError::Custom(err)
    }
}
