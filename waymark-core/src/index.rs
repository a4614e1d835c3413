//! Route index abstraction.
//!
//! A route index answers "which registered pattern matches this path?".
//! Different backends (ordered scan, radix tree) can be swapped without
//! changing the route table that owns the definitions.

use crate::{error::ConfigError, params::Params, pattern::Pattern};

/// A successful index lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHit {
    /// Registration slot of the matched route.
    pub slot: usize,
    /// Parameters bound by the matched pattern.
    pub params: Params,
}

/// A lookup structure from paths to route slots.
pub trait RouteIndex: Send + Sync + 'static {
    /// Find the route matching `path`.
    fn lookup(&self, path: &str) -> Option<IndexHit>;

    /// Check if any route matches `path`.
    fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }
}

/// Builder for constructing route indexes.
///
/// Slots are inserted in registration order, starting at zero.
pub trait RouteIndexBuilder: Default + Send {
    /// The index type this builder produces.
    type Index: RouteIndex;

    /// Register `pattern` under `slot`.
    ///
    /// Returns an error if the backend cannot represent the pattern.
    fn insert(&mut self, pattern: &Pattern, slot: usize) -> Result<(), ConfigError>;

    /// Build the index, consuming the builder.
    fn build(self) -> Result<Self::Index, ConfigError>;
}
