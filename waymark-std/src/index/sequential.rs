//! Ordered-scan route index.
//!
//! This is the default index and requires no external dependencies.

use waymark_core::{ConfigError, IndexHit, Pattern, RouteIndex, RouteIndexBuilder};

/// Tries each pattern in registration order; the first full match wins.
#[derive(Debug, Clone, Default)]
pub struct SequentialIndex {
    patterns: Vec<(Pattern, usize)>,
}

impl SequentialIndex {
    /// Get the number of indexed patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl RouteIndex for SequentialIndex {
    fn lookup(&self, path: &str) -> Option<IndexHit> {
        self.patterns.iter().find_map(|(pattern, slot)| {
            pattern
                .matches(path)
                .map(|params| IndexHit { slot: *slot, params })
        })
    }
}

/// Builder for `SequentialIndex`.
#[derive(Debug, Default)]
pub struct SequentialIndexBuilder {
    patterns: Vec<(Pattern, usize)>,
}

impl RouteIndexBuilder for SequentialIndexBuilder {
    type Index = SequentialIndex;

    fn insert(&mut self, pattern: &Pattern, slot: usize) -> Result<(), ConfigError> {
        self.patterns.push((pattern.clone(), slot));
        Ok(())
    }

    fn build(self) -> Result<Self::Index, ConfigError> {
        Ok(SequentialIndex {
            patterns: self.patterns,
        })
    }
}
