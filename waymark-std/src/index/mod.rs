//! # Route Index Backends
//!
//! | Index | Matching order | Notes |
//! |-------|----------------|-------|
//! | `SequentialIndex` | Registration order, first match wins | Default |
//! | `MatchitIndex` | Static segments beat parameters | Radix tree, feature `matchit` |
//!
//! Both agree on tables whose patterns never overlap.

pub mod sequential;

#[cfg(feature = "matchit")]
pub mod matchit;

pub use sequential::{SequentialIndex, SequentialIndexBuilder};

#[cfg(feature = "matchit")]
pub use self::matchit::{MatchitIndex, MatchitIndexBuilder};
