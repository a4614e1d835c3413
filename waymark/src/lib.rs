//! # waymark - Client-Side Route Table
//!
//! `waymark` maps URL paths to views for single-page applications. Routes are
//! static (`/about`) or parametric (`/editor/:id`), matched in registration
//! order, and their views are either available immediately or loaded lazily
//! on first navigation.
//!
//! ## Quick Start
//!
//! ```rust
//! use waymark::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let table = RouteTable::builder()
//!     .eager("/", "Home", "home")
//!     .lazy("/about", "About", || async { Ok::<_, BoxError>("about") })
//!     .eager("/editor/:id", "MarkdownEditor", "editor")
//!     .build()
//!     .expect("valid route table");
//!
//! let resolved = table.resolve("/editor/abc123").await.unwrap();
//! assert_eq!(resolved.params.get("id"), Some("abc123"));
//!
//! // Lazy views load once, then come from the cache.
//! assert_eq!(table.resolve("/about").await.unwrap().view, "about");
//! # });
//! ```
//!
//! ## Lazy Views
//!
//! A lazy route's loader runs on the first navigation. Concurrent navigations
//! share the load in flight; a success is cached for good; a failure is
//! reported as [`ViewLoadError`] and retried on the next navigation.
//!
//! ## Features
//!
//! - `tracing` - structured log events for matching, loading and navigation
//! - `matchit` - radix-tree [`MatchitIndex`] backend
//! - `timeout` - deadlines for lazy loads (requires a Tokio runtime)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod app;

pub use waymark_core::{
    // Errors
    BoxError,
    ConfigError,
    HrefError,
    NavigationError,
    NotFound,
    PatternError,
    RouteError,
    SharedError,
    ViewLoadError,
    WaymarkError,
    // Patterns
    Params,
    Pattern,
    Segment,
    params,
    // Loaders
    DynLoader,
    Loader,
    // Hooks
    DynNavigationHook,
    HookResult,
    NavigationContext,
    NavigationHook,
    // Index
    IndexHit,
    RouteIndex,
    RouteIndexBuilder,
};

// Route table
pub use waymark_std::{
    index::{SequentialIndex, SequentialIndexBuilder},
    lazy::{LazyView, LoadState, LoaderPanicked},
    navigator::Navigator,
    path::{is_normalized, normalize_path},
    table::{Resolved, RouteDefinition, RouteMatch, RouteResult, RouteTable, RouteTableBuilder},
    view::{LoadingMode, ViewLoader},
};

#[cfg(feature = "matchit")]
pub use waymark_std::index::{MatchitIndex, MatchitIndexBuilder};

/// Standard hook implementations.
pub mod hooks {
    #![allow(clippy::wildcard_imports)]
    pub use waymark_std::hooks::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use waymark_std::testing::*;
}

/// Prelude module - common imports for Waymark.
///
/// # Usage
///
/// ```rust,ignore
/// use waymark::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError,
        ConfigError,
        Loader,
        NavigationError,
        NavigationHook,
        Navigator,
        NotFound,
        Params,
        RouteError,
        RouteResult,
        RouteTable,
        ViewLoadError,
        ViewLoader,
    };
}
