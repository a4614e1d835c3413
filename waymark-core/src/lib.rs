//! # waymark-core
//!
//! Core traits and types for the Waymark client-side router.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! view crates and extensions that don't need the full `waymark-std`
//! implementation.
//!
//! # Building Blocks
//!
//! - [`Pattern`] / [`Segment`] - Parsed path templates like `/editor/:id`
//! - [`Params`] - Values bound by parameter segments
//! - [`RouteIndex`] / [`RouteIndexBuilder`] - Swappable matching backends
//! - [`Loader`] / [`DynLoader`] - Asynchronous view producers for lazy routes
//! - [`NavigationHook`] / [`DynNavigationHook`] - Navigation observers
//!
//! # Error Types
//!
//! - [`WaymarkError`] - Top-level error type
//! - [`ConfigError`] / [`PatternError`] - Start-up configuration errors
//! - [`NotFound`] / [`ViewLoadError`] / [`RouteError`] - Navigation outcomes
//! - [`HrefError`] - Reverse routing errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod hook;
mod index;
mod loader;
mod params;
mod pattern;

// Re-exports
pub use error::{
    BoxError, ConfigError, HrefError, NavigationError, NotFound, PatternError, RouteError,
    SharedError, ViewLoadError, WaymarkError,
};
pub use hook::{DynNavigationHook, HookResult, NavigationContext, NavigationHook};
pub use index::{IndexHit, RouteIndex, RouteIndexBuilder};
pub use loader::{DynLoader, Loader};
pub use params::Params;
pub use pattern::{Pattern, Segment};
