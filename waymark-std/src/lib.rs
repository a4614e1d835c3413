//! # waymark-std
//!
//! Standard implementations for the Waymark client-side router.
//!
//! This crate provides:
//! - **Route table**: [`RouteTable`](table::RouteTable), [`RouteTableBuilder`](table::RouteTableBuilder)
//! - **View loading**: [`ViewLoader`](view::ViewLoader), [`LazyView`](lazy::LazyView)
//! - **Index backends**: [`SequentialIndex`](index::SequentialIndex), `MatchitIndex` (feature `matchit`)
//! - **Navigation**: [`Navigator`](navigator::Navigator) and standard hooks
//! - **Utilities**: path normalization and testing helpers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use waymark_core;

// Modules
pub mod hooks;
pub mod index;
pub mod lazy;
pub mod navigator;
pub mod path;
pub mod table;
pub mod testing;
pub mod view;
