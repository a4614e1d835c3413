//! # Navigation Hooks
//!
//! Hooks observe navigations after a path has matched and before the view is
//! resolved. Each hook either lets the navigation continue (`Next`) or stops
//! it (`Stop`). Typical uses are logging, analytics and access checks.
//!
//! # Static vs Dynamic Dispatch
//!
//! This trait uses `impl Future` returns for static dispatch. For
//! collections of heterogeneous hooks, use [`DynNavigationHook`].

use crate::{error::BoxError, params::Params};
use std::{future::Future, pin::Pin};

/// Result of hook execution indicating whether the navigation proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult {
    /// Continue to the next hook, then resolve the view.
    Next,
    /// Abort the navigation.
    Stop,
}

/// What a hook is told about the navigation in progress.
#[derive(Debug, Clone, Copy)]
pub struct NavigationContext<'a> {
    /// The requested path.
    pub path: &'a str,
    /// Name of the matched route.
    pub route: &'a str,
    /// Parameters bound by the matched pattern.
    pub params: &'a Params,
}

/// Observes or vetoes navigations.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `NavigationHook`",
    label = "missing `NavigationHook` implementation",
    note = "Hooks must implement `on_navigate`."
)]
pub trait NavigationHook: Send + Sync + 'static {
    /// Called once per navigation, in registration order.
    fn on_navigate(
        &self,
        ctx: &NavigationContext<'_>,
    ) -> impl Future<Output = Result<HookResult, BoxError>> + Send;
}

/// Dynamic object-safe version of [`NavigationHook`].
pub trait DynNavigationHook: Send + Sync + 'static {
    /// Called once per navigation (dynamic dispatch version).
    fn on_navigate_dyn<'a>(
        &'a self,
        ctx: &'a NavigationContext<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<HookResult, BoxError>> + Send + 'a>>;
}

// Blanket implementation: Any type implementing NavigationHook implements DynNavigationHook automatically.
impl<T: NavigationHook> DynNavigationHook for T {
    fn on_navigate_dyn<'a>(
        &'a self,
        ctx: &'a NavigationContext<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<HookResult, BoxError>> + Send + 'a>> {
        Box::pin(self.on_navigate(ctx))
    }
}
