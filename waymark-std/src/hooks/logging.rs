//! Logging hook for navigation observation.

use waymark_core::{BoxError, HookResult, NavigationContext, NavigationHook};

/// A hook that logs navigations for debugging/observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHook;

impl NavigationHook for LoggingHook {
    async fn on_navigate(&self, ctx: &NavigationContext<'_>) -> Result<HookResult, BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                path = ctx.path,
                route = ctx.route,
                params = ?ctx.params,
                "Navigating"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = ctx; // Suppress unused warning
        }
        Ok(HookResult::Next)
    }
}
