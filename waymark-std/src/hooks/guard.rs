//! Guard Hook - Allow or refuse navigations by predicate.

use waymark_core::{BoxError, HookResult, NavigationContext, NavigationHook};

/// A hook that stops any navigation for which `allow` returns `false`.
///
/// # Example
///
/// ```rust
/// use waymark_core::NavigationContext;
/// use waymark_std::hooks::GuardHook;
///
/// // Refuse non-numeric document ids.
/// let numeric_ids = GuardHook::new(|ctx: &NavigationContext<'_>| {
///     ctx.params
///         .get("id")
///         .is_none_or(|id| id.chars().all(|c| c.is_ascii_digit()))
/// });
/// # let _ = numeric_ids;
/// ```
pub struct GuardHook<F> {
    allow: F,
}

impl<F> GuardHook<F> {
    /// Create a new `GuardHook`.
    pub fn new(allow: F) -> Self {
        Self { allow }
    }
}

impl<F> NavigationHook for GuardHook<F>
where
    F: Fn(&NavigationContext<'_>) -> bool + Send + Sync + 'static,
{
    async fn on_navigate(&self, ctx: &NavigationContext<'_>) -> Result<HookResult, BoxError> {
        if (self.allow)(ctx) {
            Ok(HookResult::Next)
        } else {
            Ok(HookResult::Stop)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_core::Params;

    #[tokio::test]
    async fn test_guard_hook() {
        let guard = GuardHook::new(|ctx: &NavigationContext<'_>| ctx.route != "Admin");
        let params = Params::new();

        let ctx = NavigationContext {
            path: "/",
            route: "Home",
            params: &params,
        };
        assert_eq!(guard.on_navigate(&ctx).await.unwrap(), HookResult::Next);

        let ctx = NavigationContext {
            path: "/admin",
            route: "Admin",
            params: &params,
        };
        assert_eq!(guard.on_navigate(&ctx).await.unwrap(), HookResult::Stop);
    }
}
