//! Navigation on top of a [`RouteTable`].
//!
//! A [`Navigator`] matches a path, runs its [`NavigationHook`]s in
//! registration order, then resolves the matched view. Any hook may abort
//! the navigation by returning [`HookResult::Stop`].

use crate::{
    index::SequentialIndex,
    table::{Resolved, RouteMatch, RouteTable},
};
use std::sync::Arc;
use waymark_core::{
    DynNavigationHook, HookResult, NavigationContext, NavigationError, NavigationHook, Params,
    RouteIndex,
};

#[cfg(feature = "tracing")]
use tracing::Instrument;

/// Drives navigations through hooks and a route table.
pub struct Navigator<V, I = SequentialIndex> {
    table: RouteTable<V, I>,
    hooks: Vec<Arc<dyn DynNavigationHook>>,
}

impl<V, I> Navigator<V, I>
where
    V: Clone + Send + Sync + 'static,
    I: RouteIndex,
{
    /// Create a navigator with no hooks.
    pub fn new(table: RouteTable<V, I>) -> Self {
        Self {
            table,
            hooks: Vec::new(),
        }
    }

    /// Register a hook. Hooks run in registration order.
    pub fn hook<H: NavigationHook>(mut self, hook: H) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Register an already shared hook.
    pub fn shared_hook(mut self, hook: Arc<dyn DynNavigationHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// The underlying route table.
    pub fn table(&self) -> &RouteTable<V, I> {
        &self.table
    }

    /// Navigate to a normalized path.
    pub async fn navigate(&self, path: &str) -> Result<Resolved<V>, NavigationError> {
        let navigation = self.navigate_inner(path);
        #[cfg(feature = "tracing")]
        let navigation = navigation.instrument(tracing::info_span!("navigate", path));
        navigation.await
    }

    /// Navigate to a route by name.
    pub async fn navigate_to(
        &self,
        name: &str,
        params: &Params,
    ) -> Result<Resolved<V>, NavigationError> {
        let path = self.table.href(name, params)?;
        self.navigate(&path).await
    }

    /// Resolve a route's view ahead of navigation.
    ///
    /// Hooks are not run. Useful to warm lazy views the user is likely to
    /// visit next.
    pub async fn prefetch(&self, name: &str) -> Result<V, NavigationError> {
        let route = self
            .table
            .route(name)
            .ok_or_else(|| NavigationError::UnknownRoute(name.to_string()))?;
        Ok(route.resolve_view().await?)
    }

    async fn navigate_inner(&self, path: &str) -> Result<Resolved<V>, NavigationError> {
        let RouteMatch { route, params } = self.table.find(path)?;

        let ctx = NavigationContext {
            path,
            route: route.name(),
            params: &params,
        };
        for hook in &self.hooks {
            match hook.on_navigate_dyn(&ctx).await {
                Ok(HookResult::Next) => continue,
                Ok(HookResult::Stop) => {
                    return Err(NavigationError::Aborted {
                        route: route.name().to_string(),
                    });
                }
                Err(source) => {
                    return Err(NavigationError::Hook {
                        route: route.name().to_string(),
                        source,
                    });
                }
            }
        }

        let view = route.resolve_view().await?;
        Ok(Resolved {
            name: route.name().to_string(),
            params,
            view,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHook;
    use waymark_core::{BoxError, params};

    struct Deny(&'static str);

    impl NavigationHook for Deny {
        async fn on_navigate(&self, ctx: &NavigationContext<'_>) -> Result<HookResult, BoxError> {
            if ctx.route == self.0 {
                Ok(HookResult::Stop)
            } else {
                Ok(HookResult::Next)
            }
        }
    }

    struct Broken;

    impl NavigationHook for Broken {
        async fn on_navigate(&self, _ctx: &NavigationContext<'_>) -> Result<HookResult, BoxError> {
            Err("session store unavailable".into())
        }
    }

    fn table() -> RouteTable<&'static str> {
        RouteTable::builder()
            .eager("/", "Home", "home")
            .eager("/editor/:id", "MarkdownEditor", "editor")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_navigate_runs_hooks_in_order() {
        let recorder = RecordingHook::new();
        let navigator = Navigator::new(table()).hook(recorder.clone());

        let resolved = navigator.navigate("/editor/7").await.unwrap();
        assert_eq!(resolved.view, "editor");
        assert_eq!(resolved.params.get("id"), Some("7"));

        navigator.navigate("/").await.unwrap();
        assert_eq!(recorder.routes(), ["MarkdownEditor", "Home"]);
    }

    #[tokio::test]
    async fn test_stop_aborts_before_later_hooks() {
        let recorder = RecordingHook::new();
        let navigator = Navigator::new(table())
            .hook(Deny("MarkdownEditor"))
            .hook(recorder.clone());

        let err = navigator.navigate("/editor/7").await.unwrap_err();
        assert!(matches!(err, NavigationError::Aborted { ref route } if route == "MarkdownEditor"));
        assert_eq!(recorder.count(), 0);

        navigator.navigate("/").await.unwrap();
        assert_eq!(recorder.count(), 1);
    }

    #[tokio::test]
    async fn test_hook_error_fails_navigation() {
        let navigator = Navigator::new(table()).hook(Broken);
        let err = navigator.navigate("/").await.unwrap_err();
        assert!(matches!(err, NavigationError::Hook { .. }));
    }

    #[tokio::test]
    async fn test_not_found_skips_hooks() {
        let recorder = RecordingHook::new();
        let navigator = Navigator::new(table()).hook(recorder.clone());

        let err = navigator.navigate("/nonexistent").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(recorder.count(), 0);
    }

    #[tokio::test]
    async fn test_navigate_to_and_prefetch() {
        let navigator = Navigator::new(table());

        let resolved = navigator
            .navigate_to("MarkdownEditor", &params! { "id" => "abc123" })
            .await
            .unwrap();
        assert_eq!(resolved.name, "MarkdownEditor");

        assert!(matches!(
            navigator.navigate_to("Nope", &Params::new()).await,
            Err(NavigationError::Href(_))
        ));

        assert_eq!(navigator.prefetch("Home").await.unwrap(), "home");
        assert!(matches!(
            navigator.prefetch("Nope").await,
            Err(NavigationError::UnknownRoute(_))
        ));
    }
}
