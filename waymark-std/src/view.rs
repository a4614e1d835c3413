//! How a route produces its view.

use crate::lazy::{LazyView, LoadState};
use waymark_core::{Loader, ViewLoadError};

/// Loading strategy of a route, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingMode {
    /// The view exists from start-up.
    Eager,
    /// The view is produced on first navigation.
    Lazy,
}

/// Source of a route's view.
#[derive(Debug, Clone)]
pub enum ViewLoader<V> {
    /// Already resolved; resolving never suspends.
    Eager(V),
    /// Produced by a loader on first use, then cached.
    Lazy(LazyView<V>),
}

impl<V> ViewLoader<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// An eagerly available view.
    pub fn eager(view: V) -> Self {
        ViewLoader::Eager(view)
    }

    /// A view produced by `loader` on first use.
    pub fn lazy(loader: impl Loader<V>) -> Self {
        ViewLoader::Lazy(LazyView::new(loader))
    }

    /// The loading strategy.
    pub fn mode(&self) -> LoadingMode {
        match self {
            ViewLoader::Eager(_) => LoadingMode::Eager,
            ViewLoader::Lazy(_) => LoadingMode::Lazy,
        }
    }

    /// Load state; eager views are always `Resolved`.
    pub fn state(&self) -> LoadState {
        match self {
            ViewLoader::Eager(_) => LoadState::Resolved,
            ViewLoader::Lazy(lazy) => lazy.state(),
        }
    }

    /// The view if it is available without loading.
    pub fn cached(&self) -> Option<V> {
        match self {
            ViewLoader::Eager(view) => Some(view.clone()),
            ViewLoader::Lazy(lazy) => lazy.get(),
        }
    }

    /// Produce the view, loading it if this is an unresolved lazy view.
    pub async fn resolve(&self, route: &str) -> Result<V, ViewLoadError> {
        match self {
            ViewLoader::Eager(view) => Ok(view.clone()),
            ViewLoader::Lazy(lazy) => lazy.resolve(route).await,
        }
    }
}

impl<V> From<LazyView<V>> for ViewLoader<V> {
    fn from(lazy: LazyView<V>) -> Self {
        ViewLoader::Lazy(lazy)
    }
}
