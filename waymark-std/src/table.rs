//! The route table.
//!
//! A [`RouteTable`] is an immutable, ordered list of [`RouteDefinition`]s built
//! once at start-up. Every configuration problem (duplicate names, malformed
//! patterns, index conflicts) is reported by [`RouteTableBuilder::build`], so
//! a table that exists is a table that can serve every navigation.
//!
//! # Example
//!
//! ```rust
//! use waymark_core::BoxError;
//! use waymark_std::table::RouteTable;
//!
//! let table = RouteTable::builder()
//!     .eager("/", "Home", "home-view")
//!     .lazy("/about", "About", || async { Ok::<_, BoxError>("about-view") })
//!     .eager("/editor/:id", "MarkdownEditor", "editor-view")
//!     .build()
//!     .unwrap();
//!
//! let matched = table.find("/editor/abc123").unwrap();
//! assert_eq!(matched.route.name(), "MarkdownEditor");
//! assert_eq!(matched.params.get("id"), Some("abc123"));
//! assert!(table.find("/editor").is_err());
//! ```

use crate::{
    index::{SequentialIndex, SequentialIndexBuilder},
    lazy::LoadState,
    view::{LoadingMode, ViewLoader},
};
use std::{collections::HashMap, fmt, marker::PhantomData};
use waymark_core::{
    ConfigError, HrefError, Loader, NotFound, Params, Pattern, RouteError, RouteIndex,
    RouteIndexBuilder, ViewLoadError,
};

#[cfg(feature = "timeout")]
use std::time::Duration;

/// A single route: pattern, unique name and view source.
pub struct RouteDefinition<V> {
    pattern: Pattern,
    name: String,
    view: ViewLoader<V>,
}

impl<V> RouteDefinition<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// The route's pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The route's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The route's view source.
    pub fn view(&self) -> &ViewLoader<V> {
        &self.view
    }

    /// Eager or lazy.
    pub fn mode(&self) -> LoadingMode {
        self.view.mode()
    }

    /// Load state of the view.
    pub fn state(&self) -> LoadState {
        self.view.state()
    }

    /// Produce this route's view.
    ///
    /// Eager views return immediately. Lazy views load on the first call
    /// and are cached; concurrent calls share one load; a failed load is
    /// retried by the next call.
    pub async fn resolve_view(&self) -> Result<V, ViewLoadError> {
        self.view.resolve(&self.name).await
    }

    /// Build the URL of this route for the given parameters.
    ///
    /// Every parameter value must be a non-empty single segment.
    pub fn href(&self, params: &Params) -> Result<String, HrefError> {
        for param in self.pattern.param_names() {
            let value = params.get(param).ok_or_else(|| HrefError::MissingParameter {
                route: self.name.clone(),
                param: param.to_string(),
            })?;
            if value.is_empty() || value.contains('/') {
                return Err(HrefError::InvalidParameter {
                    route: self.name.clone(),
                    param: param.to_string(),
                    value: value.to_string(),
                });
            }
        }

        self.pattern
            .fill(|param| params.get(param))
            .map_err(|param| HrefError::MissingParameter {
                route: self.name.clone(),
                param: param.to_string(),
            })
    }
}

impl<V> fmt::Debug for RouteDefinition<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.view {
            ViewLoader::Eager(_) => LoadingMode::Eager,
            ViewLoader::Lazy(_) => LoadingMode::Lazy,
        };
        f.debug_struct("RouteDefinition")
            .field("pattern", &self.pattern.as_str())
            .field("name", &self.name)
            .field("mode", &mode)
            .finish()
    }
}

/// A route matched against a path.
#[derive(Debug)]
pub struct RouteMatch<'a, V> {
    /// The matched route.
    pub route: &'a RouteDefinition<V>,
    /// Parameters extracted from the path.
    pub params: Params,
}

impl<V> RouteMatch<'_, V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Name of the matched route.
    pub fn name(&self) -> &str {
        self.route.name()
    }

    /// Resolve the matched route's view.
    pub async fn resolve_view(&self) -> Result<V, ViewLoadError> {
        self.route.resolve_view().await
    }
}

/// Result of matching a path against the table.
#[derive(Debug)]
pub enum RouteResult<'a, V> {
    /// A route matched.
    Matched(RouteMatch<'a, V>),
    /// No route matched.
    NotFound,
}

impl<'a, V> RouteResult<'a, V> {
    /// Returns true if a route matched.
    pub fn is_matched(&self) -> bool {
        matches!(self, RouteResult::Matched(_))
    }

    /// Returns the match, if any.
    pub fn matched(self) -> Option<RouteMatch<'a, V>> {
        match self {
            RouteResult::Matched(m) => Some(m),
            RouteResult::NotFound => None,
        }
    }
}

/// A matched route together with its resolved view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<V> {
    /// Name of the matched route.
    pub name: String,
    /// Parameters extracted from the path.
    pub params: Params,
    /// The resolved view.
    pub view: V,
}

/// An immutable, ordered collection of routes.
pub struct RouteTable<V, I = SequentialIndex> {
    routes: Vec<RouteDefinition<V>>,
    names: HashMap<String, usize>,
    index: I,
}

impl<V> RouteTable<V, SequentialIndex>
where
    V: Clone + Send + Sync + 'static,
{
    /// Start configuring a table with the default sequential index.
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder::new()
    }
}

impl<V, I> RouteTable<V, I>
where
    V: Clone + Send + Sync + 'static,
    I: RouteIndex,
{
    /// Match a normalized path.
    ///
    /// Pure lookup: never suspends and never loads a view.
    pub fn match_path(&self, path: &str) -> RouteResult<'_, V> {
        let hit = self
            .index
            .lookup(path)
            .and_then(|hit| self.routes.get(hit.slot).map(|route| (route, hit.params)));

        match hit {
            Some((route, params)) => {
                #[cfg(feature = "tracing")]
                {
                    tracing::trace!(path, route = route.name(), "route matched");
                }
                RouteResult::Matched(RouteMatch { route, params })
            }
            None => {
                #[cfg(feature = "tracing")]
                {
                    tracing::debug!(path, "no route matched");
                }
                RouteResult::NotFound
            }
        }
    }

    /// Match a path, reporting a miss as [`NotFound`].
    pub fn find(&self, path: &str) -> Result<RouteMatch<'_, V>, NotFound> {
        self.match_path(path)
            .matched()
            .ok_or_else(|| NotFound::new(path))
    }

    /// Match a path and resolve the matched route's view.
    pub async fn resolve(&self, path: &str) -> Result<Resolved<V>, RouteError> {
        let RouteMatch { route, params } = self.find(path)?;
        let view = route.resolve_view().await?;
        Ok(Resolved {
            name: route.name.clone(),
            params,
            view,
        })
    }

    /// Look up a route by name.
    pub fn route(&self, name: &str) -> Option<&RouteDefinition<V>> {
        self.names.get(name).and_then(|&slot| self.routes.get(slot))
    }

    /// Build the URL of the named route.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, HrefError> {
        self.route(name)
            .ok_or_else(|| HrefError::UnknownRoute(name.to_string()))?
            .href(params)
    }

    /// Iterate over routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteDefinition<V>> {
        self.routes.iter()
    }

    /// Get the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<V, I> fmt::Debug for RouteTable<V, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

struct Entry<V> {
    pattern: String,
    name: String,
    view: ViewLoader<V>,
}

/// Builder for [`RouteTable`].
///
/// Routes are matched in the order they are added.
pub struct RouteTableBuilder<V, B = SequentialIndexBuilder> {
    entries: Vec<Entry<V>>,
    #[cfg(feature = "timeout")]
    load_timeout: Option<Duration>,
    _index: PhantomData<fn() -> B>,
}

impl<V> Default for RouteTableBuilder<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RouteTableBuilder<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a new empty builder using the sequential index.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            #[cfg(feature = "timeout")]
            load_timeout: None,
            _index: PhantomData,
        }
    }
}

impl<V, B> RouteTableBuilder<V, B>
where
    V: Clone + Send + Sync + 'static,
    B: RouteIndexBuilder,
{
    /// Register a route with an explicit view source.
    pub fn route(
        mut self,
        pattern: impl Into<String>,
        name: impl Into<String>,
        view: ViewLoader<V>,
    ) -> Self {
        self.entries.push(Entry {
            pattern: pattern.into(),
            name: name.into(),
            view,
        });
        self
    }

    /// Register a route whose view is available immediately.
    pub fn eager(self, pattern: impl Into<String>, name: impl Into<String>, view: V) -> Self {
        self.route(pattern, name, ViewLoader::eager(view))
    }

    /// Register a route whose view is produced by `loader` on first use.
    pub fn lazy(
        self,
        pattern: impl Into<String>,
        name: impl Into<String>,
        loader: impl Loader<V>,
    ) -> Self {
        self.route(pattern, name, ViewLoader::lazy(loader))
    }

    /// Default deadline for lazy views that don't set their own.
    #[cfg(feature = "timeout")]
    pub fn load_timeout(mut self, after: Duration) -> Self {
        self.load_timeout = Some(after);
        self
    }

    /// Switch the matching backend.
    pub fn with_index<B2: RouteIndexBuilder>(self) -> RouteTableBuilder<V, B2> {
        RouteTableBuilder {
            entries: self.entries,
            #[cfg(feature = "timeout")]
            load_timeout: self.load_timeout,
            _index: PhantomData,
        }
    }

    /// Validate the configuration and build the table.
    pub fn build(self) -> Result<RouteTable<V, B::Index>, ConfigError> {
        let mut index = B::default();
        let mut routes = Vec::with_capacity(self.entries.len());
        let mut names = HashMap::with_capacity(self.entries.len());

        for (slot, entry) in self.entries.into_iter().enumerate() {
            if entry.name.is_empty() {
                return Err(ConfigError::EmptyName(entry.pattern));
            }
            if names.contains_key(&entry.name) {
                return Err(ConfigError::DuplicateName(entry.name));
            }

            let pattern =
                Pattern::parse(&entry.pattern).map_err(|source| ConfigError::InvalidPattern {
                    name: entry.name.clone(),
                    source,
                })?;
            index.insert(&pattern, slot)?;

            #[cfg(feature = "timeout")]
            let view = match (entry.view, self.load_timeout) {
                (ViewLoader::Lazy(lazy), Some(after)) if lazy.timeout().is_none() => {
                    ViewLoader::Lazy(lazy.with_timeout(after))
                }
                (view, _) => view,
            };
            #[cfg(not(feature = "timeout"))]
            let view = entry.view;

            names.insert(entry.name.clone(), slot);
            routes.push(RouteDefinition {
                pattern,
                name: entry.name,
                view,
            });
        }

        let index = index.build()?;

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(routes = routes.len(), "route table built");
        }

        Ok(RouteTable {
            routes,
            names,
            index,
        })
    }
}
