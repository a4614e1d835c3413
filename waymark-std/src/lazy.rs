//! Single-flight, memoizing cell for lazily loaded views.
//!
//! A [`LazyView`] moves through three states:
//!
//! ```text
//!              resolve()            load ok
//! Unresolved ------------> Resolving ---------> Resolved
//!     ^                        |
//!     +---- load err/panic ----+
//! ```
//!
//! While `Resolving`, further `resolve()` calls attach to the load already in
//! flight and observe its outcome; the loader is never invoked twice
//! concurrently. `Resolved` is terminal. A failed load leaves the cell
//! `Unresolved` so the next call retries. A loader that panics counts as a
//! failed load.
//!
//! The cache write happens inside the shared load future itself, so a load
//! abandoned by its first caller is completed (and cached) by whoever polls it
//! next.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::{
    any::Any,
    fmt,
    panic::AssertUnwindSafe,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use thiserror::Error;
use waymark_core::{DynLoader, Loader, SharedError, ViewLoadError};

#[cfg(feature = "timeout")]
use std::time::Duration;

type SharedLoad<V> = Shared<BoxFuture<'static, Result<V, ViewLoadError>>>;

/// Observable state of a [`LazyView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Never loaded, or the last load failed.
    Unresolved,
    /// A load is in flight.
    Resolving,
    /// The view is cached.
    Resolved,
}

enum Slot<V> {
    Unresolved,
    Resolving(SharedLoad<V>),
    Resolved(V),
}

impl<V> Slot<V> {
    fn state(&self) -> LoadState {
        match self {
            Slot::Unresolved => LoadState::Unresolved,
            Slot::Resolving(_) => LoadState::Resolving,
            Slot::Resolved(_) => LoadState::Resolved,
        }
    }
}

/// Source of a [`ViewLoadError`] raised when the loader panics.
#[derive(Debug, Error)]
#[error("view loader panicked: {message}")]
pub struct LoaderPanicked {
    message: String,
}

impl LoaderPanicked {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast_ref::<&'static str>() {
                Some(message) => (*message).to_string(),
                None => "non-string panic payload".to_string(),
            },
        };
        Self { message }
    }
}

/// A view produced on first use by an asynchronous [`Loader`].
pub struct LazyView<V> {
    loader: Arc<dyn DynLoader<V>>,
    slot: Arc<Mutex<Slot<V>>>,
    #[cfg(feature = "timeout")]
    timeout: Option<Duration>,
}

impl<V> Clone for LazyView<V> {
    fn clone(&self) -> Self {
        Self {
            loader: Arc::clone(&self.loader),
            slot: Arc::clone(&self.slot),
            #[cfg(feature = "timeout")]
            timeout: self.timeout,
        }
    }
}

fn lock<V>(slot: &Mutex<Slot<V>>) -> MutexGuard<'_, Slot<V>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<V> LazyView<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an unresolved view backed by `loader`.
    pub fn new(loader: impl Loader<V>) -> Self {
        Self::from_dyn(Arc::new(loader))
    }

    /// Create an unresolved view from an already type-erased loader.
    pub fn from_dyn(loader: Arc<dyn DynLoader<V>>) -> Self {
        Self {
            loader,
            slot: Arc::new(Mutex::new(Slot::Unresolved)),
            #[cfg(feature = "timeout")]
            timeout: None,
        }
    }

    /// Fail loads that take longer than `after`.
    ///
    /// A timed-out load counts as a failure: the cell returns to
    /// `Unresolved` and the next call retries.
    #[cfg(feature = "timeout")]
    pub fn with_timeout(mut self, after: Duration) -> Self {
        self.timeout = Some(after);
        self
    }

    /// The configured load deadline, if any.
    #[cfg(feature = "timeout")]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Current state of the cell.
    pub fn state(&self) -> LoadState {
        lock(&self.slot).state()
    }

    /// The cached view, without triggering a load.
    pub fn get(&self) -> Option<V> {
        match &*lock(&self.slot) {
            Slot::Resolved(view) => Some(view.clone()),
            _ => None,
        }
    }

    /// Resolve the view, loading it if necessary.
    ///
    /// A cached view is returned without suspending. `route` names the owning
    /// route in errors and log events.
    pub async fn resolve(&self, route: &str) -> Result<V, ViewLoadError> {
        let load = {
            let mut slot = lock(&self.slot);
            match &*slot {
                Slot::Resolved(view) => return Ok(view.clone()),
                Slot::Resolving(load) => {
                    #[cfg(feature = "tracing")]
                    {
                        tracing::debug!(route, "attaching to in-flight view load");
                    }
                    load.clone()
                }
                Slot::Unresolved => {
                    let load = self.start(route);
                    *slot = Slot::Resolving(load.clone());
                    load
                }
            }
        };

        load.await
    }

    fn start(&self, route: &str) -> SharedLoad<V> {
        let loader = Arc::clone(&self.loader);
        let slot = Arc::clone(&self.slot);
        let route = route.to_string();
        #[cfg(feature = "timeout")]
        let timeout = self.timeout;

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(route = %route, "loading view");
        }

        async move {
            let load = async {
                let failed = |source: SharedError| ViewLoadError::Failed {
                    route: route.clone(),
                    source,
                };
                match AssertUnwindSafe(async { loader.load_dyn().await })
                    .catch_unwind()
                    .await
                {
                    Ok(loaded) => loaded.map_err(|source| failed(SharedError::from(source))),
                    Err(payload) => {
                        let source: SharedError = Arc::new(LoaderPanicked::from_payload(payload));
                        Err(failed(source))
                    }
                }
            };

            #[cfg(feature = "timeout")]
            let outcome = match timeout {
                Some(after) => tokio::time::timeout(after, load)
                    .await
                    .unwrap_or_else(|_| {
                        Err(ViewLoadError::TimedOut {
                            route: route.clone(),
                            after,
                        })
                    }),
                None => load.await,
            };
            #[cfg(not(feature = "timeout"))]
            let outcome = load.await;

            settle(&slot, &outcome);
            outcome
        }
        .boxed()
        .shared()
    }
}

/// Leave `Resolving` with the outcome of the load in flight.
fn settle<V: Clone>(slot: &Mutex<Slot<V>>, outcome: &Result<V, ViewLoadError>) {
    let mut slot = lock(slot);
    *slot = match outcome {
        Ok(view) => {
            #[cfg(feature = "tracing")]
            {
                tracing::debug!("view loaded");
            }
            Slot::Resolved(view.clone())
        }
        Err(err) => {
            #[cfg(feature = "tracing")]
            {
                tracing::warn!(route = err.route(), error = %err, "view load failed");
            }
            #[cfg(not(feature = "tracing"))]
            {
                let _ = err;
            }
            Slot::Unresolved
        }
    };
}

impl<V> fmt::Debug for LazyView<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.slot).state();
        f.debug_struct("LazyView").field("state", &state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{FutureExt, channel::oneshot};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use waymark_core::BoxError;

    fn counting(calls: Arc<AtomicUsize>) -> LazyView<&'static str> {
        LazyView::new(move || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, BoxError>("About")
            }
        })
    }

    #[tokio::test]
    async fn test_resolve_caches_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let view = counting(calls.clone());
        assert_eq!(view.state(), LoadState::Unresolved);
        assert_eq!(view.get(), None);

        assert_eq!(view.resolve("About").await.unwrap(), "About");
        assert_eq!(view.state(), LoadState::Resolved);
        // Cache hits complete on the first poll.
        let cached = view.resolve("About").now_or_never();
        assert_eq!(cached.unwrap().unwrap(), "About");
        assert_eq!(view.get(), Some("About"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_leaves_cell_unresolved() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let view = LazyView::new(move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err::<&'static str, BoxError>("chunk fetch failed".into())
                } else {
                    Ok("About")
                }
            }
        });

        let err = view.resolve("About").await.unwrap_err();
        assert_eq!(err.route(), "About");
        assert_eq!(view.state(), LoadState::Unresolved);

        assert_eq!(view.resolve("About").await.unwrap(), "About");
        assert_eq!(view.state(), LoadState::Resolved);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_panicking_loader_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let view = LazyView::new(move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            if attempt == 0 {
                panic!("malformed module");
            }
            async move {
                if attempt == 1 {
                    panic!("module body threw");
                }
                Ok::<_, BoxError>("About")
            }
        });

        for expected in ["malformed module", "module body threw"] {
            let err = view.resolve("About").await.unwrap_err();
            assert_eq!(err.route(), "About");
            let source = std::error::Error::source(&err).unwrap();
            assert_eq!(source.to_string(), format!("view loader panicked: {expected}"));
            assert_eq!(view.state(), LoadState::Unresolved);
        }

        assert_eq!(view.resolve("About").await.unwrap(), "About");
        assert_eq!(view.state(), LoadState::Resolved);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_concurrent_resolves_share_one_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (release, gate) = oneshot::channel::<()>();
        let gate = Arc::new(Mutex::new(Some(gate)));

        let counter = calls.clone();
        let view = LazyView::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let gate = gate.lock().unwrap().take();
            async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                Ok::<_, BoxError>("About")
            }
        });

        let first = view.resolve("About");
        let second = view.resolve("About");
        let driver = async {
            assert_eq!(view.state(), LoadState::Resolving);
            release.send(()).unwrap();
        };

        let (a, b, ()) = futures::join!(first, second, driver);
        assert_eq!(a.unwrap(), "About");
        assert_eq!(b.unwrap(), "About");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_abandoned_load_is_completed_by_next_caller() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (release, gate) = oneshot::channel::<()>();
        let gate = Arc::new(Mutex::new(Some(gate)));

        let counter = calls.clone();
        let view = LazyView::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let gate = gate.lock().unwrap().take();
            async move {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                Ok::<_, BoxError>("About")
            }
        });

        // Poll once, then navigate away.
        let mut first = Box::pin(view.resolve("About"));
        assert!(futures::poll!(first.as_mut()).is_pending());
        drop(first);
        assert_eq!(view.state(), LoadState::Resolving);

        release.send(()).unwrap();
        assert_eq!(view.resolve("About").await.unwrap(), "About");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[cfg(feature = "timeout")]
    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        use crate::testing::ScriptedLoader;
        use std::time::Duration;

        let loader = ScriptedLoader::new("About");
        let gate = loader.hold();
        let view = LazyView::new(loader.clone()).with_timeout(Duration::from_millis(10));

        let err = view.resolve("About").await.unwrap_err();
        assert!(matches!(err, ViewLoadError::TimedOut { .. }));
        assert_eq!(view.state(), LoadState::Unresolved);

        drop(gate);
        assert_eq!(view.resolve("About").await.unwrap(), "About");
        assert_eq!(loader.calls(), 2);
    }
}
