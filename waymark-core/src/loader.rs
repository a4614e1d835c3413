//! # View Loaders
//!
//! A loader produces a view asynchronously: fetching a code chunk, reading a
//! template, initializing a component. Routes configured with a loader are
//! resolved on first navigation instead of at start-up.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Loader`] uses `impl Future` returns for static dispatch. Route tables
//! store loaders as `Arc<dyn DynLoader<V>>`, which every `Loader` implements
//! through a blanket impl.
//!
//! Any `Fn() -> impl Future<Output = Result<V, E>>` closure is a loader:
//!
//! ```rust
//! use waymark_core::{BoxError, Loader};
//!
//! fn assert_loader<L: Loader<&'static str>>(_: L) {}
//!
//! assert_loader(|| async { Ok::<_, BoxError>("About") });
//! ```

use crate::error::BoxError;
use std::{future::Future, pin::Pin};

/// Asynchronously produces a view of type `V`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot load views of type `{V}`",
    label = "missing `Loader` implementation",
    note = "Use a closure `|| async {{ Ok(view) }}` or implement `Loader<{V}>`."
)]
pub trait Loader<V>: Send + Sync + 'static {
    /// Produce the view. May be called again after a failure.
    fn load(&self) -> impl Future<Output = Result<V, BoxError>> + Send;
}

/// Dynamic object-safe version of [`Loader`].
pub trait DynLoader<V>: Send + Sync + 'static {
    /// Produce the view (dynamic dispatch version).
    fn load_dyn<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<V, BoxError>> + Send + 'a>>;
}

// Blanket implementation: Any type implementing Loader implements DynLoader automatically.
impl<V: 'static, T: Loader<V>> DynLoader<V> for T {
    fn load_dyn<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<V, BoxError>> + Send + 'a>> {
        Box::pin(self.load())
    }
}

impl<V, E, F, Fut> Loader<V> for F
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<V, E>> + Send,
    E: Into<BoxError>,
{
    async fn load(&self) -> Result<V, BoxError> {
        (self)().await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    struct Fixed(&'static str);

    impl Loader<&'static str> for Fixed {
        async fn load(&self) -> Result<&'static str, BoxError> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn test_struct_loader_as_dyn() {
        let loader: Arc<dyn DynLoader<&'static str>> = Arc::new(Fixed("Home"));
        assert_eq!(loader.load_dyn().await.unwrap(), "Home");
    }

    #[tokio::test]
    async fn test_closure_loader_called_each_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let loader = move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, std::io::Error>("About")
            }
        };

        assert_eq!(loader.load().await.unwrap(), "About");
        assert_eq!(Loader::load(&loader).await.unwrap(), "About");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_closure_loader_error_is_boxed() {
        let loader = || async { Err::<&'static str, _>(std::io::Error::other("offline")) };
        let err = loader.load().await.unwrap_err();
        assert_eq!(err.to_string(), "offline");
    }
}
