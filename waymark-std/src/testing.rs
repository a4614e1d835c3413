//! Testing utilities for Waymark.
//!
//! This module provides helpers for exercising route tables and navigators.
//!
//! # Features
//!
//! - [`ScriptedLoader`]: A loader that counts calls, fails on demand and can be held in flight
//! - [`RecordingHook`]: A navigation hook that records every navigation it sees

use futures::channel::oneshot;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};
use thiserror::Error;
use waymark_core::{BoxError, HookResult, Loader, NavigationContext, NavigationHook, Params};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Scripted Loader
// ============================================================================

/// Error returned by a [`ScriptedLoader`] scripted to fail.
#[derive(Debug, Clone, Copy, Error)]
#[error("scripted load failure")]
pub struct ScriptedFailure;

/// A loader whose behaviour is controlled by the test.
///
/// Clones share call counts and scripts, so keep a clone to inspect the
/// loader after handing it to a route table.
///
/// # Example
///
/// ```rust,ignore
/// let loader = ScriptedLoader::new("About").fail_next(1);
/// let table = RouteTable::builder().lazy("/about", "About", loader.clone()).build()?;
///
/// assert!(table.resolve("/about").await.is_err());
/// assert!(table.resolve("/about").await.is_ok());
/// assert_eq!(loader.calls(), 2);
/// ```
pub struct ScriptedLoader<V> {
    view: V,
    calls: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
    gate: Arc<Mutex<Option<oneshot::Receiver<()>>>>,
}

impl<V: Clone + Send + Sync + 'static> ScriptedLoader<V> {
    /// Create a loader that always succeeds with `view`.
    pub fn new(view: V) -> Self {
        Self {
            view,
            calls: Arc::new(AtomicUsize::new(0)),
            failures: Arc::new(AtomicUsize::new(0)),
            gate: Arc::new(Mutex::new(None)),
        }
    }

    /// Make the next `count` loads fail with [`ScriptedFailure`].
    pub fn fail_next(self, count: usize) -> Self {
        self.failures.store(count, Ordering::SeqCst);
        self
    }

    /// Hold the next load in flight until the returned gate is released.
    pub fn hold(&self) -> LoadGate {
        let (sender, receiver) = oneshot::channel();
        *lock(&self.gate) = Some(receiver);
        LoadGate {
            sender: Some(sender),
        }
    }

    /// Get the number of times the loader was invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<V: Clone> Clone for ScriptedLoader<V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
            calls: self.calls.clone(),
            failures: self.failures.clone(),
            gate: self.gate.clone(),
        }
    }
}

impl<V: Clone + Send + Sync + 'static> Loader<V> for ScriptedLoader<V> {
    async fn load(&self) -> Result<V, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let fail = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        let gate = lock(&self.gate).take();
        if let Some(gate) = gate {
            // A dropped gate releases the load as well.
            let _ = gate.await;
        }

        if fail {
            Err(ScriptedFailure.into())
        } else {
            Ok(self.view.clone())
        }
    }
}

/// Releases a load held by [`ScriptedLoader::hold`].
///
/// Dropping the gate releases the load too.
#[derive(Debug)]
pub struct LoadGate {
    sender: Option<oneshot::Sender<()>>,
}

impl LoadGate {
    /// Let the held load finish.
    pub fn release(mut self) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(());
        }
    }
}

// ============================================================================
// Recording Hook
// ============================================================================

/// One navigation seen by a [`RecordingHook`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
    /// The requested path.
    pub path: String,
    /// The matched route.
    pub route: String,
    /// The bound parameters.
    pub params: Params,
}

/// A hook that records all navigations it receives.
///
/// Useful for verifying that hooks run, and in which order.
pub struct RecordingHook {
    records: Arc<Mutex<Vec<NavigationRecord>>>,
    result: HookResult,
}

impl RecordingHook {
    /// Create a new recording hook that returns `Next`.
    pub fn new() -> Self {
        Self::with_result(HookResult::Next)
    }

    /// Create a recording hook that returns a specific result.
    pub fn with_result(result: HookResult) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    /// Get a clone of the recorded navigations.
    pub fn records(&self) -> Vec<NavigationRecord> {
        lock(&self.records).clone()
    }

    /// Names of the recorded routes, in order.
    pub fn routes(&self) -> Vec<String> {
        lock(&self.records).iter().map(|r| r.route.clone()).collect()
    }

    /// Get the number of recorded navigations.
    pub fn count(&self) -> usize {
        lock(&self.records).len()
    }

    /// Clear all recorded navigations.
    pub fn clear(&self) {
        lock(&self.records).clear();
    }
}

impl Default for RecordingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingHook {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            result: self.result,
        }
    }
}

impl NavigationHook for RecordingHook {
    async fn on_navigate(&self, ctx: &NavigationContext<'_>) -> Result<HookResult, BoxError> {
        lock(&self.records).push(NavigationRecord {
            path: ctx.path.to_string(),
            route: ctx.route.to_string(),
            params: ctx.params.clone(),
        });
        Ok(self.result)
    }
}
