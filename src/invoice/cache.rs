//! A time-windowed cache for the invoice list.
//!
//! Fetching every invoice is the hot path for the list page, so the query
//! layer memoizes the result for a short window. Writes invalidate the
//! cache immediately instead of waiting for expiry, so the list always
//! reflects recent mutations.

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use super::domain::Invoice;

/// How long a cached invoice list is served before the next read goes back
/// to the database.
const LIST_CACHE_WINDOW: Duration = Duration::from_secs(25);

#[derive(Debug)]
struct CachedList {
    invoices: Vec<Invoice>,
    fetched_at: Instant,
}

/// A shared, time-windowed cache of the full invoice list.
///
/// At most one underlying fetch is issued per window: readers that find a
/// fresh entry reuse it, and the first reader after expiry (or after a
/// write invalidates the entry) repopulates it.
#[derive(Debug, Clone)]
pub struct ListCache {
    inner: Arc<Mutex<Option<CachedList>>>,
    window: Duration,
}

impl ListCache {
    /// Create a cache with the default window.
    pub fn new() -> Self {
        Self::with_window(LIST_CACHE_WINDOW)
    }

    /// Create a cache with a custom window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
            window,
        }
    }

    /// The cached list, or `None` if the cache is empty or stale.
    pub fn get(&self) -> Option<Vec<Invoice>> {
        let guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(error) => {
                tracing::warn!("invoice list cache lock poisoned, treating as miss: {error}");
                return None;
            }
        };

        guard.as_ref().and_then(|entry| {
            if entry.fetched_at.elapsed() < self.window {
                Some(entry.invoices.clone())
            } else {
                None
            }
        })
    }

    /// Store a freshly fetched list.
    pub fn put(&self, invoices: Vec<Invoice>) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(CachedList {
                invoices,
                fetched_at: Instant::now(),
            });
        }
    }

    /// Drop the cached list so the next read fetches from the database.
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = None;
        }
    }
}

impl Default for ListCache {
    fn default() -> Self {
        Self::new()
    }
}
