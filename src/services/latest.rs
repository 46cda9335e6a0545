//! Latest-request-wins bookkeeping for asynchronous fetches.
//!
//! Every fetch takes a ticket from a monotonically increasing counter.
//! When the result comes back it is only accepted if no newer ticket has
//! been issued in the meantime, so a slow early request can never
//! overwrite the result of a later one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

pub struct LatestSlot<T> {
    issued: AtomicU64,
    inner: RwLock<Option<(u64, T)>>,
}

impl<T: Clone> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            inner: RwLock::new(None),
        }
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Store `value` if `ticket` is still the newest one issued.
    /// Returns `false` and drops the value otherwise.
    pub fn publish(&self, ticket: Ticket, value: T) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        // Checked under the lock so two publishers cannot interleave.
        if !self.is_current(ticket) {
            tracing::warn!(
                generation = ticket.0,
                latest = self.issued.load(Ordering::SeqCst),
                "Discarding stale response"
            );
            return false;
        }
        *guard = Some((ticket.0, value));
        true
    }

    /// The last accepted value, if any.
    pub fn current(&self) -> Option<T> {
        let guard = self.inner.read().ok()?;
        guard.as_ref().map(|(_, val)| val.clone())
    }
}

/// Upper bound on tracked views; the least recently used one is evicted.
pub const MAX_VIEWS: usize = 256;
const MAX_VIEW_ID_LEN: usize = 64;

/// View ids are short ASCII tokens: letters, digits, `-` and `_`.
pub fn validate_view_id(view: &str) -> AppResult<()> {
    let valid = !view.is_empty()
        && view.len() <= MAX_VIEW_ID_LEN
        && view
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "view must be 1-{} characters of [A-Za-z0-9_-]",
            MAX_VIEW_ID_LEN
        )))
    }
}

struct ViewEntry<T> {
    slot: Arc<LatestSlot<T>>,
    last_used: u64,
}

struct Views<T> {
    entries: HashMap<String, ViewEntry<T>>,
    tick: u64,
}

/// One [`LatestSlot`] per dashboard view, created on first use and
/// bounded to `capacity` views.
pub struct ViewRegistry<T> {
    views: Mutex<Views<T>>,
    capacity: usize,
}

impl<T: Clone> Default for ViewRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ViewRegistry<T> {
    pub fn new() -> Self {
        Self::with_capacity(MAX_VIEWS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            views: Mutex::new(Views {
                entries: HashMap::new(),
                tick: 0,
            }),
            capacity: capacity.max(1),
        }
    }

    /// Slot for `view`, creating it if needed. An evicted view loses its
    /// last snapshot; requests still holding its slot finish normally.
    pub fn slot(&self, view: &str) -> AppResult<Arc<LatestSlot<T>>> {
        validate_view_id(view)?;
        let Ok(mut views) = self.views.lock() else {
            return Ok(Arc::new(LatestSlot::new()));
        };
        views.tick += 1;
        let tick = views.tick;

        if let Some(entry) = views.entries.get_mut(view) {
            entry.last_used = tick;
            return Ok(Arc::clone(&entry.slot));
        }

        if views.entries.len() >= self.capacity {
            let oldest = views
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                tracing::debug!(view = %oldest, "Evicting least recently used view");
                views.entries.remove(&oldest);
            }
        }

        let slot = Arc::new(LatestSlot::new());
        views.entries.insert(
            view.to_string(),
            ViewEntry {
                slot: Arc::clone(&slot),
                last_used: tick,
            },
        );
        Ok(slot)
    }

    pub fn current(&self, view: &str) -> AppResult<Option<T>> {
        validate_view_id(view)?;
        let Ok(views) = self.views.lock() else {
            return Ok(None);
        };
        Ok(views.entries.get(view).and_then(|e| e.slot.current()))
    }

    pub fn len(&self) -> usize {
        self.views.lock().map(|v| v.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[test]
    fn test_latest_ticket_is_accepted() {
        let slot = LatestSlot::new();
        let t = slot.issue();
        assert!(slot.publish(t, "jan"));
        assert_eq!(slot.current(), Some("jan"));
    }

    #[test]
    fn test_superseded_ticket_is_dropped() {
        let slot = LatestSlot::new();
        let early = slot.issue();
        let late = slot.issue();
        assert!(slot.publish(late, "feb"));
        assert!(!slot.publish(early, "jan"));
        assert_eq!(slot.current(), Some("feb"));
    }

    #[test]
    fn test_superseded_before_newer_lands_keeps_last_good() {
        let slot = LatestSlot::new();
        let first = slot.issue();
        assert!(slot.publish(first, 1));
        let early = slot.issue();
        let _late = slot.issue();
        assert!(!slot.publish(early, 2));
        assert_eq!(slot.current(), Some(1));
    }

    #[tokio::test]
    async fn test_out_of_order_completion() {
        let slot = Arc::new(LatestSlot::new());
        let (release_early, wait_early) = oneshot::channel::<()>();

        let early_ticket = slot.issue();
        let early_slot = Arc::clone(&slot);
        let early = tokio::spawn(async move {
            wait_early.await.ok();
            early_slot.publish(early_ticket, "selected first")
        });

        let late_ticket = slot.issue();
        let late_slot = Arc::clone(&slot);
        let late = tokio::spawn(async move { late_slot.publish(late_ticket, "selected last") });

        assert!(late.await.unwrap());
        release_early.send(()).unwrap();
        assert!(!early.await.unwrap());
        assert_eq!(slot.current(), Some("selected last"));
    }

    #[test]
    fn test_views_are_independent() {
        let registry: ViewRegistry<u32> = ViewRegistry::new();
        let a = registry.slot("a").unwrap();
        let b = registry.slot("b").unwrap();
        let ta = a.issue();
        let _tb = b.issue();
        let _tb2 = b.issue();
        assert!(a.publish(ta, 7));
        assert_eq!(registry.current("a").unwrap(), Some(7));
        assert_eq!(registry.current("b").unwrap(), None);
        assert!(Arc::ptr_eq(&a, &registry.slot("a").unwrap()));
    }

    #[test]
    fn test_registry_is_bounded() {
        let registry: ViewRegistry<u32> = ViewRegistry::with_capacity(3);
        for i in 0..50 {
            registry.slot(&format!("view-{}", i)).unwrap();
        }
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_least_recently_used_view_is_evicted() {
        let registry: ViewRegistry<u32> = ViewRegistry::with_capacity(2);
        let a = registry.slot("a").unwrap();
        let t = a.issue();
        assert!(a.publish(t, 1));
        registry.slot("b").unwrap();
        // touching "a" makes "b" the eviction candidate
        registry.slot("a").unwrap();
        registry.slot("c").unwrap();

        assert_eq!(registry.current("a").unwrap(), Some(1));
        assert!(Arc::ptr_eq(&a, &registry.slot("a").unwrap()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_evicted_slot_still_accepts_publish() {
        let registry: ViewRegistry<u32> = ViewRegistry::with_capacity(1);
        let a = registry.slot("a").unwrap();
        let t = a.issue();
        registry.slot("b").unwrap();
        assert!(a.publish(t, 5));
        assert_eq!(registry.current("a").unwrap(), None);
    }

    #[test]
    fn test_view_id_validation() {
        let registry: ViewRegistry<u32> = ViewRegistry::new();
        assert!(registry.slot("main_1-left").is_ok());
        for bad in ["", "has space", "semi;colon", "\u{e9}t\u{e9}"] {
            assert!(matches!(registry.slot(bad), Err(AppError::Validation(_))), "{}", bad);
        }
        let long = "x".repeat(65);
        assert!(registry.slot(&long).is_err());
        assert!(registry.current(&long).is_err());
        assert_eq!(registry.len(), 1);
    }
}
