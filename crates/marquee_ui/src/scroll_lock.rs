//! Ref-counted page scroll lock
//!
//! Several widgets can want the page scroll held at once (two open menus,
//! a menu plus a tooltip layer). Each acquires a [`ScrollLockGuard`] from
//! the shared registry; the page is locked while at least one guard is
//! alive and released when the last one drops. The host observes the
//! 0↔1 edges through a hook and applies whatever "stop scrolling"
//! mechanism its platform uses.
//!
//! ```
//! use marquee_ui::scroll_lock::ScrollLockRegistry;
//!
//! let registry = ScrollLockRegistry::new();
//! let a = registry.acquire();
//! let b = registry.acquire();
//! assert!(registry.locked());
//! drop(a);
//! assert!(registry.locked());
//! drop(b);
//! assert!(!registry.locked());
//! ```

use std::sync::{Arc, Mutex, OnceLock};

/// Host callback observing lock edges: `true` when the page locks,
/// `false` when the last guard releases it.
pub type ScrollLockHook = Arc<dyn Fn(bool) + Send + Sync>;

#[derive(Default)]
struct LockInner {
    count: usize,
    hook: Option<ScrollLockHook>,
}

/// Shared ref-counted scroll lock. Cheap to clone; clones count against
/// the same lock.
#[derive(Clone, Default)]
pub struct ScrollLockRegistry {
    inner: Arc<Mutex<LockInner>>,
}

static GLOBAL_SCROLL_LOCK: OnceLock<ScrollLockRegistry> = OnceLock::new();

/// Process-wide scroll lock shared by widgets that were not handed an
/// explicit registry.
pub fn global_scroll_lock() -> &'static ScrollLockRegistry {
    GLOBAL_SCROLL_LOCK.get_or_init(ScrollLockRegistry::new)
}

impl ScrollLockRegistry {
    /// Create an isolated registry (tests, secondary windows).
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the host hook invoked on lock/unlock edges.
    ///
    /// If the page is already locked when the hook is installed, the hook
    /// is invoked immediately with `true` so the host can catch up.
    pub fn set_hook(&self, hook: impl Fn(bool) + Send + Sync + 'static) {
        let catch_up = {
            let mut inner = self.inner.lock().unwrap();
            inner.hook = Some(Arc::new(hook));
            (inner.count > 0).then(|| inner.hook.clone()).flatten()
        };
        // Invoke outside the lock so the hook may query the registry.
        if let Some(hook) = catch_up {
            hook(true);
        }
    }

    /// Take a hold on the page scroll. The hold lasts until the returned
    /// guard drops.
    pub fn acquire(&self) -> ScrollLockGuard {
        let edge_hook = {
            let mut inner = self.inner.lock().unwrap();
            inner.count += 1;
            (inner.count == 1).then(|| inner.hook.clone()).flatten()
        };
        if let Some(hook) = edge_hook {
            tracing::debug!("Page scroll locked");
            hook(true);
        }
        ScrollLockGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// True while any guard is alive.
    pub fn locked(&self) -> bool {
        self.count() > 0
    }

    /// Number of live guards.
    pub fn count(&self) -> usize {
        self.inner.lock().unwrap().count
    }
}

impl std::fmt::Debug for ScrollLockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLockRegistry")
            .field("count", &self.count())
            .finish()
    }
}

/// RAII hold on the page scroll. Dropping releases the hold; the last
/// release fires the host hook with `false`.
pub struct ScrollLockGuard {
    inner: Arc<Mutex<LockInner>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let edge_hook = {
            let mut inner = self.inner.lock().unwrap();
            inner.count = inner.count.saturating_sub(1);
            (inner.count == 0).then(|| inner.hook.clone()).flatten()
        };
        if let Some(hook) = edge_hook {
            tracing::debug!("Page scroll released");
            hook(false);
        }
    }
}

impl std::fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLockGuard").finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
