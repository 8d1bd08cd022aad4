//! Stable unique keys for widget instances.
//!
//! Every widget needs a distinct id namespace so registry entries and portal
//! content from different instances never collide, even when widgets are
//! built in loops or closures where `#[track_caller]` alone would hand every
//! iteration the same source location.
//!
//! # Example
//!
//! ```
//! use marquee_ui::key::InstanceKey;
//!
//! let key = InstanceKey::explicit("fruit-select");
//! assert_eq!(key.get(), "fruit-select");
//! assert_eq!(key.derive("menu"), "fruit-select:menu");
//! ```

use std::cell::OnceCell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

/// Generates a stable unique key for a widget instance.
///
/// Key format: `{prefix}:{file}:{line}:{col}:{n}`
/// - prefix: widget type (e.g. "select", "bands")
/// - file:line:col: source location for debugging
/// - n: process-wide instance counter
///
/// The key is lazily generated on first access and cached for the
/// instance's lifetime.
pub struct InstanceKey {
    key: OnceCell<String>,
    prefix: &'static str,
    file: &'static str,
    line: u32,
    column: u32,
}

impl InstanceKey {
    /// Create from the caller's location with an auto-assigned counter.
    ///
    /// Each call creates a new instance that will generate a unique key
    /// when `get()` is first called.
    #[track_caller]
    pub fn new(prefix: &'static str) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            key: OnceCell::new(),
            prefix,
            file: loc.file(),
            line: loc.line(),
            column: loc.column(),
        }
    }

    /// Create with an explicit user-provided key.
    ///
    /// Use this when a stable, predictable key is needed across rebuilds
    /// (tests, programmatic element access).
    pub fn explicit(key: impl Into<String>) -> Self {
        let instance = Self {
            key: OnceCell::new(),
            prefix: "",
            file: "",
            line: 0,
            column: 0,
        };
        let _ = instance.key.set(key.into());
        instance
    }

    /// Get or generate the unique key.
    pub fn get(&self) -> &str {
        self.key.get_or_init(|| {
            format!(
                "{}:{}:{}:{}:{}",
                self.prefix,
                self.file,
                self.line,
                self.column,
                NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
            )
        })
    }

    /// Derived id for a sub-element of this instance.
    ///
    /// Element ids inside one widget hang off the instance key:
    /// `key.derive("menu")`, `key.derive("opt:3")`.
    pub fn derive(&self, suffix: &str) -> String {
        format!("{}:{}", self.get(), suffix)
    }

    /// Source location info for debugging.
    pub fn location(&self) -> (&'static str, u32, u32) {
        (self.file, self.line, self.column)
    }
}

impl std::fmt::Debug for InstanceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InstanceKey({})", self.get())
    }
}

impl Clone for InstanceKey {
    fn clone(&self) -> Self {
        // Clones share the generated key.
        Self::explicit(self.get())
    }
}
