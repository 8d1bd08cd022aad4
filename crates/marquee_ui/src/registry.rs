//! Element registry for ID-based geometry lookups
//!
//! Widgets describe markup; the host lays it out. The registry is the
//! channel back: after layout, the host reports the on-screen bounds of
//! every node that carries an id, and widgets query those bounds when
//! positioning menus, hit-testing pointer events, and validating option
//! clicks. Parent links are recorded alongside so containment questions
//! ("is this element inside that menu?") stay cheap.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use marquee_core::geometry::{Point, Rect};

use crate::markup::Node;

/// Per-element record: reported bounds plus the id of the enclosing element.
#[derive(Debug, Clone, Default)]
struct ElementEntry {
    bounds: Option<Rect>,
    parent: Option<String>,
}

/// Registry mapping element ids to reported geometry
///
/// Insertion order is preserved so prefix queries walk elements in the
/// order the widget declared them. Registration is last-wins; in debug
/// builds a duplicate id logs a warning.
pub struct ElementRegistry {
    entries: RwLock<IndexMap<String, ElementEntry>>,
}

impl std::fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self.entries.read().map(|e| e.len()).unwrap_or(0);
        f.debug_struct("ElementRegistry")
            .field("entries", &format!("{len} registered"))
            .finish()
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
        }
    }

    /// Create a new registry wrapped in Arc for sharing
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register an element id, optionally under a parent element.
    ///
    /// If the id already exists, the old entry is replaced (last-wins).
    /// In debug builds, a warning is logged for duplicate ids.
    pub fn register(&self, id: impl Into<String>, parent: Option<&str>) {
        let id = id.into();

        #[cfg(debug_assertions)]
        {
            if let Ok(entries) = self.entries.read() {
                if entries.contains_key(&id) {
                    tracing::warn!("Duplicate element ID registered: {}", id);
                }
            }
        }

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                id,
                ElementEntry {
                    bounds: None,
                    parent: parent.map(String::from),
                },
            );
        }
    }

    /// Register every id-carrying node of a markup subtree, preserving the
    /// tree's parent relationships. `parent` names the element enclosing
    /// the subtree, if any.
    pub fn register_tree(&self, root: &Node, parent: Option<&str>) {
        let own_id = root.id.as_deref();
        if let Some(id) = own_id {
            self.register(id, parent);
        }
        // Nodes without ids are transparent for parentage.
        let child_parent = own_id.or(parent);
        for child in &root.children {
            self.register_tree(child, child_parent);
        }
    }

    /// Report layout bounds for an element. No-op for unknown ids.
    pub fn set_bounds(&self, id: &str, bounds: Rect) {
        if let Ok(mut entries) = self.entries.write() {
            if let Some(entry) = entries.get_mut(id) {
                entry.bounds = Some(bounds);
            }
        }
    }

    /// Look up reported bounds by id
    pub fn bounds(&self, id: &str) -> Option<Rect> {
        self.entries.read().ok()?.get(id)?.bounds
    }

    /// Get the parent id of an element
    pub fn parent_of(&self, id: &str) -> Option<String> {
        self.entries.read().ok()?.get(id)?.parent.clone()
    }

    /// Get all ancestor ids of an element (from immediate parent to root)
    pub fn ancestors(&self, id: &str) -> Vec<String> {
        let mut result = Vec::new();
        let mut current = id.to_string();

        while let Some(parent) = self.parent_of(&current) {
            result.push(parent.clone());
            current = parent;
        }

        result
    }

    /// True when `id` is `ancestor` itself or registered anywhere below it.
    pub fn is_within(&self, id: &str, ancestor: &str) -> bool {
        if id == ancestor {
            return true;
        }
        self.ancestors(id).iter().any(|a| a == ancestor)
    }

    /// Check if an id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.entries
            .read()
            .ok()
            .is_some_and(|entries| entries.contains_key(id))
    }

    /// All registered ids starting with `prefix`, in registration order
    pub fn query_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .read()
            .ok()
            .map(|entries| {
                entries
                    .keys()
                    .filter(|id| id.starts_with(prefix))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First prefix-matching element whose reported bounds contain `point`,
    /// in registration order.
    pub fn hit_test_prefix(&self, prefix: &str, point: Point) -> Option<(String, Rect)> {
        let entries = self.entries.read().ok()?;
        entries
            .iter()
            .filter(|(id, _)| id.starts_with(prefix))
            .find_map(|(id, entry)| {
                let bounds = entry.bounds?;
                bounds.contains(point).then(|| (id.clone(), bounds))
            })
    }

    /// Get the number of registered ids
    pub fn len(&self) -> usize {
        self.entries.read().ok().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unregister a specific element (e.g. on unmount)
    pub fn remove(&self, id: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.shift_remove(id);
        }
    }

    /// Unregister an element and everything registered below it
    pub fn remove_subtree(&self, id: &str) {
        // Collect first; is_within takes the lock per candidate.
        let doomed: Vec<String> = self
            .all_ids()
            .into_iter()
            .filter(|candidate| candidate == id || self.is_within(candidate, id))
            .collect();

        if let Ok(mut entries) = self.entries.write() {
            for id in doomed {
                entries.shift_remove(&id);
            }
        }
    }

    /// Clear all registrations (called between render cycles)
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Get all registered ids (for debugging)
    pub fn all_ids(&self) -> Vec<String> {
        self.entries
            .read()
            .ok()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
