//! Portal layer and the renderer seam
//!
//! Menu surfaces never render inline with the widget that owns them. They
//! mount into the portal layer, a registry of detached markup trees the
//! host paints in a separate pass above everything else, which guarantees
//! menus stack over page content regardless of the surrounding tree.
//!
//! The host side of the contract is the [`Renderer`] capability: widgets
//! hold a shared renderer and notify it when portal content mounts,
//! changes, or unmounts, when an element should be scrolled into view, and
//! when a new frame is wanted. Hosts that prefer polling can ignore the
//! callbacks and drain the manager's dirty flag each frame instead.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use indexmap::IndexMap;

use crate::markup::Node;

/// Id of the host element all portal content mounts under.
pub const PORTAL_ROOT_ID: &str = "marquee-portal-root";

// =============================================================================
// PortalHandle
// =============================================================================

/// Identifies one mounted portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortalHandle(u64);

impl PortalHandle {
    fn new(id: u64) -> Self {
        Self(id)
    }

    /// Reconstruct a handle from a raw ID.
    ///
    /// Useful for storing handles in state and reconstructing them later.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID.
    pub fn id(&self) -> u64 {
        self.0
    }
}

// =============================================================================
// PortalManagerInner
// =============================================================================

/// One detached markup tree in the portal layer.
#[derive(Debug, Clone)]
pub struct MountedPortal {
    pub handle: PortalHandle,
    pub content: Node,
}

/// Inner state of the portal manager
pub struct PortalManagerInner {
    /// Mounted portals in stacking order, oldest first
    portals: IndexMap<PortalHandle, MountedPortal>,
    /// Next portal ID
    next_id: AtomicU64,
    /// Set when the layer changed since the host last drained it
    dirty: AtomicBool,
}

impl Default for PortalManagerInner {
    fn default() -> Self {
        Self::new()
    }
}

impl PortalManagerInner {
    pub fn new() -> Self {
        Self {
            portals: IndexMap::new(),
            next_id: AtomicU64::new(1),
            dirty: AtomicBool::new(false),
        }
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Check and clear the dirty flag
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Check the dirty flag without clearing
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Mount a markup tree into the portal layer
    pub fn mount(&mut self, content: Node) -> PortalHandle {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let handle = PortalHandle::new(id);

        tracing::debug!("PortalManager::mount - handle {:?}", handle);

        self.portals.insert(handle, MountedPortal { handle, content });
        self.mark_dirty();
        handle
    }

    /// Replace the content of a mounted portal. Returns false for stale handles.
    pub fn update_content(&mut self, handle: PortalHandle, content: Node) -> bool {
        match self.portals.get_mut(&handle) {
            Some(portal) => {
                portal.content = content;
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Remove a portal from the layer. Returns false for stale handles.
    pub fn unmount(&mut self, handle: PortalHandle) -> bool {
        let removed = self.portals.shift_remove(&handle).is_some();
        if removed {
            tracing::debug!("PortalManager::unmount - handle {:?}", handle);
            self.mark_dirty();
        }
        removed
    }

    /// Content of a mounted portal
    pub fn get(&self, handle: PortalHandle) -> Option<&Node> {
        self.portals.get(&handle).map(|p| &p.content)
    }

    /// Whether a handle is still mounted
    pub fn is_mounted(&self, handle: PortalHandle) -> bool {
        self.portals.contains_key(&handle)
    }

    /// Handles in stacking order, oldest first
    pub fn handles(&self) -> Vec<PortalHandle> {
        self.portals.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }
}

/// Thread-safe portal manager, shared between widgets and the host
pub type PortalManager = Arc<Mutex<PortalManagerInner>>;

/// Create a new portal manager
pub fn new_portal_manager() -> PortalManager {
    Arc::new(Mutex::new(PortalManagerInner::new()))
}

static GLOBAL_PORTALS: OnceLock<PortalManager> = OnceLock::new();

/// Process-wide portal manager for widgets not handed an explicit one.
pub fn global_portal_manager() -> PortalManager {
    Arc::clone(GLOBAL_PORTALS.get_or_init(new_portal_manager))
}

// =============================================================================
// PortalManagerExt - convenience methods on the Arc<Mutex<>> alias
// =============================================================================

/// Extension trait providing portal operations on the shared manager
pub trait PortalManagerExt {
    /// Mount a markup tree, returning its handle
    fn mount(&self, content: Node) -> PortalHandle;
    /// Replace a mounted portal's content
    fn update_content(&self, handle: PortalHandle, content: Node) -> bool;
    /// Unmount a portal
    fn unmount(&self, handle: PortalHandle) -> bool;
    /// Clone a mounted portal's content
    fn content(&self, handle: PortalHandle) -> Option<Node>;
    /// Whether a handle is still mounted
    fn is_mounted(&self, handle: PortalHandle) -> bool;
    /// Handles in stacking order
    fn handles(&self) -> Vec<PortalHandle>;
    /// Number of mounted portals
    fn portal_count(&self) -> usize;
    /// Check and clear the dirty flag
    fn take_dirty(&self) -> bool;
}

impl PortalManagerExt for PortalManager {
    fn mount(&self, content: Node) -> PortalHandle {
        self.lock().unwrap().mount(content)
    }

    fn update_content(&self, handle: PortalHandle, content: Node) -> bool {
        self.lock().unwrap().update_content(handle, content)
    }

    fn unmount(&self, handle: PortalHandle) -> bool {
        self.lock().unwrap().unmount(handle)
    }

    fn content(&self, handle: PortalHandle) -> Option<Node> {
        self.lock().unwrap().get(handle).cloned()
    }

    fn is_mounted(&self, handle: PortalHandle) -> bool {
        self.lock().unwrap().is_mounted(handle)
    }

    fn handles(&self) -> Vec<PortalHandle> {
        self.lock().unwrap().handles()
    }

    fn portal_count(&self) -> usize {
        self.lock().unwrap().len()
    }

    fn take_dirty(&self) -> bool {
        self.lock().unwrap().take_dirty()
    }
}

// =============================================================================
// Renderer capability
// =============================================================================

/// Host-side rendering capability injected into widgets.
///
/// Widgets only describe markup; everything that touches the screen goes
/// through this seam. Mount notifications carry the content that was just
/// placed in the portal layer so push-style hosts can render without
/// re-querying the manager.
pub trait Renderer {
    /// Portal content was mounted under [`PORTAL_ROOT_ID`].
    fn portal_mounted(&mut self, handle: PortalHandle, content: &Node);
    /// A mounted portal's content changed.
    fn portal_updated(&mut self, handle: PortalHandle, content: &Node);
    /// Portal content was removed.
    fn portal_unmounted(&mut self, handle: PortalHandle);
    /// Bring the element with this id into view inside its scroll container.
    fn scroll_into_view(&mut self, id: &str);
    /// Schedule a new frame (state changed outside a render pass).
    fn request_frame(&mut self);
}

/// Shared renderer handle widgets hold on to.
pub type SharedRenderer = Arc<Mutex<dyn Renderer + Send>>;

/// Wrap a renderer for sharing with widgets.
pub fn shared_renderer(renderer: impl Renderer + Send + 'static) -> SharedRenderer {
    Arc::new(Mutex::new(renderer))
}

/// Renderer that ignores every notification. Useful as a placeholder in
/// headless setups.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn portal_mounted(&mut self, _handle: PortalHandle, _content: &Node) {}
    fn portal_updated(&mut self, _handle: PortalHandle, _content: &Node) {}
    fn portal_unmounted(&mut self, _handle: PortalHandle) {}
    fn scroll_into_view(&mut self, _id: &str) {}
    fn request_frame(&mut self) {}
}

// =============================================================================
// Tests
// =============================================================================
