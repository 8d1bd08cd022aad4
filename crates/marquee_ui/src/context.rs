//! Widget context: one bundle of the services every widget needs
//!
//! Hosts build a `UiContext` at startup and hand it to widget `mount`
//! calls. It owns the element registry, the portal layer, the event
//! router, the reactive store, and the shared scroll lock, so individual
//! widgets never wire those up themselves.
//!
//! The context is also the host's event doorway: feed captured platform
//! events to [`UiContext::dispatch`] and call [`UiContext::update`] once
//! per frame with the current time.
//!
//! ```
//! use marquee_ui::context::UiContext;
//! use marquee_ui::portal::NullRenderer;
//! use marquee_core::events::Event;
//!
//! let ctx = UiContext::new(NullRenderer);
//! ctx.set_viewport(800.0, 600.0);
//! ctx.dispatch(&Event::pointer_move(10.0, 10.0));
//! ctx.update(16);
//! ```

use std::sync::{Arc, Mutex};

use marquee_core::events::Event;
use marquee_core::geometry::Size;
use marquee_core::reactive::{SharedSignals, SignalStore, State};

use crate::markup::Node;
use crate::portal::{new_portal_manager, shared_renderer, PortalManager, Renderer, SharedRenderer};
use crate::registry::ElementRegistry;
use crate::router::{EventRouter, SharedSink};
use crate::scroll_lock::ScrollLockRegistry;

/// Shared services for a widget tree.
pub struct UiContext {
    registry: Arc<ElementRegistry>,
    portals: PortalManager,
    renderer: SharedRenderer,
    signals: SharedSignals,
    router: Mutex<EventRouter>,
    scroll_lock: ScrollLockRegistry,
}

impl UiContext {
    /// Build a fresh context around a host renderer.
    pub fn new(renderer: impl Renderer + Send + 'static) -> Self {
        Self::with_renderer(shared_renderer(renderer))
    }

    /// Build a context around an already-shared renderer.
    pub fn with_renderer(renderer: SharedRenderer) -> Self {
        Self {
            registry: ElementRegistry::new_shared(),
            portals: new_portal_manager(),
            renderer,
            signals: SignalStore::new_shared(),
            router: Mutex::new(EventRouter::new()),
            scroll_lock: ScrollLockRegistry::new(),
        }
    }

    // =========================================================================
    // Service handles
    // =========================================================================

    pub fn registry(&self) -> Arc<ElementRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn portals(&self) -> PortalManager {
        Arc::clone(&self.portals)
    }

    pub fn renderer(&self) -> SharedRenderer {
        Arc::clone(&self.renderer)
    }

    pub fn signals(&self) -> SharedSignals {
        Arc::clone(&self.signals)
    }

    pub fn scroll_lock(&self) -> ScrollLockRegistry {
        self.scroll_lock.clone()
    }

    /// Allocate a reactive state cell in this context's store.
    pub fn use_state<T: Clone + Send + 'static>(&self, initial: T) -> State<T> {
        State::create(&self.signals, initial)
    }

    /// Register a widget with the event router.
    pub fn register_sink(&self, sink: SharedSink) {
        self.router.lock().unwrap().register(sink);
    }

    /// Register every id-carrying element of an inline view so widgets can
    /// query its geometry. The host reports bounds afterwards via
    /// [`ElementRegistry::set_bounds`].
    pub fn mount_view(&self, view: &Node) {
        self.registry.register_tree(view, None);
    }

    // =========================================================================
    // Event doorway
    // =========================================================================

    /// Feed one captured platform event through the router. Returns true
    /// when the event should not propagate further.
    pub fn dispatch(&self, event: &Event) -> bool {
        self.router.lock().unwrap().dispatch(event)
    }

    /// Per-frame tick; drives deferred scroll-lock release and menu
    /// refreshes. Returns true when a new frame is wanted.
    pub fn update(&self, now: u64) -> bool {
        self.router.lock().unwrap().update_all(now)
    }

    /// Announce the viewport size. Equivalent to dispatching a resize
    /// event; call once before the first frame so menus can position.
    pub fn set_viewport(&self, width: f32, height: f32) {
        self.dispatch(&Event::resize(width as u32, height as u32));
    }

    /// Last observed viewport size.
    pub fn viewport(&self) -> Size {
        self.router.lock().unwrap().viewport()
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("registry", &self.registry)
            .field("scroll_lock", &self.scroll_lock)
            .finish()
    }
}
