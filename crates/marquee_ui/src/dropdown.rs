//! Dropdown open/close controller
//!
//! One `Dropdown` drives one floating menu: a two-state machine (closed,
//! open) plus everything that has to happen on the edges. Opening measures
//! the anchor through the element registry, runs the
//! [positioner](crate::position), mounts the menu markup into the portal
//! layer, and asks the renderer to bring the active option into view.
//! Closing unmounts the portal and releases any scroll hold.
//!
//! While open, the controller arbitrates the page's scroll interactions:
//! scrolling the menu itself is always allowed, scrolling elsewhere while
//! the pointer hovers the menu suppresses the page scroll through the
//! shared [`ScrollLockRegistry`], and scrolling with the pointer away from
//! both menu and trigger closes the menu. The scroll hold is not released
//! the instant the pointer leaves the menu; release is deferred by
//! [`SCROLL_UNLOCK_DELAY_MS`] and happens in [`Dropdown::update`], which
//! the host calls with the current time each frame.
//!
//! The controller holds no opinion about menu content. A content closure
//! builds the markup from the computed placement, and lifecycle hooks tell
//! the owning widget when the menu opened, closed, or was torn down.

use std::sync::Arc;

use marquee_core::fsm::StateTransitions;
use marquee_core::geometry::{Point, Rect, Size};

use crate::markup::Node;
use crate::portal::{PortalHandle, PortalManager, PortalManagerExt, SharedRenderer};
use crate::position::{position_menu, MenuAlign, MenuPlacement};
use crate::registry::ElementRegistry;
use crate::scroll_lock::{ScrollLockGuard, ScrollLockRegistry};

// =============================================================================
// Menu Event Types
// =============================================================================

/// Event types for the menu state machine
pub mod menu_events {
    /// Open the menu (Closed -> Open)
    pub const OPEN: u32 = 1;
    /// Close the menu (Open -> Closed)
    pub const CLOSE: u32 = 2;
    /// Flip between open and closed
    pub const TOGGLE: u32 = 3;
    /// An option was committed (Open -> Closed)
    pub const SELECT: u32 = 4;
    /// A pointer interaction landed outside menu and trigger (Open -> Closed)
    pub const OUTSIDE: u32 = 5;
}

/// How long a scroll hold outlives the pointer leaving the menu, in
/// milliseconds. The deferral avoids lock flicker when the pointer skims
/// across the menu edge mid-scroll.
pub const SCROLL_UNLOCK_DELAY_MS: u64 = 300;

// =============================================================================
// MenuState - FSM for the menu lifecycle
// =============================================================================

/// State machine for the menu lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    /// Menu is not visible
    #[default]
    Closed,
    /// Menu is mounted in the portal layer and interactive
    Open,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        matches!(self, MenuState::Open)
    }
}

impl StateTransitions for MenuState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use menu_events::*;
        use MenuState::*;

        match (self, event) {
            // Closed -> Open: user activated the control
            (Closed, OPEN) | (Closed, TOGGLE) => Some(Open),

            // Open -> Closed: explicit close, toggle, commit, or outside interaction
            (Open, CLOSE) | (Open, TOGGLE) | (Open, SELECT) | (Open, OUTSIDE) => Some(Closed),

            _ => None,
        }
    }
}

// =============================================================================
// Scroll arbitration
// =============================================================================

/// What the host should do with a scroll event after the controller saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAction {
    /// Menu closed or not involved; the event is none of our business.
    #[default]
    Ignored,
    /// Let the scroll proceed (e.g. the menu scrolling its own content).
    Allow,
    /// Cancel the page scroll; the menu is holding the page still.
    Suppress,
}

// =============================================================================
// Hooks and content
// =============================================================================

/// Lifecycle callback attached by the owning widget.
pub type DropdownHook = Arc<dyn Fn() + Send + Sync>;

/// Builds menu markup for the current placement on every mount.
pub type MenuContentFn = Arc<dyn Fn(&MenuPlacement) -> Node + Send + Sync>;

/// Lifecycle hooks invoked on state edges.
#[derive(Clone, Default)]
pub struct DropdownHooks {
    /// Menu was mounted and positioned.
    pub on_open: Option<DropdownHook>,
    /// Menu was unmounted, for any reason.
    pub on_close: Option<DropdownHook>,
    /// Controller was torn down.
    pub on_dispose: Option<DropdownHook>,
}

impl std::fmt::Debug for DropdownHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropdownHooks")
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_dispose", &self.on_dispose.is_some())
            .finish()
    }
}

// =============================================================================
// Config
// =============================================================================

/// Static wiring for one dropdown.
#[derive(Debug, Clone)]
pub struct DropdownConfig {
    /// Registry id of the anchor element (the control's label region).
    pub trigger_id: String,
    /// Registry id of the menu surface inside the portal content.
    pub menu_id: String,
    /// Horizontal alignment relative to the anchor.
    pub align: MenuAlign,
    /// Cap menu height to the available space on the chosen side.
    pub set_max_height: bool,
}

impl DropdownConfig {
    pub fn new(trigger_id: impl Into<String>, menu_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            menu_id: menu_id.into(),
            align: MenuAlign::default(),
            set_max_height: true,
        }
    }

    pub fn align(mut self, align: MenuAlign) -> Self {
        self.align = align;
        self
    }

    /// Let the menu keep its natural height instead of capping it.
    pub fn natural_height(mut self) -> Self {
        self.set_max_height = false;
        self
    }
}

// =============================================================================
// Dropdown
// =============================================================================

/// Controller for one floating menu.
pub struct Dropdown {
    config: DropdownConfig,
    registry: Arc<ElementRegistry>,
    portals: PortalManager,
    renderer: SharedRenderer,
    scroll_lock: ScrollLockRegistry,
    content: MenuContentFn,
    hooks: DropdownHooks,

    state: MenuState,
    placement: Option<MenuPlacement>,
    portal: Option<PortalHandle>,

    /// Natural menu size, reported by the owning widget before each open.
    menu_size: Size,
    viewport: Size,
    pointer: Point,
    pointer_over_menu: bool,

    /// Registry id scrolled into view right after mount.
    active_option: Option<String>,

    lock_guard: Option<ScrollLockGuard>,
    /// Deadline for releasing the scroll hold after the pointer left the
    /// menu. Re-entering the menu does not cancel it; a later scroll simply
    /// re-acquires the hold.
    unlock_at: Option<u64>,

    disposed: bool,
}

impl Dropdown {
    pub fn new(
        config: DropdownConfig,
        registry: Arc<ElementRegistry>,
        portals: PortalManager,
        renderer: SharedRenderer,
        scroll_lock: ScrollLockRegistry,
        content: MenuContentFn,
    ) -> Self {
        Self {
            config,
            registry,
            portals,
            renderer,
            scroll_lock,
            content,
            hooks: DropdownHooks::default(),
            state: MenuState::Closed,
            placement: None,
            portal: None,
            menu_size: Size::ZERO,
            viewport: Size::ZERO,
            pointer: Point::ZERO,
            pointer_over_menu: false,
            active_option: None,
            lock_guard: None,
            unlock_at: None,
            disposed: false,
        }
    }

    /// Attach lifecycle hooks.
    pub fn with_hooks(mut self, hooks: DropdownHooks) -> Self {
        self.hooks = hooks;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn placement(&self) -> Option<MenuPlacement> {
        self.placement
    }

    pub fn portal_handle(&self) -> Option<PortalHandle> {
        self.portal
    }

    pub fn trigger_id(&self) -> &str {
        &self.config.trigger_id
    }

    pub fn menu_id(&self) -> &str {
        &self.config.menu_id
    }

    /// True while this menu holds the page scroll.
    pub fn holds_scroll_lock(&self) -> bool {
        self.lock_guard.is_some()
    }

    // =========================================================================
    // Host-reported context
    // =========================================================================

    /// Report the viewport size the positioner works against.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Report the menu's natural content size before opening.
    pub fn set_menu_size(&mut self, size: Size) {
        self.menu_size = size;
    }

    /// Element scrolled into view right after the menu mounts.
    pub fn set_active_option(&mut self, id: Option<String>) {
        self.active_option = id;
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn transition(&mut self, event: u32) -> bool {
        match self.state.on_event(event) {
            Some(next) => {
                tracing::debug!(
                    "Dropdown '{}': {:?} -> {:?}",
                    self.config.menu_id,
                    self.state,
                    next
                );
                self.state = next;
                true
            }
            None => false,
        }
    }

    /// Open the menu: measure, position, mount, scroll active into view.
    pub fn open(&mut self) {
        if self.disposed || !self.transition(menu_events::OPEN) {
            return;
        }

        let placement = self.compute_placement();
        self.placement = Some(placement);

        let content = (self.content)(&placement);
        // Register the menu subtree so containment queries work before the
        // host has reported bounds.
        self.registry.register_tree(&content, None);
        let handle = self.portals.mount(content.clone());
        self.portal = Some(handle);

        {
            let mut renderer = self.renderer.lock().unwrap();
            renderer.portal_mounted(handle, &content);
            if let Some(active) = &self.active_option {
                renderer.scroll_into_view(active);
            }
            renderer.request_frame();
        }

        if let Some(hook) = &self.hooks.on_open {
            hook();
        }
    }

    /// Placement for the current anchor bounds. Missing anchor geometry
    /// falls back to a default placement rather than failing the open.
    fn compute_placement(&self) -> MenuPlacement {
        match self.registry.bounds(&self.config.trigger_id) {
            Some(anchor) => position_menu(
                anchor,
                self.menu_size,
                self.viewport,
                self.config.align,
                self.config.set_max_height,
            ),
            None => {
                tracing::debug!(
                    "Dropdown '{}': anchor '{}' has no bounds, skipping geometry",
                    self.config.menu_id,
                    self.config.trigger_id
                );
                MenuPlacement::default()
            }
        }
    }

    /// Flip between open and closed.
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close_with(menu_events::TOGGLE, "toggle");
        } else {
            self.open();
        }
    }

    /// Close explicitly (host request).
    pub fn close(&mut self) {
        self.close_with(menu_events::CLOSE, "explicit close");
    }

    /// Close after the owning widget committed a selection. The widget
    /// updates its value and notifies listeners before calling this.
    pub fn select_committed(&mut self) {
        self.close_with(menu_events::SELECT, "selection");
    }

    /// A pointer interaction landed outside both menu and trigger.
    pub fn outside_interaction(&mut self) {
        self.close_with(menu_events::OUTSIDE, "outside interaction");
    }

    fn close_with(&mut self, event: u32, reason: &'static str) {
        if !self.transition(event) {
            return;
        }
        tracing::debug!("Dropdown '{}' closed: {}", self.config.menu_id, reason);

        if let Some(handle) = self.portal.take() {
            self.portals.unmount(handle);
            let mut renderer = self.renderer.lock().unwrap();
            renderer.portal_unmounted(handle);
            renderer.request_frame();
        }
        self.registry.remove_subtree(&self.config.menu_id);
        self.placement = None;
        self.pointer_over_menu = false;

        // A closed menu wants nothing from the page scroll.
        self.lock_guard = None;
        self.unlock_at = None;

        if let Some(hook) = &self.hooks.on_close {
            hook();
        }
    }

    // =========================================================================
    // Pointer and scroll arbitration
    // =========================================================================

    /// Track pointer position; hovering state drives scroll suppression.
    pub fn pointer_moved(&mut self, x: f32, y: f32, now: u64) {
        self.pointer = Point::new(x, y);
        let over = self
            .menu_bounds()
            .is_some_and(|menu| menu.contains(self.pointer));

        if over != self.pointer_over_menu {
            self.pointer_over_menu = over;
            // Leaving arms the release deadline; re-entering does not
            // cancel it, a later suppressed scroll re-acquires instead.
            if !over && self.lock_guard.is_some() {
                self.unlock_at = Some(now + SCROLL_UNLOCK_DELAY_MS);
            }
        }
    }

    /// Arbitrate a scroll event. `target` is the registry id of the
    /// scrolled element, when the host knows it.
    pub fn scrolled(&mut self, target: Option<&str>, _now: u64) -> ScrollAction {
        if !self.is_open() {
            return ScrollAction::Ignored;
        }

        // The menu scrolling its own content never closes it.
        if target.is_some_and(|t| self.registry.is_within(t, &self.config.menu_id)) {
            return ScrollAction::Allow;
        }

        if self.pointer_over_menu {
            // Page tried to scroll under the hovered menu: hold it still.
            if self.lock_guard.is_none() {
                self.lock_guard = Some(self.scroll_lock.acquire());
            }
            return ScrollAction::Suppress;
        }

        let over_trigger = self
            .registry
            .bounds(&self.config.trigger_id)
            .is_some_and(|trigger| trigger.contains(self.pointer));
        if over_trigger {
            return ScrollAction::Allow;
        }

        self.close_with(menu_events::CLOSE, "scroll away from menu");
        ScrollAction::Allow
    }

    /// Viewport resized. An open menu's geometry is stale, so it closes.
    pub fn resized(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
        if self.is_open() {
            self.close_with(menu_events::CLOSE, "viewport resize");
        }
    }

    /// Advance time-based work. Returns true when the scroll hold was
    /// released this tick.
    pub fn update(&mut self, now: u64) -> bool {
        if self.unlock_at.is_some_and(|deadline| now >= deadline) {
            self.unlock_at = None;
            if self.lock_guard.take().is_some() {
                tracing::debug!(
                    "Dropdown '{}': scroll hold released",
                    self.config.menu_id
                );
                return true;
            }
        }
        false
    }

    // =========================================================================
    // Hit helpers
    // =========================================================================

    fn menu_bounds(&self) -> Option<Rect> {
        self.registry.bounds(&self.config.menu_id)
    }

    /// Point lands on the menu surface.
    pub fn hit_menu(&self, point: Point) -> bool {
        self.menu_bounds().is_some_and(|menu| menu.contains(point))
    }

    /// Point lands on the trigger.
    pub fn hit_trigger(&self, point: Point) -> bool {
        self.registry
            .bounds(&self.config.trigger_id)
            .is_some_and(|trigger| trigger.contains(point))
    }

    /// Whether a clicked option row is visually inside the menu's visible
    /// bounds. Rows scrolled past the clipped edge still hit-test, but
    /// clicking them must not select.
    ///
    /// The check is single-axis along the open direction: a downward menu
    /// clips rows above its top edge, an upward menu clips rows below its
    /// bottom edge.
    pub fn option_click_is_visible(&self, option: Rect) -> bool {
        let Some(menu) = self.menu_bounds() else {
            return false;
        };
        let is_downward = self.placement.map(|p| p.is_downward).unwrap_or(true);
        if is_downward {
            option.y() >= menu.y()
        } else {
            option.bottom() <= menu.bottom()
        }
    }

    /// Rebuild and republish menu content in place (value highlight moved,
    /// options changed) without disturbing the open state.
    pub fn refresh(&mut self) {
        let (Some(handle), Some(placement)) = (self.portal, self.placement) else {
            return;
        };
        let content = (self.content)(&placement);
        self.registry.register_tree(&content, None);
        self.portals.update_content(handle, content.clone());
        let mut renderer = self.renderer.lock().unwrap();
        renderer.portal_updated(handle, &content);
        renderer.request_frame();
    }

    /// Tear the controller down. Closes an open menu (firing `on_close`),
    /// then fires `on_dispose`. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.close_with(menu_events::CLOSE, "dispose");
        self.lock_guard = None;
        self.unlock_at = None;
        self.disposed = true;
        if let Some(hook) = &self.hooks.on_dispose {
            hook();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl std::fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("menu_id", &self.config.menu_id)
            .field("state", &self.state)
            .field("placement", &self.placement)
            .field("holds_scroll_lock", &self.holds_scroll_lock())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{node, Role};
    use crate::portal::{new_portal_manager, shared_renderer, NullRenderer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn menu_content(placement: &MenuPlacement) -> Node {
        let direction = if placement.is_downward {
            "is-downward"
        } else {
            "is-upward"
        };
        node(Role::Menu)
            .id("menu")
            .class("select-menu")
            .class(direction)
            .child(node(Role::OptionRow).id("menu:opt:0"))
            .child(node(Role::OptionRow).id("menu:opt:1"))
    }

    fn fixture() -> (Dropdown, Arc<ElementRegistry>, PortalManager, ScrollLockRegistry) {
        let registry = ElementRegistry::new_shared();
        let portals = new_portal_manager();
        let lock = ScrollLockRegistry::new();

        registry.register("trigger", None);
        registry.set_bounds("trigger", Rect::new(100.0, 50.0, 120.0, 32.0));

        let mut dropdown = Dropdown::new(
            DropdownConfig::new("trigger", "menu"),
            Arc::clone(&registry),
            Arc::clone(&portals),
            shared_renderer(NullRenderer),
            lock.clone(),
            Arc::new(menu_content),
        );
        dropdown.set_viewport(Size::new(800.0, 600.0));
        dropdown.set_menu_size(Size::new(120.0, 96.0));
        (dropdown, registry, portals, lock)
    }

    /// Host-side stand-in: report where the menu actually landed.
    fn report_menu_bounds(registry: &ElementRegistry, dropdown: &Dropdown) {
        let placement = dropdown.placement().unwrap();
        registry.set_bounds(
            "menu",
            Rect::new(placement.x, placement.y, 120.0, 96.0),
        );
    }

    #[test]
    fn test_state_transitions() {
        use menu_events::*;
        assert_eq!(MenuState::Closed.on_event(OPEN), Some(MenuState::Open));
        assert_eq!(MenuState::Closed.on_event(TOGGLE), Some(MenuState::Open));
        assert_eq!(MenuState::Open.on_event(SELECT), Some(MenuState::Closed));
        assert_eq!(MenuState::Open.on_event(OUTSIDE), Some(MenuState::Closed));
        // Events that do not apply leave the state alone.
        assert_eq!(MenuState::Closed.on_event(CLOSE), None);
        assert_eq!(MenuState::Open.on_event(OPEN), None);
        assert_eq!(MenuState::Open.on_event(999), None);
    }

    #[test]
    fn test_open_positions_and_mounts() {
        let (mut dropdown, _registry, portals, _lock) = fixture();

        dropdown.open();
        assert!(dropdown.is_open());

        let placement = dropdown.placement().unwrap();
        assert!(placement.is_downward);
        assert_eq!(placement.y, 86.0); // trigger bottom 82 + 4 gap

        let handle = dropdown.portal_handle().unwrap();
        let content = portals.content(handle).unwrap();
        assert!(content.has_class("is-downward"));
        assert_eq!(portals.portal_count(), 1);
    }

    #[test]
    fn test_open_without_anchor_bounds_still_mounts() {
        let registry = ElementRegistry::new_shared();
        let mut dropdown = Dropdown::new(
            DropdownConfig::new("ghost", "menu"),
            Arc::clone(&registry),
            new_portal_manager(),
            shared_renderer(NullRenderer),
            ScrollLockRegistry::new(),
            Arc::new(menu_content),
        );

        dropdown.open();
        assert!(dropdown.is_open());
        assert_eq!(dropdown.placement(), Some(MenuPlacement::default()));
    }

    #[test]
    fn test_close_unmounts_and_unregisters_menu() {
        let (mut dropdown, registry, portals, _lock) = fixture();

        dropdown.open();
        assert!(registry.contains("menu:opt:1"));

        dropdown.close();
        assert!(!dropdown.is_open());
        assert_eq!(portals.portal_count(), 0);
        assert!(!registry.contains("menu"));
        assert!(!registry.contains("menu:opt:1"));
    }

    #[test]
    fn test_resize_closes_open_menu() {
        let (mut dropdown, _registry, portals, _lock) = fixture();
        dropdown.open();

        dropdown.resized(1024.0, 768.0);
        assert!(!dropdown.is_open());
        assert_eq!(portals.portal_count(), 0);

        // Closed menu ignores further resizes.
        dropdown.resized(640.0, 480.0);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_menu_scrolling_its_own_content_is_allowed() {
        let (mut dropdown, registry, _portals, lock) = fixture();
        dropdown.open();
        report_menu_bounds(&registry, &dropdown);

        assert_eq!(
            dropdown.scrolled(Some("menu:opt:1"), 0),
            ScrollAction::Allow
        );
        assert!(dropdown.is_open());
        assert!(!lock.locked());
    }

    #[test]
    fn test_scroll_under_hovered_menu_is_suppressed() {
        let (mut dropdown, registry, _portals, lock) = fixture();
        dropdown.open();
        report_menu_bounds(&registry, &dropdown);

        // Pointer onto the menu surface.
        dropdown.pointer_moved(110.0, 100.0, 0);
        assert_eq!(dropdown.scrolled(None, 0), ScrollAction::Suppress);
        assert!(dropdown.holds_scroll_lock());
        assert!(lock.locked());

        // Holding is idempotent across repeated scrolls.
        assert_eq!(dropdown.scrolled(None, 10), ScrollAction::Suppress);
        assert_eq!(lock.count(), 1);
    }

    #[test]
    fn test_scroll_away_from_menu_and_trigger_closes() {
        let (mut dropdown, registry, _portals, _lock) = fixture();
        dropdown.open();
        report_menu_bounds(&registry, &dropdown);

        dropdown.pointer_moved(700.0, 500.0, 0);
        assert_eq!(dropdown.scrolled(None, 0), ScrollAction::Allow);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_scroll_over_trigger_keeps_menu_open() {
        let (mut dropdown, registry, _portals, _lock) = fixture();
        dropdown.open();
        report_menu_bounds(&registry, &dropdown);

        dropdown.pointer_moved(110.0, 60.0, 0); // on the trigger
        assert_eq!(dropdown.scrolled(None, 0), ScrollAction::Allow);
        assert!(dropdown.is_open());
    }

    #[test]
    fn test_deferred_unlock_after_pointer_leaves() {
        let (mut dropdown, registry, _portals, lock) = fixture();
        dropdown.open();
        report_menu_bounds(&registry, &dropdown);

        dropdown.pointer_moved(110.0, 100.0, 0);
        dropdown.scrolled(None, 0);
        assert!(lock.locked());

        // Pointer leaves at t=1000: hold survives until t=1300.
        dropdown.pointer_moved(700.0, 500.0, 1000);
        assert!(!dropdown.update(1200));
        assert!(lock.locked());

        assert!(dropdown.update(1300));
        assert!(!lock.locked());
        assert!(!dropdown.holds_scroll_lock());
    }

    #[test]
    fn test_reentry_does_not_cancel_release_deadline() {
        let (mut dropdown, registry, _portals, lock) = fixture();
        dropdown.open();
        report_menu_bounds(&registry, &dropdown);

        dropdown.pointer_moved(110.0, 100.0, 0);
        dropdown.scrolled(None, 0);
        dropdown.pointer_moved(700.0, 500.0, 1000);
        // Back over the menu before the deadline.
        dropdown.pointer_moved(110.0, 100.0, 1250);

        assert!(dropdown.update(1300));
        assert!(!lock.locked());

        // A fresh suppressed scroll simply re-acquires.
        assert_eq!(dropdown.scrolled(None, 1400), ScrollAction::Suppress);
        assert!(lock.locked());
    }

    #[test]
    fn test_close_releases_hold_immediately() {
        let (mut dropdown, registry, _portals, lock) = fixture();
        dropdown.open();
        report_menu_bounds(&registry, &dropdown);

        dropdown.pointer_moved(110.0, 100.0, 0);
        dropdown.scrolled(None, 0);
        assert!(lock.locked());

        dropdown.outside_interaction();
        assert!(!lock.locked());
    }

    #[test]
    fn test_option_click_visibility_downward() {
        let (mut dropdown, registry, _portals, _lock) = fixture();
        dropdown.open();
        registry.set_bounds("menu", Rect::new(100.0, 86.0, 120.0, 96.0));

        // Fully visible row.
        assert!(dropdown.option_click_is_visible(Rect::new(100.0, 90.0, 120.0, 24.0)));
        // Row scrolled above the menu's visible top.
        assert!(!dropdown.option_click_is_visible(Rect::new(100.0, 60.0, 120.0, 24.0)));
    }

    #[test]
    fn test_option_click_visibility_upward() {
        let registry = ElementRegistry::new_shared();
        registry.register("trigger", None);
        // Anchor near the viewport bottom forces an upward open.
        registry.set_bounds("trigger", Rect::new(100.0, 500.0, 120.0, 40.0));

        let mut dropdown = Dropdown::new(
            DropdownConfig::new("trigger", "menu"),
            Arc::clone(&registry),
            new_portal_manager(),
            shared_renderer(NullRenderer),
            ScrollLockRegistry::new(),
            Arc::new(menu_content),
        );
        dropdown.set_viewport(Size::new(800.0, 600.0));
        dropdown.set_menu_size(Size::new(120.0, 96.0));

        dropdown.open();
        assert!(!dropdown.placement().unwrap().is_downward);
        registry.set_bounds("menu", Rect::new(100.0, 400.0, 120.0, 96.0));

        // Row hanging past the visible bottom must not select.
        assert!(!dropdown.option_click_is_visible(Rect::new(100.0, 480.0, 120.0, 24.0)));
        assert!(dropdown.option_click_is_visible(Rect::new(100.0, 410.0, 120.0, 24.0)));
    }

    #[test]
    fn test_hooks_fire_on_edges() {
        let opened = Arc::new(AtomicUsize::new(0));
        let closed = Arc::new(AtomicUsize::new(0));
        let disposed = Arc::new(AtomicUsize::new(0));

        let (dropdown, _registry, _portals, _lock) = fixture();
        let (o, c, d) = (Arc::clone(&opened), Arc::clone(&closed), Arc::clone(&disposed));
        let mut dropdown = dropdown.with_hooks(DropdownHooks {
            on_open: Some(Arc::new(move || {
                o.fetch_add(1, Ordering::SeqCst);
            })),
            on_close: Some(Arc::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            })),
            on_dispose: Some(Arc::new(move || {
                d.fetch_add(1, Ordering::SeqCst);
            })),
        });

        dropdown.open();
        assert_eq!(opened.load(Ordering::SeqCst), 1);

        dropdown.select_committed();
        assert_eq!(closed.load(Ordering::SeqCst), 1);

        dropdown.open();
        dropdown.dispose();
        assert_eq!(closed.load(Ordering::SeqCst), 2);
        assert_eq!(disposed.load(Ordering::SeqCst), 1);

        // Dispose is idempotent and the controller stays inert.
        dropdown.dispose();
        dropdown.open();
        assert!(!dropdown.is_open());
        assert_eq!(disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_toggle_round_trip() {
        let (mut dropdown, _registry, portals, _lock) = fixture();
        dropdown.toggle();
        assert!(dropdown.is_open());
        dropdown.toggle();
        assert!(!dropdown.is_open());
        assert_eq!(portals.portal_count(), 0);
    }

    #[test]
    fn test_refresh_republishes_content() {
        let (mut dropdown, _registry, portals, _lock) = fixture();
        dropdown.open();
        let handle = dropdown.portal_handle().unwrap();
        let _ = portals.take_dirty();

        dropdown.refresh();
        assert!(portals.take_dirty());
        assert!(portals.is_mounted(handle));
    }
}
