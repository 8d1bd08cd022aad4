//! Marquee Widgets
//!
//! Presentational widget kit for host-driven UIs: the host owns layout,
//! input, and drawing; this crate owns widget semantics. Widgets describe
//! themselves as [`markup::Node`] trees, consume platform events through
//! the [`router::EventRouter`], and reach the host through an injected
//! [`portal::Renderer`] capability.
//!
//! - **Select**: dropdown field with grouped options, overlay menu, and
//!   flip-up placement
//! - **Bands**: color-picker offset strips with draggable thumbs
//! - **Dropdown**: the open/close state machine behind any anchored menu
//! - **Portals**: detached overlay surfaces rendered above the page
//! - **Scroll lock**: ref-counted page scroll suppression
//!
//! # Example
//!
//! ```rust
//! use marquee_core::{Event, Rect};
//! use marquee_ui::prelude::*;
//!
//! let ctx = UiContext::new(NullRenderer);
//! ctx.set_viewport(800.0, 600.0);
//!
//! let fruit = ctx.use_state(String::new());
//! let field = select(&fruit)
//!     .key("fruit")
//!     .option("Apple")
//!     .option("Banana")
//!     .mount(&ctx);
//!
//! // The host lays the view out and reports element bounds back.
//! ctx.mount_view(&field.lock().unwrap().view());
//! ctx.registry()
//!     .set_bounds("fruit:trigger", Rect::new(40.0, 40.0, 160.0, 32.0));
//!
//! ctx.dispatch(&Event::pointer_down(60.0, 50.0));
//! assert!(field.lock().unwrap().is_open());
//! ```

pub mod bands;
pub mod context;
pub mod dropdown;
pub mod key;
pub mod markup;
pub mod options;
pub mod portal;
pub mod position;
pub mod registry;
pub mod router;
pub mod scroll_lock;
pub mod select;

// Markup description
pub use markup::{class_list, node, text, Node, Role};

// Context and event plumbing
pub use context::UiContext;
pub use registry::ElementRegistry;
pub use router::{EventRouter, EventSink, SharedSink};

// Host capabilities
pub use portal::{
    global_portal_manager, new_portal_manager, shared_renderer, MountedPortal, NullRenderer,
    PortalHandle, PortalManager, PortalManagerExt, PortalManagerInner, Renderer, SharedRenderer,
    PORTAL_ROOT_ID,
};

// Menu placement
pub use position::{
    position_menu, MenuAlign, MenuPlacement, MENU_ANCHOR_GAP, MENU_VIEWPORT_MARGIN,
    MIN_USABLE_MENU_HEIGHT,
};

// Anchored-menu state machine
pub use dropdown::{
    menu_events, Dropdown, DropdownConfig, DropdownHook, DropdownHooks, MenuContentFn, MenuState,
    ScrollAction, SCROLL_UNLOCK_DELAY_MS,
};

// Scroll suppression
pub use scroll_lock::{global_scroll_lock, ScrollLockGuard, ScrollLockHook, ScrollLockRegistry};

// Widgets
pub use bands::{bands, BandChange, Bands, BandsBuilder, BandsChangeHandler};
pub use options::{
    Entry, OptionGroup, OptionItem, OptionList, DEFAULT_EMPTY_MESSAGE, DEFAULT_PLACEHOLDER,
};
pub use select::{select, Select, SelectBuilder, SelectChangeHandler, SelectSize, SelectVariant};

// Instance identity
pub use key::InstanceKey;

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::context::UiContext;
    // Re-export core geometry, event, and state types for convenience
    pub use marquee_core::events::{event_types, Event};
    pub use marquee_core::geometry::{Point, Rect, Size};
    pub use marquee_core::paint::{Brush, Color};
    pub use marquee_core::reactive::State;
    // Markup building
    pub use crate::markup::{class_list, node, text, Node, Role};
    // Event routing
    pub use crate::router::{EventRouter, EventSink, SharedSink};
    // Host capabilities
    pub use crate::portal::{NullRenderer, PortalManagerExt, Renderer, SharedRenderer};
    // Menu placement
    pub use crate::position::{position_menu, MenuAlign, MenuPlacement};
    // Anchored menus
    pub use crate::dropdown::{Dropdown, DropdownConfig, DropdownHooks, MenuState, ScrollAction};
    // Scroll suppression
    pub use crate::scroll_lock::{global_scroll_lock, ScrollLockGuard, ScrollLockRegistry};
    // Option model
    pub use crate::options::{Entry, OptionGroup, OptionItem, OptionList};
    // Widgets
    pub use crate::bands::{bands, BandChange, Bands, BandsBuilder};
    pub use crate::select::{select, Select, SelectBuilder, SelectSize, SelectVariant};
    // Instance identity
    pub use crate::key::InstanceKey;
}
