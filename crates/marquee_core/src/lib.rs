//! Marquee Core Primitives
//!
//! This crate provides the foundational types for the Marquee widget kit:
//!
//! - **Geometry**: points, sizes, and rects with anchor-space helpers
//! - **Paint description**: colors, gradients, and brushes (no drawing)
//! - **Events**: flat platform event model routed into widgets
//! - **State machines**: the `StateTransitions` contract for widget FSMs
//! - **Reactive cells**: signal store + `State<T>` value binding
//!
//! Nothing here depends on a windowing system or renderer; the widget layer
//! wires these primitives to a host through injected capabilities.
//!
//! # Example
//!
//! ```rust
//! use marquee_core::prelude::*;
//!
//! let store = SignalStore::new_shared();
//! let selected: State<String> = State::create(&store, String::new());
//!
//! let anchor = Rect::new(100.0, 500.0, 160.0, 36.0);
//! let viewport = Size::new(1280.0, 720.0);
//! assert_eq!(anchor.space_below(viewport), 184.0);
//!
//! selected.set("pencil".to_string());
//! assert_eq!(selected.get(), "pencil");
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod paint;
pub mod reactive;

pub use events::{event_types, Event, EventData, EventType};
pub use fsm::StateTransitions;
pub use geometry::{Point, Rect, Size};
pub use paint::{Brush, Color, Gradient, GradientAxis, GradientStop};
pub use reactive::{
    SharedSignals, Signal, SignalId, SignalStore, State, Watcher, WatcherId,
};

/// Convenience re-exports for widget code
pub mod prelude {
    pub use crate::events::{event_types, Event, EventData, EventType};
    pub use crate::fsm::StateTransitions;
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::paint::{Brush, Color, Gradient, GradientAxis, GradientStop};
    pub use crate::reactive::{SharedSignals, SignalStore, State};
}
