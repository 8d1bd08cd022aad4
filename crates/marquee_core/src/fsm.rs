//! Widget state machines
//!
//! Interaction states are small `Copy` enums that transition on flat `u32`
//! event constants. Each widget defines its own event constant module next
//! to its state enum; the trait here is the shared contract.
//!
//! # Example
//!
//! ```rust
//! use marquee_core::fsm::StateTransitions;
//!
//! pub mod toggle_events {
//!     pub const PRESS: u32 = 1;
//! }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum ToggleState {
//!     Off,
//!     On,
//! }
//!
//! impl StateTransitions for ToggleState {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (ToggleState::Off, toggle_events::PRESS) => Some(ToggleState::On),
//!             (ToggleState::On, toggle_events::PRESS) => Some(ToggleState::Off),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let state = ToggleState::Off;
//! assert_eq!(state.on_event(toggle_events::PRESS), Some(ToggleState::On));
//! ```

/// Transition table for a widget interaction state
///
/// Returns `Some(next)` when the event causes a transition, `None` when the
/// event is ignored in the current state. Implementations must be pure;
/// side effects belong to the controller driving the machine.
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + std::hash::Hash + Send + Sync + std::fmt::Debug + 'static
{
    fn on_event(&self, event: u32) -> Option<Self>;
}
