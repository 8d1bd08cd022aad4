//! Event routing from platform input to widgets
//!
//! Bridges host-level input events to the widgets that care about them.
//! The host feeds every captured event into [`EventRouter::dispatch`]; the
//! router tracks the pointer, fans events out to registered sinks, and
//! reports back whether anything consumed the event (a click landed on a
//! widget) or wants it cancelled (a menu is suppressing page scroll).
//!
//! ```text
//! Platform input (pointer, scroll, resize)
//!     ↓
//! EventRouter (pointer tracking, fan-out)
//!     ↓
//! EventSink widgets (Select, Bands)
//!     ↓
//! MenuState transitions / value commits
//! ```
//!
//! Widgets are held weakly: a dropped widget unregisters itself by simply
//! going away, and the router prunes dead entries on the next dispatch.

use std::sync::{Arc, Mutex, Weak};

use marquee_core::events::{event_types, Event, EventData};
use marquee_core::geometry::{Point, Size};

use crate::dropdown::ScrollAction;

/// A widget that receives routed events.
///
/// All times are host-supplied milliseconds, threaded through from
/// [`Event::timestamp`] so time-based behavior stays deterministic under
/// test.
pub trait EventSink: Send {
    /// Pointer moved to a new position.
    fn pointer_moved(&mut self, x: f32, y: f32, now: u64);
    /// Pointer pressed. Return true when the widget consumed the press.
    fn pointer_down(&mut self, x: f32, y: f32, now: u64) -> bool;
    /// Pointer released. Widgets without press-and-drag behavior can
    /// ignore this.
    fn pointer_up(&mut self, _x: f32, _y: f32, _now: u64) {}
    /// A scroll was captured. `target` is the registry id of the scrolled
    /// element when the host knows it.
    fn scrolled(&mut self, target: Option<&str>, now: u64) -> ScrollAction;
    /// The viewport changed size.
    fn resized(&mut self, viewport: Size, now: u64);
    /// Per-frame tick for deferred work. Return true when a new frame is
    /// wanted.
    fn update(&mut self, now: u64) -> bool;
}

/// Shared handle to a registered widget.
pub type SharedSink = Arc<Mutex<dyn EventSink>>;

/// Routes captured platform events to registered widgets
pub struct EventRouter {
    sinks: Vec<Weak<Mutex<dyn EventSink>>>,
    pointer: Point,
    viewport: Size,
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRouter {
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            pointer: Point::ZERO,
            viewport: Size::ZERO,
        }
    }

    /// Register a widget. The router keeps only a weak reference.
    pub fn register(&mut self, sink: SharedSink) {
        self.sinks.push(Arc::downgrade(&sink));
    }

    /// Last observed pointer position.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Last observed viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Number of live registered widgets.
    pub fn len(&self) -> usize {
        self.sinks.iter().filter(|w| w.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upgrade live sinks and drop dead ones.
    fn live_sinks(&mut self) -> Vec<SharedSink> {
        self.sinks.retain(|weak| weak.strong_count() > 0);
        self.sinks
            .iter()
            .filter_map(|weak| weak.upgrade())
            .collect()
    }

    /// Feed one captured event through the router.
    ///
    /// Returns true when the event should not propagate further: a press
    /// was consumed by a widget, or a scroll is being suppressed by an
    /// open menu. Presses and scrolls are delivered to every widget even
    /// after one consumes them, because each open menu reacts to outside
    /// interactions independently.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        let now = event.timestamp;
        match event.event_type {
            event_types::POINTER_MOVE => {
                if let EventData::Pointer { x, y } = event.data {
                    self.pointer = Point::new(x, y);
                    for sink in self.live_sinks() {
                        sink.lock().unwrap().pointer_moved(x, y, now);
                    }
                }
                false
            }
            event_types::POINTER_DOWN => {
                let EventData::Pointer { x, y } = event.data else {
                    return false;
                };
                self.pointer = Point::new(x, y);
                let mut consumed = false;
                for sink in self.live_sinks() {
                    consumed |= sink.lock().unwrap().pointer_down(x, y, now);
                }
                consumed
            }
            event_types::POINTER_UP => {
                if let EventData::Pointer { x, y } = event.data {
                    self.pointer = Point::new(x, y);
                    for sink in self.live_sinks() {
                        sink.lock().unwrap().pointer_up(x, y, now);
                    }
                }
                false
            }
            event_types::SCROLL => {
                let target = event.target.as_deref();
                let mut suppress = false;
                for sink in self.live_sinks() {
                    let action = sink.lock().unwrap().scrolled(target, now);
                    suppress |= action == ScrollAction::Suppress;
                }
                suppress
            }
            event_types::RESIZE => {
                if let EventData::Resize { width, height } = event.data {
                    self.viewport = Size::new(width as f32, height as f32);
                    for sink in self.live_sinks() {
                        sink.lock().unwrap().resized(self.viewport, now);
                    }
                }
                false
            }
            _ => false,
        }
    }

    /// Tick every widget's deferred work. Returns true when any widget
    /// wants a new frame.
    pub fn update_all(&mut self, now: u64) -> bool {
        let mut needs_frame = false;
        for sink in self.live_sinks() {
            needs_frame |= sink.lock().unwrap().update(now);
        }
        needs_frame
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("sinks", &self.sinks.len())
            .field("pointer", &self.pointer)
            .field("viewport", &self.viewport)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        moves: Vec<(f32, f32)>,
        downs: Vec<(f32, f32, u64)>,
        scrolls: Vec<Option<String>>,
        resizes: Vec<(f32, f32)>,
        updates: Vec<u64>,
        consume_downs: bool,
        scroll_action: ScrollAction,
    }

    impl RecordingSink {
        fn shared(self) -> Arc<Mutex<RecordingSink>> {
            Arc::new(Mutex::new(self))
        }
    }

    impl EventSink for RecordingSink {
        fn pointer_moved(&mut self, x: f32, y: f32, _now: u64) {
            self.moves.push((x, y));
        }

        fn pointer_down(&mut self, x: f32, y: f32, now: u64) -> bool {
            self.downs.push((x, y, now));
            self.consume_downs
        }

        fn scrolled(&mut self, target: Option<&str>, _now: u64) -> ScrollAction {
            self.scrolls.push(target.map(String::from));
            self.scroll_action
        }

        fn resized(&mut self, viewport: Size, _now: u64) {
            self.resizes.push((viewport.width, viewport.height));
        }

        fn update(&mut self, now: u64) -> bool {
            self.updates.push(now);
            false
        }
    }

    #[test]
    fn test_pointer_events_fan_out() {
        let mut router = EventRouter::new();
        let sink = RecordingSink::default().shared();
        router.register(sink.clone());

        router.dispatch(&Event::pointer_move(10.0, 20.0));
        router.dispatch(&Event::pointer_down(10.0, 20.0).at_time(42));

        let recorded = sink.lock().unwrap();
        assert_eq!(recorded.moves, vec![(10.0, 20.0)]);
        assert_eq!(recorded.downs, vec![(10.0, 20.0, 42)]);
        assert_eq!(router.pointer(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_down_consumption_is_ored_across_sinks() {
        let mut router = EventRouter::new();
        let quiet = RecordingSink::default().shared();
        let eager = RecordingSink {
            consume_downs: true,
            ..Default::default()
        }
        .shared();
        router.register(quiet.clone());
        router.register(eager);

        assert!(router.dispatch(&Event::pointer_down(0.0, 0.0)));
        // The quiet sink still saw the press.
        assert_eq!(quiet.lock().unwrap().downs.len(), 1);
    }

    #[test]
    fn test_scroll_suppression_wins() {
        let mut router = EventRouter::new();
        let allowing = RecordingSink {
            scroll_action: ScrollAction::Allow,
            ..Default::default()
        }
        .shared();
        let holding = RecordingSink {
            scroll_action: ScrollAction::Suppress,
            ..Default::default()
        }
        .shared();
        router.register(allowing.clone());
        router.register(holding);

        assert!(router.dispatch(&Event::scroll(0.0, 12.0).with_target("page")));
        assert_eq!(
            allowing.lock().unwrap().scrolls,
            vec![Some("page".to_string())]
        );
    }

    #[test]
    fn test_resize_updates_viewport_and_broadcasts() {
        let mut router = EventRouter::new();
        let sink = RecordingSink::default().shared();
        router.register(sink.clone());

        router.dispatch(&Event::resize(1024, 768));
        assert_eq!(router.viewport(), Size::new(1024.0, 768.0));
        assert_eq!(sink.lock().unwrap().resizes, vec![(1024.0, 768.0)]);
    }

    #[test]
    fn test_dead_sinks_are_pruned() {
        let mut router = EventRouter::new();
        let keep = RecordingSink::default().shared();
        let drop_me = RecordingSink::default().shared();
        router.register(keep.clone());
        router.register(drop_me.clone());
        assert_eq!(router.len(), 2);

        drop(drop_me);
        router.dispatch(&Event::pointer_move(1.0, 1.0));
        assert_eq!(router.len(), 1);
        assert_eq!(keep.lock().unwrap().moves.len(), 1);
    }

    #[test]
    fn test_update_all_ticks_every_sink() {
        let mut router = EventRouter::new();
        let a = RecordingSink::default().shared();
        let b = RecordingSink::default().shared();
        router.register(a.clone());
        router.register(b.clone());

        assert!(!router.update_all(500));
        assert_eq!(a.lock().unwrap().updates, vec![500]);
        assert_eq!(b.lock().unwrap().updates, vec![500]);
    }
}
