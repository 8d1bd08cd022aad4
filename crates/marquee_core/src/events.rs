//! Platform event model
//!
//! Events enter the kit through a single dispatch surface; constants keep
//! the wire format flat so hosts can translate from any windowing layer
//! without enum juggling at the FFI boundary.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;
}

/// A platform event with associated data
///
/// `target` is the string id of the element the platform delivered the
/// event to (the scrolled container, the pressed element). Hosts that
/// cannot attribute a target leave it `None` and the router falls back to
/// bounds hit-testing.
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: Option<String>,
    pub data: EventData,
    /// Milliseconds since an arbitrary host epoch; drives deferred work.
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    Scroll { delta_x: f32, delta_y: f32 },
    Resize { width: u32, height: u32 },
    None,
}

impl Event {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self {
            event_type: event_types::POINTER_DOWN,
            target: None,
            data: EventData::Pointer { x, y },
            timestamp: 0,
        }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self {
            event_type: event_types::POINTER_UP,
            target: None,
            data: EventData::Pointer { x, y },
            timestamp: 0,
        }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self {
            event_type: event_types::POINTER_MOVE,
            target: None,
            data: EventData::Pointer { x, y },
            timestamp: 0,
        }
    }

    pub fn scroll(delta_x: f32, delta_y: f32) -> Self {
        Self {
            event_type: event_types::SCROLL,
            target: None,
            data: EventData::Scroll { delta_x, delta_y },
            timestamp: 0,
        }
    }

    pub fn resize(width: u32, height: u32) -> Self {
        Self {
            event_type: event_types::RESIZE,
            target: None,
            data: EventData::Resize { width, height },
            timestamp: 0,
        }
    }

    /// Attribute the event to a named element
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Stamp the event with a host timestamp (milliseconds)
    pub fn at_time(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Pointer coordinates, if this event carries any
    pub fn pointer(&self) -> Option<(f32, f32)> {
        match self.data {
            EventData::Pointer { x, y } => Some((x, y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors() {
        let e = Event::pointer_down(10.0, 20.0);
        assert_eq!(e.event_type, event_types::POINTER_DOWN);
        assert_eq!(e.pointer(), Some((10.0, 20.0)));
        assert!(e.target.is_none());

        let s = Event::scroll(0.0, -12.0).with_target("page");
        assert_eq!(s.event_type, event_types::SCROLL);
        assert_eq!(s.data, EventData::Scroll { delta_x: 0.0, delta_y: -12.0 });
        assert_eq!(s.target.as_deref(), Some("page"));
        assert_eq!(s.pointer(), None);
    }

    #[test]
    fn test_event_timestamp() {
        let e = Event::resize(800, 600).at_time(1234);
        assert_eq!(e.timestamp, 1234);
        assert_eq!(
            e.data,
            EventData::Resize {
                width: 800,
                height: 600
            }
        );
    }
}
