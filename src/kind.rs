//! Tag-checked view of an event.
//!
//! [`EventKind`] decodes a record by first looking at the tag, then reading only the
//! union member that tag selects. Unlike the raw accessors on
//! [`Event`](crate::event::Event), it never reinterprets another member's bytes.
//!
//! Handles are left out of the view; get them from the event itself.

use crate::event_type::{is_user_event_type, EventCategory, EventType, NONE};
use crate::ffi::{EventTypeId, RawEvent};

#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "category", rename_all = "snake_case"))]
pub enum EventKind {
    /// Empty record.
    None,
    Display {
        kind: EventType,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        orientation: i32,
    },
    Joystick {
        kind: EventType,
        stick: i32,
        axis: i32,
        pos: f32,
        button: i32,
    },
    Keyboard {
        kind: EventType,
        keycode: i32,
        unichar: i32,
        modifiers: u32,
        repeat: bool,
    },
    Mouse {
        kind: EventType,
        x: i32,
        y: i32,
        z: i32,
        w: i32,
        dx: i32,
        dy: i32,
        dz: i32,
        dw: i32,
        button: u32,
        pressure: f32,
    },
    Timer {
        count: i64,
        error: f64,
    },
    User {
        type_id: EventTypeId,
        data: [isize; 4],
    },
    /// Built-in tag this crate does not know (e.g. from a newer native library).
    Unknown {
        type_id: EventTypeId,
    },
}

impl EventKind {
    pub fn decode(raw: &RawEvent) -> Self {
        let type_id = raw.type_id();
        if type_id == NONE {
            return EventKind::None;
        }
        if is_user_event_type(type_id) {
            // SAFETY: tag selects the user member.
            let u = unsafe { raw.user };
            return EventKind::User {
                type_id,
                data: [u.data1, u.data2, u.data3, u.data4],
            };
        }
        let Some(kind) = EventType::from_raw(type_id) else {
            return EventKind::Unknown { type_id };
        };

        // SAFETY: each arm reads the member its category selects.
        unsafe {
            match kind.category() {
                EventCategory::Display => {
                    let d = raw.display;
                    EventKind::Display {
                        kind,
                        x: d.x,
                        y: d.y,
                        width: d.width,
                        height: d.height,
                        orientation: d.orientation,
                    }
                }
                EventCategory::Joystick => {
                    let j = raw.joystick;
                    EventKind::Joystick {
                        kind,
                        stick: j.stick,
                        axis: j.axis,
                        pos: j.pos,
                        button: j.button,
                    }
                }
                EventCategory::Keyboard => {
                    let k = raw.keyboard;
                    EventKind::Keyboard {
                        kind,
                        keycode: k.keycode,
                        unichar: k.unichar,
                        modifiers: k.modifiers,
                        repeat: k.repeat != 0,
                    }
                }
                EventCategory::Mouse => {
                    let m = raw.mouse;
                    EventKind::Mouse {
                        kind,
                        x: m.x,
                        y: m.y,
                        z: m.z,
                        w: m.w,
                        dx: m.dx,
                        dy: m.dy,
                        dz: m.dz,
                        dw: m.dw,
                        button: m.button,
                        pressure: m.pressure,
                    }
                }
                EventCategory::Timer => {
                    let t = raw.timer;
                    EventKind::Timer {
                        count: t.count,
                        error: t.error,
                    }
                }
            }
        }
    }

    /// Category of a built-in event; `None` for empty, user, and unknown events.
    pub fn category(&self) -> Option<EventCategory> {
        match self {
            EventKind::Display { .. } => Some(EventCategory::Display),
            EventKind::Joystick { .. } => Some(EventCategory::Joystick),
            EventKind::Keyboard { .. } => Some(EventCategory::Keyboard),
            EventKind::Mouse { .. } => Some(EventCategory::Mouse),
            EventKind::Timer { .. } => Some(EventCategory::Timer),
            EventKind::None | EventKind::User { .. } | EventKind::Unknown { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_type;
    use std::ptr::null_mut;

    #[test]
    fn empty_and_unknown() {
        assert_eq!(EventKind::decode(&RawEvent::default()), EventKind::None);
        let raw = RawEvent::with_header(70, null_mut(), 0.0);
        assert_eq!(EventKind::decode(&raw), EventKind::Unknown { type_id: 70 });
        assert_eq!(EventKind::decode(&raw).category(), None);
    }

    #[test]
    fn touch_events_do_not_decode_as_display() {
        for t in event_type::TOUCH_BEGIN..=event_type::TOUCH_CANCEL {
            let raw = RawEvent::with_header(t, null_mut(), 0.0);
            assert_eq!(EventKind::decode(&raw), EventKind::Unknown { type_id: t });
        }
        let raw = RawEvent::with_header(event_type::DISPLAY_CONNECTED, null_mut(), 0.0);
        assert_eq!(EventKind::decode(&raw).category(), Some(EventCategory::Display));
    }

    #[test]
    fn joystick_reads_joystick_member() {
        let raw = RawEvent::joystick(event_type::JOYSTICK_AXIS, null_mut(), 0.0, null_mut(), 1, 2, -0.25, 0);
        assert_eq!(
            EventKind::decode(&raw),
            EventKind::Joystick {
                kind: EventType::JoystickAxis,
                stick: 1,
                axis: 2,
                pos: -0.25,
                button: 0,
            }
        );
    }

    #[test]
    fn user_range_decodes_as_user() {
        let raw = RawEvent::user(event_type::fourcc(*b"GAME"), null_mut(), 0.0, null_mut(), [9, 8, 7, 6]);
        match EventKind::decode(&raw) {
            EventKind::User { type_id, data } => {
                assert_eq!(type_id, event_type::fourcc(*b"GAME"));
                assert_eq!(data, [9, 8, 7, 6]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_with_category_tag() {
        let raw = RawEvent::timer(null_mut(), 0.0, 42, 0.5);
        let json = serde_json::to_value(EventKind::decode(&raw)).unwrap();
        assert_eq!(json["category"], "timer");
        assert_eq!(json["count"], 42);
        assert_eq!(json["error"], 0.5);
    }
}
