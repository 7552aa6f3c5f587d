//! Event type tags.
//!
//! Built-in tags occupy a fixed range below [`USER_EVENT_TYPE_BASE`]; anything at or
//! above it is an application-defined user event. Tag `0` ([`NONE`]) is what an empty
//! record carries.

use crate::ffi::EventTypeId;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Tag of an empty record.
pub const NONE: EventTypeId = 0;

pub const JOYSTICK_AXIS: EventTypeId = 1;
pub const JOYSTICK_BUTTON_DOWN: EventTypeId = 2;
pub const JOYSTICK_BUTTON_UP: EventTypeId = 3;
pub const JOYSTICK_CONFIGURATION: EventTypeId = 4;

pub const KEY_DOWN: EventTypeId = 10;
pub const KEY_CHAR: EventTypeId = 11;
pub const KEY_UP: EventTypeId = 12;

pub const MOUSE_AXES: EventTypeId = 20;
pub const MOUSE_BUTTON_DOWN: EventTypeId = 21;
pub const MOUSE_BUTTON_UP: EventTypeId = 22;
pub const MOUSE_ENTER_DISPLAY: EventTypeId = 23;
pub const MOUSE_LEAVE_DISPLAY: EventTypeId = 24;
pub const MOUSE_WARPED: EventTypeId = 25;

pub const TIMER: EventTypeId = 30;

pub const DISPLAY_EXPOSE: EventTypeId = 40;
pub const DISPLAY_RESIZE: EventTypeId = 41;
pub const DISPLAY_CLOSE: EventTypeId = 42;
pub const DISPLAY_LOST: EventTypeId = 43;
pub const DISPLAY_FOUND: EventTypeId = 44;
pub const DISPLAY_SWITCH_IN: EventTypeId = 45;
pub const DISPLAY_SWITCH_OUT: EventTypeId = 46;
pub const DISPLAY_ORIENTATION: EventTypeId = 47;
pub const DISPLAY_HALT_DRAWING: EventTypeId = 48;
pub const DISPLAY_RESUME_DRAWING: EventTypeId = 49;

// Touch events have their own union member, which is not mirrored here; they decode
// as unknown built-ins.
pub const TOUCH_BEGIN: EventTypeId = 50;
pub const TOUCH_END: EventTypeId = 51;
pub const TOUCH_MOVE: EventTypeId = 52;
pub const TOUCH_CANCEL: EventTypeId = 53;

pub const DISPLAY_CONNECTED: EventTypeId = 60;
pub const DISPLAY_DISCONNECTED: EventTypeId = 61;

/// First tag reserved for user events.
pub const USER_EVENT_TYPE_BASE: EventTypeId = 512;

/// `true` if `type_id` is in the user range, `false` for built-in tags and [`NONE`].
///
/// Pure classification; usable without an event instance.
#[inline]
pub const fn is_user_event_type(type_id: EventTypeId) -> bool {
    type_id >= USER_EVENT_TYPE_BASE
}

/// Build a user event tag from four ASCII bytes (`ALLEGRO_GET_EVENT_TYPE`).
///
/// Tags built this way from printable characters always land in the user range.
#[inline]
pub const fn fourcc(id: [u8; 4]) -> EventTypeId {
    ((id[0] as EventTypeId) << 24)
        | ((id[1] as EventTypeId) << 16)
        | ((id[2] as EventTypeId) << 8)
        | (id[3] as EventTypeId)
}

/// Which union member a built-in tag populates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum EventCategory {
    Joystick,
    Keyboard,
    Mouse,
    Timer,
    Display,
}

/// Known built-in event types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[repr(u32)]
pub enum EventType {
    JoystickAxis = JOYSTICK_AXIS,
    JoystickButtonDown = JOYSTICK_BUTTON_DOWN,
    JoystickButtonUp = JOYSTICK_BUTTON_UP,
    JoystickConfiguration = JOYSTICK_CONFIGURATION,
    KeyDown = KEY_DOWN,
    KeyChar = KEY_CHAR,
    KeyUp = KEY_UP,
    MouseAxes = MOUSE_AXES,
    MouseButtonDown = MOUSE_BUTTON_DOWN,
    MouseButtonUp = MOUSE_BUTTON_UP,
    MouseEnterDisplay = MOUSE_ENTER_DISPLAY,
    MouseLeaveDisplay = MOUSE_LEAVE_DISPLAY,
    MouseWarped = MOUSE_WARPED,
    Timer = TIMER,
    DisplayExpose = DISPLAY_EXPOSE,
    DisplayResize = DISPLAY_RESIZE,
    DisplayClose = DISPLAY_CLOSE,
    DisplayLost = DISPLAY_LOST,
    DisplayFound = DISPLAY_FOUND,
    DisplaySwitchIn = DISPLAY_SWITCH_IN,
    DisplaySwitchOut = DISPLAY_SWITCH_OUT,
    DisplayOrientation = DISPLAY_ORIENTATION,
    DisplayHaltDrawing = DISPLAY_HALT_DRAWING,
    DisplayResumeDrawing = DISPLAY_RESUME_DRAWING,
    DisplayConnected = DISPLAY_CONNECTED,
    DisplayDisconnected = DISPLAY_DISCONNECTED,
}

impl EventType {
    /// Map a raw tag to a known built-in type. User tags and unknown built-ins give `None`.
    pub fn from_raw(type_id: EventTypeId) -> Option<Self> {
        use EventType::*;
        Some(match type_id {
            JOYSTICK_AXIS => JoystickAxis,
            JOYSTICK_BUTTON_DOWN => JoystickButtonDown,
            JOYSTICK_BUTTON_UP => JoystickButtonUp,
            JOYSTICK_CONFIGURATION => JoystickConfiguration,
            KEY_DOWN => KeyDown,
            KEY_CHAR => KeyChar,
            KEY_UP => KeyUp,
            MOUSE_AXES => MouseAxes,
            MOUSE_BUTTON_DOWN => MouseButtonDown,
            MOUSE_BUTTON_UP => MouseButtonUp,
            MOUSE_ENTER_DISPLAY => MouseEnterDisplay,
            MOUSE_LEAVE_DISPLAY => MouseLeaveDisplay,
            MOUSE_WARPED => MouseWarped,
            TIMER => Timer,
            DISPLAY_EXPOSE => DisplayExpose,
            DISPLAY_RESIZE => DisplayResize,
            DISPLAY_CLOSE => DisplayClose,
            DISPLAY_LOST => DisplayLost,
            DISPLAY_FOUND => DisplayFound,
            DISPLAY_SWITCH_IN => DisplaySwitchIn,
            DISPLAY_SWITCH_OUT => DisplaySwitchOut,
            DISPLAY_ORIENTATION => DisplayOrientation,
            DISPLAY_HALT_DRAWING => DisplayHaltDrawing,
            DISPLAY_RESUME_DRAWING => DisplayResumeDrawing,
            DISPLAY_CONNECTED => DisplayConnected,
            DISPLAY_DISCONNECTED => DisplayDisconnected,
            _ => return None,
        })
    }

    #[inline]
    pub fn raw(self) -> EventTypeId {
        self as EventTypeId
    }

    pub fn category(self) -> EventCategory {
        match self.raw() {
            JOYSTICK_AXIS..=JOYSTICK_CONFIGURATION => EventCategory::Joystick,
            KEY_DOWN..=KEY_UP => EventCategory::Keyboard,
            MOUSE_AXES..=MOUSE_WARPED => EventCategory::Mouse,
            TIMER => EventCategory::Timer,
            _ => EventCategory::Display,
        }
    }
}

impl core::fmt::Display for EventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tags_are_not_user_events() {
        for t in [NONE, JOYSTICK_AXIS, KEY_CHAR, MOUSE_WARPED, TIMER, DISPLAY_DISCONNECTED, 511] {
            assert!(!is_user_event_type(t), "tag {t} classified as user");
        }
    }

    #[test]
    fn user_range_starts_at_base() {
        for t in [USER_EVENT_TYPE_BASE, 513, 1024, u32::MAX, fourcc(*b"ALXE")] {
            assert!(is_user_event_type(t), "tag {t} not classified as user");
        }
    }

    #[test]
    fn classification_is_const() {
        const CHECK: bool = is_user_event_type(fourcc(*b"USER"));
        assert!(CHECK);
    }

    #[test]
    fn from_raw_roundtrips_known_tags() {
        for t in 0..USER_EVENT_TYPE_BASE {
            if let Some(ty) = EventType::from_raw(t) {
                assert_eq!(ty.raw(), t);
            }
        }
        assert_eq!(EventType::from_raw(TIMER), Some(EventType::Timer));
        assert_eq!(EventType::from_raw(NONE), None);
        assert_eq!(EventType::from_raw(600), None);
    }

    #[test]
    fn touch_tags_are_not_display_events() {
        for t in [TOUCH_BEGIN, TOUCH_END, TOUCH_MOVE, TOUCH_CANCEL] {
            assert_eq!(EventType::from_raw(t), None, "tag {t}");
            assert!(!is_user_event_type(t));
        }
        assert_eq!(EventType::from_raw(60), Some(EventType::DisplayConnected));
        assert_eq!(EventType::from_raw(61), Some(EventType::DisplayDisconnected));
    }

    #[test]
    fn categories() {
        assert_eq!(EventType::JoystickConfiguration.category(), EventCategory::Joystick);
        assert_eq!(EventType::KeyChar.category(), EventCategory::Keyboard);
        assert_eq!(EventType::MouseWarped.category(), EventCategory::Mouse);
        assert_eq!(EventType::Timer.category(), EventCategory::Timer);
        assert_eq!(EventType::DisplayDisconnected.category(), EventCategory::Display);
    }
}
