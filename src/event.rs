//! Value-based wrapper around the native event record.
//!
//! [`Event`] owns one copy of a [`RawEvent`] and exposes its fields through
//! accessors named after the union member they read.
//!
//! ## Accessors are unchecked
//! `display_x()` on a timer event returns whatever bits the timer member left in that
//! slot. Nothing is validated against the tag: the accessors mirror the raw layout.
//! Use [`Event::kind`] for a view that only reads the member the tag selects.
//!
//! ## User event references
//! A user event (tag in the user range, see
//! [`is_user_event_type`](crate::event_type::is_user_event_type)) carries a reference
//! on a shared payload:
//! - [`Event::from_raw`] adopts the one reference the record was delivered with. It is
//!   `unsafe`: the caller vouches that the record really holds that reference.
//! - [`Event::from_builtin`] is the safe constructor; it refuses user events.
//! - [`Clone`] acquires another reference.
//! - [`Drop`] releases exactly one.
//! - [`Event::into_raw`] hands the reference back to the caller unreleased.
//!
//! Built-in events carry no reference and none of the above touches the count.
//!
//! ## Handles
//! `source()`, `display()`, `joystick()`, `timer()` and friends return non-owning
//! [`Handle`](crate::handle::Handle)s. They do not keep the native object alive.
//!
//! # Example
//! ```
//! use alx_event::{Event, RawEvent};
//!
//! let ev = Event::from_builtin(RawEvent::timer(std::ptr::null_mut(), 1.5, 42, 0.5)).unwrap();
//! assert_eq!(ev.timer_count(), 42);
//! assert_eq!(ev.timer_error(), 0.5);
//! assert!(!ev.is_user_event());
//! ```
//!
//! Adopting a record is `unsafe`:
//! ```compile_fail,E0133
//! use alx_event::{Event, RawEvent};
//!
//! let _ = Event::from_raw(RawEvent::default());
//! ```
//!
//! and there is no safe conversion from a raw record:
//! ```compile_fail,E0277
//! use alx_event::{Event, RawEvent};
//!
//! let _: Event = RawEvent::default().into();
//! ```

use crate::event_type::{is_user_event_type, EventType};
use crate::ffi::{EventTypeId, RawEvent, RawUserEvent};
use crate::handle::{Display, EventSource, Joystick, Timer};
use crate::hooks;
use crate::kind::EventKind;
use core::fmt;
use core::mem::ManuallyDrop;

/// One event record, held by value.
#[derive(Default)]
pub struct Event {
    raw: RawEvent,
}

// SAFETY: the record is plain data; the user-event count is updated through the
// hooks, which are atomic by default and required to be thread-safe when installed.
unsafe impl Send for Event {}

#[deny(missing_docs)]
impl Event {
    /// Empty event: every field zero, tag [`NONE`](crate::event_type::NONE).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `raw` into a new event, adopting its user-event reference.
    ///
    /// For a user event, the event takes over the reference the record carries and
    /// releases it on drop.
    ///
    /// # Safety
    /// If the tag is in the user range, `raw` must hold one unreleased reference on a
    /// live payload descriptor (or a null descriptor), and that reference must not be
    /// adopted by anything else. Adopting the same record twice over-releases it.
    #[inline]
    pub unsafe fn from_raw(raw: RawEvent) -> Self {
        Self { raw }
    }

    /// Copy a built-in (or empty) record. Returns `None` for user events, which need
    /// [`from_raw`](Self::from_raw).
    #[inline]
    pub fn from_builtin(raw: RawEvent) -> Option<Self> {
        if is_user_event_type(raw.type_id()) {
            return None;
        }
        Some(Self { raw })
    }

    /// The wrapped record.
    #[inline]
    pub fn as_raw(&self) -> &RawEvent {
        &self.raw
    }

    /// Return the record without releasing its user-event reference (if any).
    #[inline]
    pub fn into_raw(self) -> RawEvent {
        ManuallyDrop::new(self).raw
    }

    /// `true` if the tag is in the user range.
    #[inline]
    pub fn is_user_event(&self) -> bool {
        is_user_event_type(self.event_type())
    }

    /// Raw tag.
    #[inline]
    pub fn event_type(&self) -> EventTypeId {
        self.raw.type_id()
    }

    /// The tag as a known built-in type, if it is one.
    #[inline]
    pub fn builtin_type(&self) -> Option<EventType> {
        EventType::from_raw(self.event_type())
    }

    /// Decoded view reading only the member selected by the tag.
    pub fn kind(&self) -> EventKind {
        EventKind::decode(&self.raw)
    }

    fn user_ptr(&mut self) -> *mut RawUserEvent {
        // Every member of a `repr(C)` union sits at offset 0.
        (&mut self.raw as *mut RawEvent).cast()
    }

    // Reads below go through union members. Every member is plain data and the
    // record is fully initialised, so any member can be read; only its meaning
    // depends on the tag.

    /// Source that emitted the event.
    pub fn source(&self) -> EventSource {
        EventSource::borrowed(unsafe { self.raw.any.source })
    }

    /// Seconds since the native library was initialised.
    pub fn timestamp(&self) -> f64 {
        unsafe { self.raw.any.timestamp }
    }

    /// Display that generated the event.
    pub fn display(&self) -> Display {
        Display::borrowed(unsafe { self.raw.display.source })
    }

    /// Left edge of the exposed area (expose events) or window position.
    pub fn display_x(&self) -> i32 {
        unsafe { self.raw.display.x }
    }

    /// Top edge of the exposed area (expose events) or window position.
    pub fn display_y(&self) -> i32 {
        unsafe { self.raw.display.y }
    }

    /// New or exposed width.
    pub fn display_width(&self) -> i32 {
        unsafe { self.raw.display.width }
    }

    /// New or exposed height.
    pub fn display_height(&self) -> i32 {
        unsafe { self.raw.display.height }
    }

    /// Orientation after a `DISPLAY_ORIENTATION` event.
    pub fn display_orientation(&self) -> i32 {
        unsafe { self.raw.display.orientation }
    }

    /// The joystick that generated the event (the event source).
    pub fn joystick(&self) -> Joystick {
        Joystick::borrowed(unsafe { self.raw.joystick.source })
    }

    /// The joystick named by the event's `id` field.
    ///
    /// Usually the same object as [`joystick`](Self::joystick); configuration events
    /// may differ.
    pub fn joystick_id(&self) -> Joystick {
        Joystick::borrowed(unsafe { self.raw.joystick.id })
    }

    /// Stick index for axis events.
    pub fn joystick_stick(&self) -> i32 {
        unsafe { self.raw.joystick.stick }
    }

    /// Axis index within the stick.
    pub fn joystick_axis(&self) -> i32 {
        unsafe { self.raw.joystick.axis }
    }

    /// Axis position, normally in `[-1.0, 1.0]`.
    pub fn joystick_pos(&self) -> f32 {
        unsafe { self.raw.joystick.pos }
    }

    /// Button index for button events.
    pub fn joystick_button(&self) -> i32 {
        unsafe { self.raw.joystick.button }
    }

    /// Display that had keyboard focus.
    pub fn keyboard_display(&self) -> Display {
        Display::borrowed(unsafe { self.raw.keyboard.display })
    }

    /// Physical key code.
    pub fn keyboard_keycode(&self) -> i32 {
        unsafe { self.raw.keyboard.keycode }
    }

    /// Unicode code point for `KEY_CHAR` events.
    pub fn keyboard_character(&self) -> i32 {
        unsafe { self.raw.keyboard.unichar }
    }

    /// Modifier key bit flags.
    pub fn keyboard_modifiers(&self) -> u32 {
        unsafe { self.raw.keyboard.modifiers }
    }

    /// `true` for auto-repeated `KEY_CHAR` events.
    pub fn keyboard_repeat(&self) -> bool {
        unsafe { self.raw.keyboard.repeat != 0 }
    }

    /// Display the mouse was over.
    pub fn mouse_display(&self) -> Display {
        Display::borrowed(unsafe { self.raw.mouse.display })
    }

    /// Cursor x position.
    pub fn mouse_x(&self) -> i32 {
        unsafe { self.raw.mouse.x }
    }

    /// Cursor y position.
    pub fn mouse_y(&self) -> i32 {
        unsafe { self.raw.mouse.y }
    }

    /// Vertical wheel position.
    pub fn mouse_z(&self) -> i32 {
        unsafe { self.raw.mouse.z }
    }

    /// Horizontal wheel position.
    pub fn mouse_w(&self) -> i32 {
        unsafe { self.raw.mouse.w }
    }

    /// Change in x since the previous mouse event.
    pub fn mouse_dx(&self) -> i32 {
        unsafe { self.raw.mouse.dx }
    }

    /// Change in y since the previous mouse event.
    pub fn mouse_dy(&self) -> i32 {
        unsafe { self.raw.mouse.dy }
    }

    /// Change in vertical wheel position.
    pub fn mouse_dz(&self) -> i32 {
        unsafe { self.raw.mouse.dz }
    }

    /// Change in horizontal wheel position.
    pub fn mouse_dw(&self) -> i32 {
        unsafe { self.raw.mouse.dw }
    }

    /// Button number for button-down/up events (1 = left).
    pub fn mouse_button(&self) -> u32 {
        unsafe { self.raw.mouse.button }
    }

    /// Pen or touch pressure, `0.0..=1.0`.
    pub fn mouse_pressure(&self) -> f32 {
        unsafe { self.raw.mouse.pressure }
    }

    /// Timer that ticked.
    pub fn timer(&self) -> Timer {
        Timer::borrowed(unsafe { self.raw.timer.source })
    }

    /// Tick count of the timer.
    pub fn timer_count(&self) -> i64 {
        unsafe { self.raw.timer.count }
    }

    /// How late the tick was delivered, in seconds.
    pub fn timer_error(&self) -> f64 {
        unsafe { self.raw.timer.error }
    }

    /// First application-defined data word.
    pub fn user_data1(&self) -> isize {
        unsafe { self.raw.user.data1 }
    }

    /// Second application-defined data word.
    pub fn user_data2(&self) -> isize {
        unsafe { self.raw.user.data2 }
    }

    /// Third application-defined data word.
    pub fn user_data3(&self) -> isize {
        unsafe { self.raw.user.data3 }
    }

    /// Fourth application-defined data word.
    pub fn user_data4(&self) -> isize {
        unsafe { self.raw.user.data4 }
    }
}

impl Clone for Event {
    fn clone(&self) -> Self {
        let mut copy = Self { raw: self.raw };
        if copy.is_user_event() {
            tracing::trace!(type_id = copy.event_type(), "acquiring user event reference");
            // SAFETY: `self` still holds its reference, so the payload is live.
            unsafe { (hooks::current().ref_user_event)(copy.user_ptr()) };
        }
        copy
    }
}

impl Drop for Event {
    fn drop(&mut self) {
        if !self.is_user_event() {
            return;
        }
        tracing::trace!(type_id = self.event_type(), "releasing user event reference");
        // SAFETY: this copy holds exactly one unreleased reference.
        unsafe { (hooks::current().unref_user_event)(self.user_ptr()) };
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Event");
        match self.builtin_type() {
            Some(ty) => s.field("type", &ty),
            None => s.field("type", &self.event_type()),
        };
        s.field("user", &self.is_user_event())
            .field("timestamp", &self.timestamp())
            .finish()
    }
}
