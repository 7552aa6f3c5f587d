//! Native event record layout.
//!
//! `#[repr(C)]` mirrors of the Allegro 5 `ALLEGRO_EVENT` union and the handle types
//! it points at. Nothing here owns anything; higher-level lifetime rules live in
//! [`Event`](crate::event::Event) and [`Handle`](crate::handle::Handle).
//!
//! ## Conventions
//! - Every member starts with the common header `{ type, source, timestamp }`, so
//!   [`RawAnyEvent`] can always be read regardless of the tag.
//! - C `bool` fields are mirrored as `u8`. Reading a member that does not match the
//!   tag reinterprets whatever bytes are stored, and a `u8` has no invalid values.
//! - Records built on the Rust side start from [`RawEvent::default`] (all bytes zero),
//!   so every byte of the union is initialised before any member is read.
//!
//! ## User event descriptors
//! A user event may carry a [`UserEventDescriptor`]: a destructor plus a reference
//! count shared by every copy of the event. [`ref_user_event`] and
//! [`unref_user_event`] implement the native counting protocol; the last release runs
//! the destructor and frees the descriptor.

use core::ffi::{c_int, c_uint};
use core::marker::{PhantomData, PhantomPinned};
use std::sync::atomic::{AtomicI32, Ordering};

macro_rules! opaque_native {
    ($($(#[$doc:meta])* $name:ident;)*) => {
        $(
            $(#[$doc])*
            #[repr(C)]
            pub struct $name {
                _data: [u8; 0],
                _marker: PhantomData<(*mut u8, PhantomPinned)>,
            }
        )*
    };
}

opaque_native! {
    /// `ALLEGRO_EVENT_SOURCE`.
    AllegroEventSource;
    /// `ALLEGRO_DISPLAY`.
    AllegroDisplay;
    /// `ALLEGRO_JOYSTICK`.
    AllegroJoystick;
    /// `ALLEGRO_KEYBOARD`.
    AllegroKeyboard;
    /// `ALLEGRO_MOUSE`.
    AllegroMouse;
    /// `ALLEGRO_TIMER`.
    AllegroTimer;
}

/// `ALLEGRO_EVENT_TYPE`.
pub type EventTypeId = c_uint;

/// Destructor attached to a user event payload; runs when the last reference goes away.
pub type UserEventDtor = unsafe extern "C" fn(event: *mut RawUserEvent);

/// `ALLEGRO_ANY_EVENT`: the header shared by every member.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct RawAnyEvent {
    pub type_: EventTypeId,
    pub source: *mut AllegroEventSource,
    pub timestamp: f64,
}

/// `ALLEGRO_DISPLAY_EVENT`.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct RawDisplayEvent {
    pub type_: EventTypeId,
    pub source: *mut AllegroDisplay,
    pub timestamp: f64,
    pub x: c_int,
    pub y: c_int,
    pub width: c_int,
    pub height: c_int,
    pub orientation: c_int,
}

/// `ALLEGRO_JOYSTICK_EVENT`.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct RawJoystickEvent {
    pub type_: EventTypeId,
    pub source: *mut AllegroJoystick,
    pub timestamp: f64,
    pub id: *mut AllegroJoystick,
    pub stick: c_int,
    pub axis: c_int,
    pub pos: f32,
    pub button: c_int,
}

/// `ALLEGRO_KEYBOARD_EVENT`.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct RawKeyboardEvent {
    pub type_: EventTypeId,
    pub source: *mut AllegroKeyboard,
    pub timestamp: f64,
    pub display: *mut AllegroDisplay,
    pub keycode: c_int,
    pub unichar: c_int,
    pub modifiers: c_uint,
    /// C `bool`.
    pub repeat: u8,
}

/// `ALLEGRO_MOUSE_EVENT`.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct RawMouseEvent {
    pub type_: EventTypeId,
    pub source: *mut AllegroMouse,
    pub timestamp: f64,
    pub display: *mut AllegroDisplay,
    pub x: c_int,
    pub y: c_int,
    pub z: c_int,
    pub w: c_int,
    pub dx: c_int,
    pub dy: c_int,
    pub dz: c_int,
    pub dw: c_int,
    pub button: c_uint,
    pub pressure: f32,
}

/// `ALLEGRO_TIMER_EVENT`.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct RawTimerEvent {
    pub type_: EventTypeId,
    pub source: *mut AllegroTimer,
    pub timestamp: f64,
    pub count: i64,
    pub error: f64,
}

/// `ALLEGRO_USER_EVENT`.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct RawUserEvent {
    pub type_: EventTypeId,
    pub source: *mut AllegroEventSource,
    pub timestamp: f64,
    /// `__internal__descr`; null when the event carries no payload destructor.
    pub descr: *mut UserEventDescriptor,
    pub data1: isize,
    pub data2: isize,
    pub data3: isize,
    pub data4: isize,
}

/// `ALLEGRO_EVENT`.
///
/// Plain data: copying a `RawEvent` does not touch the user-event reference count.
/// Use [`Event`](crate::event::Event) to get the counting right.
#[derive(Clone, Copy)]
#[repr(C)]
pub union RawEvent {
    pub type_: EventTypeId,
    pub any: RawAnyEvent,
    pub display: RawDisplayEvent,
    pub joystick: RawJoystickEvent,
    pub keyboard: RawKeyboardEvent,
    pub mouse: RawMouseEvent,
    pub timer: RawTimerEvent,
    pub user: RawUserEvent,
}

impl Default for RawEvent {
    fn default() -> Self {
        // SAFETY: every member is integers, floats, and nullable pointers; all-zero is valid.
        unsafe { core::mem::zeroed() }
    }
}

impl core::fmt::Debug for RawEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // SAFETY: the header is common to every member.
        let any = unsafe { self.any };
        f.debug_struct("RawEvent")
            .field("type", &any.type_)
            .field("source", &any.source)
            .field("timestamp", &any.timestamp)
            .finish_non_exhaustive()
    }
}

// Builders for records produced on the Rust side (tests, user event emitters).
// Each one starts from a zeroed union and writes member fields in place so the
// padding of the other members stays initialised.
impl RawEvent {
    /// Record with only the common header filled in.
    pub fn with_header(type_: EventTypeId, source: *mut AllegroEventSource, timestamp: f64) -> Self {
        let mut raw = Self::default();
        // SAFETY: in-place writes of plain fields.
        unsafe {
            raw.any.type_ = type_;
            raw.any.source = source;
            raw.any.timestamp = timestamp;
        }
        raw
    }

    /// Display event (`ALLEGRO_EVENT_DISPLAY_*`).
    #[allow(clippy::too_many_arguments)]
    pub fn display(
        type_: EventTypeId,
        source: *mut AllegroDisplay,
        timestamp: f64,
        x: c_int,
        y: c_int,
        width: c_int,
        height: c_int,
        orientation: c_int,
    ) -> Self {
        let mut raw = Self::with_header(type_, source.cast(), timestamp);
        // SAFETY: in-place writes of plain fields.
        unsafe {
            raw.display.x = x;
            raw.display.y = y;
            raw.display.width = width;
            raw.display.height = height;
            raw.display.orientation = orientation;
        }
        raw
    }

    /// Joystick event (`ALLEGRO_EVENT_JOYSTICK_*`).
    #[allow(clippy::too_many_arguments)]
    pub fn joystick(
        type_: EventTypeId,
        source: *mut AllegroJoystick,
        timestamp: f64,
        id: *mut AllegroJoystick,
        stick: c_int,
        axis: c_int,
        pos: f32,
        button: c_int,
    ) -> Self {
        let mut raw = Self::with_header(type_, source.cast(), timestamp);
        // SAFETY: in-place writes of plain fields.
        unsafe {
            raw.joystick.id = id;
            raw.joystick.stick = stick;
            raw.joystick.axis = axis;
            raw.joystick.pos = pos;
            raw.joystick.button = button;
        }
        raw
    }

    /// Keyboard event (`ALLEGRO_EVENT_KEY_*`).
    #[allow(clippy::too_many_arguments)]
    pub fn keyboard(
        type_: EventTypeId,
        source: *mut AllegroKeyboard,
        timestamp: f64,
        display: *mut AllegroDisplay,
        keycode: c_int,
        unichar: c_int,
        modifiers: c_uint,
        repeat: bool,
    ) -> Self {
        let mut raw = Self::with_header(type_, source.cast(), timestamp);
        // SAFETY: in-place writes of plain fields.
        unsafe {
            raw.keyboard.display = display;
            raw.keyboard.keycode = keycode;
            raw.keyboard.unichar = unichar;
            raw.keyboard.modifiers = modifiers;
            raw.keyboard.repeat = u8::from(repeat);
        }
        raw
    }

    /// Mouse event (`ALLEGRO_EVENT_MOUSE_*`). Positions and deltas are `[x, y, z, w]`.
    #[allow(clippy::too_many_arguments)]
    pub fn mouse(
        type_: EventTypeId,
        source: *mut AllegroMouse,
        timestamp: f64,
        display: *mut AllegroDisplay,
        pos: [c_int; 4],
        delta: [c_int; 4],
        button: c_uint,
        pressure: f32,
    ) -> Self {
        let mut raw = Self::with_header(type_, source.cast(), timestamp);
        // SAFETY: in-place writes of plain fields.
        unsafe {
            raw.mouse.display = display;
            raw.mouse.x = pos[0];
            raw.mouse.y = pos[1];
            raw.mouse.z = pos[2];
            raw.mouse.w = pos[3];
            raw.mouse.dx = delta[0];
            raw.mouse.dy = delta[1];
            raw.mouse.dz = delta[2];
            raw.mouse.dw = delta[3];
            raw.mouse.button = button;
            raw.mouse.pressure = pressure;
        }
        raw
    }

    /// Timer tick (`ALLEGRO_EVENT_TIMER`).
    pub fn timer(source: *mut AllegroTimer, timestamp: f64, count: i64, error: f64) -> Self {
        let mut raw = Self::with_header(crate::event_type::TIMER, source.cast(), timestamp);
        // SAFETY: in-place writes of plain fields.
        unsafe {
            raw.timer.count = count;
            raw.timer.error = error;
        }
        raw
    }

    /// User event. `descr` may be null (no payload destructor); otherwise the record
    /// carries one of the descriptor's references.
    pub fn user(
        type_: EventTypeId,
        source: *mut AllegroEventSource,
        timestamp: f64,
        descr: *mut UserEventDescriptor,
        data: [isize; 4],
    ) -> Self {
        let mut raw = Self::with_header(type_, source, timestamp);
        // SAFETY: in-place writes of plain fields.
        unsafe {
            raw.user.descr = descr;
            raw.user.data1 = data[0];
            raw.user.data2 = data[1];
            raw.user.data3 = data[2];
            raw.user.data4 = data[3];
        }
        raw
    }

    /// The tag; valid for every member.
    #[inline]
    pub fn type_id(&self) -> EventTypeId {
        // SAFETY: `type` is the first field of every member.
        unsafe { self.type_ }
    }
}

/// `ALLEGRO_USER_EVENT_DESCRIPTOR`: shared by every copy of one emitted user event.
#[repr(C)]
#[derive(Debug)]
pub struct UserEventDescriptor {
    pub dtor: Option<UserEventDtor>,
    pub refcount: AtomicI32,
}

impl UserEventDescriptor {
    /// Heap-allocate a descriptor holding `refs` references.
    ///
    /// The returned pointer is released through [`unref_user_event`]; the last release
    /// frees it.
    pub fn allocate(dtor: Option<UserEventDtor>, refs: i32) -> *mut UserEventDescriptor {
        Box::into_raw(Box::new(UserEventDescriptor {
            dtor,
            refcount: AtomicI32::new(refs),
        }))
    }
}

/// Acquire one more reference on the event's payload. No-op without a descriptor.
///
/// # Safety
/// `event` must point to a valid user event whose descriptor (if any) is live.
pub unsafe extern "C" fn ref_user_event(event: *mut RawUserEvent) {
    let descr = (*event).descr;
    if descr.is_null() {
        return;
    }
    let prev = (*descr).refcount.fetch_add(1, Ordering::Relaxed);

    #[cfg(feature = "debug-log")]
    tracing::trace!(descr = ?descr, refcount = prev + 1, "user event ref");
    #[cfg(not(feature = "debug-log"))]
    let _ = prev;
}

/// Release one reference on the event's payload. No-op without a descriptor.
///
/// The release that brings the count to zero runs the destructor with `event` and
/// frees the descriptor.
///
/// # Safety
/// `event` must point to a valid user event holding a reference it has not yet
/// released. The descriptor must come from [`UserEventDescriptor::allocate`].
pub unsafe extern "C" fn unref_user_event(event: *mut RawUserEvent) {
    let descr = (*event).descr;
    if descr.is_null() {
        return;
    }

    let prev = (*descr).refcount.fetch_sub(1, Ordering::AcqRel);
    debug_assert!(prev > 0, "user event descriptor over-released");

    #[cfg(feature = "debug-log")]
    tracing::trace!(descr = ?descr, refcount = prev - 1, "user event unref");

    if prev == 1 {
        let descr = Box::from_raw(descr);
        if let Some(dtor) = descr.dtor {
            tracing::trace!(type_id = (*event).type_, "running user event destructor");
            dtor(event);
        }
    }
}
