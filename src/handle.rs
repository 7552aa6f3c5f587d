//! Handles to native subsystem objects.
//!
//! A [`Handle`] is a raw pointer plus an ownership flag:
//! - **non-owning** (`owned == false`): a reference only. Dropping it never touches the
//!   native object, and it does not keep that object alive. Every handle returned by an
//!   [`Event`](crate::event::Event) accessor is non-owning.
//! - **owning** (`owned == true`): dropping it destroys the native object through the
//!   destroy hook configured in [`hooks`](crate::hooks). Building one is `unsafe`
//!   ([`Handle::from_raw_owned`], [`Handle::new`]): the caller hands over sole ownership.
//!
//! The native object's lifetime is managed by the native library; a non-owning handle
//! can outlive the object it points at. Treat [`Handle::raw`] as valid only as long as
//! the library says the object is.
//!
//! Owning handles cannot be built from safe code:
//! ```compile_fail,E0133
//! use alx_event::Display;
//!
//! let _ = Display::from_raw_owned(0x10 as *mut _);
//! ```
//!
//! ```compile_fail,E0133
//! use alx_event::Timer;
//!
//! let _ = Timer::new(0x10 as *mut _, true);
//! ```

use crate::ffi::{AllegroDisplay, AllegroEventSource, AllegroJoystick, AllegroTimer};
use crate::hooks::{self, NativeHooks};
use core::fmt;
use core::mem::ManuallyDrop;

/// Native object type a [`Handle`] can point at.
pub trait NativeObject {
    /// Short name used in logs (`"display"`, `"timer"`, ...).
    const KIND: &'static str;

    /// Destroy function for owned handles of this type, if one is configured.
    fn destroy_hook(hooks: &NativeHooks) -> Option<unsafe extern "C" fn(*mut Self)>;
}

impl NativeObject for AllegroEventSource {
    const KIND: &'static str = "event_source";
    fn destroy_hook(hooks: &NativeHooks) -> Option<unsafe extern "C" fn(*mut Self)> {
        hooks.destroy_event_source
    }
}

impl NativeObject for AllegroDisplay {
    const KIND: &'static str = "display";
    fn destroy_hook(hooks: &NativeHooks) -> Option<unsafe extern "C" fn(*mut Self)> {
        hooks.destroy_display
    }
}

impl NativeObject for AllegroJoystick {
    const KIND: &'static str = "joystick";
    fn destroy_hook(hooks: &NativeHooks) -> Option<unsafe extern "C" fn(*mut Self)> {
        hooks.destroy_joystick
    }
}

impl NativeObject for AllegroTimer {
    const KIND: &'static str = "timer";
    fn destroy_hook(hooks: &NativeHooks) -> Option<unsafe extern "C" fn(*mut Self)> {
        hooks.destroy_timer
    }
}

/// Pointer to a native object, owning or not.
pub struct Handle<T: NativeObject> {
    raw: *mut T,
    owned: bool,
}

pub type EventSource = Handle<AllegroEventSource>;
pub type Display = Handle<AllegroDisplay>;
pub type Joystick = Handle<AllegroJoystick>;
pub type Timer = Handle<AllegroTimer>;

impl<T: NativeObject> Handle<T> {
    /// Wrap `raw`. With `owned == false` the handle is a plain reference.
    ///
    /// # Safety
    /// With `owned == true`, the same contract as [`from_raw_owned`](Self::from_raw_owned).
    /// With `owned == false` there is no requirement; prefer [`borrowed`](Self::borrowed).
    #[inline]
    pub unsafe fn new(raw: *mut T, owned: bool) -> Self {
        Self { raw, owned }
    }

    /// Non-owning handle: dropping it never touches `raw`.
    #[inline]
    pub fn borrowed(raw: *mut T) -> Self {
        Self { raw, owned: false }
    }

    /// Owning handle: dropping it destroys `raw` through the configured destroy hook.
    ///
    /// # Safety
    /// `raw` must be null or a live native object that nothing else will destroy, and
    /// it must not be wrapped as owned more than once.
    #[inline]
    pub unsafe fn from_raw_owned(raw: *mut T) -> Self {
        Self { raw, owned: true }
    }

    /// The wrapped pointer.
    #[inline]
    pub fn raw(&self) -> *mut T {
        self.raw
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.raw.is_null()
    }

    /// A non-owning handle to the same object.
    #[inline]
    pub fn as_borrowed(&self) -> Self {
        Self::borrowed(self.raw)
    }

    /// Give up the handle without destroying the object.
    #[inline]
    pub fn into_raw(self) -> *mut T {
        ManuallyDrop::new(self).raw
    }
}

impl<T: NativeObject> Drop for Handle<T> {
    fn drop(&mut self) {
        if !self.owned || self.raw.is_null() {
            return;
        }
        match T::destroy_hook(hooks::current()) {
            // SAFETY: an owned handle is the only owner of `raw`, and this runs once.
            Some(destroy) => unsafe { destroy(self.raw) },
            None => tracing::warn!(
                kind = T::KIND,
                raw = ?self.raw,
                "owned handle dropped without a destroy hook; object leaked"
            ),
        }
    }
}

impl<T: NativeObject> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: NativeObject> Eq for Handle<T> {}

impl<T: NativeObject> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &T::KIND)
            .field("raw", &self.raw)
            .field("owned", &self.owned)
            .finish()
    }
}
