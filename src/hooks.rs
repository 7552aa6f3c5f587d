//! Process-wide native hooks.
//!
//! The wrapper never calls into the native library directly. Instead it goes through
//! a [`NativeHooks`] table, fixed once per process:
//!
//! - **user event references**: acquire/release one reference on a user event payload.
//!   The defaults implement the descriptor protocol from [`ffi`](crate::ffi).
//! - **destroy functions**: called when an *owned* [`Handle`](crate::handle::Handle) is
//!   dropped. The defaults have none; owned handles then leak their object and log a
//!   warning.
//!
//! Applications linked against the native library install its functions at startup:
//!
//! ```ignore
//! use alx_event::ffi::{AllegroDisplay, RawUserEvent};
//! use alx_event::hooks::{self, NativeHooks};
//!
//! extern "C" {
//!     fn al_unref_user_event(event: *mut RawUserEvent);
//!     fn al_destroy_display(display: *mut AllegroDisplay);
//! }
//!
//! // Takes the native library's refcount lock and increments `descr->refcount`;
//! // the library itself exports no such function.
//! unsafe extern "C" fn app_ref_user_event(event: *mut RawUserEvent) {
//!     /* ... */
//! }
//!
//! hooks::install(NativeHooks {
//!     ref_user_event: app_ref_user_event,
//!     unref_user_event: al_unref_user_event,
//!     destroy_display: Some(al_destroy_display),
//!     ..NativeHooks::default()
//! })
//! .expect("hooks installed once at startup");
//! ```
//!
//! The table is fixed by the first [`install`] or the first [`current`] call,
//! whichever comes first.

use crate::error::{Error, Result};
use crate::ffi::{
    self, AllegroDisplay, AllegroEventSource, AllegroJoystick, AllegroTimer, RawUserEvent,
};
use std::sync::OnceLock;

/// Function table used for reference counting and destruction.
///
/// `ref_user_event` and `unref_user_event` must agree on how the descriptor count is
/// synchronised. The defaults update it atomically; the native `al_unref_user_event`
/// guards it with a mutex instead, and the native library exports no ref function.
/// Installing the native unref therefore requires a matching `ref_user_event` that
/// takes the same lock.
#[derive(Clone, Copy, Debug)]
pub struct NativeHooks {
    /// Acquire one reference; called by [`Event::clone`](crate::event::Event) on user events.
    pub ref_user_event: unsafe extern "C" fn(*mut RawUserEvent),
    /// Release one reference; called when a user [`Event`](crate::event::Event) drops.
    pub unref_user_event: unsafe extern "C" fn(*mut RawUserEvent),
    pub destroy_event_source: Option<unsafe extern "C" fn(*mut AllegroEventSource)>,
    pub destroy_display: Option<unsafe extern "C" fn(*mut AllegroDisplay)>,
    pub destroy_joystick: Option<unsafe extern "C" fn(*mut AllegroJoystick)>,
    pub destroy_timer: Option<unsafe extern "C" fn(*mut AllegroTimer)>,
}

impl Default for NativeHooks {
    fn default() -> Self {
        Self {
            ref_user_event: ffi::ref_user_event,
            unref_user_event: ffi::unref_user_event,
            destroy_event_source: None,
            destroy_display: None,
            destroy_joystick: None,
            destroy_timer: None,
        }
    }
}

static HOOKS: OnceLock<NativeHooks> = OnceLock::new();

/// Install the hook table for this process.
///
/// Fails with [`Error::HooksAlreadyInstalled`] if a table is already in effect.
pub fn install(hooks: NativeHooks) -> Result<()> {
    HOOKS
        .set(hooks)
        .map_err(|_| Error::HooksAlreadyInstalled)?;
    tracing::debug!(
        destroy_event_source = hooks.destroy_event_source.is_some(),
        destroy_display = hooks.destroy_display.is_some(),
        destroy_joystick = hooks.destroy_joystick.is_some(),
        destroy_timer = hooks.destroy_timer.is_some(),
        "native hooks installed"
    );
    Ok(())
}

/// The active table; falls back to (and fixes) [`NativeHooks::default`].
#[inline]
pub fn current() -> &'static NativeHooks {
    HOOKS.get_or_init(NativeHooks::default)
}
