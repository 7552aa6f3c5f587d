//! alx-event: value-based wrapper around the Allegro 5 event record.
//!
//! [`Event`] holds one `ALLEGRO_EVENT` by value and exposes its fields through
//! accessors. User events are reference counted by the native library; an `Event`
//! releases the reference it owns when dropped.
//!
//! ## Layers
//! - [`ffi`]: `#[repr(C)]` record layout and the user-event descriptor protocol.
//! - [`event_type`]: tag constants and the user/built-in classifier.
//! - [`event`]: the [`Event`] value and its (unchecked) field accessors.
//! - [`kind`]: [`EventKind`], a tag-checked decoded view.
//! - [`handle`]: non-owning/owning handles to displays, joysticks, timers and sources.
//! - [`hooks`]: which native functions release references and destroy objects.
//!
//! ## Feature flags
//! - **`serde`** (default): `Serialize` for [`EventKind`] and [`EventType`].
//! - **`debug-log`**: per-operation reference-count traces from [`ffi`].

pub mod error;
pub mod event;
pub mod event_type;
pub mod ffi;
pub mod handle;
pub mod hooks;
pub mod kind;

pub use error::{Error, Result};
pub use event::*;
pub use event_type::{is_user_event_type, EventCategory, EventType};
pub use ffi::RawEvent;
pub use handle::*;
pub use kind::*;
