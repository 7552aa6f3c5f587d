//! Crate error type.
//!
//! Accessors on [`Event`](crate::event::Event) never fail; only process-wide
//! configuration can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// [`hooks::install`](crate::hooks::install) was called after hooks were already set
    /// (either installed explicitly or fixed to the defaults by first use).
    #[error("native hooks already installed for this process")]
    HooksAlreadyInstalled,
}

pub type Result<T> = std::result::Result<T, Error>;
