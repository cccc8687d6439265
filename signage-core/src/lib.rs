//! Core library for the hospital signage platform.
#![allow(missing_docs)]

/// Authentication primitives: password hashing and bearer tokens
#[cfg(feature = "auth")]
#[cfg_attr(docsrs, doc(cfg(feature = "auth")))]
pub mod auth;

/// Repository ports plus their Postgres and in-memory adapters
pub mod database;

/// Error types and error handling utilities
pub mod error;

/// Playlist rotation state machine
pub mod playback;

/// Screen -> playlist -> media resolution
pub mod resolver;

/// Upload persistence on the local filesystem
pub mod storage;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use error::{Result, SignageError};
pub use playback::{AdvanceTrigger, CursorState, Generation, PlaybackCursor, PlaybackError};
pub use resolver::{ResolveError, ScreenConfigResolver};
