//! Playlist rotation: which item a screen shows and what moves it along.

pub mod cursor;
pub mod trigger;

pub use cursor::{CursorState, Generation, PlaybackCursor, PlaybackError};
pub use trigger::AdvanceTrigger;
