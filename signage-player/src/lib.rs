//! # Signage Player
//!
//! Headless runtime for a single screen. A [`poller::ConfigPoller`] fetches
//! the screen's configuration on an interval and publishes playlist changes
//! on a `watch` channel; a [`driver::PlaybackDriver`] owns the rotation
//! cursor and tells a [`sink::MediaSink`] what to put on screen.

pub mod client;
pub mod driver;
pub mod error;
pub mod poller;
pub mod sink;
pub mod urls;

pub use client::{ConfigClient, ConfigSource};
pub use driver::PlaybackDriver;
pub use error::PlayerError;
pub use poller::ConfigPoller;
pub use sink::{ChannelSink, LogSink, MediaSink, SinkEvent, SinkHandle};
pub use urls::resolve_media_url;
