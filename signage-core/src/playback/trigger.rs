use std::time::Duration;

use signage_model::{MediaItem, MediaKind};

/// What moves the rotation past an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceTrigger {
    /// Advance once the item has been displayed for this long.
    Timer(Duration),
    /// Advance when the player reports natural end of playback. The item's
    /// configured duration is not used.
    MediaEnd,
}

impl AdvanceTrigger {
    pub fn for_item(item: &MediaItem) -> Self {
        match item.media_type {
            MediaKind::Image => AdvanceTrigger::Timer(item.duration.as_duration()),
            MediaKind::Video => AdvanceTrigger::MediaEnd,
        }
    }
}
