use signage_model::MediaItem;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The rotation has no items; render the idle state and do not advance.
    #[error("playlist has no media items")]
    EmptyPlaylist,
}

/// Identifies one configuration of a cursor. Bumped by every `init`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Idle,
    Playing { index: usize },
}

/// Tracks the active item of a cyclic, ordered rotation.
///
/// Invariant: `index < items.len()` whenever `items` is non-empty. An empty
/// cursor is idle and cannot be read or advanced.
#[derive(Debug, Clone, Default)]
pub struct PlaybackCursor {
    items: Vec<MediaItem>,
    index: usize,
    generation: Generation,
}

impl PlaybackCursor {
    pub fn new(items: Vec<MediaItem>) -> Self {
        let mut cursor = Self::default();
        cursor.init(items);
        cursor
    }

    /// Replace the rotation and restart at the first item.
    ///
    /// The index is reset rather than clamped; the new list may be unrelated
    /// to the old one. Any advancement scheduled against the previous
    /// generation becomes stale.
    pub fn init(&mut self, items: Vec<MediaItem>) -> Generation {
        self.items = items;
        self.index = 0;
        self.generation = Generation(self.generation.0.wrapping_add(1));
        self.generation
    }

    pub fn is_idle(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> CursorState {
        if self.is_idle() {
            CursorState::Idle
        } else {
            CursorState::Playing { index: self.index }
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        match self.state() {
            CursorState::Idle => None,
            CursorState::Playing { index } => Some(index),
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn current(&self) -> Result<&MediaItem, PlaybackError> {
        self.items.get(self.index).ok_or(PlaybackError::EmptyPlaylist)
    }

    /// Step to the next item, wrapping to the first after the last.
    pub fn advance(&mut self) -> Result<&MediaItem, PlaybackError> {
        if self.items.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }
        self.index = (self.index + 1) % self.items.len();
        Ok(&self.items[self.index])
    }

    /// Advance only if `generation` still identifies the current rotation.
    /// Returns `None` for stale requests and for an idle cursor.
    pub fn advance_for(&mut self, generation: Generation) -> Option<&MediaItem> {
        if generation != self.generation {
            tracing::debug!(
                stale = generation.0,
                current = self.generation.0,
                "ignoring advancement for replaced rotation"
            );
            return None;
        }
        self.advance().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signage_model::{DisplayDuration, MediaId, MediaKind};

    fn item(name: &str, kind: MediaKind, secs: f64) -> MediaItem {
        MediaItem {
            id: MediaId::new(),
            name: name.to_string(),
            media_type: kind,
            file_path: format!("/uploads/{name}"),
            duration: DisplayDuration::from(secs),
        }
    }

    fn images(count: usize) -> Vec<MediaItem> {
        (0..count)
            .map(|n| item(&format!("img-{n}"), MediaKind::Image, 3.0))
            .collect()
    }

    #[test]
    fn two_images_alternate_and_wrap() {
        let a = item("A", MediaKind::Image, 3.0);
        let b = item("B", MediaKind::Image, 4.0);
        let mut cursor = PlaybackCursor::new(vec![a.clone(), b.clone()]);

        assert_eq!(cursor.current().unwrap(), &a);
        assert_eq!(cursor.advance().unwrap(), &b);
        assert_eq!(cursor.current().unwrap(), &b);
        assert_eq!(cursor.advance().unwrap(), &a);
        assert_eq!(cursor.index(), Some(0));
    }

    #[test]
    fn advancing_len_times_returns_to_start() {
        for len in 1..=7 {
            let mut cursor = PlaybackCursor::new(images(len));
            for start in 0..len {
                while cursor.index() != Some(start) {
                    cursor.advance().unwrap();
                }
                for _ in 0..len {
                    cursor.advance().unwrap();
                }
                assert_eq!(cursor.index(), Some(start), "len {len}, start {start}");
            }
        }
    }

    #[test]
    fn empty_cursor_is_idle() {
        let mut cursor = PlaybackCursor::new(Vec::new());
        assert!(cursor.is_idle());
        assert_eq!(cursor.state(), CursorState::Idle);
        assert_eq!(cursor.current(), Err(PlaybackError::EmptyPlaylist));
        assert_eq!(cursor.advance(), Err(PlaybackError::EmptyPlaylist));
        assert_eq!(cursor.index(), None);
    }

    #[test]
    fn reinit_resets_instead_of_clamping() {
        let mut cursor = PlaybackCursor::new(images(6));
        for _ in 0..4 {
            cursor.advance().unwrap();
        }
        assert_eq!(cursor.index(), Some(4));

        let replacement = images(2);
        cursor.init(replacement.clone());
        assert_eq!(cursor.index(), Some(0));
        assert_eq!(cursor.current().unwrap(), &replacement[0]);
    }

    #[test]
    fn init_moves_between_idle_and_playing() {
        let mut cursor = PlaybackCursor::default();
        assert_eq!(cursor.state(), CursorState::Idle);

        cursor.init(images(3));
        assert_eq!(cursor.state(), CursorState::Playing { index: 0 });

        cursor.init(Vec::new());
        assert_eq!(cursor.state(), CursorState::Idle);
    }

    #[test]
    fn stale_generation_cannot_advance() {
        let mut cursor = PlaybackCursor::new(images(3));
        let old = cursor.generation();

        let fresh = cursor.init(images(3));
        assert_ne!(old, fresh);

        assert!(cursor.advance_for(old).is_none());
        assert_eq!(cursor.index(), Some(0));

        assert!(cursor.advance_for(fresh).is_some());
        assert_eq!(cursor.index(), Some(1));
    }
}
