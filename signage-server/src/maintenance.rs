//! One-off data fixes run from the CLI.

use chrono::Utc;
use tracing::info;

use signage_core::{Result, database::ports::ScreenRepository};

/// Give every screen whose name is empty or the legacy placeholder a name
/// derived from its id. Returns how many screens were renamed.
pub async fn backfill_screen_names(screens: &dyn ScreenRepository) -> Result<usize> {
    let mut renamed = 0;
    for listing in screens.list_screens().await? {
        let mut screen = listing.screen;
        if !screen.needs_generated_name() {
            continue;
        }

        let generated = screen.generated_name();
        let previous = std::mem::replace(&mut screen.name, generated);
        screen.updated_at = Utc::now();
        if screens.update_screen(&screen).await? {
            info!(screen_id = %screen.id, from = %previous, to = %screen.name, "renamed screen");
            renamed += 1;
        }
    }
    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use signage_core::database::InMemoryStore;
    use signage_model::{Screen, ScreenId, ScreenStatus, screen::LEGACY_UNNAMED_SCREEN};

    fn screen(name: &str) -> Screen {
        let now = Utc::now();
        Screen {
            id: ScreenId::new(),
            name: name.into(),
            location: None,
            status: ScreenStatus::Active,
            current_playlist: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn renames_only_placeholder_screens() {
        let store = InMemoryStore::new();
        let blank = screen("  ");
        let legacy = screen(LEGACY_UNNAMED_SCREEN);
        let named = screen("Emergency Entrance");
        for s in [&blank, &legacy, &named] {
            store.create_screen(s).await.unwrap();
        }

        assert_eq!(backfill_screen_names(&store).await.unwrap(), 2);

        let blank_after = store.get_screen(blank.id).await.unwrap().unwrap();
        assert_eq!(blank_after.name, blank.generated_name());
        assert!(blank_after.name.starts_with("Screen "));
        let legacy_after = store.get_screen(legacy.id).await.unwrap().unwrap();
        assert_eq!(legacy_after.name, legacy.generated_name());
        assert!(legacy_after.updated_at >= legacy.updated_at);
        let named_after = store.get_screen(named.id).await.unwrap().unwrap();
        assert_eq!(named_after.name, "Emergency Entrance");

        assert_eq!(backfill_screen_names(&store).await.unwrap(), 0);
    }
}
