use async_trait::async_trait;

use signage_model::{Screen, ScreenId, ScreenListing};

use crate::error::Result;

#[async_trait]
pub trait ScreenRepository: Send + Sync {
    /// All screens, newest first, with the assigned playlist's name.
    async fn list_screens(&self) -> Result<Vec<ScreenListing>>;
    async fn get_screen(&self, id: ScreenId) -> Result<Option<Screen>>;
    async fn create_screen(&self, screen: &Screen) -> Result<()>;

    /// Overwrite every mutable column. Returns `false` when the screen is
    /// unknown; `InvalidInput` when `current_playlist` is dangling.
    async fn update_screen(&self, screen: &Screen) -> Result<bool>;
    async fn delete_screen(&self, id: ScreenId) -> Result<bool>;
}
