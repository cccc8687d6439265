use async_trait::async_trait;

use signage_model::{Media, MediaId};

use crate::error::Result;

// Uploaded media catalogue
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// All media, newest first.
    async fn list_media(&self) -> Result<Vec<Media>>;
    async fn get_media(&self, id: MediaId) -> Result<Option<Media>>;
    async fn insert_media(&self, media: &Media) -> Result<()>;

    /// Remove the row and every playlist slot that references it. Returns
    /// the removed row so the caller can clean up the stored file.
    async fn delete_media(&self, id: MediaId) -> Result<Option<Media>>;
}
