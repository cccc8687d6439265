use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::Result;

/// URL prefix under which stored files are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Writes uploaded bytes into a flat directory served as `/uploads`.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Store `bytes` under a fresh `{millis}-{random}{.ext}` name. The
    /// extension comes from the caller's classification of the content, never
    /// from the client's file name. Returns the public path.
    pub async fn save(&self, extension: Option<&str>, bytes: &[u8]) -> Result<String> {
        self.ensure_root().await?;
        let file_name = unique_file_name(extension);
        fs::write(self.root.join(&file_name), bytes).await?;
        debug!(file = %file_name, size = bytes.len(), "stored upload");
        Ok(format!("{UPLOADS_PREFIX}/{file_name}"))
    }

    /// Delete the file behind a public path. Missing files and paths outside
    /// the store are logged and skipped.
    pub async fn remove(&self, public_path: &str) {
        let Some(file_name) = Path::new(public_path).file_name() else {
            warn!(path = public_path, "cannot derive file name for removal");
            return;
        };
        let target = self.root.join(file_name);
        match fs::remove_file(&target).await {
            Ok(()) => debug!(path = %target.display(), "removed stored file"),
            Err(e) => warn!(path = %target.display(), error = %e, "failed to remove stored file"),
        }
    }
}

fn unique_file_name(extension: Option<&str>) -> String {
    let millis = Utc::now().timestamp_millis();
    let random: u32 = rand::rng().random_range(0..1_000_000_000);
    let ext = extension
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{millis}-{random}{ext}")
}
