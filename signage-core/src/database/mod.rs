pub mod memory;
pub mod ports;

#[cfg(feature = "database")]
#[cfg_attr(docsrs, doc(cfg(feature = "database")))]
pub mod postgres;

use std::fmt;
use std::sync::Arc;

use ports::{
    AssignmentRepository, MediaRepository, PlaylistRepository, ScreenRepository,
    UserRepository,
};

pub use memory::InMemoryStore;
#[cfg(feature = "database")]
pub use postgres::PostgresDatabase;

/// One handle per port, all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub media: Arc<dyn MediaRepository>,
    pub playlists: Arc<dyn PlaylistRepository>,
    pub screens: Arc<dyn ScreenRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl fmt::Debug for Repositories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }

    #[cfg(feature = "database")]
    pub fn postgres(db: &PostgresDatabase) -> Self {
        Self::from_store(Arc::new(db.clone()))
    }

    fn from_store<S>(store: Arc<S>) -> Self
    where
        S: MediaRepository
            + PlaylistRepository
            + ScreenRepository
            + AssignmentRepository
            + UserRepository
            + 'static,
    {
        Self {
            media: store.clone(),
            playlists: store.clone(),
            screens: store.clone(),
            assignments: store.clone(),
            users: store,
        }
    }
}
