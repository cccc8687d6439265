use std::{fmt, sync::Arc};

use signage_core::auth::AuthCrypto;
use signage_core::database::Repositories;
use signage_core::storage::MediaStore;
use signage_core::ScreenConfigResolver;

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub resolver: ScreenConfigResolver,
    pub store: Arc<MediaStore>,
    pub auth_crypto: Arc<AuthCrypto>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Arc<Config>, repos: Repositories) -> Self {
        let resolver = ScreenConfigResolver::new(repos.screens.clone(), repos.playlists.clone());
        let store = Arc::new(MediaStore::new(config.storage.uploads_dir.clone()));
        let auth_crypto = Arc::new(AuthCrypto::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.token_ttl(),
        ));

        Self {
            repos,
            resolver,
            store,
            auth_crypto,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
