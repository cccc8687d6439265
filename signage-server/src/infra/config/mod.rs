pub mod loader;
pub mod models;
pub mod sources;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};
pub use models::{
    AuthConfig, Config, ConfigMetadata, ConfigWarnings, CorsConfig, DatabaseConfig, ServerConfig,
    StorageConfig,
};
