mod database;
mod env_provider;
mod errors;
mod logging;
mod settings;

pub use database::{init_database, migrate_database};
pub use env_provider::{EnvironmentProvider, MapEnvironment, SystemEnvironment};
pub use errors::ConfigError;
pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use settings::AppSettings;
