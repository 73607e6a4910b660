mod batch_size_configuration;
mod configuration_error;
mod database_configuration;
mod import_configuration;

pub use batch_size_configuration::BatchSizeConfiguration;
pub use configuration_error::ConfigurationError;
pub use database_configuration::DatabaseConfiguration;
pub use import_configuration::ImportConfiguration;
