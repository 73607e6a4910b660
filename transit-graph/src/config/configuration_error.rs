use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("unsupported configuration file type: {0}")]
    UnsupportedFileType(String),
    #[error("failure reading configuration: {source}")]
    ConfigError {
        #[from]
        source: config::ConfigError,
    },
    #[error("failure encoding configuration: {source}")]
    TomlError {
        #[from]
        source: toml::ser::Error,
    },
}
