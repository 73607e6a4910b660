use super::{BatchSizeConfiguration, ConfigurationError, DatabaseConfiguration};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// static settings for an import or planner run. read once at startup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImportConfiguration {
    /// directory holding the GTFS text files (agency.txt, routes.txt, ...)
    pub base_path: PathBuf,
    pub database: DatabaseConfiguration,
    pub batch_sizes: BatchSizeConfiguration,
}

impl Default for ImportConfiguration {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            database: DatabaseConfiguration::default(),
            batch_sizes: BatchSizeConfiguration::default(),
        }
    }
}

impl ImportConfiguration {
    /// prefix of environment variables that override file settings. nested
    /// keys are separated by `__`, e.g. `TRANSIT_GRAPH_DATABASE__PASSWORD`.
    pub const ENV_PREFIX: &'static str = "TRANSIT_GRAPH";

    /// reads the configuration file, if any, then applies environment
    /// overrides. unset values fall back to [`ImportConfiguration::default`].
    pub fn load(file: Option<&str>) -> Result<ImportConfiguration, ConfigurationError> {
        let mut builder = Config::builder();
        if let Some(f) = file {
            log::info!("reading transit-graph configuration from {f}");
            builder = builder.add_source(File::new(f, file_format(f)?));
        }
        let conf = builder
            .add_source(
                Environment::with_prefix(Self::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(conf)
    }

    pub fn to_toml(&self) -> Result<String, ConfigurationError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn file_format(f: &str) -> Result<FileFormat, ConfigurationError> {
    if f.ends_with(".toml") {
        Ok(FileFormat::Toml)
    } else if f.ends_with(".json") {
        Ok(FileFormat::Json)
    } else {
        Err(ConfigurationError::UnsupportedFileType(f.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
base_path = "/data/gtfs"

[database]
endpoint = "http://graph:7474"

[batch_sizes]
stop_sequences = 100
"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let conf = ImportConfiguration::load(Some(&path)).unwrap();
        assert_eq!(conf.base_path, PathBuf::from("/data/gtfs"));
        assert_eq!(conf.database.endpoint, "http://graph:7474");
        assert_eq!(conf.database.database, "neo4j");
        assert_eq!(conf.batch_sizes.stop_sequences, 100);
        assert_eq!(conf.batch_sizes.stop_times, 10000);
    }

    #[test]
    fn test_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"database": {{"username": "loader", "timeout_secs": 600}}}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let conf = ImportConfiguration::load(Some(&path)).unwrap();
        assert_eq!(conf.database.username, "loader");
        assert_eq!(conf.database.timeout_secs, Some(600));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ImportConfiguration::load(Some("settings.yaml"));
        assert!(matches!(
            result,
            Err(ConfigurationError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_default_toml_loads_back() {
        let toml_str = ImportConfiguration::default().to_toml().unwrap();
        let decoded: ImportConfiguration = toml::from_str(&toml_str).unwrap();
        assert_eq!(decoded, ImportConfiguration::default());
    }
}
