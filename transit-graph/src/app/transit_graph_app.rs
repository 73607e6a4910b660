use super::{AppError, TransitGraphOperation};
use crate::config::ImportConfiguration;
use clap::Parser;

/// command line tool for loading GTFS feeds into a graph database and
/// planning trips over the loaded network
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TransitGraphApp {
    #[command(subcommand)]
    pub op: TransitGraphOperation,
    /// TOML or JSON file with database and batch size settings
    #[arg(long, global = true)]
    pub config_file: Option<String>,
}

impl TransitGraphApp {
    pub fn run(&self) -> Result<(), AppError> {
        let conf = ImportConfiguration::load(self.config_file.as_deref())?;
        self.op.run(&conf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn test_cli_is_well_formed() {
        TransitGraphApp::command().debug_assert();
    }

    #[test]
    fn test_import_flags() {
        let app = TransitGraphApp::parse_from([
            "transit-graph",
            "import",
            "--base-path",
            "/data/gtfs",
            "--dry-run",
            "--config-file",
            "settings.toml",
        ]);
        assert_eq!(app.config_file.as_deref(), Some("settings.toml"));
        match app.op {
            TransitGraphOperation::Import {
                base_path,
                dry_run,
                skip_schema,
            } => {
                assert_eq!(base_path, Some(PathBuf::from("/data/gtfs")));
                assert!(dry_run);
                assert!(!skip_schema);
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn test_hour_out_of_range_is_rejected() {
        let result = TransitGraphApp::try_parse_from([
            "transit-graph",
            "plan",
            "--source",
            "s1",
            "--target",
            "s2",
            "--hour",
            "24",
        ]);
        assert!(result.is_err());
    }
}
