use crate::{
    config::ConfigurationError, graph::GraphError, import::ImportError, planner::PlannerError,
};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("failure reading configuration: {source}")]
    ConfigurationError {
        #[from]
        source: ConfigurationError,
    },
    #[error("failure connecting to graph store: {source}")]
    GraphError {
        #[from]
        source: GraphError,
    },
    #[error("import failed: {source}")]
    ImportError {
        #[from]
        source: ImportError,
    },
    #[error("planner failed: {source}")]
    PlannerError {
        #[from]
        source: PlannerError,
    },
}
