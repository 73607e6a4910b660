use crate::graph::GraphError;
use itertools::Itertools;

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("job '{job}': query placeholders and declared fields differ; placeholders without a field: [{}], fields without a placeholder: [{}]", .undeclared.iter().join(", "), .unused.iter().join(", "))]
    PlaceholderMismatch {
        job: String,
        undeclared: Vec<String>,
        unused: Vec<String>,
    },
    #[error("job '{job}': field '{field}' is declared more than once")]
    DuplicateField { job: String, field: String },
    #[error("internal error building placeholder pattern: {0}")]
    PlaceholderPatternError(String),
    #[error("job '{0}': batch size must be greater than zero")]
    InvalidBatchSize(String),
    #[error("failure opening {file}: {source}")]
    OpenSourceError { file: String, source: csv::Error },
    #[error("failure reading header of {file}: {source}")]
    HeaderError { file: String, source: csv::Error },
    #[error("{file} has no column '{column}'")]
    MissingColumn { file: String, column: String },
    #[error("malformed row in {file} at line {line}: {source}")]
    MalformedRow {
        file: String,
        line: u64,
        source: csv::Error,
    },
    #[error("{file} line {line}: cannot convert field '{field}': {message}")]
    FieldTransformError {
        file: String,
        line: u64,
        field: String,
        message: String,
    },
    #[error("job '{job}': batch {batch} failed after {committed} records were committed: {source}")]
    TransactionError {
        job: String,
        batch: usize,
        committed: usize,
        source: GraphError,
    },
    #[error("failure running schema statement '{statement}': {source}")]
    SchemaError {
        statement: String,
        source: GraphError,
    },
    #[error("failure reporting progress: {0}")]
    ProgressError(String),
}

impl ImportError {
    /// errors found before any file is read or any write is attempted
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ImportError::PlaceholderMismatch { .. }
                | ImportError::PlaceholderPatternError(_)
                | ImportError::DuplicateField { .. }
                | ImportError::InvalidBatchSize(_)
                | ImportError::MissingColumn { .. }
        )
    }
}
