/// status code reported by Neo4j when a write breaks a uniqueness constraint
pub const CONSTRAINT_VIOLATION_CODE: &str = "Neo.ClientError.Schema.ConstraintValidationFailed";

#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("failure building graph store client: {0}")]
    ClientError(String),
    #[error("failure communicating with graph store: {source}")]
    TransportError {
        #[from]
        source: reqwest::Error,
    },
    #[error("graph store responded with status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("graph store rejected statement ({code}): {message}")]
    DatabaseError { code: String, message: String },
    #[error("failure decoding graph store response: {0}")]
    DecodeError(String),
}

impl GraphError {
    /// true when the store refused a write because it would duplicate a unique key
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            GraphError::DatabaseError { code, .. } => code == CONSTRAINT_VIOLATION_CODE,
            _ => false,
        }
    }
}
