use crate::graph::GraphError;

#[derive(thiserror::Error, Debug)]
pub enum PlannerError {
    #[error("hour must be within 0..=23, found {0}")]
    InvalidHour(u32),
    #[error("failure querying graph store: {source}")]
    GraphError {
        #[from]
        source: GraphError,
    },
    #[error("failure decoding {what} from query result: {message}")]
    DecodeError { what: String, message: String },
    #[error("plan contains a node with unexpected labels {0:?}")]
    UnexpectedNode(Vec<String>),
}
