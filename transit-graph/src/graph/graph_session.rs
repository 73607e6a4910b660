use super::GraphError;
use serde_json::{Map, Value};

/// named query parameters, keyed by placeholder name (without the `$`).
pub type Parameters = Map<String, Value>;

/// one result row, keyed by column name.
pub type GraphRow = Map<String, Value>;

/// the operations the loader and the planner need from a graph store.
///
/// a session has a single user at a time: it is passed along as
/// `&mut dyn GraphSession`, so the borrow checker guarantees two import jobs
/// never hold it at once. resources held by an implementation are released
/// when it is dropped.
pub trait GraphSession {
    /// executes a statement and discards its result. used for schema setup.
    fn run(&mut self, statement: &str) -> Result<(), GraphError>;

    /// executes `query` once for each entry of `batch`, with that entry as the
    /// query parameters, inside one write transaction. either all executions
    /// are committed or none are. returns the number of executions committed.
    fn write_transaction(&mut self, query: &str, batch: &[Parameters])
        -> Result<usize, GraphError>;

    /// executes a read query and collects every row it returns.
    fn query(&mut self, query: &str, parameters: &Parameters) -> Result<Vec<GraphRow>, GraphError>;
}
