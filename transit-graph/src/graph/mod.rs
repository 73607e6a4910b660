mod graph_error;
mod graph_session;
mod http_session;
mod memory_session;

pub use graph_error::{GraphError, CONSTRAINT_VIOLATION_CODE};
pub use graph_session::{GraphRow, GraphSession, Parameters};
pub use http_session::HttpSession;
pub use memory_session::{CommittedBatch, MemorySession};
