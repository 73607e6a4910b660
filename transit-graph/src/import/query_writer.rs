use super::Record;
use crate::graph::{GraphError, GraphSession};

/// commits batches of records for one query, one transaction per batch, and
/// keeps the running totals used for progress reporting.
pub struct QueryWriter<'a> {
    session: &'a mut dyn GraphSession,
    query: &'a str,
    committed: usize,
    batches: usize,
}

impl<'a> QueryWriter<'a> {
    pub fn new(session: &'a mut dyn GraphSession, query: &'a str) -> QueryWriter<'a> {
        QueryWriter {
            session,
            query,
            committed: 0,
            batches: 0,
        }
    }

    /// runs the query once per record inside a single write transaction.
    /// on failure nothing from this batch is applied and the totals are
    /// unchanged. returns the cumulative number of committed records.
    pub fn write(&mut self, batch: &[Record]) -> Result<usize, GraphError> {
        let applied = self.session.write_transaction(self.query, batch)?;
        self.committed += applied;
        self.batches += 1;
        log::debug!(
            "committed batch {} ({applied} records, {} total)",
            self.batches,
            self.committed
        );
        Ok(self.committed)
    }

    /// records committed so far
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// batches committed so far
    pub fn batches(&self) -> usize {
        self.batches
    }
}
