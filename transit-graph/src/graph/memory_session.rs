use super::{GraphError, GraphRow, GraphSession, Parameters, CONSTRAINT_VIOLATION_CODE};
use std::collections::{HashMap, HashSet, VecDeque};

/// a batch accepted by a [`MemorySession`]
#[derive(Debug, Clone)]
pub struct CommittedBatch {
    pub query: String,
    pub records: Vec<Parameters>,
}

/// an in-process graph session that keeps what it is sent instead of writing
/// to a database. stands in for the store in tests.
///
/// a session built with [`MemorySession::counting`] keeps only record and
/// batch counts, so its memory does not grow with the input. it backs
/// `import --dry-run`.
///
/// uniqueness can be enforced per query with [`MemorySession::with_unique_key`],
/// and read queries are answered from a queue filled with
/// [`MemorySession::with_query_result`]; once the queue is empty every read
/// returns no rows.
#[derive(Default)]
pub struct MemorySession {
    counting: bool,
    statements: Vec<String>,
    batches: Vec<CommittedBatch>,
    committed_records: usize,
    committed_batches: usize,
    unique_keys: HashMap<String, String>,
    unique_values: HashMap<String, HashSet<String>>,
    query_results: VecDeque<Vec<GraphRow>>,
    queries: Vec<(String, Parameters)>,
}

impl MemorySession {
    pub fn new() -> MemorySession {
        MemorySession::default()
    }

    /// a session that counts committed records and batches but does not keep
    /// them; [`MemorySession::batches`] stays empty.
    pub fn counting() -> MemorySession {
        MemorySession {
            counting: true,
            ..Default::default()
        }
    }

    /// rejects any write of `query` whose `field` value was already committed
    /// by an earlier write of the same query, or repeats within the batch.
    ///
    /// the check is keyed by query text, not by label and property: it only
    /// stands in for a store constraint such as `Agency.id` when every write
    /// of that label goes through the one query.
    pub fn with_unique_key(mut self, query: &str, field: &str) -> MemorySession {
        self.unique_keys
            .insert(query.to_string(), field.to_string());
        self
    }

    /// queues the rows returned by the next read query
    pub fn with_query_result(mut self, rows: Vec<GraphRow>) -> MemorySession {
        self.query_results.push_back(rows);
        self
    }

    /// statements sent through [`GraphSession::run`], in order
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// committed batches, in commit order
    pub fn batches(&self) -> &[CommittedBatch] {
        &self.batches
    }

    /// committed batches of a single query, in commit order
    pub fn batches_for<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a CommittedBatch> {
        self.batches.iter().filter(move |b| b.query == query)
    }

    /// total number of records committed across all batches
    pub fn committed_records(&self) -> usize {
        self.committed_records
    }

    /// number of batches committed, including those not kept
    pub fn committed_batches(&self) -> usize {
        self.committed_batches
    }

    /// read queries received, with their parameters
    pub fn queries(&self) -> &[(String, Parameters)] {
        &self.queries
    }

    fn check_unique(&self, query: &str, field: &str, batch: &[Parameters]) -> Result<HashSet<String>, GraphError> {
        let existing = self.unique_values.get(query);
        let mut staged = HashSet::with_capacity(batch.len());
        for record in batch {
            let key = record
                .get(field)
                .map(|v| v.to_string())
                .unwrap_or_else(|| String::from("null"));
            let committed = existing.map(|e| e.contains(&key)).unwrap_or(false);
            if committed || staged.contains(&key) {
                return Err(GraphError::DatabaseError {
                    code: String::from(CONSTRAINT_VIOLATION_CODE),
                    message: format!("node already exists with property `{field}` = {key}"),
                });
            }
            staged.insert(key);
        }
        Ok(staged)
    }
}

impl GraphSession for MemorySession {
    fn run(&mut self, statement: &str) -> Result<(), GraphError> {
        self.statements.push(statement.to_string());
        Ok(())
    }

    fn write_transaction(
        &mut self,
        query: &str,
        batch: &[Parameters],
    ) -> Result<usize, GraphError> {
        // validate the whole batch before keeping any of it
        if let Some(field) = self.unique_keys.get(query).cloned() {
            let staged = self.check_unique(query, &field, batch)?;
            self.unique_values
                .entry(query.to_string())
                .or_default()
                .extend(staged);
        }
        self.committed_records += batch.len();
        self.committed_batches += 1;
        if !self.counting {
            self.batches.push(CommittedBatch {
                query: query.to_string(),
                records: batch.to_vec(),
            });
        }
        Ok(batch.len())
    }

    fn query(&mut self, query: &str, parameters: &Parameters) -> Result<Vec<GraphRow>, GraphError> {
        self.queries.push((query.to_string(), parameters.clone()));
        Ok(self.query_results.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const QUERY: &str = "CREATE (:Agency {id: $agency_id})";

    fn record(id: &str) -> Parameters {
        let mut p = Parameters::new();
        p.insert(String::from("agency_id"), json!(id));
        p
    }

    #[test]
    fn test_duplicate_in_batch_commits_nothing() {
        let mut session = MemorySession::new().with_unique_key(QUERY, "agency_id");
        let result = session.write_transaction(QUERY, &[record("1"), record("2"), record("1")]);
        let error = result.err().unwrap();
        assert!(error.is_constraint_violation());
        assert_eq!(session.committed_records(), 0);

        // nothing from the failed batch was remembered either
        let retry = session.write_transaction(QUERY, &[record("2")]);
        assert_eq!(retry.unwrap(), 1);
    }

    #[test]
    fn test_duplicate_across_batches_is_rejected() {
        let mut session = MemorySession::new().with_unique_key(QUERY, "agency_id");
        session
            .write_transaction(QUERY, &[record("1"), record("2")])
            .unwrap();
        let result = session.write_transaction(QUERY, &[record("3"), record("2")]);
        assert!(result.is_err());
        assert_eq!(session.batches().len(), 1);
        assert_eq!(session.committed_records(), 2);
    }

    #[test]
    fn test_unique_key_only_applies_to_its_query() {
        let other = "MERGE (:Agency {id: $agency_id})";
        let mut session = MemorySession::new().with_unique_key(QUERY, "agency_id");
        session.write_transaction(QUERY, &[record("1")]).unwrap();
        assert!(session.write_transaction(other, &[record("1")]).is_ok());
        assert!(session.write_transaction(QUERY, &[record("1")]).is_err());
    }

    #[test]
    fn test_counting_session_keeps_no_records() {
        let mut session = MemorySession::counting();
        for n in 0..50 {
            let batch: Vec<Parameters> = (0..100).map(|i| record(&format!("{n}-{i}"))).collect();
            session.write_transaction(QUERY, &batch).unwrap();
        }
        assert_eq!(session.committed_records(), 5000);
        assert_eq!(session.committed_batches(), 50);
        assert!(session.batches().is_empty());
    }

    #[test]
    fn test_queued_results_then_empty() {
        let mut row = GraphRow::new();
        row.insert(String::from("id"), json!("s1"));
        let mut session = MemorySession::new().with_query_result(vec![row]);
        let first = session.query("MATCH (s) RETURN s.id AS id", &Parameters::new()).unwrap();
        let second = session.query("MATCH (s) RETURN s.id AS id", &Parameters::new()).unwrap();
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(session.queries().len(), 2);
    }
}
