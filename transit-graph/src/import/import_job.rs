use super::{validate_fields, Batcher, FieldSpec, ImportError, QueryWriter, RowStream};
use crate::graph::GraphSession;
use std::{
    fmt::Display,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

/// running totals after a committed batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportProgress {
    /// records committed so far by this job
    pub records: usize,
    /// batches committed so far by this job
    pub batches: usize,
    /// wall-clock time since the job started
    pub elapsed: Duration,
}

/// the outcome of a completed job
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub job: String,
    pub source_file: PathBuf,
    pub records: usize,
    pub batches: usize,
    /// rows dropped by an inclusion predicate
    pub rejected: usize,
    pub elapsed: Duration,
}

impl Display for ImportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} records in {} batches from {} ({} rows skipped), {:.1}s",
            self.job,
            self.records,
            self.batches,
            self.source_file.display(),
            self.rejected,
            self.elapsed.as_secs_f64()
        )
    }
}

/// one unit of bulk loading: a source file, the write query run for each of
/// its rows, the fields that feed the query's placeholders, and the number
/// of records committed per transaction.
#[derive(Clone, Debug)]
pub struct ImportJob {
    name: String,
    source_file: PathBuf,
    query: String,
    batch_size: NonZeroUsize,
    fields: Vec<FieldSpec>,
}

impl ImportJob {
    /// builds a job after checking that the query's placeholders and the
    /// declared fields match exactly. nothing is read or written here.
    pub fn new(
        name: &str,
        source_file: &str,
        query: &str,
        batch_size: usize,
        fields: Vec<FieldSpec>,
    ) -> Result<ImportJob, ImportError> {
        let batch_size = NonZeroUsize::new(batch_size)
            .ok_or_else(|| ImportError::InvalidBatchSize(name.to_string()))?;
        validate_fields(name, query, &fields)?;
        Ok(ImportJob {
            name: name.to_string(),
            source_file: PathBuf::from(source_file),
            query: query.to_string(),
            batch_size,
            fields,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// file name relative to the import base path
    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// streams the source file under `base_path`, committing one transaction
    /// per batch through `session` and calling `on_progress` after each
    /// commit. the next batch is read only after the previous one commits.
    ///
    /// the first failure stops the job. batches committed before it stay
    /// committed.
    pub fn run<F>(
        &self,
        base_path: &Path,
        session: &mut dyn GraphSession,
        mut on_progress: F,
    ) -> Result<ImportSummary, ImportError>
    where
        F: FnMut(&ImportProgress),
    {
        let start = Instant::now();
        let path = base_path.join(&self.source_file);
        log::info!("job '{}': importing {}", self.name, path.display());

        let mut rows = RowStream::open(&path, &self.fields)?;
        let mut writer = QueryWriter::new(session, &self.query);
        for batch in Batcher::new(rows.by_ref(), self.batch_size) {
            let batch = batch?;
            writer
                .write(&batch)
                .map_err(|source| ImportError::TransactionError {
                    job: self.name.clone(),
                    batch: writer.batches() + 1,
                    committed: writer.committed(),
                    source,
                })?;
            on_progress(&ImportProgress {
                records: writer.committed(),
                batches: writer.batches(),
                elapsed: start.elapsed(),
            });
        }

        Ok(ImportSummary {
            job: self.name.clone(),
            source_file: self.source_file.clone(),
            records: writer.committed(),
            batches: writer.batches(),
            rejected: rows.rejected(),
            elapsed: start.elapsed(),
        })
    }
}
