//! the bulk import pipeline: a [`RowStream`] reads one GTFS text file and
//! extracts a [`Record`] per row, a [`Batcher`] groups records, and a
//! [`QueryWriter`] commits each batch in one transaction. an [`ImportJob`]
//! binds a file, a query and its fields together, and the [`ImportPlan`]
//! runs the jobs in dependency order over one session.
mod batcher;
mod field_spec;
mod import_error;
mod import_job;
mod import_plan;
mod placeholder;
mod progress;
mod query_writer;
mod row_stream;
mod schema;
pub mod transform;

pub use batcher::Batcher;
pub use field_spec::{FieldSpec, IncludeFn, Record, TransformFn};
pub use import_error::ImportError;
pub use import_job::{ImportJob, ImportProgress, ImportSummary};
pub use import_plan::{queries, ImportPlan};
pub use placeholder::{extract_placeholders, validate_fields};
pub use progress::{ImportObserver, SilentProgress, TerminalProgress};
pub use query_writer::QueryWriter;
pub use row_stream::RowStream;
pub use schema::{create_schema, SCHEMA_STATEMENTS};
