//! loads a GTFS feed into a graph database and plans trips over the result.
//!
//! the import side streams each GTFS text file row by row, batches the
//! extracted records and commits each batch as one write transaction. see
//! [`import::ImportPlan`] for the fixed job ordering.
pub mod app;
pub mod config;
pub mod graph;
pub mod import;
pub mod planner;
