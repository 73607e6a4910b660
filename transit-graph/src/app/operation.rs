//! subcommands of the transit-graph command line tool.
use super::AppError;
use crate::config::ImportConfiguration;
use crate::graph::{GraphSession, HttpSession, MemorySession};
use crate::import::{create_schema, ImportPlan, ImportSummary, TerminalProgress};
use crate::planner::{find_stops, TripPlanner};
use clap::{value_parser, Subcommand};
use itertools::Itertools;
use std::path::PathBuf;

#[derive(Debug, Clone, Subcommand)]
pub enum TransitGraphOperation {
    /// load a GTFS feed directory into the graph store
    Import {
        /// directory containing agency.txt, routes.txt, trips.txt, stops.txt
        /// and stop_times.txt. overrides the configured base path
        #[arg(long)]
        base_path: Option<PathBuf>,
        /// read and batch every file without writing to a database
        #[arg(long, default_value_t = false)]
        dry_run: bool,
        /// do not create constraints and indexes before importing
        #[arg(long, default_value_t = false)]
        skip_schema: bool,
    },
    /// create the uniqueness constraints and indexes only
    Schema,
    /// find stops whose description contains every given word
    Stops {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// plan a trip between two stops, boarding within the given hour
    Plan {
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
        #[arg(long, value_parser = value_parser!(u32).range(0..24))]
        hour: u32,
    },
    /// print the effective configuration as TOML
    ShowConfig,
}

impl TransitGraphOperation {
    pub fn run(&self, conf: &ImportConfiguration) -> Result<(), AppError> {
        match self {
            TransitGraphOperation::Import {
                base_path,
                dry_run,
                skip_schema,
            } => {
                let base_path = base_path.clone().unwrap_or_else(|| conf.base_path.clone());
                let plan = ImportPlan::gtfs(&conf.batch_sizes)?;
                let mut progress = TerminalProgress::default();
                let summaries = if *dry_run {
                    log::info!("dry run: nothing will be written to {}", conf.database.endpoint);
                    let mut session = MemorySession::counting();
                    plan.run(&base_path, &mut session, &mut progress)?
                } else {
                    let mut session = HttpSession::new(&conf.database)?;
                    if *skip_schema {
                        plan.run(&base_path, &mut session, &mut progress)?
                    } else {
                        plan.run_with_schema(&base_path, &mut session, &mut progress)?
                    }
                };
                report(&summaries);
                Ok(())
            }
            TransitGraphOperation::Schema => {
                let mut session = HttpSession::new(&conf.database)?;
                let count = create_schema(&mut session)?;
                eprintln!("ran {count} schema statements");
                Ok(())
            }
            TransitGraphOperation::Stops { words } => {
                let mut session = HttpSession::new(&conf.database)?;
                let stops = find_stops(&mut session, words)?;
                if stops.is_empty() {
                    eprintln!("no stops match '{}'", words.iter().join(" "));
                }
                for stop in stops {
                    println!(
                        "{}\t{}\t{}",
                        stop.id,
                        stop.name,
                        stop.desc.unwrap_or_default()
                    );
                }
                Ok(())
            }
            TransitGraphOperation::Plan {
                source,
                target,
                hour,
            } => {
                let mut session = HttpSession::new(&conf.database)?;
                plan_trip(&mut session, source, target, *hour)
            }
            TransitGraphOperation::ShowConfig => {
                println!("{}", conf.to_toml()?);
                Ok(())
            }
        }
    }
}

fn plan_trip(
    session: &mut dyn GraphSession,
    source: &str,
    target: &str,
    hour: u32,
) -> Result<(), AppError> {
    match TripPlanner::new(session).plan(source, target, hour)? {
        Some(plan) => {
            print!("{plan}");
            let markers = plan
                .markers
                .iter()
                .map(|m| format!("({:.6}, {:.6})", m.lon, m.lat))
                .join(" ");
            println!("  markers: {markers}");
        }
        None => eprintln!("no trip found from {source} to {target} at hour {hour}"),
    }
    Ok(())
}

fn report(summaries: &[ImportSummary]) {
    let total: usize = summaries.iter().map(|s| s.records).sum();
    for summary in summaries {
        eprintln!("{summary}");
    }
    eprintln!("finished. {total} records in {} jobs", summaries.len());
}
