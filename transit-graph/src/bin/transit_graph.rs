//! loads a GTFS feed into a Neo4j graph and plans trips over it.
use clap::Parser;
use transit_graph::app::TransitGraphApp;

fn main() {
    env_logger::init();
    let args = TransitGraphApp::parse();
    if let Err(e) = args.run() {
        log::error!("transit-graph failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
