use super::{
    create_schema, transform, FieldSpec, ImportError, ImportJob, ImportObserver, ImportSummary,
};
use crate::{config::BatchSizeConfiguration, graph::GraphSession};
use std::path::Path;

/// write queries of the GTFS import, run once per source row.
pub mod queries {
    pub const AGENCIES: &str = "CREATE (:Agency {id: toInteger($agency_id), name: $agency_name, \
        url: $agency_url, timezone: $agency_timezone, lang: $agency_lang})";

    pub const ROUTES: &str = "MATCH (a:Agency {id: toInteger($agency_id)}) \
        CREATE (a)-[:OPERATES]->(:Route {id: $route_id, short_name: $route_short_name, \
        long_name: $route_long_name, desc: $route_desc, type: toInteger($route_type), \
        color: $route_color})";

    pub const TRIPS: &str = "MATCH (r:Route {id: $route_id}) \
        CREATE (r)<-[:USES]-(:Trip {id: $trip_id, service_id: $service_id, \
        headsign: $trip_headsign, direction_id: $direction_id, shape_id: $shape_id})";

    pub const STOPS: &str = "CREATE (:Stop {id: $stop_id, code: $stop_code, name: $stop_name, \
        desc: $stop_desc, location: point({longitude: toFloat($stop_lon), \
        latitude: toFloat($stop_lat), crs: 'wgs-84'}), location_type: $location_type, \
        parent_station: $parent_station, zone: $zone_id})";

    pub const STOP_PARENTS: &str = "MATCH (ps:Stop {id: $parent_station}), (s:Stop {id: $stop_id}) \
        CREATE (ps)<-[:PART_OF]-(s)";

    pub const STOP_TIMES: &str = "MATCH (t:Trip {id: $trip_id}), (s:Stop {id: $stop_id}) \
        CREATE (t)<-[:PART_OF_TRIP]-(:Stoptime {arrival_time: localtime($arrival_time), \
        departure_time: localtime($departure_time), stop_sequence: toInteger($stop_sequence), \
        pickup_type: $pickup_type, drop_off_type: $drop_off_type, \
        shape_dist_traveled: $shape_dist_traveled})-[:LOCATED_AT]->(s)";

    pub const STOP_SEQUENCES: &str = "MATCH (s1:Stoptime)-[:PART_OF_TRIP]->(t:Trip {id: $trip_id}), \
        (s2:Stoptime)-[:PART_OF_TRIP]->(t) \
        WHERE s2.stop_sequence = s1.stop_sequence + 1 \
        CREATE (s1)-[:PRECEDES]->(s2)";
}

/// an ordered list of import jobs run one after another over one session.
///
/// later jobs match nodes created by earlier ones, so a job starts only
/// after the previous job finished, and the first failure stops the plan.
/// there is no rollback across jobs: work committed before a failure
/// stays in the store.
pub struct ImportPlan {
    jobs: Vec<ImportJob>,
}

impl ImportPlan {
    pub fn new(jobs: Vec<ImportJob>) -> ImportPlan {
        ImportPlan { jobs }
    }

    /// the full GTFS load: agencies, routes, trips, stops, stop-to-parent
    /// edges, stop times, then the edges linking consecutive stop times.
    pub fn gtfs(batch_sizes: &BatchSizeConfiguration) -> Result<ImportPlan, ImportError> {
        let f = FieldSpec::new;
        let jobs = vec![
            ImportJob::new(
                "agencies",
                "agency.txt",
                queries::AGENCIES,
                batch_sizes.agencies,
                vec![
                    f("agency_id"),
                    f("agency_name"),
                    f("agency_url"),
                    f("agency_timezone"),
                    f("agency_lang"),
                ],
            )?,
            ImportJob::new(
                "routes",
                "routes.txt",
                queries::ROUTES,
                batch_sizes.routes,
                vec![
                    f("route_id"),
                    f("agency_id"),
                    f("route_short_name"),
                    f("route_long_name"),
                    f("route_desc"),
                    f("route_type"),
                    f("route_color"),
                ],
            )?,
            ImportJob::new(
                "trips",
                "trips.txt",
                queries::TRIPS,
                batch_sizes.trips,
                vec![
                    f("route_id"),
                    f("service_id"),
                    f("trip_id"),
                    f("trip_headsign"),
                    f("direction_id"),
                    f("shape_id"),
                ],
            )?,
            ImportJob::new(
                "stops",
                "stops.txt",
                queries::STOPS,
                batch_sizes.stops,
                vec![
                    f("stop_id"),
                    f("stop_code"),
                    f("stop_name"),
                    f("stop_desc"),
                    f("stop_lat"),
                    f("stop_lon"),
                    f("location_type"),
                    f("parent_station"),
                    f("zone_id"),
                ],
            )?,
            ImportJob::new(
                "stop_parents",
                "stops.txt",
                queries::STOP_PARENTS,
                batch_sizes.stop_parents,
                vec![
                    f("stop_id"),
                    f("parent_station").with_include(transform::is_present),
                ],
            )?,
            ImportJob::new(
                "stop_times",
                "stop_times.txt",
                queries::STOP_TIMES,
                batch_sizes.stop_times,
                vec![
                    f("trip_id"),
                    f("arrival_time").with_transform(transform::normalize_time),
                    f("departure_time").with_transform(transform::normalize_time),
                    f("stop_id"),
                    f("stop_sequence"),
                    f("pickup_type"),
                    f("drop_off_type"),
                    f("shape_dist_traveled"),
                ],
            )?,
            ImportJob::new(
                "stop_sequences",
                "trips.txt",
                queries::STOP_SEQUENCES,
                batch_sizes.stop_sequences,
                vec![f("trip_id")],
            )?,
        ];
        Ok(ImportPlan::new(jobs))
    }

    pub fn jobs(&self) -> &[ImportJob] {
        &self.jobs
    }

    /// runs the schema statements, then every job in order.
    pub fn run_with_schema(
        &self,
        base_path: &Path,
        session: &mut dyn GraphSession,
        observer: &mut dyn ImportObserver,
    ) -> Result<Vec<ImportSummary>, ImportError> {
        create_schema(session)?;
        self.run(base_path, session, observer)
    }

    /// runs every job in order, reading source files relative to
    /// `base_path`. returns one summary per job, or the first failure.
    pub fn run(
        &self,
        base_path: &Path,
        session: &mut dyn GraphSession,
        observer: &mut dyn ImportObserver,
    ) -> Result<Vec<ImportSummary>, ImportError> {
        let mut summaries = Vec::with_capacity(self.jobs.len());
        for job in self.jobs.iter() {
            observer.job_started(job)?;
            let result = job.run(base_path, session, |progress| observer.progress(job, progress));
            match result {
                Ok(summary) => {
                    observer.job_finished(job, &summary);
                    log::info!("{summary}");
                    summaries.push(summary);
                }
                Err(e) => {
                    observer.job_failed(job, &e);
                    log::error!("job '{}' failed, remaining jobs skipped: {e}", job.name());
                    return Err(e);
                }
            }
        }
        Ok(summaries)
    }
}
