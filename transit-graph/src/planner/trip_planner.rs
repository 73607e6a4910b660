use super::{Marker, PlanKind, PlanNode, PlannerError, TripPlan};
use crate::graph::{GraphRow, GraphSession, Parameters};
use serde_json::Value;

/// longest wait between arriving on the first trip and boarding the second
pub const MAX_TRANSFER_WAIT_SECONDS: i64 = 30 * 60;
/// longest walk between the stops of a walking transfer
pub const MAX_WALK_METERS: f64 = 500.0;

const DIRECT: &str = "MATCH (s1:Stop {id: $source})<-[:LOCATED_AT]-(st1:Stoptime)\
    -[:PRECEDES*]->(st2:Stoptime)-[:LOCATED_AT]->(s2:Stop {id: $target}), \
    (st1)-[:PART_OF_TRIP]->(t:Trip)-[:USES]->(r:Route)<-[:OPERATES]-(a:Agency) \
    WHERE st1.arrival_time.hour = $hour \
    RETURN [n IN [a, r, t, s1, st1, s2, st2] | \
    {labels: labels(n), properties: properties(n)}] AS nodes \
    ORDER BY st2.arrival_time LIMIT 1";

const TRANSFER: &str = "MATCH (s1:Stop {id: $source})<-[:LOCATED_AT]-(st1:Stoptime)\
    -[:PRECEDES*]->(st2:Stoptime)-[:LOCATED_AT]->(s2:Stop)<-[:LOCATED_AT]-(st3:Stoptime)\
    -[:PRECEDES*]->(st4:Stoptime)-[:LOCATED_AT]->(s3:Stop {id: $target}), \
    (st1)-[:PART_OF_TRIP]->(t1:Trip)-[:USES]->(r1:Route)<-[:OPERATES]-(a1:Agency), \
    (st3)-[:PART_OF_TRIP]->(t2:Trip)-[:USES]->(r2:Route)<-[:OPERATES]-(a2:Agency) \
    WHERE st1.arrival_time.hour = $hour AND t1 <> t2 \
    AND st2.arrival_time < st3.departure_time \
    AND duration.inSeconds(st2.arrival_time, st3.departure_time).seconds < $max_wait_seconds \
    RETURN [n IN [a1, r1, t1, s1, st1, s2, st2, a2, r2, t2, st3, s3, st4] | \
    {labels: labels(n), properties: properties(n)}] AS nodes \
    ORDER BY st4.arrival_time LIMIT 1";

const WALKING_TRANSFER: &str = "MATCH (s1:Stop {id: $source})<-[:LOCATED_AT]-(st1:Stoptime)\
    -[:PRECEDES*]->(st2:Stoptime)-[:LOCATED_AT]->(s2:Stop), \
    (s3:Stop)<-[:LOCATED_AT]-(st3:Stoptime)-[:PRECEDES*]->(st4:Stoptime)\
    -[:LOCATED_AT]->(s4:Stop {id: $target}), \
    (st1)-[:PART_OF_TRIP]->(t1:Trip)-[:USES]->(r1:Route)<-[:OPERATES]-(a1:Agency), \
    (st3)-[:PART_OF_TRIP]->(t2:Trip)-[:USES]->(r2:Route)<-[:OPERATES]-(a2:Agency) \
    WHERE st1.arrival_time.hour = $hour AND s2 <> s3 \
    AND point.distance(s2.location, s3.location) < $max_walk_meters \
    AND st2.arrival_time < st3.departure_time \
    AND duration.inSeconds(st2.arrival_time, st3.departure_time).seconds < $max_wait_seconds \
    RETURN [n IN [a1, r1, t1, s1, st1, s2, st2, a2, r2, t2, s3, st3, s4, st4] | \
    {labels: labels(n), properties: properties(n)}] AS nodes \
    ORDER BY st4.arrival_time LIMIT 1";

/// the plan queries in the order they are tried
const PLAN_QUERIES: [(PlanKind, &str); 3] = [
    (PlanKind::Direct, DIRECT),
    (PlanKind::Transfer, TRANSFER),
    (PlanKind::WalkingTransfer, WALKING_TRANSFER),
];

/// plans trips between two stops by trying a direct trip first, then a
/// change at a shared stop, then a change with a short walk.
pub struct TripPlanner<'a> {
    session: &'a mut dyn GraphSession,
}

impl<'a> TripPlanner<'a> {
    pub fn new(session: &'a mut dyn GraphSession) -> TripPlanner<'a> {
        TripPlanner { session }
    }

    /// the first plan found departing `source` during `hour`, or `None`
    /// when no query finds a connection.
    pub fn plan(
        &mut self,
        source: &str,
        target: &str,
        hour: u32,
    ) -> Result<Option<TripPlan>, PlannerError> {
        if hour > 23 {
            return Err(PlannerError::InvalidHour(hour));
        }
        let parameters = plan_parameters(source, target, hour);
        for (kind, query) in PLAN_QUERIES {
            let rows = self.session.query(query, &parameters)?;
            match rows.into_iter().next() {
                Some(row) => {
                    log::info!("found {kind} plan from {source} to {target}");
                    return build_plan(kind, row).map(Some);
                }
                None => log::debug!("no {kind} plan from {source} to {target} at hour {hour}"),
            }
        }
        log::info!("no plan from {source} to {target} at hour {hour}");
        Ok(None)
    }
}

fn plan_parameters(source: &str, target: &str, hour: u32) -> Parameters {
    let mut parameters = Parameters::new();
    parameters.insert(String::from("source"), Value::from(source));
    parameters.insert(String::from("target"), Value::from(target));
    parameters.insert(String::from("hour"), Value::from(hour));
    parameters.insert(
        String::from("max_wait_seconds"),
        Value::from(MAX_TRANSFER_WAIT_SECONDS),
    );
    parameters.insert(String::from("max_walk_meters"), Value::from(MAX_WALK_METERS));
    parameters
}

fn build_plan(kind: PlanKind, mut row: GraphRow) -> Result<TripPlan, PlannerError> {
    let nodes = row.remove("nodes").ok_or_else(|| PlannerError::DecodeError {
        what: String::from("plan"),
        message: String::from("missing column 'nodes'"),
    })?;
    let nodes: Vec<PlanNode> =
        serde_json::from_value(nodes).map_err(|e| PlannerError::DecodeError {
            what: String::from("plan"),
            message: e.to_string(),
        })?;
    let steps = nodes
        .iter()
        .map(PlanNode::describe)
        .collect::<Result<Vec<_>, _>>()?;
    let markers: Vec<Marker> = nodes.iter().filter_map(PlanNode::location).collect();
    Ok(TripPlan {
        kind,
        steps,
        markers,
    })
}
