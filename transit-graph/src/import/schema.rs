use super::ImportError;
use crate::graph::GraphSession;

/// uniqueness constraints for the primary entities, then lookup indexes used
/// by the later import jobs and the planner.
pub const SCHEMA_STATEMENTS: [&str; 8] = [
    "CREATE CONSTRAINT agency_id IF NOT EXISTS FOR (a:Agency) REQUIRE a.id IS UNIQUE",
    "CREATE CONSTRAINT route_id IF NOT EXISTS FOR (r:Route) REQUIRE r.id IS UNIQUE",
    "CREATE CONSTRAINT trip_id IF NOT EXISTS FOR (t:Trip) REQUIRE t.id IS UNIQUE",
    "CREATE CONSTRAINT stop_id IF NOT EXISTS FOR (s:Stop) REQUIRE s.id IS UNIQUE",
    "CREATE INDEX trip_service_id IF NOT EXISTS FOR (t:Trip) ON (t.service_id)",
    "CREATE INDEX stoptime_stop_sequence IF NOT EXISTS FOR (st:Stoptime) ON (st.stop_sequence)",
    "CREATE INDEX stop_name IF NOT EXISTS FOR (s:Stop) ON (s.name)",
    "CREATE POINT INDEX stop_location IF NOT EXISTS FOR (s:Stop) ON (s.location)",
];

/// runs each schema statement once, in order. stops at the first failure;
/// statements that already ran are not undone.
pub fn create_schema(session: &mut dyn GraphSession) -> Result<usize, ImportError> {
    for statement in SCHEMA_STATEMENTS {
        log::info!("schema: {statement}");
        session
            .run(statement)
            .map_err(|source| ImportError::SchemaError {
                statement: statement.to_string(),
                source,
            })?;
    }
    Ok(SCHEMA_STATEMENTS.len())
}
