//! read side of the graph: stop lookup by description and trip plans
//! between two stops, using the relationships written by the import.
mod plan_node;
mod planner_error;
mod stop_search;
mod trip_plan;
mod trip_planner;

pub use plan_node::PlanNode;
pub use planner_error::PlannerError;
pub use stop_search::{find_stops, StopMatch};
pub use trip_plan::{Marker, PlanKind, TripPlan};
pub use trip_planner::{TripPlanner, MAX_TRANSFER_WAIT_SECONDS, MAX_WALK_METERS};
