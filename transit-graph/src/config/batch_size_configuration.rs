use serde::{Deserialize, Serialize};

/// number of records committed per transaction, for each import job.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchSizeConfiguration {
    pub agencies: usize,
    pub routes: usize,
    pub trips: usize,
    pub stops: usize,
    pub stop_parents: usize,
    pub stop_times: usize,
    /// each record of this job matches every stop time of a trip, so
    /// batches are kept smaller than the others
    pub stop_sequences: usize,
}

impl Default for BatchSizeConfiguration {
    fn default() -> Self {
        Self {
            agencies: 5000,
            routes: 5000,
            trips: 5000,
            stops: 5000,
            stop_parents: 5000,
            stop_times: 10000,
            stop_sequences: 1000,
        }
    }
}
