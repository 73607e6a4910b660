use serde::{Deserialize, Serialize};

/// connection settings for the graph store's HTTP endpoint
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfiguration {
    /// base URL of the HTTP endpoint, e.g. `http://localhost:7474`
    pub endpoint: String,
    /// name of the database within the store
    pub database: String,
    pub username: String,
    pub password: String,
    /// request timeout. when unset, a transaction may take as long as it needs.
    pub timeout_secs: Option<u64>,
}

impl Default for DatabaseConfiguration {
    fn default() -> Self {
        Self {
            endpoint: String::from("http://localhost:7474"),
            database: String::from("neo4j"),
            username: String::from("neo4j"),
            password: String::new(),
            timeout_secs: None,
        }
    }
}
