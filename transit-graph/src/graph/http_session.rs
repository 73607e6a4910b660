use super::{GraphError, GraphRow, GraphSession, Parameters};
use crate::config::DatabaseConfiguration;
use reqwest::{blocking::Client, header};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// a session on the Neo4j HTTP transactional endpoint.
///
/// every call is one request to `/db/{database}/tx/commit`, which opens a
/// transaction, runs each statement of the request in order and commits, or
/// rolls everything back when any statement fails.
pub struct HttpSession {
    client: Client,
    commit_url: String,
    username: String,
    password: String,
}

#[derive(Serialize)]
struct CommitRequest<'a> {
    statements: Vec<Statement<'a>>,
}

#[derive(Serialize)]
struct Statement<'a> {
    statement: &'a str,
    parameters: &'a Parameters,
}

#[derive(Deserialize)]
struct CommitResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<ResponseError>,
}

#[derive(Deserialize)]
struct StatementResult {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<ResultRow>,
}

#[derive(Deserialize)]
struct ResultRow {
    row: Vec<Value>,
}

#[derive(Deserialize)]
struct ResponseError {
    code: String,
    message: String,
}

impl HttpSession {
    pub fn new(conf: &DatabaseConfiguration) -> Result<HttpSession, GraphError> {
        // the blocking client defaults to a 30 second timeout; without an
        // explicit setting a long transaction is allowed to run to completion
        let client = Client::builder()
            .timeout(conf.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| GraphError::ClientError(e.to_string()))?;
        log::info!(
            "opened graph session on {} (database '{}')",
            conf.endpoint,
            conf.database
        );
        Ok(HttpSession {
            client,
            commit_url: commit_url(&conf.endpoint, &conf.database),
            username: conf.username.clone(),
            password: conf.password.clone(),
        })
    }

    fn commit(&self, statements: Vec<Statement<'_>>) -> Result<Vec<StatementResult>, GraphError> {
        let request = CommitRequest { statements };
        let response = self
            .client
            .post(&self.commit_url)
            .basic_auth(&self.username, Some(&self.password))
            .header(header::ACCEPT, "application/json;charset=UTF-8")
            .json(&request)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(GraphError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        decode_response(&body)
    }
}

impl GraphSession for HttpSession {
    fn run(&mut self, statement: &str) -> Result<(), GraphError> {
        let parameters = Parameters::new();
        self.commit(vec![Statement {
            statement,
            parameters: &parameters,
        }])?;
        Ok(())
    }

    fn write_transaction(
        &mut self,
        query: &str,
        batch: &[Parameters],
    ) -> Result<usize, GraphError> {
        if batch.is_empty() {
            return Ok(0);
        }
        let statements = batch
            .iter()
            .map(|parameters| Statement {
                statement: query,
                parameters,
            })
            .collect();
        let results = self.commit(statements)?;
        Ok(results.len())
    }

    fn query(&mut self, query: &str, parameters: &Parameters) -> Result<Vec<GraphRow>, GraphError> {
        let mut results = self.commit(vec![Statement {
            statement: query,
            parameters,
        }])?;
        match results.pop() {
            Some(result) => Ok(into_rows(result)),
            None => Err(GraphError::DecodeError(String::from(
                "response contained no statement result",
            ))),
        }
    }
}

fn commit_url(endpoint: &str, database: &str) -> String {
    format!("{}/db/{database}/tx/commit", endpoint.trim_end_matches('/'))
}

/// reads a transactional endpoint response body. the endpoint answers 200
/// even when a statement failed, so a non-empty `errors` list is the
/// failure signal. the first error is reported.
fn decode_response(body: &str) -> Result<Vec<StatementResult>, GraphError> {
    let response: CommitResponse =
        serde_json::from_str(body).map_err(|e| GraphError::DecodeError(e.to_string()))?;
    match response.errors.into_iter().next() {
        Some(ResponseError { code, message }) => Err(GraphError::DatabaseError { code, message }),
        None => Ok(response.results),
    }
}

fn into_rows(result: StatementResult) -> Vec<GraphRow> {
    let StatementResult { columns, data } = result;
    data.into_iter()
        .map(|ResultRow { row }| columns.iter().cloned().zip(row).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_commit_url_strips_trailing_slash() {
        assert_eq!(
            commit_url("http://localhost:7474/", "neo4j"),
            "http://localhost:7474/db/neo4j/tx/commit"
        );
    }

    #[test]
    fn test_request_body_has_one_statement_per_record() {
        let first = json!({"agency_id": "1"}).as_object().cloned().unwrap();
        let second = json!({"agency_id": "2"}).as_object().cloned().unwrap();
        let request = CommitRequest {
            statements: vec![
                Statement {
                    statement: "CREATE (:Agency {id: $agency_id})",
                    parameters: &first,
                },
                Statement {
                    statement: "CREATE (:Agency {id: $agency_id})",
                    parameters: &second,
                },
            ],
        };
        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(
            encoded,
            json!({"statements": [
                {"statement": "CREATE (:Agency {id: $agency_id})", "parameters": {"agency_id": "1"}},
                {"statement": "CREATE (:Agency {id: $agency_id})", "parameters": {"agency_id": "2"}},
            ]})
        );
    }

    #[test]
    fn test_decode_rows_by_column() {
        let body = r#"{"results":[{"columns":["id","name"],"data":[
            {"row":["1","Central"],"meta":[null,null]},
            {"row":["2","Harbour"],"meta":[null,null]}]}],"errors":[]}"#;
        let mut results = decode_response(body).unwrap();
        let rows = into_rows(results.pop().unwrap());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), Some(&json!("1")));
        assert_eq!(rows[1].get("name"), Some(&json!("Harbour")));
    }

    #[test]
    fn test_decode_reports_database_error() {
        let body = r#"{"results":[],"errors":[{"code":"Neo.ClientError.Schema.ConstraintValidationFailed","message":"Node(0) already exists with label `Agency` and property `id` = 1"}]}"#;
        let error = decode_response(body).err().unwrap();
        assert!(error.is_constraint_violation());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_response("<html>bad gateway</html>");
        assert!(matches!(result, Err(GraphError::DecodeError(_))));
    }
}
