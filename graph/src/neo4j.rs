use crate::models::{Row, StoreError};
use crate::store::GraphStore;
use config::{ConfigError, GraphConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info};

/// Graph store backed by the Neo4j HTTP transactional endpoint.
///
/// One pooled client is created by [`Neo4jStore::connect`] and released by
/// [`Neo4jStore::close`]; every query runs in its own auto-commit
/// transaction.
pub struct Neo4jStore {
    client: reqwest::Client,
    commit_url: String,
    user: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct TxRequest<'a> {
    statements: Vec<Statement<'a>>,
}

#[derive(Debug, Serialize)]
struct Statement<'a> {
    statement: &'a str,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl Neo4jStore {
    pub fn connect(config: &GraphConfig) -> Result<Self, ConfigError> {
        if !config.db_type.eq_ignore_ascii_case("neo4j") {
            error!(db_type = %config.db_type, "Unsupported GRAPH_DB_TYPE");
            return Err(ConfigError::UnsupportedGraphDb(config.db_type.clone()));
        }

        let uri = config.uri.as_deref().ok_or(ConfigError::Missing("NEO4J_URI"))?;
        if !(uri.starts_with("http://") || uri.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "NEO4J_URI",
                value: uri.to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::Invalid {
                key: "NEO4J_URI",
                value: e.to_string(),
            })?;

        let commit_url = format!(
            "{}/db/{}/tx/commit",
            uri.trim_end_matches('/'),
            config.database
        );
        info!(url = %commit_url, "Connected to Neo4j");

        Ok(Neo4jStore {
            client,
            commit_url,
            user: config.user.clone(),
            password: config.password.clone(),
        })
    }

    /// Releases the connection pool. The store cannot be used afterwards.
    pub fn close(self) {
        drop(self.client);
        info!("Closed Neo4j connection");
    }

    async fn execute(&self, query: &str, parameters: Value) -> Result<Vec<Row>, StoreError> {
        let body = TxRequest {
            statements: vec![Statement {
                statement: query,
                parameters,
            }],
        };

        let mut request = self.client.post(&self.commit_url).json(&body);
        if let Some(user) = &self.user {
            request = request.basic_auth(user, self.password.as_ref());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let tx: TxResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        rows_from_response(tx)
    }
}

impl GraphStore for Neo4jStore {
    async fn run(&self, query: &str, parameters: Value) -> Result<Vec<Row>, StoreError> {
        match self.execute(query, parameters).await {
            Ok(rows) => {
                info!(query = %query, rows = rows.len(), "Executed query");
                Ok(rows)
            }
            Err(e) => {
                error!(error = %e, "Query execution failed");
                Err(e)
            }
        }
    }
}

fn rows_from_response(tx: TxResponse) -> Result<Vec<Row>, StoreError> {
    if let Some(err) = tx.errors.into_iter().next() {
        return Err(StoreError::Query {
            code: err.code,
            message: err.message,
        });
    }

    let Some(result) = tx.results.into_iter().next() else {
        return Ok(Vec::new());
    };

    result
        .data
        .into_iter()
        .map(|data| {
            if data.row.len() != result.columns.len() {
                return Err(StoreError::Malformed(format!(
                    "row has {} values for {} columns",
                    data.row.len(),
                    result.columns.len()
                )));
            }
            Ok(result
                .columns
                .iter()
                .cloned()
                .zip(data.row)
                .collect::<Map<String, Value>>())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<Vec<Row>, StoreError> {
        rows_from_response(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn rows_keep_column_order() {
        let rows = parse(json!({
            "results": [{
                "columns": ["user_message", "system_message"],
                "data": [{"row": ["Explain Amoxicillin.", "You are a pharmacist."], "meta": [null, null]}]
            }],
            "errors": []
        }))
        .unwrap();

        assert_eq!(rows.len(), 1);
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, ["user_message", "system_message"]);
        assert_eq!(rows[0]["system_message"], "You are a pharmacist.");
    }

    #[test]
    fn no_data_is_an_empty_result() {
        let rows = parse(json!({
            "results": [{"columns": ["system_message", "user_message"], "data": []}],
            "errors": []
        }))
        .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn server_errors_are_surfaced() {
        let err = parse(json!({
            "results": [],
            "errors": [{"code": "Neo.ClientError.Statement.SyntaxError", "message": "Invalid input"}]
        }))
        .unwrap_err();
        assert!(matches!(err, StoreError::Query { ref code, .. } if code == "Neo.ClientError.Statement.SyntaxError"));
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let err = parse(json!({
            "results": [{"columns": ["a", "b"], "data": [{"row": [1]}]}],
            "errors": []
        }))
        .unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }

    #[test]
    fn connect_rejects_other_databases() {
        let config = GraphConfig {
            db_type: "arangodb".to_string(),
            uri: Some("http://localhost:8529".to_string()),
            ..GraphConfig::default()
        };
        assert!(matches!(
            Neo4jStore::connect(&config),
            Err(ConfigError::UnsupportedGraphDb(ref t)) if t == "arangodb"
        ));
    }

    #[test]
    fn connect_requires_http_uri() {
        let missing = GraphConfig::default();
        assert!(matches!(
            Neo4jStore::connect(&missing),
            Err(ConfigError::Missing("NEO4J_URI"))
        ));

        let bolt = GraphConfig {
            uri: Some("neo4j+s://example.databases.neo4j.io".to_string()),
            ..GraphConfig::default()
        };
        assert!(matches!(
            Neo4jStore::connect(&bolt),
            Err(ConfigError::Invalid { key: "NEO4J_URI", .. })
        ));
    }
}
