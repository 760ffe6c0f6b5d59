use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, Request};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::query::{Filter, Operation, Query};
use crate::domain::store::{RecordStore, StoreError, StoreResult};

/// Media type asking the store for one object instead of an array
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Error body returned by the store on rejected queries
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Record store client speaking the PostgREST dialect of a hosted database
///
/// Every query becomes one HTTP request against `{base_url}/rest/v1/{table}`,
/// authenticated with the project's access key.
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    /// Creates a new PostgrestStore
    ///
    /// # Arguments
    /// * `base_url` - Project URL of the hosted store
    /// * `api_key` - Access key sent with every request
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn headers(&self, query: &Query) -> StoreResult<HeaderMap> {
        let invalid = |e: reqwest::header::InvalidHeaderValue| {
            StoreError::Transport(format!("Invalid access key: {}", e))
        };

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&self.api_key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(invalid)?,
        );
        if query.single {
            headers.insert(ACCEPT, HeaderValue::from_static(SINGLE_OBJECT));
        }
        if query.operation.is_write() {
            let prefer = if query.returning {
                "return=representation"
            } else {
                "return=minimal"
            };
            headers.insert("prefer", HeaderValue::from_static(prefer));
        }

        Ok(headers)
    }

    /// Translates a query into the HTTP request the store expects
    pub fn build_request(&self, query: &Query) -> StoreResult<Request> {
        let method = match query.operation {
            Operation::Select => Method::GET,
            Operation::Insert(_) => Method::POST,
            Operation::Update(_) => Method::PATCH,
            Operation::Delete => Method::DELETE,
        };

        let mut params: Vec<(String, String)> = Vec::new();
        if !query.operation.is_write() || query.returning {
            params.push(("select".to_string(), "*".to_string()));
        }
        params.extend(query.filters.iter().map(filter_param));
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        let mut builder = self
            .client
            .request(method, self.table_url(&query.table))
            .headers(self.headers(query)?)
            .query(&params);

        builder = match &query.operation {
            Operation::Insert(rows) => builder.json(rows),
            Operation::Update(changes) => builder.json(changes),
            Operation::Select | Operation::Delete => builder,
        };

        builder
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))
    }
}

/// Renders a predicate as a `column=operator.value` query parameter
fn filter_param(filter: &Filter) -> (String, String) {
    let value = match filter {
        Filter::Eq { value, .. } => format!("eq.{}", value),
        Filter::Contains { values, .. } => {
            let quoted: Vec<String> = values
                .iter()
                .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
                .collect();
            format!("cs.{{{}}}", quoted.join(","))
        }
    };
    (filter.column().to_string(), value)
}

/// Extracts the store's message from a rejection body
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl RecordStore for PostgrestStore {
    async fn execute(&self, query: Query) -> StoreResult<Vec<Value>> {
        let request = self.build_request(&query)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(table = %query.table, status = status.as_u16(), "store rejected query");
            return Err(StoreError::rejected(status.as_u16(), rejection_message(&body)));
        }

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&body)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            row => Ok(vec![row]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::{COURSES_TABLE, STUDENTS_TABLE};
    use serde_json::json;

    fn store() -> PostgrestStore {
        PostgrestStore::new("https://project.example.co/", "anon-key")
    }

    fn param(request: &Request, name: &str) -> Option<String> {
        request
            .url()
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn select_targets_table_endpoint_with_auth_headers() {
        let request = store().build_request(&Query::select(COURSES_TABLE)).unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().path(), "/rest/v1/courses");
        assert_eq!(param(&request, "select").as_deref(), Some("*"));
        assert_eq!(request.headers()["apikey"], "anon-key");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer anon-key");
        assert!(request.headers().get("prefer").is_none());
    }

    #[test]
    fn filters_become_operator_params() {
        let query = Query::select(STUDENTS_TABLE)
            .contains("courses", ["Math"])
            .eq("cohort", "2023");
        let request = store().build_request(&query).unwrap();

        assert_eq!(param(&request, "courses").as_deref(), Some("cs.{\"Math\"}"));
        assert_eq!(param(&request, "cohort").as_deref(), Some("eq.2023"));
    }

    #[test]
    fn single_row_asks_for_an_object() {
        let query = Query::select(STUDENTS_TABLE).eq("id", "5").single();
        let request = store().build_request(&query).unwrap();

        assert_eq!(request.headers()[ACCEPT], SINGLE_OBJECT);
        assert_eq!(param(&request, "id").as_deref(), Some("eq.5"));
    }

    #[test]
    fn insert_without_returning_is_minimal() {
        let query = Query::insert(STUDENTS_TABLE, vec![json!({"student_name": "Ada"})]);
        let request = store().build_request(&query).unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.headers()["prefer"], "return=minimal");
        assert_eq!(param(&request, "select"), None);

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let sent: Value = serde_json::from_slice(body).unwrap();
        assert_eq!(sent, json!([{"student_name": "Ada"}]));
    }

    #[test]
    fn update_sends_nulls_and_returns_representation() {
        let query = Query::update(STUDENTS_TABLE, json!({"student_name": "Ada", "cohort": null}))
            .eq("id", "5")
            .returning();
        let request = store().build_request(&query).unwrap();

        assert_eq!(request.method(), &Method::PATCH);
        assert_eq!(request.headers()["prefer"], "return=representation");
        assert_eq!(param(&request, "select").as_deref(), Some("*"));

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let sent: Value = serde_json::from_slice(body).unwrap();
        assert!(sent["cohort"].is_null());
    }

    #[test]
    fn delete_with_limit() {
        let query = Query::delete(COURSES_TABLE).eq("id", "3").limit(1);
        let request = store().build_request(&query).unwrap();

        assert_eq!(request.method(), &Method::DELETE);
        assert_eq!(param(&request, "limit").as_deref(), Some("1"));
    }

    #[test]
    fn contains_values_are_quoted() {
        let (_, value) = filter_param(&Filter::Contains {
            column: "courses".to_string(),
            values: vec!["Art, Modern".to_string(), "Say \"hi\"".to_string()],
        });
        assert_eq!(value, r#"cs.{"Art, Modern","Say \"hi\""}"#);
    }

    #[test]
    fn rejection_message_prefers_store_message() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        assert_eq!(
            rejection_message(body),
            "JSON object requested, multiple (or no) rows returned"
        );
        assert_eq!(rejection_message("Bad Gateway"), "Bad Gateway");
    }
}
