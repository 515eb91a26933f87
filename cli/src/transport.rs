//! GraphQL-over-HTTP query transport.

use agora_governance::{Query, QueryTransport, Selection, TransportError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// Executes queries against a GraphQL endpoint such as a subgraph.
///
/// Wraps `reqwest::Client` with the endpoint URL.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TransportError::Request(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    async fn execute(&self, query: &Query) -> Result<Value, TransportError> {
        let text = render_graphql(query);
        tracing::debug!(url = %self.url, query = %text, "executing query");

        let response = self
            .http
            .post(&self.url)
            .json(&json!({ "query": text }))
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }

        let mut body: Value = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let messages: Vec<&str> = errors
                    .iter()
                    .filter_map(|e| e.get("message").and_then(Value::as_str))
                    .collect();
                return Err(TransportError::Query(messages.join("; ")));
            }
        }

        match body.get_mut("data").map(Value::take) {
            Some(Value::Null) | None => Err(TransportError::Decode("response has no `data`".into())),
            Some(data) => Ok(data),
        }
    }
}

/// Render a query descriptor as a GraphQL document.
pub fn render_graphql(query: &Query) -> String {
    let mut out = String::from("query {");
    for selection in &query.selections {
        out.push(' ');
        render_selection(selection, &mut out);
    }
    out.push_str(" }");
    out
}

fn render_selection(selection: &Selection, out: &mut String) {
    out.push_str(&selection.name);
    if !selection.args.is_empty() {
        let args: Vec<String> = selection
            .args
            .iter()
            .map(|(name, value)| format!("{name}: {}", render_value(value)))
            .collect();
        out.push('(');
        out.push_str(&args.join(", "));
        out.push(')');
    }
    if !selection.fields.is_empty() {
        out.push_str(" {");
        for field in &selection.fields {
            out.push(' ');
            render_selection(field, out);
        }
        out.push_str(" }");
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // JSON string escaping is valid GraphQL string escaping.
        Value::String(_) => value.to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{k}: {}", render_value(v)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_governance::{create_standard_config, DelegatesQueryParams, StandardStrategy};

    #[test]
    fn test_render_delegates_query() {
        let config = create_standard_config("compound-governor").unwrap();
        let query = config.delegates_query(&DelegatesQueryParams::page(10, 20));
        assert_eq!(
            render_graphql(&query),
            "query { delegates(first: 10, skip: 20, orderBy: \"delegatedVotes\", \
             orderDirection: \"desc\", where: {}) { id delegatedVotes tokenHoldersRepresentedAmount } \
             governance(id: \"GOVERNANCE\") { delegatedVotes totalTokenHolders totalDelegates } }"
        );
    }

    #[test]
    fn test_render_where_clause() {
        let config = create_standard_config("compound-governor").unwrap();
        let query = config.delegates_query(&DelegatesQueryParams::page(1, 0).with_id("0xab"));
        assert!(render_graphql(&query).contains("where: {id: \"0xab\"}"));
    }

    #[test]
    fn test_render_escapes_strings() {
        let query = Query::new().with_selection(
            Selection::new("delegate")
                .with_arg("id", "a\"b")
                .with_fields(&["id"]),
        );
        assert_eq!(render_graphql(&query), "query { delegate(id: \"a\\\"b\") { id } }");
    }

    #[test]
    fn test_render_scalars_and_lists() {
        assert_eq!(render_value(&json!([1, true, null])), "[1, true, null]");
    }
}
