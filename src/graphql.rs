//! GraphQL-over-HTTP transport for the Clarke API
//!
//! Every operation is a POST of `{query, variables}` to the single API
//! endpoint; responses come back in the standard `{data, errors}` envelope.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::error::Error;

/// The body of an outbound GraphQL request
#[derive(Debug, Serialize)]
struct GraphQlBody<'a> {
    query: &'a str,
    variables: Map<String, Value>,
}

/// A single error entry in the GraphQL response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    /// Human-readable message reported by the API
    pub message: String,
}

/// The standard GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    data: Option<Map<String, Value>>,
    errors: Option<Vec<GraphQlError>>,
}

/// Helper for building and executing GraphQL operations
pub struct GraphQlRequest<'a> {
    client: &'a Client,
    url: String,
    document: &'a str,
    headers: HeaderMap,
    variables: Map<String, Value>,
}

impl<'a> GraphQlRequest<'a> {
    /// Create a new request for one operation document
    pub fn new(client: &'a Client, url: &str, document: &'a str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            document,
            headers,
            variables: Map::new(),
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add bearer token authentication to the request
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("Authorization", &format!("Bearer {}", token))
    }

    /// Bind a variable of the operation
    pub fn variable<T: Serialize>(mut self, name: &str, value: T) -> Result<Self, Error> {
        let value = serde_json::to_value(value)?;
        self.variables.insert(name.to_string(), value);
        Ok(self)
    }

    /// Execute the operation and deserialize the named root field of `data`
    pub async fn execute<T: DeserializeOwned>(self, field: &str) -> Result<T, Error> {
        debug!(url = %self.url, field, "sending GraphQL operation");

        let url = Url::parse(&self.url)?;
        let body = GraphQlBody {
            query: self.document,
            variables: self.variables,
        };

        let response = self
            .client
            .post(url)
            .headers(self.headers)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await?;
            return Err(Error::api(format!(
                "request failed with status {}: {}",
                status, text
            )));
        }

        let envelope = response.json::<GraphQlEnvelope>().await?;

        if let Some(errors) = envelope.errors {
            let joined = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::api(joined));
        }

        let mut data = envelope
            .data
            .ok_or_else(|| Error::api("response carried neither data nor errors"))?;

        let value = data
            .remove(field)
            .ok_or_else(|| Error::api(format!("response data is missing field `{}`", field)))?;

        let result = serde_json::from_value(value)?;
        Ok(result)
    }
}
