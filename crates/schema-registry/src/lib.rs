//! Minimal schema registry client.
//!
//! Fetches the latest registered version of a subject via
//! `GET {endpoint}/subjects/{subject}/versions/latest`, optionally with
//! basic authentication. Only the fields needed to frame payloads (the schema
//! id and the schema text) are kept.

use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

/// Latest version of a subject as returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisteredSchema {
    pub subject: String,
    pub version: u32,
    pub id: u32,
    /// Schema text (JSON for Avro)
    pub schema: String,
}

/// Basic-auth credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SchemaRegistryClient {
    endpoint: Url,
    credentials: Option<Credentials>,
    client: Client,
}

impl SchemaRegistryClient {
    pub fn new(endpoint: &str, credentials: Option<Credentials>) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| anyhow::anyhow!("Invalid schema registry endpoint '{endpoint}': {e}"))?;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            endpoint,
            credentials,
            client,
        })
    }

    /// Fetch the latest schema registered under `subject`.
    pub async fn latest_schema(&self, subject: &str) -> anyhow::Result<RegisteredSchema> {
        let url = latest_version_url(&self.endpoint, subject)?;

        tracing::debug!("Fetching latest schema for subject '{subject}' from {url}");

        let mut request = self.client.get(url.clone());
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to fetch schema '{subject}' from '{url}': {e}"))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(anyhow::anyhow!(
                "Schema registry returned status {status} for subject '{subject}': {url}"
            ));
        }

        let body = response.text().await.map_err(|e| {
            anyhow::anyhow!("Failed to read schema registry response from '{url}': {e}")
        })?;

        let schema = parse_schema_response(&body)?;

        tracing::info!(
            "Retrieved schema '{}' version {} (id {})",
            schema.subject,
            schema.version,
            schema.id
        );

        Ok(schema)
    }
}

/// Build `{endpoint}/subjects/{subject}/versions/latest`, escaping the subject.
pub fn latest_version_url(endpoint: &Url, subject: &str) -> anyhow::Result<Url> {
    let mut url = endpoint.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Schema registry endpoint '{endpoint}' cannot be a base URL"))?
        .pop_if_empty()
        .extend(["subjects", subject, "versions", "latest"]);
    Ok(url)
}

/// Parse the body of a `versions/latest` response.
pub fn parse_schema_response(body: &str) -> anyhow::Result<RegisteredSchema> {
    let schema: RegisteredSchema = serde_json::from_str(body)
        .map_err(|e| anyhow::anyhow!("Invalid schema registry response: {e}"))?;

    if schema.schema.trim().is_empty() {
        return Err(anyhow::anyhow!(
            "Schema registry returned an empty schema for subject '{}'",
            schema.subject
        ));
    }

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_version_url() {
        let endpoint = Url::parse("http://localhost:8081").unwrap();
        let url = latest_version_url(&endpoint, "orders-value").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8081/subjects/orders-value/versions/latest"
        );
    }

    #[test]
    fn test_latest_version_url_with_base_path() {
        let endpoint = Url::parse("https://registry.example.com/api/").unwrap();
        let url = latest_version_url(&endpoint, "a/b").unwrap();
        assert_eq!(
            url.as_str(),
            "https://registry.example.com/api/subjects/a%2Fb/versions/latest"
        );
    }

    #[test]
    fn test_parse_schema_response() {
        let body = r#"{
            "subject": "orders-value",
            "version": 3,
            "id": 1321,
            "schema": "{\"type\":\"record\",\"name\":\"Order\",\"fields\":[]}"
        }"#;
        let schema = parse_schema_response(body).unwrap();

        assert_eq!(schema.subject, "orders-value");
        assert_eq!(schema.version, 3);
        assert_eq!(schema.id, 1321);
        assert!(schema.schema.starts_with("{\"type\":\"record\""));
    }

    #[test]
    fn test_parse_schema_response_ignores_extra_fields() {
        let body = r#"{"subject":"s","version":1,"id":2,"schemaType":"AVRO","schema":"\"int\""}"#;
        assert_eq!(parse_schema_response(body).unwrap().schema, "\"int\"");
    }

    #[test]
    fn test_parse_schema_response_invalid() {
        assert!(parse_schema_response("not json").is_err());
        assert!(parse_schema_response(r#"{"subject":"s","version":1}"#).is_err());

        let empty = parse_schema_response(r#"{"subject":"s","version":1,"id":2,"schema":" "}"#);
        assert!(empty.unwrap_err().to_string().contains("empty schema"));
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(SchemaRegistryClient::new("not a url", None).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_registry() {
        let client = SchemaRegistryClient::new("http://127.0.0.1:1", None).unwrap();
        let err = client.latest_schema("orders-value").await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch schema 'orders-value'"));
    }
}
