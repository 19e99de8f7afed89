//! Blocking client for the inventory storage API

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::core::{
    Application, ApplicationOutcome, Config, EntityKind, Inventory, Server, TestAllEntry,
    TestOutcome,
};
use crate::import::Record;

/// Errors surfaced by storage API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service could not be reached at all (connect/timeout/decode)
    #[error("failed to reach inventory service: {0}")]
    Transport(String),

    /// The service answered with a non-success status; carries the body's
    /// `detail`/`error` string when one is present, else a generic message
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, serde::Deserialize)]
struct TestAllResponse {
    #[serde(default)]
    results: Vec<TestAllEntry>,
}

/// Client for the inventory service. One instance per CLI invocation.
pub struct StorageClient {
    http: reqwest::blocking::Client,
    base: String,
}

impl StorageClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base: config.api_url(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    /// Turn a non-success response into a `Rejected` error, mining the body
    /// for a `detail` or `error` string and tolerating non-JSON bodies.
    fn rejection(resp: reqwest::blocking::Response, fallback: &str) -> ApiError {
        let detail = resp
            .text()
            .ok()
            .and_then(|body| serde_json::from_str::<Value>(&body).ok())
            .and_then(|v| {
                v.get("detail")
                    .or_else(|| v.get("error"))
                    .and_then(|d| d.as_str())
                    .map(|s| s.to_string())
            });
        ApiError::Rejected(detail.unwrap_or_else(|| fallback.to_string()))
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let resp = self
            .http
            .get(self.url(path))
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp, fallback));
        }
        resp.json().map_err(|e| ApiError::Transport(e.to_string()))
    }

    pub fn list_servers(&self) -> Result<Vec<Server>, ApiError> {
        self.get_json("servers", "Failed to load servers")
    }

    pub fn list_applications(&self) -> Result<Vec<Application>, ApiError> {
        self.get_json("applications", "Failed to load applications")
    }

    /// Fetch both collections; returns only once both legs have completed
    pub fn load_inventory(&self) -> Result<Inventory, ApiError> {
        let servers = self.list_servers()?;
        let applications = self.list_applications()?;
        Ok(Inventory::new(servers, applications))
    }

    /// Partial update of one entity (`PUT /{collection}/{id}`)
    pub fn update(
        &self,
        kind: EntityKind,
        id: i64,
        fields: &Map<String, Value>,
    ) -> Result<(), ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("{}/{}", kind.collection(), id)))
            .json(fields)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::rejection(
                resp,
                &format!("Failed to update {}", kind.as_str()),
            ));
        }
        Ok(())
    }

    pub fn delete(&self, kind: EntityKind, id: i64) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("{}/{}", kind.collection(), id)))
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::rejection(
                resp,
                &format!("Failed to delete {}", kind.as_str()),
            ));
        }
        Ok(())
    }

    /// One batched update across the selected servers
    /// (`PUT /servers/bulk-update`)
    pub fn bulk_update(
        &self,
        server_ids: &[i64],
        updates: &Map<String, Value>,
    ) -> Result<(), ApiError> {
        let body = json!({
            "server_ids": server_ids,
            "updates": updates,
        });
        let resp = self
            .http
            .put(self.url("servers/bulk-update"))
            .json(&body)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp, "Failed to update servers"));
        }
        Ok(())
    }

    /// Submit one import batch. The response payload is not trusted to
    /// enumerate created rows; callers refetch the collection on success.
    pub fn import(&self, kind: EntityKind, records: &[Record]) -> Result<(), ApiError> {
        let body = json!({ "data": records });
        let resp = self
            .http
            .post(self.url(&format!("{}/import", kind.collection())))
            .json(&body)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp, "Import failed"));
        }
        Ok(())
    }

    pub fn test_server(&self, id: i64) -> Result<TestOutcome, ApiError> {
        let resp = self
            .http
            .post(self.url(&format!("servers/{id}/test")))
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp, "Server test failed"));
        }
        resp.json().map_err(|e| ApiError::Transport(e.to_string()))
    }

    pub fn test_application(&self, id: i64) -> Result<ApplicationOutcome, ApiError> {
        let resp = self
            .http
            .post(self.url(&format!("applications/{id}/test")))
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp, "Application test failed"));
        }
        resp.json().map_err(|e| ApiError::Transport(e.to_string()))
    }

    /// Collection-wide probe (`POST /{collection}/test-all`)
    pub fn test_all(&self, kind: EntityKind) -> Result<Vec<TestAllEntry>, ApiError> {
        let fallback = format!("Failed to test {}", kind.collection());
        let resp = self
            .http
            .post(self.url(&format!("{}/test-all", kind.collection())))
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp, &fallback));
        }
        let parsed: TestAllResponse =
            resp.json().map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(parsed.results)
    }
}
