//! Client for the generic object datastore service.

use crate::error::{DatastoreError, Result};
use crate::types::Items;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Object type discriminator carried on every datastore call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjType {
    Playlist,
    Music,
}

impl ObjType {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjType::Playlist => "playlist",
            ObjType::Music => "music",
        }
    }
}

/// Client for the datastore collaborator.
///
/// Holds an immutable base URL and a pooled HTTP client; cheap to clone
/// and safe to share across request handlers.
///
/// # Example
///
/// ```ignore
/// let client = DatastoreClient::new("http://cmpt756db:30002/api/v1/datastore")?;
/// let songs: Vec<Song> = client.read_all(ObjType::Music).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DatastoreClient {
    http: Client,
    base_url: String,
}

impl DatastoreClient {
    /// Create a new client for the given datastore base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(DatastoreError::InvalidUrl("URL cannot be empty".into()));
        }

        // Normalize so endpoint paths can be appended directly
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(DatastoreError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(DatastoreError::Request)?;

        Ok(Self { http, base_url })
    }

    /// The datastore base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read the records matching a single key.
    ///
    /// The datastore answers with an `Items` envelope even for keyed
    /// reads; a missing record is an empty list, not an error.
    pub async fn read<T: DeserializeOwned>(&self, objtype: ObjType, objkey: &str) -> Result<Vec<T>> {
        let url = format!("{}/read", self.base_url);
        debug!(url = %url, objtype = objtype.as_str(), objkey, "Datastore read");

        let response = self
            .http
            .get(&url)
            .query(&[("objtype", objtype.as_str()), ("objkey", objkey)])
            .send()
            .await
            .map_err(map_send_error)?;

        parse_items(response).await
    }

    /// Read every record of the given type.
    pub async fn read_all<T: DeserializeOwned>(&self, objtype: ObjType) -> Result<Vec<T>> {
        let url = format!("{}/read_all", self.base_url);
        debug!(url = %url, objtype = objtype.as_str(), "Datastore read_all");

        let response = self
            .http
            .get(&url)
            .query(&[("objtype", objtype.as_str())])
            .send()
            .await
            .map_err(map_send_error)?;

        parse_items(response).await
    }

    /// Create a record, returning the datastore's response as-is.
    ///
    /// The record is serialized to a JSON object and the `objtype`
    /// discriminator is injected alongside its fields, which is how the
    /// write endpoint expects it.
    pub async fn write<B: Serialize>(&self, objtype: ObjType, record: &B) -> Result<Value> {
        let mut body = serde_json::to_value(record)
            .map_err(|e| DatastoreError::InvalidRecord(e.to_string()))?;
        body.as_object_mut()
            .ok_or_else(|| DatastoreError::InvalidRecord("expected a JSON object".into()))?
            .insert("objtype".to_string(), Value::from(objtype.as_str()));

        let url = format!("{}/write", self.base_url);
        debug!(url = %url, objtype = objtype.as_str(), "Datastore write");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        parse_value(response).await
    }

    /// Update selected fields of an existing record.
    pub async fn update<B: Serialize>(
        &self,
        objtype: ObjType,
        objkey: &str,
        changes: &B,
    ) -> Result<Value> {
        let url = format!("{}/update", self.base_url);
        debug!(url = %url, objtype = objtype.as_str(), objkey, "Datastore update");

        let response = self
            .http
            .put(&url)
            .query(&[("objtype", objtype.as_str()), ("objkey", objkey)])
            .json(changes)
            .send()
            .await
            .map_err(map_send_error)?;

        parse_value(response).await
    }

    /// Delete a record by key.
    pub async fn delete(&self, objtype: ObjType, objkey: &str) -> Result<()> {
        let url = format!("{}/delete", self.base_url);
        debug!(url = %url, objtype = objtype.as_str(), objkey, "Datastore delete");

        let response = self
            .http
            .delete(&url)
            .query(&[("objtype", objtype.as_str()), ("objkey", objkey)])
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(status_error(status, response).await)
        }
    }
}

fn map_send_error(e: reqwest::Error) -> DatastoreError {
    if e.is_connect() || e.is_timeout() {
        DatastoreError::Unreachable(e.to_string())
    } else {
        DatastoreError::Request(e)
    }
}

async fn status_error(status: reqwest::StatusCode, response: reqwest::Response) -> DatastoreError {
    let message = response.text().await.unwrap_or_default();
    DatastoreError::Status {
        status: status.as_u16(),
        message,
    }
}

async fn parse_items<T: DeserializeOwned>(response: reqwest::Response) -> Result<Vec<T>> {
    let status = response.status();
    if status.is_success() {
        let envelope: Items<T> = response
            .json()
            .await
            .map_err(|e| DatastoreError::Parse(format!("Failed to parse Items envelope: {}", e)))?;
        Ok(envelope.items)
    } else {
        Err(status_error(status, response).await)
    }
}

async fn parse_value(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| DatastoreError::Parse(format!("Failed to parse response body: {}", e)))
    } else {
        Err(status_error(status, response).await)
    }
}
