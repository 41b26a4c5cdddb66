//! Google Drive v3 implementation of the object store.
//!
//! Every operation is one HTTP round trip authenticated with a bearer
//! token from the configured `TokenProvider`. Responses are treated
//! uniformly: anything other than an HTTP success maps to
//! `KeepsakeError::RemoteStore` and is never retried here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use tracing::debug;

use super::credential::TokenProvider;
use super::traits::ObjectStore;
use super::types::{ListFilter, ObjectId, RemoteObject, FOLDER_MIME, IMAGE_MIME_TYPES};
use crate::error::{KeepsakeError, Result};

const API_BASE: &str = "https://www.googleapis.com/drive/v3";
const UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

const LIST_FIELDS: &str = "files(id,name,mimeType,size,modifiedTime)";

/// Drive-backed object store.
pub struct DriveStore {
    http: reqwest::Client,
    tokens: Box<dyn TokenProvider>,
}

impl DriveStore {
    pub fn new(tokens: Box<dyn TokenProvider>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("keepsake/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { http, tokens }
    }

    async fn auth_header(&self) -> Result<HeaderValue> {
        let token = self.tokens.access_token().await?;
        let mut value =
            HeaderValue::from_str(&format!("Bearer {}", token.bearer())).map_err(|_| {
                KeepsakeError::Credential(
                    "Access token contains characters not allowed in a header".to_string(),
                )
            })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Send a request and collapse every failure mode into a uniform
    /// `RemoteStore` error tagged with the operation name.
    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> Result<reqwest::Response> {
        let auth = self.auth_header().await?;
        let response = request
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| KeepsakeError::RemoteStore(format!("{} request failed: {}", what, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KeepsakeError::RemoteStore(format!(
                "{} failed with HTTP {}",
                what, status
            )));
        }
        Ok(response)
    }

    async fn list_query(&self, query: &str, order_by: Option<&str>) -> Result<Vec<RemoteObject>> {
        let mut params = vec![("q", query.to_string()), ("fields", LIST_FIELDS.to_string())];
        if let Some(order) = order_by {
            params.push(("orderBy", order.to_string()));
        }

        let response = self
            .send(
                self.http.get(format!("{}/files", API_BASE)).query(&params),
                "List",
            )
            .await?;

        let listing: FileList = response
            .json()
            .await
            .map_err(|e| KeepsakeError::RemoteStore(format!("List response unreadable: {}", e)))?;

        Ok(listing.files.into_iter().map(RemoteObject::from).collect())
    }
}

#[async_trait]
impl ObjectStore for DriveStore {
    async fn find_or_create_folder(&self, name: &str) -> Result<ObjectId> {
        let existing = self.list_query(&folder_query(name), None).await?;
        if let Some(folder) = existing.into_iter().next() {
            debug!(folder = name, id = %folder.id, "found existing folder");
            return Ok(folder.id);
        }

        let metadata = serde_json::json!({
            "name": name,
            "mimeType": FOLDER_MIME,
        });
        let response = self
            .send(
                self.http
                    .post(format!("{}/files", API_BASE))
                    .query(&[("fields", "id")])
                    .json(&metadata),
                "Create folder",
            )
            .await?;

        let created: CreatedFile = response.json().await.map_err(|e| {
            KeepsakeError::RemoteStore(format!("Create folder response unreadable: {}", e))
        })?;
        debug!(folder = name, id = %created.id, "created folder");
        Ok(ObjectId::new(created.id))
    }

    async fn list_folders(&self) -> Result<Vec<RemoteObject>> {
        let query = format!("mimeType='{}' and trashed=false", FOLDER_MIME);
        self.list_query(&query, Some("name")).await
    }

    async fn list_children(
        &self,
        folder: &ObjectId,
        filter: ListFilter,
    ) -> Result<Vec<RemoteObject>> {
        self.list_query(&children_query(folder, filter), Some("name"))
            .await
    }

    async fn upload(
        &self,
        parent: &ObjectId,
        name: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<ObjectId> {
        let metadata = upload_metadata(name, parent);
        let metadata_part = reqwest::multipart::Part::text(metadata.to_string())
            .mime_str("application/json")
            .map_err(|e| KeepsakeError::InvalidInput(format!("Invalid metadata part: {}", e)))?;
        let file_part = reqwest::multipart::Part::bytes(bytes.to_vec())
            .file_name(name.to_string())
            .mime_str(mime_type)
            .map_err(|e| KeepsakeError::InvalidInput(format!("Invalid MIME type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("metadata", metadata_part)
            .part("file", file_part);

        let response = self
            .send(
                self.http
                    .post(format!("{}/files", UPLOAD_BASE))
                    .query(&[("uploadType", "multipart"), ("fields", "id")])
                    .multipart(form),
                "Upload",
            )
            .await?;

        let created: CreatedFile = response
            .json()
            .await
            .map_err(|e| KeepsakeError::RemoteStore(format!("Upload response unreadable: {}", e)))?;
        debug!(name, id = %created.id, size = bytes.len(), "uploaded object");
        Ok(ObjectId::new(created.id))
    }

    async fn download(&self, id: &ObjectId) -> Result<Vec<u8>> {
        let response = self
            .send(
                self.http
                    .get(format!("{}/files/{}", API_BASE, id))
                    .query(&[("alt", "media")]),
                "Download",
            )
            .await?;

        let bytes = response.bytes().await.map_err(|e| {
            KeepsakeError::RemoteStore(format!("Download body unreadable: {}", e))
        })?;
        debug!(id = %id, size = bytes.len(), "downloaded object");
        Ok(bytes.to_vec())
    }

    async fn delete(&self, id: &ObjectId) -> Result<()> {
        self.send(
            self.http.delete(format!("{}/files/{}", API_BASE, id)),
            "Delete",
        )
        .await?;
        debug!(id = %id, "deleted object");
        Ok(())
    }

    async fn copy(&self, id: &ObjectId, destination: &ObjectId) -> Result<ObjectId> {
        let metadata = serde_json::json!({ "parents": [destination.as_str()] });
        let response = self
            .send(
                self.http
                    .post(format!("{}/files/{}/copy", API_BASE, id))
                    .query(&[("fields", "id")])
                    .json(&metadata),
                "Copy",
            )
            .await?;

        let created: CreatedFile = response
            .json()
            .await
            .map_err(|e| KeepsakeError::RemoteStore(format!("Copy response unreadable: {}", e)))?;
        debug!(id = %id, copy = %created.id, "copied object");
        Ok(ObjectId::new(created.id))
    }
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    name: String,
    #[serde(default)]
    mime_type: Option<String>,
    /// Drive serializes sizes as decimal strings
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    modified_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

impl From<DriveFile> for RemoteObject {
    fn from(file: DriveFile) -> Self {
        Self {
            id: ObjectId::new(file.id),
            name: file.name,
            mime_type: file.mime_type.unwrap_or_default(),
            size: file.size.and_then(|s| s.parse().ok()),
            modified: file.modified_time,
        }
    }
}

// --- Query building ---

/// Escape a value for interpolation into a Drive query string.
fn escape_query(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn folder_query(name: &str) -> String {
    format!(
        "name='{}' and mimeType='{}' and trashed=false",
        escape_query(name),
        FOLDER_MIME
    )
}

fn children_query(folder: &ObjectId, filter: ListFilter) -> String {
    let mut query = format!("'{}' in parents and trashed=false", escape_query(folder.as_str()));
    if filter == ListFilter::ImagesOnly {
        let images = IMAGE_MIME_TYPES
            .iter()
            .map(|mime| format!("mimeType='{}'", mime))
            .collect::<Vec<_>>()
            .join(" or ");
        query.push_str(&format!(" and ({})", images));
    }
    query
}

fn upload_metadata(name: &str, parent: &ObjectId) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "parents": [parent.as_str()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_query() {
        assert_eq!(escape_query("plain"), "plain");
        assert_eq!(escape_query("it's"), "it\\'s");
        assert_eq!(escape_query("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_folder_query() {
        assert_eq!(
            folder_query("Encrypted-Drive"),
            "name='Encrypted-Drive' and mimeType='application/vnd.google-apps.folder' \
             and trashed=false"
        );
    }

    #[test]
    fn test_children_query_all() {
        let query = children_query(&ObjectId::new("abc123"), ListFilter::All);
        assert_eq!(query, "'abc123' in parents and trashed=false");
    }

    #[test]
    fn test_children_query_images_names_every_type() {
        let query = children_query(&ObjectId::new("abc123"), ListFilter::ImagesOnly);
        assert!(query.starts_with("'abc123' in parents and trashed=false and ("));
        for mime in IMAGE_MIME_TYPES {
            assert!(query.contains(&format!("mimeType='{}'", mime)));
        }
    }

    #[test]
    fn test_upload_metadata_shape() {
        let metadata = upload_metadata("photo.jpg", &ObjectId::new("parent-1"));
        assert_eq!(metadata["name"], "photo.jpg");
        assert_eq!(metadata["parents"][0], "parent-1");
    }

    #[test]
    fn test_drive_file_conversion() {
        let file: DriveFile = serde_json::from_str(
            r#"{
                "id": "f1",
                "name": "photo.jpg",
                "mimeType": "image/jpeg",
                "size": "2048",
                "modifiedTime": "2024-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        let object = RemoteObject::from(file);
        assert_eq!(object.id.as_str(), "f1");
        assert_eq!(object.mime_type, "image/jpeg");
        assert_eq!(object.size, Some(2048));
        assert!(object.modified.is_some());
        assert!(object.is_image());
    }

    #[test]
    fn test_drive_file_minimal_fields() {
        let file: DriveFile = serde_json::from_str(r#"{"id": "f2", "name": "x"}"#).unwrap();
        let object = RemoteObject::from(file);
        assert_eq!(object.mime_type, "");
        assert_eq!(object.size, None);
    }
}
