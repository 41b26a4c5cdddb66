//! Object store trait definition.
//!
//! The `ObjectStore` trait defines the interface to the remote
//! file-hosting service. This abstraction keeps the gallery and vault
//! components independent of the concrete backend (Google Drive in
//! production, an in-memory store in tests).

use async_trait::async_trait;

use super::types::{ListFilter, ObjectId, RemoteObject};
use crate::error::Result;

/// Remote object store interface.
///
/// All implementations must ensure:
/// - Identifiers are opaque and store-assigned
/// - Every failed call surfaces as `KeepsakeError::RemoteStore`
/// - No call is retried; a failure is terminal for that operation
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Find a folder by exact name, creating it if absent.
    ///
    /// # Returns
    ///
    /// Returns the identifier of the existing or newly created folder.
    async fn find_or_create_folder(&self, name: &str) -> Result<ObjectId>;

    /// List every folder the credential can see.
    async fn list_folders(&self) -> Result<Vec<RemoteObject>>;

    /// List the children of a folder, name-ordered.
    ///
    /// # Arguments
    ///
    /// * `folder` - Parent folder identifier
    /// * `filter` - Restrict results (e.g. images only)
    async fn list_children(&self, folder: &ObjectId, filter: ListFilter)
        -> Result<Vec<RemoteObject>>;

    /// Upload a new object under the given parent.
    ///
    /// # Returns
    ///
    /// Returns the store-assigned identifier of the created object.
    async fn upload(
        &self,
        parent: &ObjectId,
        name: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<ObjectId>;

    /// Download the full content of an object.
    async fn download(&self, id: &ObjectId) -> Result<Vec<u8>>;

    /// Delete an object.
    async fn delete(&self, id: &ObjectId) -> Result<()>;

    /// Copy an object into another folder.
    ///
    /// # Returns
    ///
    /// Returns the identifier of the copy.
    async fn copy(&self, id: &ObjectId, destination: &ObjectId) -> Result<ObjectId>;
}
