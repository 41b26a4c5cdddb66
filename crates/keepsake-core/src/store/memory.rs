//! In-memory object store for tests.
//!
//! Implements the full `ObjectStore` contract against a process-local
//! map so gallery and vault flows can be exercised without network
//! access. Identifiers are random, mirroring the opaque store-assigned
//! ids of the real backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::traits::ObjectStore;
use super::types::{ListFilter, ObjectId, RemoteObject, FOLDER_MIME};
use crate::error::{KeepsakeError, Result};

struct StoredObject {
    meta: RemoteObject,
    parent: Option<ObjectId>,
    bytes: Vec<u8>,
}

/// Test double for the remote object store.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<ObjectId, StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ObjectId, StoredObject>> {
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn fresh_id() -> ObjectId {
        ObjectId::new(Uuid::new_v4().to_string())
    }

    /// Number of objects currently held (folders included).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn find_or_create_folder(&self, name: &str) -> Result<ObjectId> {
        let mut objects = self.lock();

        if let Some(existing) = objects
            .values()
            .find(|o| o.meta.is_folder() && o.meta.name == name)
        {
            return Ok(existing.meta.id.clone());
        }

        let id = Self::fresh_id();
        objects.insert(
            id.clone(),
            StoredObject {
                meta: RemoteObject {
                    id: id.clone(),
                    name: name.to_string(),
                    mime_type: FOLDER_MIME.to_string(),
                    size: None,
                    modified: None,
                },
                parent: None,
                bytes: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn list_folders(&self) -> Result<Vec<RemoteObject>> {
        let objects = self.lock();
        let mut folders: Vec<RemoteObject> = objects
            .values()
            .filter(|o| o.meta.is_folder())
            .map(|o| o.meta.clone())
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }

    async fn list_children(
        &self,
        folder: &ObjectId,
        filter: ListFilter,
    ) -> Result<Vec<RemoteObject>> {
        let objects = self.lock();
        let mut children: Vec<RemoteObject> = objects
            .values()
            .filter(|o| o.parent.as_ref() == Some(folder))
            .filter(|o| filter == ListFilter::All || o.meta.is_image())
            .map(|o| o.meta.clone())
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn upload(
        &self,
        parent: &ObjectId,
        name: &str,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<ObjectId> {
        let mut objects = self.lock();
        if !objects.contains_key(parent) {
            return Err(KeepsakeError::RemoteStore(format!(
                "Upload failed: no such parent {}",
                parent
            )));
        }

        let id = Self::fresh_id();
        objects.insert(
            id.clone(),
            StoredObject {
                meta: RemoteObject {
                    id: id.clone(),
                    name: name.to_string(),
                    mime_type: mime_type.to_string(),
                    size: Some(bytes.len() as u64),
                    modified: None,
                },
                parent: Some(parent.clone()),
                bytes: bytes.to_vec(),
            },
        );
        Ok(id)
    }

    async fn download(&self, id: &ObjectId) -> Result<Vec<u8>> {
        let objects = self.lock();
        objects
            .get(id)
            .map(|o| o.bytes.clone())
            .ok_or_else(|| KeepsakeError::RemoteStore(format!("Download failed: no such object {}", id)))
    }

    async fn delete(&self, id: &ObjectId) -> Result<()> {
        let mut objects = self.lock();
        objects
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| KeepsakeError::RemoteStore(format!("Delete failed: no such object {}", id)))
    }

    async fn copy(&self, id: &ObjectId, destination: &ObjectId) -> Result<ObjectId> {
        let mut objects = self.lock();
        if !objects.contains_key(destination) {
            return Err(KeepsakeError::RemoteStore(format!(
                "Copy failed: no such destination {}",
                destination
            )));
        }

        let source = objects
            .get(id)
            .ok_or_else(|| KeepsakeError::RemoteStore(format!("Copy failed: no such object {}", id)))?;

        let copy_id = Self::fresh_id();
        let copied = StoredObject {
            meta: RemoteObject {
                id: copy_id.clone(),
                ..source.meta.clone()
            },
            parent: Some(destination.clone()),
            bytes: source.bytes.clone(),
        };
        objects.insert(copy_id.clone(), copied);
        Ok(copy_id)
    }
}
