//! Encrypted file storage in a dedicated remote folder.
//!
//! The vault ties the payload codec to the object store: `put` seals a
//! local file into a payload string and uploads it as an opaque blob,
//! `get` downloads a payload and opens it back into bytes plus the
//! original content type. Each operation is a sequence of awaited steps
//! with no retries; a failure anywhere aborts the rest of the sequence
//! (a partial upload is not rolled back).

use crate::crypto;
use crate::error::{KeepsakeError, Result};
use crate::store::{ListFilter, ObjectId, ObjectStore, RemoteObject};

/// Default name of the remote folder holding encrypted payloads.
pub const DEFAULT_VAULT_FOLDER: &str = "Encrypted-Drive";

/// MIME type payloads are stored under; the real content type lives
/// inside the payload.
pub const PAYLOAD_MIME: &str = "application/octet-stream";

/// A decrypted file ready to be written locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Handle to the encrypted-files folder of a store.
pub struct Vault<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    folder: ObjectId,
}

impl<'a, S: ObjectStore + ?Sized> Vault<'a, S> {
    /// Open the vault, creating its remote folder on first use.
    pub async fn open(store: &'a S, folder_name: &str) -> Result<Vault<'a, S>> {
        let folder = store.find_or_create_folder(folder_name).await?;
        Ok(Self { store, folder })
    }

    pub fn folder(&self) -> &ObjectId {
        &self.folder
    }

    /// List the stored payload objects, name-ordered.
    pub async fn list(&self) -> Result<Vec<RemoteObject>> {
        self.store.list_children(&self.folder, ListFilter::All).await
    }

    /// Encrypt and upload a file.
    pub async fn put(
        &self,
        name: &str,
        content_type: &str,
        bytes: &[u8],
        passphrase: &str,
    ) -> Result<ObjectId> {
        let payload = crypto::seal(bytes, content_type, passphrase)?;
        self.store
            .upload(&self.folder, name, payload.as_bytes(), PAYLOAD_MIME)
            .await
    }

    /// Download and decrypt a stored payload.
    pub async fn get(&self, object: &RemoteObject, passphrase: &str) -> Result<PlainFile> {
        let raw = self.store.download(&object.id).await?;
        let payload = String::from_utf8(raw).map_err(|_| {
            KeepsakeError::Format("Stored payload is not valid UTF-8".to_string())
        })?;

        let (bytes, content_type) = crypto::open(&payload, passphrase)?;
        Ok(PlainFile {
            name: object.name.clone(),
            content_type,
            bytes,
        })
    }
}
