//! Remote object store abstraction.
//!
//! This module defines the `ObjectStore` trait and the types shared by
//! its implementations:
//!
//! - `DriveStore`: the production backend over the Google Drive v3 REST
//!   API
//! - `MemoryStore`: a process-local test double
//!
//! ## Failure model
//!
//! Store calls require a bearer credential from a `TokenProvider` and
//! fail uniformly as `KeepsakeError::RemoteStore` on any non-success
//! response. Failures are terminal for the operation: nothing here
//! retries, batches, or rolls back.

pub mod credential;
pub mod drive;
pub mod memory;
pub mod traits;
pub mod types;

// Re-export public types
pub use credential::{AccessToken, StaticToken, TokenFile, TokenProvider};
pub use drive::DriveStore;
pub use memory::MemoryStore;
pub use traits::ObjectStore;
pub use types::{ListFilter, ObjectId, RemoteObject, FOLDER_MIME, IMAGE_MIME_TYPES};
