//! # Keepsake Core
//!
//! Core library for Keepsake - a Drive photo browser with an encrypted
//! file vault.
//!
//! This crate provides the domain logic independent of the CLI surface:
//!
//! ## Architecture
//!
//! - **crypto**: Encrypted payload codec (content-type header + Age
//!   armored ciphertext) and passphrase validation
//! - **store**: Remote object store trait, the Google Drive backend, an
//!   in-memory test double, and explicit credential handling
//! - **cache**: Bounded, TTL-limited byte cache for downloaded media
//! - **gallery**: Folder/image browsing with cache-backed image fetch,
//!   favorites, and delete
//! - **vault**: Encrypted upload/download round trip against a dedicated
//!   remote folder

pub mod cache;
pub mod crypto;
pub mod error;
pub mod gallery;
pub mod store;
pub mod vault;

pub use cache::{CachePolicy, MediaCache};
pub use error::{KeepsakeError, Result};
pub use gallery::{Gallery, DEFAULT_FAVORITES_FOLDER};
pub use store::{
    AccessToken, DriveStore, ListFilter, MemoryStore, ObjectId, ObjectStore, RemoteObject,
    StaticToken, TokenFile, TokenProvider,
};
pub use vault::{PlainFile, Vault, DEFAULT_VAULT_FOLDER, PAYLOAD_MIME};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
