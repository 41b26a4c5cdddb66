//! Cryptographic operations for Keepsake.
//!
//! This module provides the encrypted payload codec using a
//! well-audited library:
//! - **Age**: Modern, simple encryption (https://age-encryption.org/)
//!
//! ## Security Model
//!
//! - Passphrase-based encryption using Age (scrypt key derivation with a
//!   fresh random salt per payload, library-default work factor)
//! - Authenticated construction: tampering and wrong passphrases are
//!   detected instead of producing garbage plaintext
//! - Passphrases are never stored or transmitted
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the stored payload from the remote object store
//! - Offline brute-force attacks on the passphrase
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - The remote store learning object names and sizes

pub mod passphrase;
pub mod payload;

pub use passphrase::validate_passphrase;
pub use payload::{open, seal};
