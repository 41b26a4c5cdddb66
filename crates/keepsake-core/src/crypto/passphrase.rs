//! Passphrase validation.

use crate::error::{KeepsakeError, Result};

/// Validate that a passphrase is usable for encryption.
///
/// The codec requires a non-empty passphrase; whitespace-only input is
/// treated as empty because it is almost always an accidental keypress
/// rather than a chosen secret.
///
/// # Examples
///
/// ```
/// use keepsake_core::crypto::validate_passphrase;
///
/// assert!(validate_passphrase("correct-horse").is_ok());
/// assert!(validate_passphrase("").is_err());
/// ```
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.trim().is_empty() {
        return Err(KeepsakeError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }
    Ok(())
}
