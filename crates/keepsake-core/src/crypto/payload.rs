//! Encrypted payload codec.
//!
//! A stored payload is a single string: the original content type, one
//! newline, then the Age ASCII-armored ciphertext. The armor is the
//! cipher library's standard self-contained container (salt and nonces
//! embedded), so the payload carries everything needed for decryption
//! except the passphrase.
//!
//! ```text
//! <content-type>\n-----BEGIN AGE ENCRYPTED FILE-----...
//! ```
//!
//! Both operations are single-shot and stateless: they either return a
//! complete result or fail without partial output.

use std::io::{Read, Write};
use std::iter;

use age::armor::{ArmoredReader, ArmoredWriter, Format};
use age::secrecy::SecretString;

use crate::error::{KeepsakeError, Result};

use super::validate_passphrase;

/// Encrypt file content into a storable payload string.
///
/// # Arguments
///
/// * `data` - The plaintext bytes to encrypt
/// * `content_type` - MIME type recovered verbatim on decrypt; must not
///   contain a line break
/// * `passphrase` - Non-empty passphrase for encryption
///
/// # Errors
///
/// Returns `KeepsakeError::Format` if `content_type` contains a line
/// break, `KeepsakeError::InvalidInput` for an empty passphrase, and
/// `KeepsakeError::Crypto` if the cipher fails.
///
/// # Examples
///
/// ```
/// use keepsake_core::crypto::{open, seal};
///
/// let payload = seal(b"hello", "text/plain", "correct-horse").unwrap();
/// assert!(payload.starts_with("text/plain\n"));
///
/// let (bytes, content_type) = open(&payload, "correct-horse").unwrap();
/// assert_eq!(bytes, b"hello");
/// assert_eq!(content_type, "text/plain");
/// ```
pub fn seal(data: &[u8], content_type: &str, passphrase: &str) -> Result<String> {
    validate_passphrase(passphrase)?;

    // The header is newline-delimited with no escaping, so an embedded
    // line break would corrupt the format. Rejected instead.
    if content_type.contains('\n') || content_type.contains('\r') {
        return Err(KeepsakeError::Format(
            "Content type must not contain line breaks".to_string(),
        ));
    }

    let encryptor =
        age::Encryptor::with_user_passphrase(SecretString::from(passphrase.to_string()));

    let mut ciphertext = Vec::new();
    let armor = ArmoredWriter::wrap_output(&mut ciphertext, Format::AsciiArmor)
        .map_err(|e| KeepsakeError::Crypto(format!("Failed to start armor encoding: {}", e)))?;

    let mut writer = encryptor
        .wrap_output(armor)
        .map_err(|e| KeepsakeError::Crypto(format!("Failed to create encryptor: {}", e)))?;

    writer
        .write_all(data)
        .map_err(|e| KeepsakeError::Crypto(format!("Encryption write failed: {}", e)))?;

    writer
        .finish()
        .and_then(|armor| armor.finish())
        .map_err(|e| KeepsakeError::Crypto(format!("Encryption finish failed: {}", e)))?;

    let encoded = String::from_utf8(ciphertext)
        .map_err(|_| KeepsakeError::Crypto("Armored ciphertext is not valid UTF-8".to_string()))?;

    Ok(format!("{}\n{}", content_type, encoded))
}

/// Decrypt a stored payload back into file content and its content type.
///
/// The payload is split at the first newline: the prefix is the content
/// type, the remainder the armored ciphertext.
///
/// # Errors
///
/// Returns `KeepsakeError::Format` if the payload has no newline
/// separator, `KeepsakeError::IncorrectPassphrase` if the passphrase
/// does not match, and `KeepsakeError::Crypto` if the ciphertext is
/// corrupted or not a valid Age container.
pub fn open(payload: &str, passphrase: &str) -> Result<(Vec<u8>, String)> {
    validate_passphrase(passphrase)?;

    let (content_type, ciphertext) = payload.split_once('\n').ok_or_else(|| {
        KeepsakeError::Format("Payload is missing its content-type header".to_string())
    })?;

    let decryptor = age::Decryptor::new(ArmoredReader::new(ciphertext.as_bytes()))
        .map_err(|e| KeepsakeError::Crypto(format!("Failed to read ciphertext: {}", e)))?;

    let identity = age::scrypt::Identity::new(SecretString::from(passphrase.to_string()));
    let mut reader = decryptor
        .decrypt(iter::once(&identity as &dyn age::Identity))
        .map_err(|e| match e {
            age::DecryptError::NoMatchingKeys
            | age::DecryptError::DecryptionFailed
            | age::DecryptError::KeyDecryptionFailed => KeepsakeError::IncorrectPassphrase,
            _ => KeepsakeError::Crypto(format!("Decryption failed: {}", e)),
        })?;

    let mut plaintext = Vec::new();
    reader
        .read_to_end(&mut plaintext)
        .map_err(|e| KeepsakeError::Crypto(format!("Failed to read decrypted data: {}", e)))?;

    Ok((plaintext, content_type.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let payload = seal(b"secret bytes", "text/plain", "test-passphrase-123").unwrap();
        let (bytes, content_type) = open(&payload, "test-passphrase-123").unwrap();

        assert_eq!(bytes, b"secret bytes");
        assert_eq!(content_type, "text/plain");
    }

    #[test]
    fn test_pdf_scenario() {
        let data = [0x25, 0x50, 0x44, 0x46];
        let payload = seal(&data, "application/pdf", "correct-horse").unwrap();
        let (bytes, content_type) = open(&payload, "correct-horse").unwrap();

        assert_eq!(bytes, data);
        assert_eq!(content_type, "application/pdf");
    }

    #[test]
    fn test_content_type_is_first_line() {
        let payload = seal(b"data", "image/png", "test-passphrase-123").unwrap();
        let (first_line, rest) = payload.split_once('\n').unwrap();

        assert_eq!(first_line, "image/png");
        assert!(rest.starts_with("-----BEGIN AGE ENCRYPTED FILE-----"));
    }

    #[test]
    fn test_wrong_passphrase_fails() {
        let payload = seal(b"secret", "text/plain", "passphrase-one").unwrap();
        let result = open(&payload, "passphrase-two");

        assert!(matches!(result, Err(KeepsakeError::IncorrectPassphrase)));
    }

    #[test]
    fn test_missing_separator_is_format_error() {
        let result = open("no newline anywhere", "test-passphrase-123");
        assert!(matches!(result, Err(KeepsakeError::Format(_))));
    }

    #[test]
    fn test_garbage_ciphertext_is_crypto_error() {
        let result = open("text/plain\nnot an age container", "test-passphrase-123");
        assert!(matches!(result, Err(KeepsakeError::Crypto(_))));
    }

    #[test]
    fn test_corrupted_ciphertext_fails() {
        let payload = seal(b"secret", "text/plain", "test-passphrase-123").unwrap();

        // Flip a character in the middle of the armored body.
        let mid = payload.len() / 2;
        let mut corrupted: Vec<u8> = payload.into_bytes();
        corrupted[mid] = if corrupted[mid] == b'A' { b'B' } else { b'A' };
        let corrupted = String::from_utf8(corrupted).unwrap();

        assert!(open(&corrupted, "test-passphrase-123").is_err());
    }

    #[test]
    fn test_empty_file_round_trips() {
        let payload = seal(b"", "application/octet-stream", "test-passphrase-123").unwrap();
        let (bytes, content_type) = open(&payload, "test-passphrase-123").unwrap();

        assert!(bytes.is_empty());
        assert_eq!(content_type, "application/octet-stream");
    }

    #[test]
    fn test_empty_content_type_round_trips() {
        let payload = seal(b"data", "", "test-passphrase-123").unwrap();
        assert!(payload.starts_with('\n'));

        let (bytes, content_type) = open(&payload, "test-passphrase-123").unwrap();
        assert_eq!(bytes, b"data");
        assert_eq!(content_type, "");
    }

    #[test]
    fn test_content_type_with_line_break_rejected() {
        let result = seal(b"data", "text/plain\nevil", "test-passphrase-123");
        assert!(matches!(result, Err(KeepsakeError::Format(_))));

        let result = seal(b"data", "text/plain\r", "test-passphrase-123");
        assert!(matches!(result, Err(KeepsakeError::Format(_))));
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        assert!(seal(b"data", "text/plain", "").is_err());
        assert!(open("text/plain\nwhatever", "").is_err());
    }

    #[test]
    fn test_payload_does_not_contain_plaintext() {
        let payload = seal(
            b"marker: PLAINTEXT_MARKER_123",
            "text/plain",
            "test-passphrase-123",
        )
        .unwrap();

        assert!(!payload.contains("PLAINTEXT_MARKER_123"));
    }
}
