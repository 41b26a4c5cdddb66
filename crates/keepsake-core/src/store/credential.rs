//! Explicit credential handling for the remote store.
//!
//! The store never relies on ambient token state: every operation asks a
//! `TokenProvider` for a usable `AccessToken`. The OAuth flow itself is
//! an external collaborator; providers here only hold or re-read what
//! that collaborator produced.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{KeepsakeError, Result};

/// Safety margin applied before the recorded expiry: a token this close
/// to expiring is treated as stale so an in-flight request does not race
/// the deadline.
const EXPIRY_LEEWAY_SECONDS: i64 = 30;

/// A bearer credential for the remote store.
///
/// The secret is kept out of `Debug` output and zeroized on drop.
#[derive(Clone)]
pub struct AccessToken {
    secret: SecretString,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Create a token without a recorded expiry (treated as always fresh).
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(token.into()),
            expires_at: None,
        }
    }

    /// Create a token with a recorded expiry instant.
    pub fn with_expiry(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            secret: SecretString::from(token.into()),
            expires_at: Some(expires_at),
        }
    }

    /// Whether the token is still usable, with leeway applied.
    pub fn is_fresh(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                Utc::now() + Duration::seconds(EXPIRY_LEEWAY_SECONDS) < expires_at
            }
            None => true,
        }
    }

    /// The raw bearer string. Use only to build the Authorization header.
    pub fn bearer(&self) -> &str {
        self.secret.expose_secret()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Source of access tokens for store operations.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Produce a fresh token, refreshing from the underlying source if
    /// the current one has gone stale.
    async fn access_token(&self) -> Result<AccessToken>;
}

/// Provider backed by a single token handed in at startup (flag or
/// environment variable). Cannot refresh; a stale token is an error.
pub struct StaticToken {
    token: AccessToken,
}

impl StaticToken {
    pub fn new(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<AccessToken> {
        if !self.token.is_fresh() {
            return Err(KeepsakeError::Credential(
                "Access token has expired and no refresh source is configured".to_string(),
            ));
        }
        Ok(self.token.clone())
    }
}

/// On-disk shape of a token file maintained by the external OAuth helper.
#[derive(Debug, Deserialize)]
struct TokenFileContents {
    access_token: String,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

/// Provider backed by a JSON token file.
///
/// The file is re-read whenever the cached token goes stale, so the
/// external helper can rotate it without restarting this process.
pub struct TokenFile {
    path: PathBuf,
    cached: std::sync::Mutex<Option<AccessToken>>,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: std::sync::Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_token(&self) -> Result<AccessToken> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            KeepsakeError::Credential(format!(
                "Failed to read token file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let parsed: TokenFileContents = serde_json::from_str(&contents).map_err(|e| {
            KeepsakeError::Credential(format!(
                "Failed to parse token file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let token = match parsed.expires_at {
            Some(expires_at) => AccessToken::with_expiry(parsed.access_token, expires_at),
            None => AccessToken::new(parsed.access_token),
        };

        if !token.is_fresh() {
            return Err(KeepsakeError::Credential(format!(
                "Token in {} has expired; re-run your OAuth helper",
                self.path.display()
            )));
        }

        Ok(token)
    }
}

#[async_trait]
impl TokenProvider for TokenFile {
    async fn access_token(&self) -> Result<AccessToken> {
        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(token) = cached.as_ref() {
            if token.is_fresh() {
                return Ok(token.clone());
            }
        }

        let token = self.read_token()?;
        *cached = Some(token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_token_without_expiry_is_fresh() {
        assert!(AccessToken::new("tok").is_fresh());
    }

    #[test]
    fn test_expired_token_is_stale() {
        let token = AccessToken::with_expiry("tok", Utc::now() - Duration::minutes(5));
        assert!(!token.is_fresh());
    }

    #[test]
    fn test_token_near_expiry_is_stale() {
        // Inside the leeway window counts as stale.
        let token = AccessToken::with_expiry("tok", Utc::now() + Duration::seconds(5));
        assert!(!token.is_fresh());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let token = AccessToken::new("super-secret-token");
        let output = format!("{:?}", token);
        assert!(output.contains("REDACTED"));
        assert!(!output.contains("super-secret-token"));
    }

    #[tokio::test]
    async fn test_static_provider_rejects_stale_token() {
        let provider = StaticToken::new(AccessToken::with_expiry(
            "tok",
            Utc::now() - Duration::minutes(1),
        ));
        assert!(matches!(
            provider.access_token().await,
            Err(KeepsakeError::Credential(_))
        ));
    }

    #[tokio::test]
    async fn test_file_provider_reads_and_caches() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"access_token": "tok-from-file"}}"#).unwrap();

        let provider = TokenFile::new(file.path());
        let token = provider.access_token().await.unwrap();
        assert_eq!(token.bearer(), "tok-from-file");

        // A fresh cached token survives the file disappearing.
        drop(file);
        let token = provider.access_token().await.unwrap();
        assert_eq!(token.bearer(), "tok-from-file");
    }

    #[tokio::test]
    async fn test_file_provider_rejects_expired_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let expired = Utc::now() - Duration::minutes(10);
        write!(
            file,
            r#"{{"access_token": "tok", "expires_at": "{}"}}"#,
            expired.to_rfc3339()
        )
        .unwrap();

        let provider = TokenFile::new(file.path());
        assert!(matches!(
            provider.access_token().await,
            Err(KeepsakeError::Credential(_))
        ));
    }

    #[tokio::test]
    async fn test_file_provider_missing_file() {
        let provider = TokenFile::new("/nonexistent/keepsake-token.json");
        assert!(matches!(
            provider.access_token().await,
            Err(KeepsakeError::Credential(_))
        ));
    }
}
