//! Credential resolution.
//!
//! Resolution order mirrors how the token actually reaches the machine:
//! an explicit `--token` flag (or `KEEPSAKE_TOKEN`) wins, then the token
//! file maintained by the external OAuth helper. There is no ambient
//! fallback; without a source every store command fails up front.

use keepsake_core::{AccessToken, StaticToken, TokenFile, TokenProvider};

use crate::cli::Cli;
use crate::config::Config;

pub fn token_provider(cli: &Cli, config: &Config) -> anyhow::Result<Box<dyn TokenProvider>> {
    if let Some(token) = cli.token.as_deref() {
        if token.trim().is_empty() {
            return Err(anyhow::anyhow!("Provided access token is empty"));
        }
        return Ok(Box::new(StaticToken::new(AccessToken::new(token))));
    }

    if let Some(path) = config.store.token_file.as_deref() {
        return Ok(Box::new(TokenFile::new(path)));
    }

    Err(anyhow::anyhow!(
        "No access token available.\nHint: pass --token, set KEEPSAKE_TOKEN, or point \
         [store].token_file at the file your OAuth helper maintains."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn cli_with(args: &[&str]) -> Cli {
        // Keep an inherited KEEPSAKE_TOKEN from leaking into parsing.
        std::env::remove_var("KEEPSAKE_TOKEN");
        Cli::parse_from(args)
    }

    #[test]
    fn test_flag_token_wins() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let cli = cli_with(&["keepsake", "--token", "tok-123", "folders"]);
        let mut config = Config::default();
        config.store.token_file = Some("/tmp/token.json".to_string());

        assert!(token_provider(&cli, &config).is_ok());
    }

    #[test]
    fn test_empty_token_rejected() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let cli = cli_with(&["keepsake", "--token", "  ", "folders"]);
        assert!(token_provider(&cli, &Config::default()).is_err());
    }

    #[test]
    fn test_no_source_is_an_error_with_hint() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let cli = cli_with(&["keepsake", "folders"]);
        let err = match token_provider(&cli, &Config::default()) {
            Err(err) => err,
            Ok(_) => panic!("expected an error"),
        };
        assert!(err.to_string().contains("Hint:"));
    }

    #[test]
    fn test_token_file_source() {
        let _guard = ENV_LOCK.lock().expect("env lock");
        let cli = cli_with(&["keepsake", "folders"]);
        let mut config = Config::default();
        config.store.token_file = Some("/tmp/token.json".to_string());

        assert!(token_provider(&cli, &config).is_ok());
    }
}
