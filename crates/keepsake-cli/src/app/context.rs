//! Application context for the Keepsake CLI.
//!
//! Bundles CLI arguments with lazily-loaded configuration and the tokio
//! runtime. The runtime is current-thread: store operations are awaited
//! one at a time with no concurrent in-flight requests.

use std::future::Future;

use once_cell::unsync::OnceCell;
use tokio::runtime::Runtime;

use keepsake_core::{CachePolicy, DriveStore};

use crate::cli::Cli;
use crate::config::{load_config, Config};

use super::token::token_provider;

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple
/// parameters through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Config>,
    runtime: Runtime,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to start async runtime: {}", e))?;

        Ok(Self {
            cli,
            config: OnceCell::new(),
            runtime,
        })
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&Config> {
        self.config
            .get_or_try_init(|| load_config(self.cli.config.as_deref()))
    }

    /// Cache bounds from configuration.
    pub fn cache_policy(&self) -> anyhow::Result<CachePolicy> {
        Ok(self.config()?.cache.policy())
    }

    /// Build the Drive-backed store with a resolved credential source.
    pub fn store(&self) -> anyhow::Result<DriveStore> {
        let config = self.config()?;
        let tokens = token_provider(self.cli, config)?;
        Ok(DriveStore::new(tokens))
    }

    /// Run a store operation to completion on the owned runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
