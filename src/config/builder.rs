//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile};

use std::path::PathBuf;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    pub fn with_file(mut self, path: Option<&str>) -> Self {
        let file_config = if let Some(path) = path {
            match ConfigFile::load(path) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("{}", e);
                    None
                }
            }
        } else {
            ConfigFile::load_default()
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        self
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: Option<bool>) -> Self {
        if let Some(v) = verbose {
            self.config.general.verbose = v;
        }
        self
    }

    /// Override with CLI dry-run flag
    pub fn with_dry_run(mut self, dry_run: Option<bool>) -> Self {
        if let Some(d) = dry_run {
            self.config.general.dry_run = d;
        }
        self
    }

    /// Override with CLI card index
    pub fn with_card(mut self, card: Option<u32>) -> Self {
        if let Some(c) = card {
            self.config.device.card = c;
            self.config.device.path = None;
        }
        self
    }

    /// Override with CLI device directory
    pub fn with_device_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.config.device.path = Some(p);
        }
        self
    }

    /// Override with CLI file error debugging flag
    pub fn with_debug_file_errors(mut self, enabled: Option<bool>) -> Self {
        if let Some(e) = enabled {
            self.config.debug.file_errors = e;
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
