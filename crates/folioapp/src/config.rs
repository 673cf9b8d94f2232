//! # Configuration
//!
//! Folio configuration is managed by [`confique`], which layers environment
//! variables over a TOML file over compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `FOLIO_AUTOSAVE_QUIET_MS`, `FOLIO_NOTICE_TTL_MS`, ...
//! 2. **Config file**: `folio.toml` in the OS config directory.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `autosave_quiet_ms` | `2000` | Quiet period before a draft is written |
//! | `notice_ttl_ms` | `3000` | How long a notice stays visible |
//! | `max_upload_bytes` | `5242880` | Largest accepted image upload |
//! | `data_dir` | none | Where the key-value store lives |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::clock::MAX_DELAY;
use crate::drafts::DEFAULT_QUIET_PERIOD;
use crate::error::{FolioError, Result};
use crate::notify::DEFAULT_NOTICE_TTL;
use crate::upload::DEFAULT_MAX_UPLOAD_BYTES;

pub const CONFIG_FILENAME: &str = "folio.toml";

/// Configuration for folio, stored in `folio.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FolioConfig {
    /// Milliseconds without edits before a draft is saved.
    #[config(default = 2000, env = "FOLIO_AUTOSAVE_QUIET_MS")]
    pub autosave_quiet_ms: u64,

    /// Milliseconds a notice stays on screen.
    #[config(default = 3000, env = "FOLIO_NOTICE_TTL_MS")]
    pub notice_ttl_ms: u64,

    /// Largest image upload accepted, in bytes.
    #[config(default = 5242880, env = "FOLIO_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: u64,

    /// Directory holding `storage.json`. Falls back to the OS data directory.
    #[config(env = "FOLIO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            autosave_quiet_ms: DEFAULT_QUIET_PERIOD.as_millis() as u64,
            notice_ttl_ms: DEFAULT_NOTICE_TTL.as_millis() as u64,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            data_dir: None,
        }
    }
}

impl FolioConfig {
    /// Loads env + `<config_dir>/folio.toml` + defaults. A missing file is fine.
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(dir) = config_dir {
            builder = builder.file(dir.join(CONFIG_FILENAME));
        }
        let config = builder
            .load()
            .map_err(|e| FolioError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects delays longer than [`MAX_DELAY`].
    pub fn validate(&self) -> Result<()> {
        let max_ms = MAX_DELAY.as_millis() as u64;
        for (name, value) in [
            ("autosave_quiet_ms", self.autosave_quiet_ms),
            ("notice_ttl_ms", self.notice_ttl_ms),
        ] {
            if value > max_ms {
                return Err(FolioError::Config(format!(
                    "{} must be at most {} (got {})",
                    name, max_ms, value
                )));
            }
        }
        Ok(())
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.autosave_quiet_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}
