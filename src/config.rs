//! Settings and the on-disk state directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::fsutil::write_atomic;

pub const DEFAULT_API_VERSION: &str = "v35.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const SETTINGS_VERSION: u32 = 1;
const APP_DIR: &str = "sfclone";

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub version: u32,

    /// REST API version every call is pinned to, e.g. `v35.0`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Upper bound for each HTTP request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Exported browser cookies (JSON array) to read `sid` from.
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
            cookie_file: None,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != SETTINGS_VERSION {
            anyhow::bail!("unsupported settings version {}", self.version);
        }
        let digits = self.api_version.strip_prefix('v').unwrap_or_default();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
            anyhow::bail!(
                "invalid api version {:?} (expected something like {})",
                self.api_version,
                DEFAULT_API_VERSION
            );
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be at least 1");
        }
        Ok(())
    }
}

/// Directory holding `config.json` and the persistent extension storage.
#[derive(Clone, Debug)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    pub fn default_root() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .context("could not determine a local data directory (pass --state-dir)")
    }

    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create state dir {}", root.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.root.join("storage")
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join("config.json")
    }

    pub fn read_settings(&self) -> Result<Settings> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(Settings::default());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let settings: Settings = serde_json::from_slice(&bytes).context("parse config.json")?;
        settings.validate().context("validate config.json")?;
        Ok(settings)
    }

    pub fn write_settings(&self, settings: &Settings) -> Result<()> {
        settings.validate()?;
        let bytes = serde_json::to_vec_pretty(settings).context("serialize settings")?;
        write_atomic(&self.settings_path(), &bytes).context("write config.json")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
