//! Validator configuration

use crate::file_utils::DEFAULT_MAX_FILE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the repository root
pub const CONFIG_FILE_NAME: &str = ".addonlint.toml";

/// Configuration for a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Top-level directory holding one subdirectory per vendor product
    pub templates_root: String,

    /// Files larger than this many bytes are rejected before parsing
    pub max_file_size: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            templates_root: "templates".to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ValidatorConfig {
    /// Load config from file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Load `path` if given, else `<repo_root>/.addonlint.toml` if it
    /// exists, else defaults. An explicit path that fails to load is an error.
    pub fn discover(path: Option<&PathBuf>, repo_root: &Path) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = repo_root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    /// Root with surrounding slashes removed, e.g. `templates`
    pub fn root(&self) -> &str {
        self.templates_root.trim_matches('/')
    }

    fn check(&self) -> anyhow::Result<()> {
        let root = self.root();
        if root.is_empty() {
            anyhow::bail!("templates_root must not be empty");
        }
        if root.contains('/') {
            anyhow::bail!(
                "templates_root must be a single directory name, got '{}'",
                self.templates_root
            );
        }
        Ok(())
    }
}
