use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional per-site layout overrides, read from `<root>/cacheward.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteLayout {
    /// Content directory holding the cache bootstrap file
    pub content_dir: String,
    /// Host state file (variables, flags, active extensions)
    pub host_file: String,
    /// Web server rules file that receives the rewrite block
    pub rewrite_file: String,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            content_dir: "wp-content".to_string(),
            host_file: "host.toml".to_string(),
            rewrite_file: ".htaccess".to_string(),
        }
    }
}

impl SiteLayout {
    pub const FILE_NAME: &'static str = "cacheward.toml";

    /// Load overrides for a site, falling back to defaults when absent
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let layout: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML format in {}", path.display()))?;
        log::debug!("Loaded site layout from {}: {:?}", path.display(), layout);
        Ok(layout)
    }

    pub fn host_file(&self, root: &Path) -> PathBuf {
        root.join(&self.host_file)
    }

    /// Cache bootstrap file the host loads before anything else
    pub fn bootstrap_file(&self, root: &Path) -> PathBuf {
        root.join(&self.content_dir).join("advanced-cache.php")
    }

    pub fn rewrite_file(&self, root: &Path) -> PathBuf {
        root.join(&self.rewrite_file)
    }
}
