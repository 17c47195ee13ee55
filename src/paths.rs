//! Site root resolution
//!
//! # Environment Variables
//!
//! - `CACHEWARD_SITE` - Site root used when `--path` is not given
//!
//! # Resolution Priority
//!
//! 1. `--path` flag
//! 2. `CACHEWARD_SITE` environment variable
//! 3. Current working directory

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable for the site root
pub const ENV_SITE: &str = "CACHEWARD_SITE";

/// Resolve the site root from the `--path` flag, the environment, or the cwd
pub fn site_root(flag: Option<&str>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    let env = std::env::var(ENV_SITE).ok();
    Ok(resolve_site_root(flag, env.as_deref(), &cwd))
}

fn resolve_site_root(flag: Option<&str>, env: Option<&str>, cwd: &Path) -> PathBuf {
    if let Some(path) = flag.filter(|p| !p.is_empty()) {
        let path = expand(path);
        log::debug!("Using site root from --path: {}", path.display());
        return cwd.join(path);
    }

    if let Some(path) = env.filter(|p| !p.is_empty()) {
        let path = expand(path);
        log::debug!("Using site root from {}: {}", ENV_SITE, path.display());
        return cwd.join(path);
    }

    log::debug!("Using current directory as site root: {}", cwd.display());
    cwd.to_path_buf()
}

/// Expand ~ and environment variables in a path string
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}
