//! Page cache detection
//!
//! Independent of the settings engine: reports whether a page cache is
//! loaded and which known provider(s) supply it. Never fails; missing
//! signals are themselves the answer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::host::{CACHE_FLAG, Host, HostFile};

/// Page cache providers recognized by detection, in reporting order
pub const KNOWN_PROVIDERS: &[&str] = &[
    "wp-super-cache/wp-cache.php",
    "w3-total-cache/w3-total-cache.php",
    "wp-rocket/wp-rocket.php",
    "litespeed-cache/litespeed-cache.php",
    "wp-fastest-cache/wpFastestCache.php",
    "cache-enabler/cache-enabler.php",
    "comet-cache/comet-cache.php",
];

/// No page cache provider in play
pub const PLUGIN_NONE: &str = "none";
/// Cache is loaded but by no provider we recognize
pub const PLUGIN_UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageCache {
    Enabled,
    Disabled,
    /// Flag is on but the bootstrap file cannot be read
    Broken,
}

impl fmt::Display for PageCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Broken => "broken",
        };
        f.write_str(s)
    }
}

/// Detection result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStatus {
    pub page_cache: PageCache,
    pub page_cache_plugin: String,
}

/// Identifier prefix before the path separator (`wp-rocket/wp-rocket.php` -> `wp-rocket`)
fn short_name(id: &str) -> &str {
    id.split_once('/').map_or(id, |(dir, _)| dir)
}

pub fn detect(host: &impl Host) -> CacheStatus {
    let mut status = CacheStatus {
        page_cache: PageCache::Disabled,
        page_cache_plugin: PLUGIN_NONE.to_string(),
    };

    if host.flag(CACHE_FLAG) {
        status.page_cache = if host.file_readable(HostFile::Bootstrap) {
            PageCache::Enabled
        } else {
            PageCache::Broken
        };
        status.page_cache_plugin = PLUGIN_UNKNOWN.to_string();
    }

    let active = host.active_extensions();
    let providers: Vec<&str> = KNOWN_PROVIDERS
        .iter()
        .filter(|id| active.iter().any(|a| a == *id))
        .map(|id| short_name(id))
        .collect();

    if !providers.is_empty() {
        status.page_cache_plugin = providers.join(",");
    }

    log::debug!("detected {:?}", status);
    status
}
