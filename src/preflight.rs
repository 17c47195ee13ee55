//! Checks that must pass before any setting is verified or changed

use thiserror::Error;

use crate::host::{CACHE_FLAG, Host, HostFile, TARGET_PROVIDER};

/// Why the page cache is not in a state cacheward can reconcile
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreflightError {
    #[error("{provider} is not active; activate it before managing its settings")]
    ProviderInactive { provider: &'static str },

    #[error("{flag} is not enabled; turn it on in the host configuration")]
    CacheFlagOff { flag: &'static str },

    #[error("the cache bootstrap file (advanced-cache.php) is missing or unreadable")]
    BootstrapUnreadable,
}

/// Fail on the first unmet precondition, in a fixed order
pub fn ensure_ready(host: &impl Host) -> Result<(), PreflightError> {
    if !host.is_active(TARGET_PROVIDER) {
        return Err(PreflightError::ProviderInactive {
            provider: TARGET_PROVIDER,
        });
    }

    if !host.flag(CACHE_FLAG) {
        return Err(PreflightError::CacheFlagOff { flag: CACHE_FLAG });
    }

    if !host.file_readable(HostFile::Bootstrap) {
        return Err(PreflightError::BootstrapUnreadable);
    }

    log::debug!("preflight passed");
    Ok(())
}
