//! The host application, seen through narrow interfaces
//!
//! Cacheward never owns configuration state. It reads and writes the
//! host's named variables, asks which extensions are active, probes a few
//! well-known files, and asks the host to rebuild its rewrite rules.

pub mod rewrite;
pub mod site;

#[cfg(test)]
pub mod memory;

use anyhow::Result;
use declarative::VariableStore;

pub use rewrite::RuleStatus;
pub use site::SiteHost;

/// Host-level flag that must be on for any page cache to load
pub const CACHE_FLAG: &str = "WP_CACHE";

/// Extension whose settings cacheward reconciles
pub const TARGET_PROVIDER: &str = "wp-super-cache/wp-cache.php";

/// Files the host exposes to probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HostFile {
    /// Cache bootstrap file loaded by the host on every request
    Bootstrap,
    /// Web server rules file holding the rewrite block
    RewriteRules,
}

/// Everything cacheward consumes from the host application
pub trait Host: VariableStore {
    /// Host-level boolean constant (e.g. `WP_CACHE`)
    fn flag(&self, name: &str) -> bool;

    /// Identifiers of currently active extensions
    fn active_extensions(&self) -> Vec<String>;

    fn file_exists(&self, file: HostFile) -> bool;

    fn file_readable(&self, file: HostFile) -> bool;

    /// Contents of a probed file, `None` if missing or unreadable
    fn file_contents(&self, file: HostFile) -> Option<String>;

    /// Rewrite block the host would generate from its current variables
    fn generated_rewrite_rules(&self) -> String;

    /// Rebuild the rewrite block in the rules file
    fn regenerate_rewrite_rules(&mut self) -> Result<()>;

    /// Copy of this host whose writes never reach the real one
    fn scratch(&self) -> Self
    where
        Self: Sized;

    /// Whether an extension identifier is active
    fn is_active(&self, extension: &str) -> bool {
        self.active_extensions().iter().any(|e| e == extension)
    }

    /// Current state of the rewrite block
    fn rewrite_status(&self) -> RuleStatus {
        if !self.file_exists(HostFile::RewriteRules) {
            return RuleStatus::Missing;
        }
        let contents = self.file_contents(HostFile::RewriteRules);
        rewrite::status(contents.as_deref(), &self.generated_rewrite_rules())
    }
}
