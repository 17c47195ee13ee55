//! In-memory host for tests

use anyhow::{Result, bail};
use declarative::{MemoryStore, Value, VariableStore};
use std::collections::{BTreeMap, BTreeSet};

use super::{CACHE_FLAG, Host, HostFile, TARGET_PROVIDER, rewrite};

#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    pub store: MemoryStore,
    pub flags: BTreeMap<String, bool>,
    pub extensions: Vec<String>,
    pub files: BTreeMap<HostFile, String>,
    /// Files that exist but cannot be opened
    pub unreadable: BTreeSet<HostFile>,
    /// Variables whose writes are accepted but silently dropped
    pub ignored_writes: BTreeSet<String>,
    /// Makes rewrite regeneration report an error
    pub fail_regeneration: bool,
    /// Every variable write, in order
    pub writes: Vec<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with the provider active, the cache flag on and a readable bootstrap
    pub fn ready() -> Self {
        Self::new()
            .with_flag(CACHE_FLAG, true)
            .with_extension(TARGET_PROVIDER)
            .with_file(HostFile::Bootstrap, "<?php\n")
    }

    /// Ready host where every page cache setting holds its expected value
    pub fn converged() -> Self {
        let mut host = Self::ready()
            .with_variable("cache_enabled", true)
            .with_variable("super_cache_enabled", true)
            .with_variable("wp_cache_mod_rewrite", 1)
            .with_variable("wp_cache_not_logged_in", 1)
            .with_variable("cache_rebuild_files", 1)
            .with_variable("wp_supercache_304", 1)
            .with_variable("wp_cache_mobile_enabled", 1)
            .with_variable("cache_compression", 0)
            .with_variable("wp_cache_make_known_anon", 0);
        let rules = rewrite::splice("", &host.generated_rewrite_rules());
        host.files.insert(HostFile::RewriteRules, rules);
        host
    }

    pub fn with_flag(mut self, name: &str, on: bool) -> Self {
        self.flags.insert(name.to_string(), on);
        self
    }

    pub fn with_extension(mut self, id: &str) -> Self {
        self.extensions.push(id.to_string());
        self
    }

    pub fn with_file(mut self, file: HostFile, contents: &str) -> Self {
        self.files.insert(file, contents.to_string());
        self
    }

    pub fn with_variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.store = self.store.with(name, value);
        self
    }
}

impl VariableStore for MemoryHost {
    fn get_variable(&self, name: &str) -> Value {
        self.store.get_variable(name)
    }

    fn set_variable(&mut self, name: &str, value: Value) -> Result<()> {
        self.writes.push(name.to_string());
        if self.ignored_writes.contains(name) {
            return Ok(());
        }
        self.store.set_variable(name, value)
    }
}

impl Host for MemoryHost {
    fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    fn active_extensions(&self) -> Vec<String> {
        self.extensions.clone()
    }

    fn file_exists(&self, file: HostFile) -> bool {
        self.files.contains_key(&file)
    }

    fn file_readable(&self, file: HostFile) -> bool {
        self.file_exists(file) && !self.unreadable.contains(&file)
    }

    fn file_contents(&self, file: HostFile) -> Option<String> {
        if !self.file_readable(file) {
            return None;
        }
        self.files.get(&file).cloned()
    }

    fn generated_rewrite_rules(&self) -> String {
        rewrite::generate(&self.store, "wp-content")
    }

    fn scratch(&self) -> Self {
        self.clone()
    }

    fn regenerate_rewrite_rules(&mut self) -> Result<()> {
        if self.fail_regeneration {
            bail!("could not write rewrite rules");
        }
        if !self.get_variable("wp_cache_mod_rewrite").is_truthy() {
            bail!("rewrite rules are only used with expert delivery (wp_cache_mod_rewrite is off)");
        }
        let current = self
            .files
            .get(&HostFile::RewriteRules)
            .cloned()
            .unwrap_or_default();
        let updated = rewrite::splice(&current, &self.generated_rewrite_rules());
        self.files.insert(HostFile::RewriteRules, updated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regeneration_requires_expert_delivery() {
        let mut host = MemoryHost::ready().with_variable("wp_cache_mod_rewrite", 0);
        let err = host.regenerate_rewrite_rules().unwrap_err();
        assert!(err.to_string().contains("expert delivery"));
        assert!(!host.files.contains_key(&HostFile::RewriteRules));

        host = host.with_variable("wp_cache_mod_rewrite", 1);
        host.regenerate_rewrite_rules().unwrap();
        assert_eq!(host.rewrite_status(), crate::host::RuleStatus::Configured);
    }
}
