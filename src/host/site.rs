//! File-backed host: a site directory with a TOML state file

use anyhow::{Context, Result, bail};
use declarative::{Value, VariableStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Host, HostFile, rewrite};
use crate::config::SiteLayout;

/// Persisted host state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostState {
    #[serde(default)]
    pub active_extensions: Vec<String>,

    #[serde(default)]
    pub flags: BTreeMap<String, bool>,

    #[serde(default, deserialize_with = "scalar_variables")]
    pub variables: BTreeMap<String, Value>,
}

/// Keep the variables a setting could hold; floats become numeric strings
/// and anything non-scalar is skipped
fn scalar_variables<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<String, toml::Value>::deserialize(deserializer)?;
    let mut variables = BTreeMap::new();

    for (name, value) in raw {
        let value = match value {
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Integer(i) => Value::Int(i),
            toml::Value::String(s) => Value::Str(s),
            toml::Value::Float(f) => {
                log::warn!("Variable '{name}' is a float, reading it as \"{f}\"");
                Value::Str(f.to_string())
            }
            other => {
                log::warn!("Ignoring variable '{name}': {} is not a scalar", other.type_str());
                continue;
            }
        };
        variables.insert(name, value);
    }

    Ok(variables)
}

/// Host backed by files under a site root
#[derive(Debug)]
pub struct SiteHost {
    root: PathBuf,
    layout: SiteLayout,
    state: HostState,
    /// Set on scratch copies: writes land in `overlay` and never reach disk
    detached: bool,
    overlay: BTreeMap<HostFile, String>,
}

impl SiteHost {
    /// Open the site at `root`; a missing state file means an empty host
    pub fn open(root: &Path) -> Result<Self> {
        let layout = SiteLayout::load(root)?;
        let path = layout.host_file(root);

        let state = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Could not read host state {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Invalid host state in {}", path.display()))?
        } else {
            log::debug!("No host state at {}, starting empty", path.display());
            HostState::default()
        };

        Ok(Self {
            root: root.to_path_buf(),
            layout,
            state,
            detached: false,
            overlay: BTreeMap::new(),
        })
    }

    /// In-memory copy of this host for previewing changes
    pub fn detached(&self) -> Self {
        Self {
            root: self.root.clone(),
            layout: self.layout.clone(),
            state: self.state.clone(),
            detached: true,
            overlay: self.overlay.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state(&self) -> &HostState {
        &self.state
    }

    fn path(&self, file: HostFile) -> PathBuf {
        match file {
            HostFile::Bootstrap => self.layout.bootstrap_file(&self.root),
            HostFile::RewriteRules => self.layout.rewrite_file(&self.root),
        }
    }

    fn persist(&self) -> Result<()> {
        if self.detached {
            return Ok(());
        }
        let path = self.layout.host_file(&self.root);
        let content =
            toml::to_string_pretty(&self.state).context("Failed to serialize host state")?;
        fs::write(&path, content)
            .with_context(|| format!("Could not write host state {}", path.display()))?;
        log::debug!("Persisted host state to {}", path.display());
        Ok(())
    }
}

impl VariableStore for SiteHost {
    fn get_variable(&self, name: &str) -> Value {
        self.state.variables.get(name).cloned().unwrap_or_default()
    }

    fn set_variable(&mut self, name: &str, value: Value) -> Result<()> {
        if value == Value::Null {
            self.state.variables.remove(name);
        } else {
            self.state.variables.insert(name.to_string(), value);
        }
        self.persist()
    }
}

impl Host for SiteHost {
    fn flag(&self, name: &str) -> bool {
        self.state.flags.get(name).copied().unwrap_or(false)
    }

    fn active_extensions(&self) -> Vec<String> {
        self.state.active_extensions.clone()
    }

    fn file_exists(&self, file: HostFile) -> bool {
        self.overlay.contains_key(&file) || self.path(file).is_file()
    }

    fn file_readable(&self, file: HostFile) -> bool {
        self.overlay.contains_key(&file) || fs::File::open(self.path(file)).is_ok()
    }

    fn file_contents(&self, file: HostFile) -> Option<String> {
        if let Some(contents) = self.overlay.get(&file) {
            return Some(contents.clone());
        }
        fs::read_to_string(self.path(file)).ok()
    }

    fn generated_rewrite_rules(&self) -> String {
        rewrite::generate(self, &self.layout.content_dir)
    }

    fn scratch(&self) -> Self {
        self.detached()
    }

    fn regenerate_rewrite_rules(&mut self) -> Result<()> {
        if !self.get_variable("wp_cache_mod_rewrite").is_truthy() {
            bail!("rewrite rules are only used with expert delivery (wp_cache_mod_rewrite is off)");
        }

        let path = self.path(HostFile::RewriteRules);
        let current = if let Some(contents) = self.overlay.get(&HostFile::RewriteRules) {
            contents.clone()
        } else if path.exists() {
            fs::read_to_string(&path)
                .with_context(|| format!("Could not read {}", path.display()))?
        } else {
            String::new()
        };

        let updated = rewrite::splice(&current, &self.generated_rewrite_rules());
        if self.detached {
            self.overlay.insert(HostFile::RewriteRules, updated);
            return Ok(());
        }
        fs::write(&path, updated)
            .with_context(|| format!("Could not write rewrite rules to {}", path.display()))?;
        log::info!("Regenerated rewrite rules in {}", path.display());
        Ok(())
    }
}
