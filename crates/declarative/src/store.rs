//! Variable store abstraction
//!
//! The host application's named global configuration values are reached
//! only through [`VariableStore`], so the engine never touches ambient
//! process state and can be driven against [`MemoryStore`] in tests.

use crate::value::Value;
use std::collections::BTreeMap;

/// Direct read/write access to named configuration variables
pub trait VariableStore {
    /// Current value of `name`, or [`Value::Null`] if it was never set
    fn get_variable(&self, name: &str) -> Value;

    /// Set `name` to `value`
    ///
    /// Success here only means the store accepted the write; callers
    /// re-read to confirm the value actually took effect.
    fn set_variable(&mut self, name: &str, value: Value) -> anyhow::Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl VariableStore for MemoryStore {
    fn get_variable(&self, name: &str) -> Value {
        self.values.get(name).cloned().unwrap_or_default()
    }

    fn set_variable(&mut self, name: &str, value: Value) -> anyhow::Result<()> {
        if value == Value::Null {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), value);
        }
        Ok(())
    }
}
