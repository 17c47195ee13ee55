//! Setting descriptors
//!
//! A [`Setting`] is one row of a declarative table: a label, the value it
//! should hold, and how to reach its actual value. Tables are plain
//! ordered slices; order is part of the contract because later rows may
//! depend on side effects of applying earlier ones.

use crate::error::{Error, Result};
use crate::store::VariableStore;
use crate::value::Value;
use std::fmt;

/// Custom getter: collapses whatever host signals it consults into one value
pub type Getter<H> = fn(&H) -> Value;

/// Custom setter: encapsulates its own target value
pub type Setter<H> = fn(&mut H) -> anyhow::Result<()>;

/// How a setting's actual value is read and written
pub enum Access<H> {
    /// A named variable in the store, read and written directly
    Variable(&'static str),
    /// A getter, plus a setter when the setting is writable through this path
    Custom {
        get: Getter<H>,
        set: Option<Setter<H>>,
    },
}

impl<H> Clone for Access<H> {
    fn clone(&self) -> Self {
        match self {
            Self::Variable(name) => Self::Variable(*name),
            Self::Custom { get, set } => Self::Custom {
                get: *get,
                set: *set,
            },
        }
    }
}

impl<H> fmt::Debug for Access<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => f.debug_tuple("Variable").field(name).finish(),
            Self::Custom { set, .. } => f
                .debug_struct("Custom")
                .field("writable", &set.is_some())
                .finish(),
        }
    }
}

/// One declarative row: label, expected value, access strategy
pub struct Setting<H> {
    pub label: &'static str,
    pub expected: Value,
    pub access: Access<H>,
}

impl<H> Clone for Setting<H> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            expected: self.expected.clone(),
            access: self.access.clone(),
        }
    }
}

impl<H> fmt::Debug for Setting<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("label", &self.label)
            .field("expected", &self.expected)
            .field("access", &self.access)
            .finish()
    }
}

impl<H: VariableStore> Setting<H> {
    /// Row backed by a store variable
    pub fn variable(label: &'static str, name: &'static str, expected: impl Into<Value>) -> Self {
        Self {
            label,
            expected: expected.into(),
            access: Access::Variable(name),
        }
    }

    /// Row backed by a custom getter and optional setter
    pub fn custom(
        label: &'static str,
        expected: impl Into<Value>,
        get: Getter<H>,
        set: Option<Setter<H>>,
    ) -> Self {
        Self {
            label,
            expected: expected.into(),
            access: Access::Custom { get, set },
        }
    }

    /// Read the actual value; no side effects
    pub fn read(&self, host: &H) -> Value {
        match &self.access {
            Access::Variable(name) => host.get_variable(name),
            Access::Custom { get, .. } => get(host),
        }
    }

    /// Best-effort write of the expected value
    ///
    /// Does not confirm the result; re-read to check convergence.
    pub fn write(&self, host: &mut H) -> Result<()> {
        let outcome = match &self.access {
            Access::Variable(name) => host.set_variable(name, self.expected.clone()),
            Access::Custom { set: Some(set), .. } => set(host),
            Access::Custom { set: None, .. } => {
                return Err(Error::MissingWriter {
                    label: self.label.to_string(),
                });
            }
        };

        outcome.map_err(|source| Error::WriteFailed {
            label: self.label.to_string(),
            source,
        })
    }

    /// Whether the actual value loosely equals the expected one
    pub fn matches(&self, actual: &Value) -> bool {
        actual.loose_eq(&self.expected)
    }

    /// Whether this row can be written at all
    pub fn is_writable(&self) -> bool {
        !matches!(self.access, Access::Custom { set: None, .. })
    }
}
