//! Scalar values held by the host's configuration store
//!
//! The store does not agree with itself on representation: the same flag
//! may come back as `1`, `"1"` or `true` depending on which code path last
//! wrote it. Comparison is therefore loose (coercing across scalar kinds),
//! and display is normalized by the kind of the *expected* value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label shown for a truthy boolean-like setting
pub const ENABLED: &str = "enabled";
/// Label shown for a falsy boolean-like setting
pub const DISABLED: &str = "disabled";

/// A polymorphic scalar read from or written to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Variable was never set
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    /// Truthiness as the host evaluates it
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Str(s) => !(s.is_empty() || s == "0"),
        }
    }

    /// Whether display should collapse this value to enabled/disabled
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Int(_))
    }

    /// Loose equality, coercing across compatible scalar representations
    ///
    /// Symmetric: `a.loose_eq(b) == b.loose_eq(a)` for every pair.
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(_), _) | (_, Self::Bool(_)) => self.is_truthy() == other.is_truthy(),
            (Self::Null, Self::Null) => true,
            (Self::Null, Self::Int(i)) | (Self::Int(i), Self::Null) => *i == 0,
            (Self::Null, Self::Str(s)) | (Self::Str(s), Self::Null) => s.is_empty(),
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Int(i), Self::Str(s)) | (Self::Str(s), Self::Int(i)) => match numeric(s) {
                Some(n) => n == *i as f64,
                None => i.to_string() == *s,
            },
            (Self::Str(a), Self::Str(b)) => match (numeric(a), numeric(b)) {
                (Some(x), Some(y)) => x == y,
                _ => a == b,
            },
        }
    }

    /// Render this value for a row whose expected value is `expected`
    pub fn display_against(&self, expected: &Self) -> String {
        if expected.is_binary() {
            let label = if self.is_truthy() { ENABLED } else { DISABLED };
            return label.to_string();
        }
        self.to_string()
    }
}

/// Parse a numeric string (integer or decimal, surrounding whitespace allowed)
fn numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    // f64 parsing also accepts "inf" and "NaN"; the store never means those
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
