//! Key atoms, keys, and the normalization of raw key values
//!
//! A raw key arrives as a JSON value: either a string that is split on a
//! separator, or a sequence of primitives. Normalization turns it into a
//! [`Key`], a non-empty sequence of [`Atom`]s that is compared component by
//! component.

use crate::error::KeyError;
use derive_more::Display;
use serde_json::Value;
use std::fmt;
use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single comparable key component
///
/// Atoms of the same kind use their natural order. Comparing atoms of
/// different kinds at the same key position is a precondition violation:
/// the result is deterministic (`Int < Str < Bool`) but carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Atom {
    #[display(fmt = "{}", _0)]
    Int(i64),

    #[display(fmt = "{}", _0)]
    Str(String),

    #[display(fmt = "{}", _0)]
    Bool(bool),
}

impl Atom {
    /// Convert a floating point component, rejecting values with no integer form
    pub(crate) fn from_f64(index: usize, value: f64) -> Result<Atom, KeyError> {
        if value.is_nan() {
            return Err(KeyError::component(index, "NaN is not allowed"));
        }
        if value.is_infinite() {
            return Err(KeyError::component(index, "infinite numbers are not allowed"));
        }
        if value.fract() != 0.0 {
            return Err(KeyError::component(index, "fractional numbers are not allowed"));
        }
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if value < i64::MIN as f64 || value >= i64::MAX as f64 {
            return Err(KeyError::component(index, "integer out of range"));
        }
        Ok(Atom::Int(value as i64))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Atom::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Atom::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Atom::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<i64> for Atom {
    fn from(value: i64) -> Self {
        Atom::Int(value)
    }
}

impl From<bool> for Atom {
    fn from(value: bool) -> Self {
        Atom::Bool(value)
    }
}

impl From<&str> for Atom {
    fn from(value: &str) -> Self {
        Atom::Str(value.to_string())
    }
}

impl From<String> for Atom {
    fn from(value: String) -> Self {
        Atom::Str(value)
    }
}

/// An ordered, non-empty sequence of atoms
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<Atom>", into = "Vec<Atom>")
)]
pub struct Key(Vec<Atom>);

impl Key {
    /// Create a key, failing with [`KeyError::EmptyKey`] for an empty sequence
    pub fn new(atoms: Vec<Atom>) -> Result<Self, KeyError> {
        if atoms.is_empty() {
            return Err(KeyError::EmptyKey);
        }
        Ok(Key(atoms))
    }

    pub fn as_slice(&self) -> &[Atom] {
        &self.0
    }

    pub fn into_atoms(self) -> Vec<Atom> {
        self.0
    }
}

impl Deref for Key {
    type Target = [Atom];

    fn deref(&self) -> &[Atom] {
        &self.0
    }
}

impl TryFrom<Vec<Atom>> for Key {
    type Error = KeyError;

    fn try_from(atoms: Vec<Atom>) -> Result<Self, KeyError> {
        Key::new(atoms)
    }
}

impl From<Key> for Vec<Atom> {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.0, "."))
    }
}

/// Join atoms with a separator, e.g. `[1, 2, "a"]` -> `"1.2.a"`
pub fn join(atoms: &[Atom], separator: &str) -> String {
    atoms
        .iter()
        .map(|atom| atom.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// How raw sequences are turned into keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NormalizeMode {
    /// Split strings, trim components, convert digit-only strings to integers
    #[display(fmt = "default")]
    Default,

    /// Accept sequences only and keep their components unchanged
    #[display(fmt = "as-is")]
    AsIs,
}

/// Turns raw key values into keys
///
/// `normalize` returns `Ok(None)` when the item has no key and should be
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNormalizer {
    mode: NormalizeMode,
    separator: String,
}

impl Default for KeyNormalizer {
    fn default() -> Self {
        Self::new(".")
    }
}

impl KeyNormalizer {
    /// A default-mode normalizer splitting string keys on `separator`
    ///
    /// An empty separator leaves string keys unsplit.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            mode: NormalizeMode::Default,
            separator: separator.into(),
        }
    }

    /// A normalizer that validates sequences and passes them through
    pub fn as_is() -> Self {
        Self {
            mode: NormalizeMode::AsIs,
            separator: String::new(),
        }
    }

    pub fn mode(&self) -> NormalizeMode {
        self.mode
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Normalize a raw key value; `None` and JSON `null` mean "skip this item"
    pub fn normalize(&self, raw: Option<&Value>) -> Result<Option<Key>, KeyError> {
        let raw = match raw {
            None | Some(Value::Null) => return Ok(None),
            Some(raw) => raw,
        };

        let atoms = match (self.mode, raw) {
            (NormalizeMode::Default, Value::String(s)) => self
                .split(s)
                .enumerate()
                .map(|(index, part)| coerce_str(index, part))
                .collect::<Result<Vec<_>, KeyError>>()?,
            (NormalizeMode::Default, Value::Array(components)) => components
                .iter()
                .enumerate()
                .map(|(index, component)| coerce_default(index, component))
                .collect::<Result<Vec<_>, KeyError>>()?,
            (NormalizeMode::AsIs, Value::Array(components)) => components
                .iter()
                .enumerate()
                .map(|(index, component)| convert_as_is(index, component))
                .collect::<Result<Vec<_>, KeyError>>()?,
            (NormalizeMode::Default, other) => {
                return Err(KeyError::InvalidKeyValue {
                    expected: "a string or a sequence",
                    found: kind_of(other),
                })
            }
            (NormalizeMode::AsIs, other) => {
                return Err(KeyError::InvalidKeyValue {
                    expected: "a sequence",
                    found: kind_of(other),
                })
            }
        };

        Key::new(atoms).map(Some)
    }

    fn split<'a>(&'a self, s: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        if self.separator.is_empty() {
            Box::new(std::iter::once(s))
        } else {
            Box::new(s.split(self.separator.as_str()))
        }
    }
}

/// Trim, map blank to `""`, and turn digit-only strings into integers
fn coerce_str(index: usize, value: &str) -> Result<Atom, KeyError> {
    let value = value.trim();

    if value.is_empty() {
        return Ok(Atom::Str(String::new()));
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        return value
            .parse::<i64>()
            .map(Atom::Int)
            .map_err(|_| KeyError::component(index, "integer out of range"));
    }

    Ok(Atom::Str(value.to_string()))
}

fn coerce_default(index: usize, component: &Value) -> Result<Atom, KeyError> {
    match component {
        Value::String(s) => coerce_str(index, s),
        other => convert_as_is(index, other),
    }
}

fn convert_as_is(index: usize, component: &Value) -> Result<Atom, KeyError> {
    match component {
        Value::Null => Err(KeyError::component(index, "null values are not allowed")),
        Value::Bool(b) => Ok(Atom::Bool(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Atom::Int(i)),
            None if n.is_u64() => Err(KeyError::component(index, "integer out of range")),
            None => Atom::from_f64(index, n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Ok(Atom::Str(s.clone())),
        Value::Array(_) => Err(KeyError::component(index, "nested sequences are not allowed")),
        Value::Object(_) => Err(KeyError::component(index, "objects are not allowed")),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "object",
    }
}
