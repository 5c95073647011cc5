//! Filter options and their validation.
//!
//! Options are a loose key/value map (so a config file or a caller can pass
//! anything) that [`prepare_options`] narrows into a typed [`FilterRule`].
//! The only recognized keys are `only` and `except`.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

use crate::error::FilterError;

pub const ONLY: &str = "only";
pub const EXCEPT: &str = "except";

/// One or more names. A single name is promoted to a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct Names(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Scalar),
    Many(Vec<Scalar>),
}

/// A config value usable as a name. Numbers and booleans are kept as their
/// text form.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Int(n) => n.to_string(),
            Scalar::UInt(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

impl From<OneOrMany> for Names {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(name) => Names(vec![name.into()]),
            OneOrMany::Many(names) => Names(names.into_iter().map(String::from).collect()),
        }
    }
}

impl Names {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Names {
    fn from(name: &str) -> Self {
        Names(vec![name.to_string()])
    }
}

impl From<String> for Names {
    fn from(name: String) -> Self {
        Names(vec![name])
    }
}

impl From<&String> for Names {
    fn from(name: &String) -> Self {
        Names(vec![name.clone()])
    }
}

impl From<Vec<String>> for Names {
    fn from(names: Vec<String>) -> Self {
        Names(names)
    }
}

impl From<Vec<&str>> for Names {
    fn from(names: Vec<&str>) -> Self {
        Names(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Names {
    fn from(names: &[&str]) -> Self {
        Names(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<&[String]> for Names {
    fn from(names: &[String]) -> Self {
        Names(names.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Names {
    fn from(names: [&str; N]) -> Self {
        Names(names.iter().map(|n| n.to_string()).collect())
    }
}

impl<'a> IntoIterator for &'a Names {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Raw options passed to `apply` or `skip`.
///
/// Keys are kept as given; unknown keys are rejected later by
/// [`prepare_options`], not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FilterOptions {
    entries: IndexMap<String, Names>,
}

impl FilterOptions {
    /// No options: the filter runs for every action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given actions.
    pub fn only(self, methods: impl Into<Names>) -> Self {
        self.with(ONLY, methods)
    }

    /// Run for every action except the given ones.
    pub fn except(self, methods: impl Into<Names>) -> Self {
        self.with(EXCEPT, methods)
    }

    /// Set an arbitrary option key.
    pub fn with(mut self, key: &str, methods: impl Into<Names>) -> Self {
        self.entries.insert(key.to_string(), methods.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Names> {
        self.entries.get(key)
    }
}

/// Which actions a filter's rule refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// No restriction.
    None,
    Only(IndexSet<String>),
    Except(IndexSet<String>),
}

impl Condition {
    /// The option key this condition came from.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            Condition::None => None,
            Condition::Only(_) => Some(ONLY),
            Condition::Except(_) => Some(EXCEPT),
        }
    }

    pub fn methods(&self) -> Option<&IndexSet<String>> {
        match self {
            Condition::None => None,
            Condition::Only(methods) | Condition::Except(methods) => Some(methods),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind().zip(self.methods()) {
            Some((kind, methods)) => {
                let list: Vec<&str> = methods.iter().map(String::as_str).collect();
                write!(f, "{}({})", kind, list.join(", "))
            }
            None => write!(f, "always"),
        }
    }
}

/// A validated condition together with its polarity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    pub condition: Condition,
    /// Registered through `skip`; inverts the condition.
    pub skip: bool,
}

impl FilterRule {
    /// Whether a filter with this rule fires when `action` is dispatched.
    ///
    /// | condition    | apply              | skip               |
    /// |--------------|--------------------|--------------------|
    /// | none         | always             | never              |
    /// | `only(m)`    | `action` in `m`    | `action` not in `m`|
    /// | `except(m)`  | `action` not in `m`| `action` in `m`    |
    pub fn fires_for(&self, action: &str) -> bool {
        match &self.condition {
            Condition::None => !self.skip,
            Condition::Only(methods) => methods.contains(action) != self.skip,
            Condition::Except(methods) => methods.contains(action) == self.skip,
        }
    }
}

/// Validate `options` and turn them into a rule.
///
/// Unknown keys are reported before a conflicting `only`/`except` pair.
pub fn prepare_options(options: &FilterOptions, skip: bool) -> Result<FilterRule, FilterError> {
    if let Some(key) = options.keys().find(|key| *key != ONLY && *key != EXCEPT) {
        return Err(FilterError::invalid_option_key(key));
    }

    let only = options.get(ONLY);
    let except = options.get(EXCEPT);

    let condition = match (only, except) {
        (Some(_), Some(_)) => return Err(FilterError::ConflictingCondition),
        (Some(methods), None) => Condition::Only(methods.iter().map(str::to_string).collect()),
        (None, Some(methods)) => Condition::Except(methods.iter().map(str::to_string).collect()),
        (None, None) => Condition::None,
    };

    Ok(FilterRule { condition, skip })
}
