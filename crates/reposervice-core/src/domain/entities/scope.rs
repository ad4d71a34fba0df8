//! Scope directives: which named scopes (or loaders) to apply, in order, and
//! with which parameter.
//!
//! Two ways in:
//!
//! - the typed builder, `Scopes::new().bare("testType")?.with("byType", "test")?`
//! - the loose JSON form accepted at the edges, e.g.
//!   `["testType", {"nameStarts": "Test"}]` or `{"0": "testType", "byType": "test"}`
//!
//! In the loose form a keyed entry whose value equals its key
//! (`{"testType": "testType"}`) and a keyed entry with a `null` value are both
//! read as bare directives.

use serde_json::Value;

use crate::domain::{error::DomainError, value_objects::Identifier};

#[derive(Debug, Clone, PartialEq)]
pub enum ScopeDirective {
    /// `"name"`: invoke without a parameter.
    Bare(Identifier),
    /// `"name" => param`: invoke with a single parameter.
    WithParameter(Identifier, Value),
}

impl ScopeDirective {
    pub fn bare(name: &str) -> Result<Self, DomainError> {
        Ok(Self::Bare(Identifier::new(name)?))
    }

    pub fn with(name: &str, parameter: impl Into<Value>) -> Result<Self, DomainError> {
        Ok(Self::WithParameter(Identifier::new(name)?, parameter.into()))
    }

    pub fn name(&self) -> &Identifier {
        match self {
            Self::Bare(name) | Self::WithParameter(name, _) => name,
        }
    }

    pub fn parameter(&self) -> Option<&Value> {
        match self {
            Self::Bare(_) => None,
            Self::WithParameter(_, value) => Some(value),
        }
    }

    /// Interpret a `key => value` entry of the loose form.
    fn from_keyed(key: &str, value: &Value) -> Result<Self, DomainError> {
        match value {
            Value::Null => Self::bare(key),
            Value::String(s) if s == key => Self::bare(key),
            other => Self::with(key, other.clone()),
        }
    }
}

/// Ordered list of directives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scopes(Vec<ScopeDirective>);

impl Scopes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bare directive.
    pub fn bare(mut self, name: &str) -> Result<Self, DomainError> {
        self.0.push(ScopeDirective::bare(name)?);
        Ok(self)
    }

    /// Append a directive with a parameter.
    pub fn with(mut self, name: &str, parameter: impl Into<Value>) -> Result<Self, DomainError> {
        self.0.push(ScopeDirective::with(name, parameter)?);
        Ok(self)
    }

    pub fn push(&mut self, directive: ScopeDirective) {
        self.0.push(directive);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScopeDirective> {
        self.0.iter()
    }

    /// Parse the loose JSON form.
    ///
    /// - `null` → no directives
    /// - `"name"` → one bare directive
    /// - array → each string item is bare, each object item contributes its
    ///   keyed entries in order
    /// - object → numeric keys with string values are bare, other keys are
    ///   keyed entries
    pub fn from_json(value: &Value) -> Result<Self, DomainError> {
        let mut scopes = Self::new();

        match value {
            Value::Null => {}
            Value::String(name) => scopes.push(ScopeDirective::bare(name)?),
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(name) => scopes.push(ScopeDirective::bare(name)?),
                        Value::Object(map) => {
                            for (key, value) in map {
                                scopes.push(ScopeDirective::from_keyed(key, value)?);
                            }
                        }
                        other => {
                            return Err(DomainError::InvalidScopeDirectives(format!(
                                "expected a scope name or a {{name: parameter}} map, got {other}"
                            )));
                        }
                    }
                }
            }
            Value::Object(map) => {
                for (key, value) in map {
                    if key.parse::<u64>().is_ok() {
                        match value {
                            Value::String(name) => scopes.push(ScopeDirective::bare(name)?),
                            other => {
                                return Err(DomainError::InvalidScopeDirectives(format!(
                                    "positional entry {key} must be a scope name, got {other}"
                                )));
                            }
                        }
                    } else {
                        scopes.push(ScopeDirective::from_keyed(key, value)?);
                    }
                }
            }
            other => {
                return Err(DomainError::InvalidScopeDirectives(format!(
                    "expected a list or map of scopes, got {other}"
                )));
            }
        }

        Ok(scopes)
    }
}

impl From<ScopeDirective> for Scopes {
    fn from(directive: ScopeDirective) -> Self {
        Self(vec![directive])
    }
}

impl FromIterator<ScopeDirective> for Scopes {
    fn from_iter<T: IntoIterator<Item = ScopeDirective>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Scopes {
    type Item = &'a ScopeDirective;
    type IntoIter = std::slice::Iter<'a, ScopeDirective>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
