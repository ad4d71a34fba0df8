//! Value objects shared by the repository layer and the generator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::common::to_snake_case;
use super::error::DomainError;
use super::validation::DomainValidator;

/// Primary key of a persisted record.
pub type RecordId = u64;

/// Attribute payload of a record: column name to JSON value.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Identifier
// ============================================================================

/// A validated scope/loader name (`[A-Za-z_][A-Za-z0-9_]*`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        DomainValidator::validate_identifier(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl FromStr for Identifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ModelReference
// ============================================================================

/// The `{model}` argument of the generator, parsed.
///
/// Accepts `Post`, `Blog/Post`, `Blog\Post` and `blog::Post`. Every segment
/// before the last is a sub-module below the configured models module; the
/// last segment is the model type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReference {
    raw: String,
    name: String,
    modules: Vec<String>,
}

impl ModelReference {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let normalized = input.trim().replace("::", "/").replace('\\', "/");
        let normalized = normalized.trim_matches('/');

        if normalized.is_empty() {
            return Err(DomainError::InvalidModelReference {
                reference: input.into(),
                reason: "model name cannot be empty".into(),
            });
        }

        let mut segments: Vec<&str> = normalized.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(DomainError::InvalidModelReference {
                reference: input.into(),
                reason: "empty path segment".into(),
            });
        }

        // Non-empty by construction.
        let name = segments.pop().unwrap_or_default().to_owned();
        DomainValidator::validate_model_name(&name).map_err(|e| {
            DomainError::InvalidModelReference {
                reference: input.into(),
                reason: e.to_string(),
            }
        })?;

        let modules = segments
            .into_iter()
            .map(|segment| {
                let module = to_snake_case(segment);
                DomainValidator::validate_identifier(&module)
                    .map(|()| module)
                    .map_err(|e| DomainError::InvalidModelReference {
                        reference: input.into(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: normalized.to_owned(),
            name,
            modules,
        })
    }

    /// Model type name, e.g. `Post`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sub-modules between the models module and the model file.
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// File stem of the model, e.g. `post`.
    pub fn file_stem(&self) -> String {
        to_snake_case(&self.name)
    }
}

impl fmt::Display for ModelReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_validates_on_construction() {
        assert!(Identifier::new("testType").is_ok());
        assert!(Identifier::new("test-type").is_err());
        assert!("byType".parse::<Identifier>().is_ok());
    }

    #[test]
    fn identifier_deserializes_through_validation() {
        let ok: Result<Identifier, _> = serde_json::from_str("\"nameStarts\"");
        assert!(ok.is_ok());
        let bad: Result<Identifier, _> = serde_json::from_str("\"1bad\"");
        assert!(bad.is_err());
    }

    #[test]
    fn parses_plain_model() {
        let model = ModelReference::parse("Post").unwrap();
        assert_eq!(model.name(), "Post");
        assert!(model.modules().is_empty());
        assert_eq!(model.file_stem(), "post");
    }

    #[test]
    fn parses_nested_model_with_every_separator() {
        for input in ["Blog/Post", "Blog\\Post", "blog::Post", "/Blog/Post"] {
            let model = ModelReference::parse(input).unwrap();
            assert_eq!(model.name(), "Post", "input: {input}");
            assert_eq!(model.modules(), ["blog".to_string()], "input: {input}");
        }
    }

    #[test]
    fn display_uses_normalized_reference() {
        let model = ModelReference::parse("Blog\\BlogPost").unwrap();
        assert_eq!(model.to_string(), "Blog/BlogPost");
        assert_eq!(model.file_stem(), "blog_post");
    }

    #[test]
    fn rejects_invalid_models() {
        assert!(ModelReference::parse("").is_err());
        assert!(ModelReference::parse("post").is_err());
        assert!(ModelReference::parse("Blog//Post").is_err());
        assert!(ModelReference::parse("Blog/My-Post").is_err());
    }
}
