use crate::domain::error::DomainError;

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Check that `name` is a valid identifier: `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn validate_identifier(name: &str) -> Result<(), DomainError> {
        let mut chars = name.chars();

        let Some(first) = chars.next() else {
            return Err(DomainError::InvalidIdentifier {
                name: name.into(),
                reason: "name cannot be empty",
            });
        };

        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(DomainError::InvalidIdentifier {
                name: name.into(),
                reason: "must start with a letter or '_'",
            });
        }

        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DomainError::InvalidIdentifier {
                name: name.into(),
                reason: "only letters, digits and '_' are allowed",
            });
        }

        Ok(())
    }

    /// Model names additionally have to start upper-case so the generated
    /// `FooRepository` / `FooService` type names read as types.
    pub fn validate_model_name(name: &str) -> Result<(), DomainError> {
        Self::validate_identifier(name)?;

        if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Err(DomainError::InvalidIdentifier {
                name: name.into(),
                reason: "model names must start with an upper-case letter",
            });
        }

        Ok(())
    }
}
