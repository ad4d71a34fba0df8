use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::error::DomainError;
use super::value_objects::Attributes;

/// A filesystem path guaranteed to be **relative**.
///
/// Generated artifacts are always placed below the project base path, so
/// every configured directory and every computed file path is relative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Try to create a relative path.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    /// Join a path segment onto this relative path.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        let segment = segment.as_ref();
        if segment.is_absolute() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: segment.display().to_string(),
            });
        }
        Ok(Self(self.0.join(segment)))
    }

    /// Borrow as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Consume into a `PathBuf`.
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

// ============================================================================
// Whitespace trimming
// ============================================================================

/// Trim leading/trailing whitespace from every string in `value`.
///
/// Arrays and objects are walked recursively; numbers, booleans and nulls are
/// returned untouched.
pub fn trim_value(value: Value) -> Value {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() == s.len() {
                Value::String(s)
            } else {
                Value::String(trimmed.to_owned())
            }
        }
        Value::Array(items) => Value::Array(items.into_iter().map(trim_value).collect()),
        Value::Object(map) => Value::Object(trim_attributes(map)),
        other => other,
    }
}

/// [`trim_value`] over every attribute of a payload.
pub fn trim_attributes(attributes: Attributes) -> Attributes {
    attributes
        .into_iter()
        .map(|(key, value)| (key, trim_value(value)))
        .collect()
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// Convert a string to snake_case.
///
/// | Input | Output |
/// |-------|--------|
/// | "TestModel" | "test_model" |
/// | "HTTPRequest" | "http_request" |
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Convert a string to PascalCase.
///
/// | Input | Output |
/// |-------|--------|
/// | "blog_post" | "BlogPost" |
/// | "HTTPRequest" | "HttpRequest" |
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Naive English plural used for table names (`post` -> `posts`,
/// `category` -> `categories`, `box` -> `boxes`).
pub fn pluralize(word: &str) -> String {
    let lower = word.to_lowercase();
    let ends_with_consonant_y = lower.ends_with('y')
        && !matches!(
            lower.chars().rev().nth(1),
            Some('a' | 'e' | 'i' | 'o' | 'u')
        );

    if ends_with_consonant_y {
        format!("{}ies", &word[..word.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}

/// Split a string into words based on casing and separators.
///
/// 1. `_`, `-` and whitespace always split
/// 2. `aB` splits between `a` and `B`
/// 3. `HTTPRequest` splits between `P` and `R` (Upper Upper Lower)
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn relative_path_rejects_absolute() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
        assert!(RelativePath::try_new("src/models").is_ok());
    }

    #[test]
    fn relative_path_join_rejects_absolute_segment() {
        let base = RelativePath::try_new("src").unwrap();
        assert!(base.join("/tmp").is_err());
        assert_eq!(
            base.join("models").unwrap().as_path(),
            Path::new("src/models")
        );
    }

    #[test]
    fn trims_nested_strings() {
        let trimmed = trim_value(json!({
            "name": "  Test  ",
            "count": 3,
            "tags": [" a ", "b", { "deep": "\tvalue\n" }],
            "missing": null
        }));

        assert_eq!(
            trimmed,
            json!({
                "name": "Test",
                "count": 3,
                "tags": ["a", "b", { "deep": "value" }],
                "missing": null
            })
        );
    }

    #[test]
    fn snake_case_conversions() {
        assert_eq!(to_snake_case("TestModel"), "test_model");
        assert_eq!(to_snake_case("HTTPRequest"), "http_request");
        assert_eq!(to_snake_case("Post"), "post");
        assert_eq!(to_snake_case("OAuth2Client"), "o_auth2_client");
    }

    #[test]
    fn pascal_case_conversions() {
        assert_eq!(to_pascal_case("blog_post"), "BlogPost");
        assert_eq!(to_pascal_case("Post"), "Post");
    }

    #[test]
    fn pluralizes_table_names() {
        assert_eq!(pluralize("test_model"), "test_models");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("box"), "boxes");
    }
}
