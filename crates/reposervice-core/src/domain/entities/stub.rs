//! Stub templates and `%token%` substitution.
//!
//! A stub is plain text with `%dotted.token%` placeholders. Rendering is a
//! flat, ordered find-and-replace: no escaping, no conditionals, no nesting.
//! Tokens without a value are left in place; callers that care can ask for
//! them with [`unresolved_placeholders`].

use std::fmt;

use serde::Serialize;

/// The stub files the generator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StubKind {
    RepositoryContract,
    Repository,
    ServiceContract,
    Service,
    Model,
}

impl StubKind {
    pub const ALL: [StubKind; 5] = [
        Self::RepositoryContract,
        Self::Repository,
        Self::ServiceContract,
        Self::Service,
        Self::Model,
    ];

    /// File name of the stub, both built in and in an override directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::RepositoryContract => "RepositoryInterface.stub",
            Self::Repository => "Repository.stub",
            Self::ServiceContract => "ServiceInterface.stub",
            Self::Service => "Service.stub",
            Self::Model => "Model.stub",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.file_name() == name)
    }
}

impl fmt::Display for StubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Ordered token → value pairs. Tokens are stored with their `%` delimiters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Replacements(Vec<(String, String)>);

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `%token%` → `value`. A token added twice keeps its first position
    /// and takes the new value.
    pub fn with(mut self, token: &str, value: impl Into<String>) -> Self {
        let token = format!("%{token}%");
        let value = value.into();
        match self.0.iter_mut().find(|(t, _)| *t == token) {
            Some(entry) => entry.1 = value,
            None => self.0.push((token, value)),
        }
        self
    }

    /// Value for a token given without delimiters.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(t, _)| t.trim_matches('%') == token)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }
}

/// A loaded stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub {
    kind: StubKind,
    content: String,
}

impl Stub {
    pub fn new(kind: StubKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn kind(&self) -> StubKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace every token, in insertion order.
    pub fn render(&self, replacements: &Replacements) -> String {
        replacements
            .iter()
            .fold(self.content.clone(), |acc, (token, value)| acc.replace(token, value))
    }
}

/// `%token%` occurrences left in rendered text.
///
/// A token is `%` followed by one or more of `[A-Za-z0-9_.]` and a closing
/// `%`. Anything else between two `%` (a modulo expression, a format spec)
/// is not a token.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && is_token_byte(bytes[end]) {
            end += 1;
        }
        if end > start && end < bytes.len() && bytes[end] == b'%' {
            let token = &text[start..end];
            if !found.iter().any(|t| t == token) {
                found.push(token.to_owned());
            }
            i = end + 1;
        } else {
            i = start;
        }
    }

    found
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_round_trip() {
        for kind in StubKind::ALL {
            assert_eq!(StubKind::from_file_name(kind.file_name()), Some(kind));
        }
        assert_eq!(StubKind::from_file_name("Nope.stub"), None);
    }

    #[test]
    fn render_replaces_every_occurrence() {
        let stub = Stub::new(
            StubKind::RepositoryContract,
            "use %namespaces.model%::%modelName%;\npub trait %modelName%Repo {}\n",
        );
        let replacements = Replacements::new()
            .with("namespaces.model", "crate::models::post")
            .with("modelName", "Post");

        assert_eq!(
            stub.render(&replacements),
            "use crate::models::post::Post;\npub trait PostRepo {}\n"
        );
    }

    #[test]
    fn similar_tokens_do_not_collide() {
        let stub = Stub::new(
            StubKind::Repository,
            "%repositoryInterface% %namespaces.repositoryInterface% %namespaces.repositoryInterfaces%",
        );
        let replacements = Replacements::new()
            .with("repositoryInterface", "A")
            .with("namespaces.repositoryInterface", "B")
            .with("namespaces.repositoryInterfaces", "C");

        assert_eq!(stub.render(&replacements), "A B C");
    }

    #[test]
    fn unknown_tokens_survive_rendering() {
        let stub = Stub::new(StubKind::Service, "%serviceName% %other%");
        let rendered = stub.render(&Replacements::new().with("serviceName", "PostService"));
        assert_eq!(rendered, "PostService %other%");
        assert_eq!(unresolved_placeholders(&rendered), vec!["other".to_string()]);
    }

    #[test]
    fn with_overrides_existing_token_in_place() {
        let replacements = Replacements::new()
            .with("a", "1")
            .with("b", "2")
            .with("a", "3");
        assert_eq!(replacements.len(), 2);
        assert_eq!(replacements.get("a"), Some("3"));
        assert_eq!(replacements.iter().next(), Some(("%a%", "3")));
    }

    #[test]
    fn percent_signs_that_are_not_tokens_are_ignored() {
        assert!(unresolved_placeholders("let x = a % b; // 50% % done").is_empty());
        assert_eq!(
            unresolved_placeholders("%a.b% %a.b% 100%%x%"),
            vec!["a.b".to_string(), "x".to_string()]
        );
    }
}
