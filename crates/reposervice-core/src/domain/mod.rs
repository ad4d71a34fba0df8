// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for reposervice.
//!
//! Pure logic only: the query model and its in-memory evaluation, scope
//! directives and the registries that resolve them, stub substitution and
//! the generation plan. Persistence, files and prompts are reached through
//! ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, storage or console calls
//! - **Few crates**: std, serde/serde_json for the attribute model, thiserror
//! - **Validated construction**: names and paths are checked when built
pub mod common;
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    generation::{
        ArtifactKind, ArtifactOutcome, ArtifactPlan, ArtifactStatus, GenerationPlan,
        GenerationReport, GeneratorConfig, MainNamespaces, MainTypes, ModelPlan, Namespaces,
        Paths,
    },
    model::{CREATED_AT_COLUMN, ID_COLUMN, Model, Row, UPDATED_AT_COLUMN},
    query::{Columns, Condition, Direction, Page, Query},
    registry::{Arity, LoaderFn, LoaderRegistry, ScopeFn, ScopeRegistry},
    scope::{ScopeDirective, Scopes},
    stub::{Replacements, Stub, StubKind, unresolved_placeholders},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{Attributes, Identifier, ModelReference, RecordId};

pub use common::{RelativePath, trim_attributes, trim_value};
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Item {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<RecordId>,
        name: String,
        #[serde(rename = "type")]
        kind: String,
    }

    impl Model for Item {
        const TABLE: &'static str = "items";

        fn id(&self) -> Option<RecordId> {
            self.id
        }
    }

    fn seeded() -> Vec<Row> {
        let mut rows = Vec::new();
        for (i, (name, kind)) in [
            ("Generic1", "generic"),
            ("Generic2", "generic"),
            ("Generic3", "generic"),
            ("Test1", "test"),
            ("Other", "test"),
        ]
        .into_iter()
        .enumerate()
        {
            let Value::Object(attrs) = json!({ "name": name, "type": kind }) else {
                unreachable!()
            };
            rows.push(Row::new(i as u64 + 1, attrs));
        }
        rows
    }

    fn registry() -> ScopeRegistry<Item> {
        ScopeRegistry::new()
            .scope("testType", |q| q.where_eq("type", "test"))
            .unwrap()
            .scope_with_str("nameStarts", |q, p| q.where_starts_with("name", p))
            .unwrap()
    }

    // ========================================================================
    // Scope Resolution Through The Query Model
    // ========================================================================

    #[test]
    fn loose_json_directives_drive_the_registry() {
        let scopes = Scopes::from_json(&json!({ "0": "testType" })).unwrap();
        let query = registry().apply(Query::new(), &scopes).unwrap();
        let items: Vec<Item> = query
            .evaluate(seeded())
            .into_iter()
            .map(|row| Item::from_row(row).unwrap())
            .collect();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.kind == "test"));
    }

    #[test]
    fn keyed_directive_equal_to_its_name_is_bare() {
        let scopes = Scopes::from_json(&json!({ "testType": "testType" })).unwrap();
        let query = registry().apply(Query::new(), &scopes).unwrap();
        assert_eq!(query.evaluate(seeded()).len(), 2);
    }

    #[test]
    fn conjunctive_scopes_narrow_the_result() {
        let scopes =
            Scopes::from_json(&json!(["testType", { "nameStarts": "Test" }])).unwrap();
        let query = registry().apply(Query::new(), &scopes).unwrap();
        let rows = query.evaluate(seeded());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(json!("Test1")));
    }

    #[test]
    fn error_categories_drive_display() {
        let unknown = registry()
            .apply(Query::new(), &Scopes::new().bare("missing").unwrap())
            .unwrap_err();
        assert_eq!(unknown.category(), ErrorCategory::NotFound);
        assert!(!unknown.suggestions().is_empty());

        let invalid = Identifier::new("1abc").unwrap_err();
        assert_eq!(invalid.category(), ErrorCategory::Validation);
    }

    // ========================================================================
    // Stub Rendering Through The Plan
    // ========================================================================

    #[test]
    fn plan_replacements_fill_a_contract_stub() {
        let plan = GenerationPlan::new(
            ModelReference::parse("Post").unwrap(),
            &GeneratorConfig::default(),
        )
        .unwrap();
        let contract = plan.artifact(ArtifactKind::RepositoryContract).unwrap();
        let stub = Stub::new(
            StubKind::RepositoryContract,
            "use %namespaces.mainRepositoryInterface%::%mainRepositoryInterface%;\n\
             use %namespaces.model%::%modelName%;\n\
             pub trait %repositoryInterface%: %mainRepositoryInterface%<%modelName%> {}\n",
        );
        let rendered = stub.render(&contract.replacements);

        assert_eq!(
            rendered,
            "use reposervice_core::prelude::MainRepository;\n\
             use crate::models::post::Post;\n\
             pub trait PostRepositoryInterface: MainRepository<Post> {}\n"
        );
        assert!(unresolved_placeholders(&rendered).is_empty());
    }
}
