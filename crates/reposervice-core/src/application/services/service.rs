//! Generic service: delegation over a [`CrudRepository`], plus loader
//! directives applied to the record a write returns.

use std::fmt;

use tracing::{debug, instrument};

use crate::{
    application::services::repository::{CrudRepository, MainRepository},
    domain::{Attributes, Columns, LoaderRegistry, Model, Page, RecordId, Row, Scopes},
    error::RepoServiceResult,
};

/// Repository plus loader registry for one model type.
pub struct CrudService<M> {
    repository: CrudRepository<M>,
    loaders: LoaderRegistry<M>,
}

impl<M: Model> CrudService<M> {
    pub fn new(repository: CrudRepository<M>) -> Self {
        Self {
            repository,
            loaders: LoaderRegistry::new(),
        }
    }

    /// Replace the loader registry.
    pub fn with_loaders(mut self, loaders: LoaderRegistry<M>) -> Self {
        self.loaders = loaders;
        self
    }

    pub fn repository(&self) -> &CrudRepository<M> {
        &self.repository
    }

    pub fn loaders(&self) -> &LoaderRegistry<M> {
        &self.loaders
    }

    fn load(&self, model: M, loaders: &Scopes) -> RepoServiceResult<M> {
        if loaders.is_empty() {
            return Ok(model);
        }
        debug!(loaders = loaders.len(), "Loading");
        Ok(self.loaders.apply(model, loaders)?)
    }
}

impl<M> Clone for CrudService<M> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            loaders: self.loaders.clone(),
        }
    }
}

impl<M> fmt::Debug for CrudService<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudService")
            .field("repository", &self.repository)
            .field("loaders", &self.loaders)
            .finish()
    }
}

/// Service contract for model `M`.
///
/// Implementors provide [`crud`](Self::crud); every operation delegates to
/// the underlying repository.
pub trait MainService<M: Model> {
    fn crud(&self) -> &CrudService<M>;

    fn model_table(&self) -> &'static str {
        M::TABLE
    }

    fn get(
        &self,
        columns: &Columns,
        scopes: &Scopes,
        limit: Option<usize>,
    ) -> RepoServiceResult<Vec<M>> {
        self.crud().repository().get(columns, scopes, limit)
    }

    fn select(
        &self,
        columns: &Columns,
        scopes: &Scopes,
        limit: Option<usize>,
    ) -> RepoServiceResult<Vec<Row>> {
        self.crud().repository().select(columns, scopes, limit)
    }

    fn paginate(
        &self,
        per_page: usize,
        columns: &Columns,
        scopes: &Scopes,
    ) -> RepoServiceResult<Page<M>> {
        self.crud().repository().paginate(per_page, columns, scopes)
    }

    fn paginate_page(
        &self,
        per_page: usize,
        page: usize,
        columns: &Columns,
        scopes: &Scopes,
    ) -> RepoServiceResult<Page<M>> {
        self.crud()
            .repository()
            .paginate_page(per_page, page, columns, scopes)
    }

    fn get_by_id(&self, id: RecordId, columns: &Columns) -> RepoServiceResult<Option<M>> {
        self.crud().repository().get_by_id(id, columns)
    }

    fn find(&self, id: RecordId, columns: &Columns) -> RepoServiceResult<Option<Row>> {
        self.crud().repository().find(id, columns)
    }

    /// Store, then apply `loaders` to the stored record.
    #[instrument(skip_all, fields(table = M::TABLE))]
    fn store(&self, data: Attributes, loaders: &Scopes) -> RepoServiceResult<M> {
        let service = self.crud();
        let model = service.repository().store(data)?;
        service.load(model, loaders)
    }

    /// Update, then apply `loaders` to the updated record.
    #[instrument(skip_all, fields(table = M::TABLE, id = ?model.id()))]
    fn update(&self, model: &M, data: Attributes, loaders: &Scopes) -> RepoServiceResult<M> {
        let service = self.crud();
        let model = service.repository().update(model, data)?;
        service.load(model, loaders)
    }

    /// Update or create, then apply `loaders` to the result.
    #[instrument(skip_all, fields(table = M::TABLE))]
    fn update_or_create(
        &self,
        attributes: Attributes,
        data: Attributes,
        loaders: &Scopes,
    ) -> RepoServiceResult<M> {
        let service = self.crud();
        let model = service.repository().update_or_create(attributes, data)?;
        service.load(model, loaders)
    }

    fn delete(&self, model: &M) -> RepoServiceResult<()> {
        self.crud().repository().delete(model)
    }
}

impl<M: Model> MainService<M> for CrudService<M> {
    fn crud(&self) -> &CrudService<M> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockStorage;
    use crate::domain::DomainError;
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<RecordId>,
        title: String,
        #[serde(default, skip_serializing)]
        shout: Option<String>,
    }

    impl Model for Note {
        const TABLE: &'static str = "notes";

        fn id(&self) -> Option<RecordId> {
            self.id
        }
    }

    fn storing_mock() -> MockStorage {
        let mut storage = MockStorage::new();
        storage.expect_begin().returning(|| Ok(()));
        storage.expect_commit().returning(|| Ok(()));
        storage.expect_insert().returning(|_, _| Ok(1));
        storage.expect_find().returning(|_, id| {
            let Value::Object(attrs) = json!({ "title": "hello" }) else {
                unreachable!()
            };
            Ok(Some(Row::new(id, attrs)))
        });
        storage
    }

    fn service() -> CrudService<Note> {
        let loaders = LoaderRegistry::new()
            .loader("shout", |mut note: Note| {
                note.shout = Some(note.title.to_uppercase());
                Ok(note)
            })
            .unwrap();
        CrudService::new(CrudRepository::new(Arc::new(storing_mock()))).with_loaders(loaders)
    }

    fn payload() -> Attributes {
        let Value::Object(attrs) = json!({ "title": "hello" }) else {
            unreachable!()
        };
        attrs
    }

    #[test]
    fn store_applies_loaders_to_the_stored_record() {
        let loaders = Scopes::new().bare("shout").unwrap();
        let note = service().store(payload(), &loaders).unwrap();
        assert_eq!(note.id, Some(1));
        assert_eq!(note.shout.as_deref(), Some("HELLO"));
    }

    #[test]
    fn store_without_loaders_returns_record_untouched() {
        let note = service().store(payload(), &Scopes::new()).unwrap();
        assert_eq!(note.shout, None);
    }

    #[test]
    fn unknown_loader_is_an_error() {
        let loaders = Scopes::new().bare("whisper").unwrap();
        let err = service().store(payload(), &loaders).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RepoServiceError::Domain(DomainError::UnknownScope { registry: "loader", .. })
        ));
    }
}
