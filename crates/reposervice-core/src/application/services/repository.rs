//! Generic repository over a [`Storage`] port.
//!
//! [`CrudRepository`] holds the storage handle and the model's scope
//! registry. The operations themselves are provided methods of the
//! [`MainRepository`] contract, so a generated repository only has to say
//! where its `CrudRepository` is:
//!
//! ```rust,ignore
//! impl MainRepository<Post> for PostRepository {
//!     fn crud(&self) -> &CrudRepository<Post> {
//!         &self.inner
//!     }
//! }
//! ```
//!
//! Every mutating operation runs in one transaction. On failure the
//! transaction is rolled back, the payload and the cause are logged, and the
//! caller gets a bare [`ApplicationError::InvalidArgument`].

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Storage},
    domain::{
        Attributes, CREATED_AT_COLUMN, Columns, ID_COLUMN, Model, Page, Query, RecordId, Row,
        ScopeRegistry, Scopes, UPDATED_AT_COLUMN, trim_attributes,
    },
    error::{RepoServiceError, RepoServiceResult},
};

/// Storage handle plus scope registry for one model type.
pub struct CrudRepository<M> {
    storage: Arc<dyn Storage>,
    scopes: ScopeRegistry<M>,
}

impl<M: Model> CrudRepository<M> {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            scopes: ScopeRegistry::new(),
        }
    }

    /// Replace the scope registry.
    pub fn with_scopes(mut self, scopes: ScopeRegistry<M>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn scopes(&self) -> &ScopeRegistry<M> {
        &self.scopes
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Column-projected query with `scopes` applied.
    pub fn query(&self, columns: &Columns, scopes: &Scopes) -> RepoServiceResult<Query> {
        let query = Query::new().select(columns.clone());
        if scopes.is_empty() {
            return Ok(query);
        }
        Ok(self.scopes.apply(query, scopes)?)
    }

    /// Run `op` inside a transaction.
    ///
    /// Commits on success. On any failure (including a failed begin or
    /// commit) rolls back, logs `payload` and the cause, and returns
    /// `InvalidArgument { message: failure }`.
    fn transaction<T>(
        &self,
        failure: &'static str,
        payload: &Attributes,
        op: impl FnOnce(&dyn Storage) -> RepoServiceResult<T>,
    ) -> RepoServiceResult<T> {
        let storage = self.storage.as_ref();

        if let Err(cause) = storage.begin() {
            return Err(self.failed(failure, payload, &cause));
        }

        let result = op(storage).and_then(|value| storage.commit().map(|()| value));

        match result {
            Ok(value) => Ok(value),
            Err(cause) => {
                if let Err(rollback) = storage.rollback() {
                    warn!(table = M::TABLE, error = %rollback, "Rollback failed");
                }
                Err(self.failed(failure, payload, &cause))
            }
        }
    }

    fn failed(
        &self,
        failure: &'static str,
        payload: &Attributes,
        cause: &RepoServiceError,
    ) -> RepoServiceError {
        let payload = Value::Object(payload.clone());
        error!(
            table = M::TABLE,
            payload = %payload,
            error = %cause,
            "{failure}"
        );
        ApplicationError::InvalidArgument { message: failure }.into()
    }

    /// Re-read a record after a write.
    fn fresh(&self, storage: &dyn Storage, id: RecordId) -> RepoServiceResult<M> {
        let row = storage
            .find(M::TABLE, id)?
            .ok_or_else(|| ApplicationError::RecordNotFound {
                table: M::TABLE.into(),
                id,
            })?;
        Ok(M::from_row(row)?)
    }

    fn touch(&self, attributes: &mut Attributes, creating: bool) {
        if !M::TIMESTAMPS {
            return;
        }
        let now = Value::String(Utc::now().to_rfc3339());
        if creating {
            attributes.insert(CREATED_AT_COLUMN.into(), now.clone());
        }
        attributes.insert(UPDATED_AT_COLUMN.into(), now);
    }

    /// Hydrate through the model so unknown or mistyped columns are rejected,
    /// then return the normalized attributes.
    fn fill(&self, id: Option<RecordId>, attributes: Attributes) -> RepoServiceResult<Attributes> {
        let record = match id {
            Some(id) => M::from_row(Row::new(id, attributes))?,
            None => M::from_attributes(attributes)?,
        };
        Ok(record.to_attributes()?)
    }

    fn insert(&self, storage: &dyn Storage, mut attributes: Attributes) -> RepoServiceResult<M> {
        attributes.remove(ID_COLUMN);
        self.touch(&mut attributes, true);
        let attributes = self.fill(None, attributes)?;
        let id = storage.insert(M::TABLE, attributes)?;
        debug!(table = M::TABLE, id, "Inserted");
        self.fresh(storage, id)
    }

    fn merge(&self, storage: &dyn Storage, row: Row, data: &Attributes) -> RepoServiceResult<M> {
        let Row { id, mut attributes } = row;
        for (column, value) in data {
            if column != ID_COLUMN {
                attributes.insert(column.clone(), value.clone());
            }
        }
        self.touch(&mut attributes, false);
        let attributes = self.fill(Some(id), attributes)?;
        storage.update(M::TABLE, id, attributes)?;
        debug!(table = M::TABLE, id, "Updated");
        self.fresh(storage, id)
    }

    fn persisted_id(&self, model: &M) -> RepoServiceResult<RecordId> {
        model.id().ok_or_else(|| {
            ApplicationError::NotPersisted {
                table: M::TABLE.into(),
            }
            .into()
        })
    }
}

impl<M> Clone for CrudRepository<M> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            scopes: self.scopes.clone(),
        }
    }
}

impl<M> fmt::Debug for CrudRepository<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudRepository")
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

/// Repository contract for model `M`.
///
/// Implementors provide [`crud`](Self::crud); every operation has a default
/// implementation on top of it.
pub trait MainRepository<M: Model> {
    fn crud(&self) -> &CrudRepository<M>;

    /// Storage table of the model.
    fn model_table(&self) -> &'static str {
        M::TABLE
    }

    /// All matching records, optionally limited.
    ///
    /// Rows are hydrated into `M`, so a projection must cover every field
    /// `M` cannot default. Use [`select`](Self::select) for arbitrary
    /// projections.
    fn get(
        &self,
        columns: &Columns,
        scopes: &Scopes,
        limit: Option<usize>,
    ) -> RepoServiceResult<Vec<M>> {
        self.select(columns, scopes, limit)?
            .into_iter()
            .map(|row| M::from_row(row).map_err(Into::into))
            .collect()
    }

    /// All matching rows, projected to `columns` and optionally limited.
    #[instrument(skip_all, fields(table = M::TABLE, scopes = scopes.len(), limit = ?limit))]
    fn select(
        &self,
        columns: &Columns,
        scopes: &Scopes,
        limit: Option<usize>,
    ) -> RepoServiceResult<Vec<Row>> {
        let repo = self.crud();
        let mut query = repo.query(columns, scopes)?;
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = repo.storage().select(M::TABLE, &query)?;
        debug!(rows = rows.len(), "Fetched");
        Ok(rows)
    }

    /// First page of matching records.
    fn paginate(
        &self,
        per_page: usize,
        columns: &Columns,
        scopes: &Scopes,
    ) -> RepoServiceResult<Page<M>> {
        self.paginate_page(per_page, 1, columns, scopes)
    }

    /// Page `page` (1-based) of matching records. `per_page == 0` returns
    /// every match on a single page.
    #[instrument(skip_all, fields(table = M::TABLE, per_page = per_page, page = page))]
    fn paginate_page(
        &self,
        per_page: usize,
        page: usize,
        columns: &Columns,
        scopes: &Scopes,
    ) -> RepoServiceResult<Page<M>> {
        let repo = self.crud();
        let query = repo.query(columns, scopes)?;
        let total = repo.storage().count(M::TABLE, &query)?;

        let (query, current_page) = if per_page == 0 {
            (query, 1)
        } else {
            let page = page.max(1);
            // Past the addressable range there is nothing to return.
            let offset = (page - 1).checked_mul(per_page).unwrap_or(usize::MAX);
            (query.offset(offset).limit(per_page), page)
        };

        let items = repo
            .storage()
            .select(M::TABLE, &query)?
            .into_iter()
            .map(|row| M::from_row(row).map_err(Into::into))
            .collect::<RepoServiceResult<Vec<M>>>()?;

        Ok(Page {
            items,
            total,
            per_page,
            current_page,
        })
    }

    /// The record with primary key `id`, or `None`. Same projection rule
    /// as [`get`](Self::get).
    fn get_by_id(&self, id: RecordId, columns: &Columns) -> RepoServiceResult<Option<M>> {
        self.find(id, columns)?
            .map(|row| M::from_row(row).map_err(Into::into))
            .transpose()
    }

    /// The row with primary key `id` projected to `columns`, or `None`.
    fn find(&self, id: RecordId, columns: &Columns) -> RepoServiceResult<Option<Row>> {
        let row = self.crud().storage().find(M::TABLE, id)?;
        Ok(row.map(|row| Row {
            attributes: columns.project(&row.attributes),
            id: row.id,
        }))
    }

    /// Create a record from `data` and return it as stored.
    #[instrument(skip_all, fields(table = M::TABLE))]
    fn store(&self, data: Attributes) -> RepoServiceResult<M> {
        let repo = self.crud();
        let data = trim_attributes(data);

        let model = repo.transaction(ApplicationError::UNABLE_TO_SAVE, &data, |storage| {
            repo.insert(storage, data.clone())
        })?;
        info!(id = ?model.id(), "Stored");
        Ok(model)
    }

    /// Apply `data` to a persisted record and return it as stored.
    #[instrument(skip_all, fields(table = M::TABLE, id = ?model.id()))]
    fn update(&self, model: &M, data: Attributes) -> RepoServiceResult<M> {
        let repo = self.crud();
        let data = trim_attributes(data);

        let model = repo.transaction(ApplicationError::UNABLE_TO_UPDATE, &data, |storage| {
            let id = repo.persisted_id(model)?;
            let row = storage
                .find(M::TABLE, id)?
                .ok_or_else(|| ApplicationError::RecordNotFound {
                    table: M::TABLE.into(),
                    id,
                })?;
            repo.merge(storage, row, &data)
        })?;
        info!("Updated");
        Ok(model)
    }

    /// Update the first record whose columns equal `attributes` with `data`,
    /// or create one from both. Only `data` is trimmed; `attributes` match
    /// as given.
    #[instrument(skip_all, fields(table = M::TABLE))]
    fn update_or_create(&self, attributes: Attributes, data: Attributes) -> RepoServiceResult<M> {
        let repo = self.crud();
        let data = trim_attributes(data);

        repo.transaction(ApplicationError::UNABLE_TO_UPSERT, &data, |storage| {
            let query = attributes
                .iter()
                .fold(Query::new(), |q, (column, value)| {
                    q.where_eq(column.clone(), value.clone())
                })
                .limit(1);

            match storage.select(M::TABLE, &query)?.into_iter().next() {
                Some(row) => {
                    debug!(id = row.id, "Matched existing record");
                    repo.merge(storage, row, &data)
                }
                None => {
                    let mut merged = attributes.clone();
                    merged.extend(data.clone());
                    repo.insert(storage, merged)
                }
            }
        })
    }

    /// Delete a persisted record.
    #[instrument(skip_all, fields(table = M::TABLE, id = ?model.id()))]
    fn delete(&self, model: &M) -> RepoServiceResult<()> {
        let repo = self.crud();
        let payload = model.to_attributes().unwrap_or_default();

        repo.transaction(ApplicationError::UNABLE_TO_DELETE, &payload, |storage| {
            let id = repo.persisted_id(model)?;
            if storage.delete(M::TABLE, id)? {
                Ok(())
            } else {
                Err(ApplicationError::RecordNotFound {
                    table: M::TABLE.into(),
                    id,
                }
                .into())
            }
        })?;
        info!("Deleted");
        Ok(())
    }
}

impl<M: Model> MainRepository<M> for CrudRepository<M> {
    fn crud(&self) -> &CrudRepository<M> {
        self
    }
}
