//! Repository for [`Post`] records (`crate::repositories`).

use std::sync::Arc;

use reposervice_core::prelude::{ScopeRegistry, Storage};
use reposervice_core::prelude::CrudRepository;
use reposervice_core::prelude::MainRepository;
use crate::models::post::Post;
use crate::repositories::contracts::post_repository_interface::PostRepositoryInterface;

pub struct PostRepository {
    inner: CrudRepository<Post>,
}

impl PostRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            inner: CrudRepository::new(storage).with_scopes(Self::scopes()),
        }
    }

    /// Named query scopes, e.g.
    /// `.scope("published", |q| q.where_eq("published", true))`.
    fn scopes() -> ScopeRegistry<Post> {
        ScopeRegistry::new()
    }

    pub fn inner(&self) -> &CrudRepository<Post> {
        &self.inner
    }
}

impl MainRepository<Post> for PostRepository {
    fn crud(&self) -> &CrudRepository<Post> {
        &self.inner
    }
}

impl PostRepositoryInterface for PostRepository {}
