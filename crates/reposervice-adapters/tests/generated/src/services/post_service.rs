//! Service for [`Post`] records (`crate::services`).

use reposervice_core::prelude::LoaderRegistry;
use reposervice_core::prelude::CrudService;
use reposervice_core::prelude::MainService;
use crate::models::post::Post;
use crate::repositories::post_repository::PostRepository;
use crate::services::contracts::post_service_interface::PostServiceInterface;

pub struct PostService {
    repository: PostRepository,
    inner: CrudService<Post>,
}

impl PostService {
    pub fn new(repository: PostRepository) -> Self {
        let inner = CrudService::new(repository.inner().clone()).with_loaders(Self::loaders());
        Self { repository, inner }
    }

    /// The concrete repository, for the queries declared on its contract.
    pub fn repository(&self) -> &PostRepository {
        &self.repository
    }

    /// Loaders applied to the record returned by store and update.
    fn loaders() -> LoaderRegistry<Post> {
        LoaderRegistry::new()
    }
}

impl MainService<Post> for PostService {
    fn crud(&self) -> &CrudService<Post> {
        &self.inner
    }
}

impl PostServiceInterface for PostService {}
