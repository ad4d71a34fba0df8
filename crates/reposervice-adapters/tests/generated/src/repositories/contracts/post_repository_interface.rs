//! Repository contract for [`Post`] (`crate::repositories::contracts`).

use reposervice_core::prelude::MainRepository;
use crate::models::post::Post;

/// Storage operations available for [`Post`] records.
///
/// Every operation of [`MainRepository`] is provided; declare
/// model-specific queries here.
pub trait PostRepositoryInterface: MainRepository<Post> {}
