//! Service contract for [`Post`] (`crate::services::contracts`).

use reposervice_core::prelude::MainService;
use crate::models::post::Post;

/// Use cases available for [`Post`] records.
pub trait PostServiceInterface: MainService<Post> {}
