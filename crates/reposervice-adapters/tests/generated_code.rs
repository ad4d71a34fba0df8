//! The code generated for `Post` matches the checked-in copy under
//! `tests/generated/`, and that copy compiles and works.

use std::{path::Path, sync::Arc};

use reposervice_adapters::{BuiltinStubs, InMemoryStorage, MemoryFilesystem, ScriptedConsole};
use reposervice_core::{
    application::GenerateService,
    domain::GeneratorConfig,
    prelude::{Attributes, Columns, MainRepository, MainService, Scopes},
};

#[path = "generated/src/models/mod.rs"]
mod models;
#[path = "generated/src/repositories/mod.rs"]
mod repositories;
#[path = "generated/src/services/mod.rs"]
mod services;

use models::post::Post;
use repositories::{
    contracts::post_repository_interface::PostRepositoryInterface, post_repository::PostRepository,
};
use services::{
    contracts::post_service_interface::PostServiceInterface, post_service::PostService,
};

const EXPECTED: [(&str, &str); 5] = [
    (
        "src/models/post.rs",
        include_str!("generated/src/models/post.rs"),
    ),
    (
        "src/repositories/contracts/post_repository_interface.rs",
        include_str!("generated/src/repositories/contracts/post_repository_interface.rs"),
    ),
    (
        "src/repositories/post_repository.rs",
        include_str!("generated/src/repositories/post_repository.rs"),
    ),
    (
        "src/services/contracts/post_service_interface.rs",
        include_str!("generated/src/services/contracts/post_service_interface.rs"),
    ),
    (
        "src/services/post_service.rs",
        include_str!("generated/src/services/post_service.rs"),
    ),
];

#[test]
fn rendered_files_match_the_checked_in_copy() {
    let fs = MemoryFilesystem::new();
    let generator = GenerateService::new(
        Box::new(fs.clone()),
        Box::new(BuiltinStubs::new()),
        Box::new(ScriptedConsole::new().answering([true])),
        GeneratorConfig::default(),
    );
    let report = generator.generate("Post", Path::new("project")).unwrap();
    assert!(report.model_created);

    for (path, expected) in EXPECTED {
        let actual = fs
            .contents(Path::new("project").join(path))
            .unwrap_or_else(|| panic!("{path} was not generated"));
        assert_eq!(actual, expected, "{path} differs from the checked-in copy");
    }
}

fn uses_contract<R: PostRepositoryInterface>(repository: &R) -> usize {
    repository
        .get(&Columns::All, &Scopes::new(), None)
        .map(|posts| posts.len())
        .unwrap_or_default()
}

fn serves<S: PostServiceInterface>(service: &S) -> &'static str {
    service.model_table()
}

#[test]
fn generated_service_keeps_its_concrete_repository() {
    let storage = InMemoryStorage::new();
    let service = PostService::new(PostRepository::new(Arc::new(storage.clone())));

    service.store(Attributes::new(), &Scopes::new()).unwrap();
    service.store(Attributes::new(), &Scopes::new()).unwrap();

    // Writes through the service are visible through the repository it holds.
    assert_eq!(uses_contract(service.repository()), 2);
    assert_eq!(service.repository().model_table(), "posts");
}

#[test]
fn generated_service_round_trips_through_storage() {
    let storage = InMemoryStorage::new();
    let service = PostService::new(PostRepository::new(Arc::new(storage.clone())));
    assert_eq!(serves(&service), "posts");

    let post = service.store(Attributes::new(), &Scopes::new()).unwrap();
    assert_eq!(post, Post { id: Some(1) });
    assert_eq!(storage.row_count("posts"), 1);

    let repository = PostRepository::new(Arc::new(storage.clone()));
    assert_eq!(uses_contract(&repository), 1);
    assert_eq!(repository.get_by_id(1, &Columns::All).unwrap(), Some(post.clone()));

    service.delete(&post).unwrap();
    assert_eq!(storage.row_count("posts"), 0);
}
