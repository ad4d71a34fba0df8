//! [`Post`] records (`crate::models`), stored in `posts`.

use reposervice_core::prelude::{Model, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
}

impl Model for Post {
    const TABLE: &'static str = "posts";

    fn id(&self) -> Option<RecordId> {
        self.id
    }
}
