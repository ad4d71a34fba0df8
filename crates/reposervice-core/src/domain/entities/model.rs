//! Persisted records as seen by the generic repository.
//!
//! A [`Model`] is any serde-mappable struct. Storage never sees the struct:
//! it stores [`Row`]s (`id` + attribute map), and the repository converts
//! between the two with [`Model::from_row`] / [`Model::to_attributes`].

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::domain::{
    error::DomainError,
    value_objects::{Attributes, RecordId},
};

/// Primary key column.
pub const ID_COLUMN: &str = "id";
/// Creation timestamp column, maintained when [`Model::TIMESTAMPS`] is set.
pub const CREATED_AT_COLUMN: &str = "created_at";
/// Update timestamp column, maintained when [`Model::TIMESTAMPS`] is set.
pub const UPDATED_AT_COLUMN: &str = "updated_at";

/// A record type managed by a `CrudRepository`.
///
/// Mass assignment goes through serde: a payload is merged into the record's
/// attribute map and deserialized back, so `#[serde(deny_unknown_fields)]`
/// turns unknown columns into a failed store/update.
pub trait Model: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    /// Storage table name.
    const TABLE: &'static str;

    /// Maintain `created_at` / `updated_at` on store and update.
    const TIMESTAMPS: bool = false;

    /// Primary key; `None` until the record has been persisted.
    fn id(&self) -> Option<RecordId>;

    /// Build a record from a stored row.
    fn from_row(row: Row) -> Result<Self, DomainError> {
        let Row { id, mut attributes } = row;
        attributes.insert(ID_COLUMN.to_owned(), Value::from(id));
        Self::from_attributes(attributes)
    }

    /// Build a record from a raw attribute payload.
    fn from_attributes(attributes: Attributes) -> Result<Self, DomainError> {
        serde_json::from_value(Value::Object(attributes)).map_err(|e| DomainError::Hydration {
            table: Self::TABLE,
            reason: e.to_string(),
        })
    }

    /// The record's attributes without the primary key.
    fn to_attributes(&self) -> Result<Attributes, DomainError> {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => {
                map.remove(ID_COLUMN);
                Ok(map)
            }
            Ok(other) => Err(DomainError::Hydration {
                table: Self::TABLE,
                reason: format!("expected a map of attributes, got {other}"),
            }),
            Err(e) => Err(DomainError::Hydration {
                table: Self::TABLE,
                reason: e.to_string(),
            }),
        }
    }
}

/// A stored record: primary key plus attribute map.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RecordId,
    pub attributes: Attributes,
}

impl Row {
    pub fn new(id: RecordId, attributes: Attributes) -> Self {
        Self { id, attributes }
    }

    /// Column lookup; `id` resolves to the primary key.
    pub fn get(&self, column: &str) -> Option<Value> {
        if column == ID_COLUMN {
            Some(Value::from(self.id))
        } else {
            self.attributes.get(column).cloned()
        }
    }
}
