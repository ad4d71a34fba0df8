//! Storage-agnostic query description.
//!
//! A [`Query`] is a plain value: projection, conjunctive conditions,
//! ordering and a limit/offset window. Scopes build on it, storage adapters
//! evaluate it. [`Query::matches`] and [`Query::sort`] give adapters a
//! reference evaluation so in-memory backends do not re-implement it.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use super::model::Row;
use crate::domain::value_objects::Attributes;

// ============================================================================
// Columns
// ============================================================================

/// Column projection. `*` selects everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Columns {
    #[default]
    All,
    Only(Vec<String>),
}

impl Columns {
    /// Build a projection from column names; any `*` selects everything.
    pub fn only<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() || columns.iter().any(|c| c == "*") {
            Self::All
        } else {
            Self::Only(columns)
        }
    }

    pub fn includes(&self, column: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(columns) => columns.iter().any(|c| c == column),
        }
    }

    /// Keep only the projected attributes.
    pub fn project(&self, attributes: &Attributes) -> Attributes {
        match self {
            Self::All => attributes.clone(),
            Self::Only(columns) => columns
                .iter()
                .filter_map(|c| attributes.get(c).map(|v| (c.clone(), v.clone())))
                .collect(),
        }
    }
}

impl From<&[&str]> for Columns {
    fn from(columns: &[&str]) -> Self {
        Self::only(columns.iter().copied())
    }
}

// ============================================================================
// Conditions
// ============================================================================

/// A single predicate. A query matches a row when every condition does.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Equals { column: String, value: Value },
    NotEquals { column: String, value: Value },
    StartsWith { column: String, prefix: String },
    Contains { column: String, needle: String },
    In { column: String, values: Vec<Value> },
    IsNull { column: String },
}

impl Condition {
    pub fn column(&self) -> &str {
        match self {
            Self::Equals { column, .. }
            | Self::NotEquals { column, .. }
            | Self::StartsWith { column, .. }
            | Self::Contains { column, .. }
            | Self::In { column, .. }
            | Self::IsNull { column } => column,
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        let actual = row.get(self.column());

        match self {
            Self::Equals { value, .. } => actual.as_ref() == Some(value),
            Self::NotEquals { value, .. } => actual.as_ref() != Some(value),
            Self::StartsWith { prefix, .. } => actual
                .as_ref()
                .and_then(Value::as_str)
                .is_some_and(|s| s.starts_with(prefix.as_str())),
            Self::Contains { needle, .. } => actual
                .as_ref()
                .and_then(Value::as_str)
                .is_some_and(|s| s.contains(needle.as_str())),
            Self::In { values, .. } => actual.as_ref().is_some_and(|v| values.contains(v)),
            Self::IsNull { .. } => matches!(actual, None | Some(Value::Null)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

// ============================================================================
// Query
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    columns: Columns,
    conditions: Vec<Condition>,
    orders: Vec<(String, Direction)>,
    limit: Option<usize>,
    offset: usize,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: Columns) -> Self {
        self.columns = columns;
        self
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Condition::Equals {
            column: column.into(),
            value: value.into(),
        })
    }

    pub fn where_not(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Condition::NotEquals {
            column: column.into(),
            value: value.into(),
        })
    }

    pub fn where_starts_with(self, column: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.filter(Condition::StartsWith {
            column: column.into(),
            prefix: prefix.into(),
        })
    }

    pub fn where_contains(self, column: impl Into<String>, needle: impl Into<String>) -> Self {
        self.filter(Condition::Contains {
            column: column.into(),
            needle: needle.into(),
        })
    }

    pub fn where_in<I, V>(self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter(Condition::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    pub fn where_null(self, column: impl Into<String>) -> Self {
        self.filter(Condition::IsNull {
            column: column.into(),
        })
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.orders.push((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Same filters, no limit/offset. Used to count the matches of a page.
    pub fn without_window(&self) -> Self {
        Self {
            limit: None,
            offset: 0,
            ..self.clone()
        }
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn get_offset(&self) -> usize {
        self.offset
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.conditions.iter().all(|c| c.matches(row))
    }

    /// Sort by the configured orders, falling back to primary key ascending.
    pub fn sort(&self, rows: &mut [Row]) {
        rows.sort_by(|a, b| {
            for (column, direction) in &self.orders {
                let ord = compare_values(a.get(column).as_ref(), b.get(column).as_ref());
                let ord = match direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.id.cmp(&b.id)
        });
    }

    /// Evaluate the whole query over an unordered set of rows: filter, sort,
    /// window and project.
    pub fn evaluate(&self, rows: impl IntoIterator<Item = Row>) -> Vec<Row> {
        let mut matched: Vec<Row> = rows.into_iter().filter(|r| self.matches(r)).collect();
        self.sort(&mut matched);

        matched
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .map(|row| Row {
                attributes: self.columns.project(&row.attributes),
                id: row.id,
            })
            .collect()
    }
}

/// Total order over JSON values for sorting: null < bool < number < string.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Object(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

// ============================================================================
// Page
// ============================================================================

/// One page of a paginated fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub per_page: usize,
    pub current_page: usize,
}

impl<T> Page<T> {
    /// Number of items on this page.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn last_page(&self) -> usize {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.last_page()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
        }
    }
}
