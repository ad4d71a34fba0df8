//! Named scope and loader registries.
//!
//! A [`ScopeRegistry`] maps identifiers to query-building functions, a
//! [`LoaderRegistry`] maps identifiers to record transforms applied after a
//! write. Names are validated when registered; applying a directive that
//! names nothing registered is an error, never a silent no-op.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use super::{
    query::Query,
    scope::{ScopeDirective, Scopes},
};
use crate::domain::{error::DomainError, value_objects::Identifier};

/// Query scope handler. Receives the parameter only for parameterised scopes.
pub type ScopeFn = dyn Fn(Query, Option<&Value>) -> Result<Query, DomainError> + Send + Sync;

/// Record loader handler.
pub type LoaderFn<M> = dyn Fn(M, Option<&Value>) -> Result<M, DomainError> + Send + Sync;

/// Whether a registered handler takes a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Called as `"name"`; a supplied parameter is ignored.
    None,
    /// Called as `"name" => param`; a bare call is an error.
    Required,
}

struct Entry<F: ?Sized> {
    arity: Arity,
    handler: Arc<F>,
}

impl<F: ?Sized> Clone for Entry<F> {
    fn clone(&self) -> Self {
        Self {
            arity: self.arity,
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Shared name → handler table behind both registries.
struct Table<F: ?Sized> {
    kind: &'static str,
    entries: BTreeMap<Identifier, Entry<F>>,
}

impl<F: ?Sized> Table<F> {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    fn insert(&mut self, name: &str, arity: Arity, handler: Arc<F>) -> Result<(), DomainError> {
        let name = Identifier::new(name)?;
        if self.entries.contains_key(&name) {
            return Err(DomainError::DuplicateScope {
                registry: self.kind,
                name: name.to_string(),
            });
        }
        trace!(kind = self.kind, %name, ?arity, "registered");
        self.entries.insert(name, Entry { arity, handler });
        Ok(())
    }

    /// Look up the handler for a directive and the parameter to pass it.
    fn resolve<'d>(
        &self,
        directive: &'d ScopeDirective,
    ) -> Result<(Arc<F>, Option<&'d Value>), DomainError> {
        let name = directive.name();
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| DomainError::UnknownScope {
                registry: self.kind,
                name: name.to_string(),
            })?;

        let parameter = match (entry.arity, directive.parameter()) {
            (Arity::Required, None) => {
                return Err(DomainError::MissingScopeParameter {
                    registry: self.kind,
                    name: name.to_string(),
                });
            }
            (Arity::Required, Some(param)) => Some(param),
            (Arity::None, Some(_)) => {
                debug!(kind = self.kind, %name, "parameter ignored by parameterless handler");
                None
            }
            (Arity::None, None) => None,
        };

        Ok((Arc::clone(&entry.handler), parameter))
    }

    fn names(&self) -> Vec<&str> {
        self.entries.keys().map(Identifier::as_str).collect()
    }
}

impl<F: ?Sized> Clone for Table<F> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            entries: self.entries.clone(),
        }
    }
}

impl<F: ?Sized> fmt::Debug for Table<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("names", &self.names())
            .finish()
    }
}

fn invalid_parameter(kind: &'static str, name: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidScopeParameter {
        registry: kind,
        name: name.to_owned(),
        reason: reason.into(),
    }
}

// ============================================================================
// ScopeRegistry
// ============================================================================

/// Query scopes available for model `M`.
///
/// ```rust
/// use reposervice_core::domain::{Query, ScopeRegistry};
/// # #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
/// # struct Post { id: Option<u64> }
/// # impl reposervice_core::domain::Model for Post {
/// #     const TABLE: &'static str = "posts";
/// #     fn id(&self) -> Option<u64> { self.id }
/// # }
///
/// let scopes = ScopeRegistry::<Post>::new()
///     .scope("published", |q: Query| q.where_eq("published", true))?
///     .scope_with_str("byAuthor", |q: Query, author: &str| q.where_eq("author", author))?;
/// # Ok::<(), reposervice_core::domain::DomainError>(())
/// ```
pub struct ScopeRegistry<M> {
    table: Table<ScopeFn>,
    _model: PhantomData<fn() -> M>,
}

impl<M> ScopeRegistry<M> {
    pub fn new() -> Self {
        Self {
            table: Table::new("scope"),
            _model: PhantomData,
        }
    }

    /// Register a parameterless scope.
    pub fn scope<F>(mut self, name: &str, f: F) -> Result<Self, DomainError>
    where
        F: Fn(Query) -> Query + Send + Sync + 'static,
    {
        self.table
            .insert(name, Arity::None, Arc::new(move |q: Query, _: Option<&Value>| Ok(f(q))))?;
        Ok(self)
    }

    /// Register a scope taking one JSON parameter.
    pub fn scope_with<F>(mut self, name: &str, f: F) -> Result<Self, DomainError>
    where
        F: Fn(Query, &Value) -> Result<Query, DomainError> + Send + Sync + 'static,
    {
        self.table.insert(
            name,
            Arity::Required,
            Arc::new(move |q: Query, param: Option<&Value>| match param {
                Some(param) => f(q, param),
                None => Ok(q),
            }),
        )?;
        Ok(self)
    }

    /// Register a scope taking one string parameter.
    pub fn scope_with_str<F>(self, name: &str, f: F) -> Result<Self, DomainError>
    where
        F: Fn(Query, &str) -> Query + Send + Sync + 'static,
    {
        let owned = name.to_owned();
        self.scope_with(name, move |q, param| match param.as_str() {
            Some(s) => Ok(f(q, s)),
            None => Err(invalid_parameter(
                "scope",
                &owned,
                format!("expected a string, got {param}"),
            )),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.entries.keys().any(|k| k.as_str() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.table.names()
    }

    /// Apply every directive in order.
    pub fn apply(&self, query: Query, scopes: &Scopes) -> Result<Query, DomainError> {
        scopes.iter().try_fold(query, |query, directive| {
            let (handler, param) = self.table.resolve(directive)?;
            debug!(scope = %directive.name(), "applying scope");
            handler(query, param)
        })
    }
}

impl<M> Default for ScopeRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for ScopeRegistry<M> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            _model: PhantomData,
        }
    }
}

impl<M> fmt::Debug for ScopeRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.table.fmt(f)
    }
}

// ============================================================================
// LoaderRegistry
// ============================================================================

/// Post-write record loaders available for model `M`.
pub struct LoaderRegistry<M> {
    table: Table<LoaderFn<M>>,
}

impl<M: 'static> LoaderRegistry<M> {
    pub fn new() -> Self {
        Self {
            table: Table::new("loader"),
        }
    }

    /// Register a parameterless loader.
    pub fn loader<F>(mut self, name: &str, f: F) -> Result<Self, DomainError>
    where
        F: Fn(M) -> Result<M, DomainError> + Send + Sync + 'static,
    {
        self.table
            .insert(name, Arity::None, Arc::new(move |m: M, _: Option<&Value>| f(m)))?;
        Ok(self)
    }

    /// Register a loader taking one JSON parameter.
    pub fn loader_with<F>(mut self, name: &str, f: F) -> Result<Self, DomainError>
    where
        F: Fn(M, &Value) -> Result<M, DomainError> + Send + Sync + 'static,
    {
        self.table.insert(
            name,
            Arity::Required,
            Arc::new(move |m: M, param: Option<&Value>| match param {
                Some(param) => f(m, param),
                None => Ok(m),
            }),
        )?;
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.entries.keys().any(|k| k.as_str() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.table.names()
    }

    /// Apply every directive to `model` in order.
    pub fn apply(&self, model: M, loaders: &Scopes) -> Result<M, DomainError> {
        loaders.iter().try_fold(model, |model, directive| {
            let (handler, param) = self.table.resolve(directive)?;
            debug!(loader = %directive.name(), "applying loader");
            handler(model, param)
        })
    }
}

impl<M: 'static> Default for LoaderRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for LoaderRegistry<M> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<M> fmt::Debug for LoaderRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.table.fmt(f)
    }
}
