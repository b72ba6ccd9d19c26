//! Scoped ownership of managed resources.
//!
//! A [`Scope`] owns every resource opened through it. Resources can be
//! discarded early by id; whatever is still open when the scope closes is
//! released in reverse opening order, the same order Rust drops locals in.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::{Error, Result};
use crate::events::{Console, EventSink};
use crate::resource::{Category, ManagedResource};

/// Named owner of a set of managed resources, keyed by resource id.
pub struct Scope {
    name: String,
    sink: Arc<dyn EventSink>,
    resources: IndexMap<String, ManagedResource>,
}

impl Scope {
    /// Create a scope whose resources report to stdout.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_sink(name, Console)
    }

    /// Create a scope whose resources report to `sink`.
    pub fn with_sink<S: EventSink + 'static>(name: impl Into<String>, sink: S) -> Self {
        let name = name.into();
        tracing::debug!(scope = %name, "scope opened");
        Self {
            name,
            sink: Arc::new(sink),
            resources: IndexMap::new(),
        }
    }

    /// The scope name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open a resource in this scope.
    ///
    /// Ids must be unique among the resources still open in the scope.
    pub fn open(
        &mut self,
        id: impl Into<String>,
        category: impl Into<Category>,
    ) -> Result<&mut ManagedResource> {
        match self.resources.entry(id.into()) {
            Entry::Occupied(entry) => Err(Error::AlreadyOpen {
                resource_id: entry.key().clone(),
                scope: self.name.clone(),
            }),
            Entry::Vacant(entry) => {
                let resource = ManagedResource::builder(entry.key().clone())
                    .category(category)
                    .shared_sink(Arc::clone(&self.sink))
                    .open();
                Ok(entry.insert(resource))
            }
        }
    }

    /// Take ownership of an already constructed resource.
    ///
    /// On a duplicate id the rejected resource is dropped, which releases it.
    pub fn adopt(&mut self, resource: ManagedResource) -> Result<&mut ManagedResource> {
        match self.resources.entry(resource.id().to_owned()) {
            Entry::Occupied(entry) => Err(Error::AlreadyOpen {
                resource_id: entry.key().clone(),
                scope: self.name.clone(),
            }),
            Entry::Vacant(entry) => Ok(entry.insert(resource)),
        }
    }

    /// Borrow an open resource.
    pub fn get(&self, id: &str) -> Option<&ManagedResource> {
        self.resources.get(id)
    }

    /// Mutably borrow an open resource.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut ManagedResource> {
        self.resources.get_mut(id)
    }

    /// Whether a resource with this id is open.
    pub fn contains(&self, id: &str) -> bool {
        self.resources.contains_key(id)
    }

    /// Number of open resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether no resources are open.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Ids of open resources in opening order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Remove a resource and end its lifetime immediately.
    pub fn discard(&mut self, id: &str) -> Result<()> {
        let resource = self
            .resources
            .shift_remove(id)
            .ok_or_else(|| Error::NotFound {
                resource_id: id.to_owned(),
                scope: self.name.clone(),
            })?;
        tracing::debug!(scope = %self.name, resource_id = id, "resource discarded");
        resource.dispose();
        Ok(())
    }

    /// Close the scope, releasing every remaining resource.
    pub fn close(self) {
        drop(self);
    }

    fn release_all(&mut self) {
        if !self.resources.is_empty() {
            tracing::debug!(
                scope = %self.name,
                remaining = self.resources.len(),
                "releasing resources still open at scope exit"
            );
        }
        while let Some((_, resource)) = self.resources.pop() {
            resource.dispose();
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.release_all();
        tracing::debug!(scope = %self.name, "scope closed");
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
