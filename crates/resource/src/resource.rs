//! The managed resource and its construction.
//!
//! A [`ManagedResource`] acquires on construction and releases when its
//! lifetime ends. The end of the lifetime is `Drop`: leaving the owning
//! block, calling [`ManagedResource::dispose`], discarding it from a
//! [`Scope`](crate::Scope), or `main` returning with the value still alive.

use std::fmt;
use std::sync::Arc;

use crate::backend::{Backend, Simulated};
use crate::error::Error;
use crate::events::{Console, EventSink, LifecycleEvent};

/// Category used when the caller does not supply one.
pub const DEFAULT_CATEGORY: &str = "generic";

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Free-form label describing what kind of resource is managed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    /// Create a category from any string label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self(DEFAULT_CATEGORY.to_owned())
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Outcome of [`ManagedResource::use_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// The resource was active and has been used.
    Used,
    /// The resource was inactive; a warning was reported and nothing changed.
    Rejected,
}

/// Outcome of [`ManagedResource::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The resource was active and is now released.
    Released,
    /// The resource was already inactive (released earlier, or never acquired).
    AlreadyInactive,
}

// ---------------------------------------------------------------------------
// ManagedResource
// ---------------------------------------------------------------------------

/// A resource that reports its own construction, use and destruction.
///
/// States are active and inactive. Acquisition during construction makes
/// the resource active; [`release`](Self::release) makes it inactive for
/// good. `Drop` always runs a release and then reports destruction, so
/// every instance produces exactly one `Destroyed` event.
pub struct ManagedResource {
    id: String,
    category: Category,
    active: bool,
    backend: Box<dyn Backend>,
    sink: Arc<dyn EventSink>,
}

impl ManagedResource {
    /// Open a resource of the default category, reporting to stdout.
    pub fn new(id: impl Into<String>) -> Self {
        Self::builder(id).open()
    }

    /// Open a resource of the given category, reporting to stdout.
    pub fn with_category(id: impl Into<String>, category: impl Into<Category>) -> Self {
        Self::builder(id).category(category).open()
    }

    /// Start building a resource with a custom category, backend or sink.
    pub fn builder(id: impl Into<String>) -> ResourceBuilder {
        ResourceBuilder::new(id)
    }

    /// The caller-supplied identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The resource category.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Whether the resource is currently acquired.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Use the resource for `action`.
    ///
    /// An inactive resource reports a warning and is left untouched.
    pub fn use_for(&mut self, action: &str) -> Usage {
        if self.active {
            tracing::debug!(resource_id = %self.id, category = %self.category, action, "resource used");
            self.emit(LifecycleEvent::Used {
                resource_id: self.id.clone(),
                category: self.category.clone(),
                action: action.to_owned(),
            });
            Usage::Used
        } else {
            tracing::warn!(resource_id = %self.id, action, "use rejected: resource is not active");
            self.emit(LifecycleEvent::UseRejected {
                resource_id: self.id.clone(),
            });
            Usage::Rejected
        }
    }

    /// Release the resource.
    ///
    /// Safe to call more than once; every call after the first reports that
    /// the resource was already inactive.
    pub fn release(&mut self) -> Release {
        if self.active {
            self.emit(LifecycleEvent::Releasing {
                resource_id: self.id.clone(),
                category: self.category.clone(),
            });
            self.backend.release(&self.id);
            self.active = false;
            tracing::debug!(resource_id = %self.id, "resource released");
            Release::Released
        } else {
            self.emit(LifecycleEvent::AlreadyInactive {
                resource_id: self.id.clone(),
                category: self.category.clone(),
            });
            Release::AlreadyInactive
        }
    }

    /// End the resource's lifetime now.
    pub fn dispose(self) {
        drop(self);
    }

    fn open(
        id: String,
        category: Category,
        backend: Box<dyn Backend>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let mut resource = Self {
            id,
            category,
            active: false,
            backend,
            sink,
        };

        resource.emit(LifecycleEvent::Constructing {
            resource_id: resource.id.clone(),
            category: resource.category.clone(),
        });

        match resource.backend.acquire(&resource.id, &resource.category) {
            Ok(()) => {
                resource.active = true;
                tracing::debug!(
                    resource_id = %resource.id,
                    category = %resource.category,
                    "resource acquired"
                );
                resource.emit(LifecycleEvent::Acquired {
                    resource_id: resource.id.clone(),
                });
            }
            Err(e) => {
                tracing::error!(resource_id = %resource.id, error = %e, "resource acquisition failed");
                let error = match e {
                    Error::Acquisition { reason, .. } => reason,
                    other => other.to_string(),
                };
                resource.emit(LifecycleEvent::AcquisitionFailed {
                    resource_id: resource.id.clone(),
                    error,
                });
            }
        }

        resource
    }

    fn emit(&self, event: LifecycleEvent) {
        self.sink.emit(&event);
    }
}

impl Drop for ManagedResource {
    fn drop(&mut self) {
        self.release();
        self.emit(LifecycleEvent::Destroyed {
            resource_id: self.id.clone(),
        });
        tracing::debug!(resource_id = %self.id, "resource destroyed");
    }
}

impl fmt::Debug for ManagedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedResource")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// ResourceBuilder
// ---------------------------------------------------------------------------

/// Builder for [`ManagedResource`].
///
/// Defaults: category `"generic"`, the [`Simulated`] backend, and the
/// [`Console`] sink.
pub struct ResourceBuilder {
    id: String,
    category: Category,
    backend: Box<dyn Backend>,
    sink: Arc<dyn EventSink>,
}

impl ResourceBuilder {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: Category::default(),
            backend: Box::new(Simulated),
            sink: Arc::new(Console),
        }
    }

    /// Set the category.
    pub fn category(mut self, category: impl Into<Category>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the acquisition backend.
    pub fn backend<B: Backend + 'static>(mut self, backend: B) -> Self {
        self.backend = Box::new(backend);
        self
    }

    /// Set the event sink.
    pub fn sink<S: EventSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Set an already shared event sink.
    pub fn shared_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Construct the resource and attempt acquisition.
    ///
    /// Never fails: an acquisition error is reported and the resource is
    /// returned inactive.
    pub fn open(self) -> ManagedResource {
        ManagedResource::open(self.id, self.category, self.backend, self.sink)
    }
}

impl fmt::Debug for ResourceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceBuilder")
            .field("id", &self.id)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Failing;
    use crate::events::Recorder;

    fn recorded(id: &str) -> (ManagedResource, Recorder) {
        let recorder = Recorder::new();
        let resource = ManagedResource::builder(id).sink(recorder.clone()).open();
        (resource, recorder)
    }

    #[test]
    fn category_defaults_to_generic() {
        assert_eq!(Category::default().as_str(), "generic");
        let (resource, _) = recorded("R3");
        assert_eq!(resource.category().as_str(), DEFAULT_CATEGORY);
    }

    #[test]
    fn construction_acquires() {
        let (resource, recorder) = recorded("R1");
        assert!(resource.is_active());
        assert_eq!(
            recorder.lines(),
            vec![
                "CONSTRUCTOR: Initializing object 'R1' (generic).",
                "CONSTRUCTOR: Resource 'R1' acquired and ready to use.",
            ]
        );
    }

    #[test]
    fn use_while_active_keeps_state() {
        let (mut resource, recorder) = recorded("R1");
        recorder.clear();

        assert_eq!(resource.use_for("Query"), Usage::Used);
        assert!(resource.is_active());
        assert!(!recorder.events()[0].is_warning());
    }

    #[test]
    fn release_twice_takes_inactive_branch() {
        let (mut resource, _) = recorded("R1");
        assert_eq!(resource.release(), Release::Released);
        assert!(!resource.is_active());
        assert_eq!(resource.release(), Release::AlreadyInactive);
    }

    #[test]
    fn use_after_release_is_rejected() {
        let (mut resource, _) = recorded("R1");
        resource.release();
        assert_eq!(resource.use_for("Update"), Usage::Rejected);
        assert!(!resource.is_active());
    }

    #[test]
    fn failed_acquisition_leaves_inactive() {
        let recorder = Recorder::new();
        let resource = ManagedResource::builder("R4")
            .category("Socket")
            .backend(Failing::new("port closed"))
            .sink(recorder.clone())
            .open();

        assert!(!resource.is_active());
        assert_eq!(
            recorder.lines()[1],
            "CONSTRUCTOR ERROR: Could not acquire resource 'R4'. Error: port closed"
        );
    }

    #[test]
    fn drop_reports_destruction_once() {
        let (mut resource, recorder) = recorded("R1");
        resource.release();
        drop(resource);

        let destroyed = recorder
            .events()
            .into_iter()
            .filter(|e| matches!(e, LifecycleEvent::Destroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
    }

    #[test]
    fn debug_hides_backend() {
        let (resource, _) = recorded("R1");
        let rendered = format!("{resource:?}");
        assert!(rendered.starts_with("ManagedResource { id: \"R1\""));
    }
}
