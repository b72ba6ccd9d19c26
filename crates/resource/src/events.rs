//! Lifecycle events and the sinks that receive them.
//!
//! Every observable step of a [`ManagedResource`](crate::ManagedResource)
//! is reported as a [`LifecycleEvent`]. The event's `Display` impl renders
//! the human-readable status line; an [`EventSink`] decides where that line
//! goes ([`Console`] for stdout, [`Recorder`] for in-memory capture).

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::resource::Category;

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Events emitted during a managed resource's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Construction started; acquisition is about to be attempted.
    Constructing {
        /// The resource identifier.
        resource_id: String,
        /// The resource category.
        category: Category,
    },
    /// The backend acquired the resource.
    Acquired {
        /// The resource identifier.
        resource_id: String,
    },
    /// The backend failed to acquire the resource.
    AcquisitionFailed {
        /// The resource identifier.
        resource_id: String,
        /// Human-readable error description.
        error: String,
    },
    /// The resource was used for an action.
    Used {
        /// The resource identifier.
        resource_id: String,
        /// The resource category.
        category: Category,
        /// What the resource was used for.
        action: String,
    },
    /// A use was rejected because the resource is inactive.
    UseRejected {
        /// The resource identifier.
        resource_id: String,
    },
    /// An active resource is being released.
    Releasing {
        /// The resource identifier.
        resource_id: String,
        /// The resource category.
        category: Category,
    },
    /// Release found the resource already inactive.
    AlreadyInactive {
        /// The resource identifier.
        resource_id: String,
        /// The resource category.
        category: Category,
    },
    /// The resource's lifetime ended.
    Destroyed {
        /// The resource identifier.
        resource_id: String,
    },
}

impl LifecycleEvent {
    /// The identifier of the resource that emitted this event.
    #[must_use]
    pub fn resource_id(&self) -> &str {
        match self {
            Self::Constructing { resource_id, .. }
            | Self::Acquired { resource_id }
            | Self::AcquisitionFailed { resource_id, .. }
            | Self::Used { resource_id, .. }
            | Self::UseRejected { resource_id }
            | Self::Releasing { resource_id, .. }
            | Self::AlreadyInactive { resource_id, .. }
            | Self::Destroyed { resource_id } => resource_id,
        }
    }

    /// Whether this event reports a problem rather than normal progress.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::AcquisitionFailed { .. } | Self::UseRejected { .. }
        )
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructing {
                resource_id,
                category,
            } => write!(
                f,
                "CONSTRUCTOR: Initializing object '{resource_id}' ({category})."
            ),
            Self::Acquired { resource_id } => write!(
                f,
                "CONSTRUCTOR: Resource '{resource_id}' acquired and ready to use."
            ),
            Self::AcquisitionFailed { resource_id, error } => write!(
                f,
                "CONSTRUCTOR ERROR: Could not acquire resource '{resource_id}'. Error: {error}"
            ),
            Self::Used {
                resource_id,
                category,
                action,
            } => write!(
                f,
                "USE: Resource '{resource_id}' ({category}) is being used for: '{action}'."
            ),
            Self::UseRejected { resource_id } => write!(
                f,
                "WARNING: Cannot use resource '{resource_id}' because it is not active."
            ),
            Self::Releasing {
                resource_id,
                category,
            } => write!(
                f,
                "DESTRUCTOR: Releasing/closing resource '{resource_id}' ({category})."
            ),
            Self::AlreadyInactive {
                resource_id,
                category,
            } => write!(
                f,
                "DESTRUCTOR: Resource '{resource_id}' ({category}) was no longer active or could not be acquired."
            ),
            Self::Destroyed { resource_id } => {
                write!(f, "DESTRUCTOR: Object '{resource_id}' destroyed.")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// EventSink
// ---------------------------------------------------------------------------

/// Destination for lifecycle events.
///
/// Emission happens inside `Drop`, so implementations must not panic.
pub trait EventSink: Send + Sync {
    /// Receive one event.
    fn emit(&self, event: &LifecycleEvent);
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, event: &LifecycleEvent) {
        (**self).emit(event);
    }
}

/// Writes each event's status line to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl EventSink for Console {
    fn emit(&self, event: &LifecycleEvent) {
        let mut out = std::io::stdout().lock();
        // A closed stdout (e.g. `custodian | head`) must not turn into a panic in Drop.
        if let Err(e) = writeln!(out, "{event}") {
            tracing::debug!(error = %e, "failed to write lifecycle event to stdout");
        }
    }
}

/// Records events in memory.
///
/// Clones share the same buffer, so a test can hand one clone to a resource
/// and inspect the other after the resource is gone.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, oldest first.
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().clone()
    }

    /// Recorded events rendered as status lines.
    pub fn lines(&self) -> Vec<String> {
        self.events.lock().iter().map(ToString::to_string).collect()
    }

    /// Recorded events emitted by one resource.
    pub fn events_for(&self, resource_id: &str) -> Vec<LifecycleEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.resource_id() == resource_id)
            .cloned()
            .collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for Recorder {
    fn emit(&self, event: &LifecycleEvent) {
        self.events.lock().push(event.clone());
    }
}
