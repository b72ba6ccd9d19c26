//! Acquisition backends.
//!
//! A [`Backend`] is where a [`ManagedResource`](crate::ManagedResource)
//! binds to whatever it actually manages. Nothing real is opened here:
//! [`Simulated`] always succeeds and [`Failing`] always fails, which is
//! enough to drive both branches of construction.

use crate::error::{Error, Result};
use crate::resource::Category;

/// Acquires and releases the thing a managed resource stands for.
pub trait Backend: Send {
    /// Acquire the resource. An error leaves the managed resource inactive.
    fn acquire(&mut self, resource_id: &str, category: &Category) -> Result<()>;

    /// Release a previously acquired resource.
    ///
    /// Called at most once, and only after a successful [`acquire`](Self::acquire).
    fn release(&mut self, _resource_id: &str) {}
}

/// Backend whose acquisition always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simulated;

impl Backend for Simulated {
    fn acquire(&mut self, resource_id: &str, category: &Category) -> Result<()> {
        tracing::trace!(resource_id, %category, "simulated acquisition");
        Ok(())
    }

    fn release(&mut self, resource_id: &str) {
        tracing::trace!(resource_id, "simulated release");
    }
}

/// Backend whose acquisition always fails with the configured reason.
#[derive(Debug, Clone)]
pub struct Failing {
    reason: String,
}

impl Failing {
    /// Create a backend that fails every acquisition with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The reason reported on failure.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Backend for Failing {
    fn acquire(&mut self, resource_id: &str, _category: &Category) -> Result<()> {
        Err(Error::acquisition(resource_id, self.reason.clone()))
    }
}
