//! Error types for managed resources
use thiserror::Error;

/// Result type for resource operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while acquiring or tracking managed resources
#[derive(Error, Debug)]
pub enum Error {
    /// The backend could not acquire the resource.
    ///
    /// Construction catches this error and leaves the resource inactive;
    /// it never escapes [`ManagedResource`](crate::ManagedResource) itself.
    #[error("acquisition failed for resource '{resource_id}': {reason}")]
    Acquisition {
        /// The resource identifier
        resource_id: String,
        /// The failure reason
        reason: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A resource with this identifier is already open in the scope
    #[error("resource '{resource_id}' is already open in scope '{scope}'")]
    AlreadyOpen {
        /// The resource identifier
        resource_id: String,
        /// The scope name
        scope: String,
    },

    /// No resource with this identifier is open in the scope
    #[error("resource '{resource_id}' is not open in scope '{scope}'")]
    NotFound {
        /// The resource identifier
        resource_id: String,
        /// The scope name
        scope: String,
    },
}

impl Error {
    /// Create an acquisition error without an underlying source
    pub fn acquisition(resource_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Acquisition {
            resource_id: resource_id.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Create an acquisition error wrapping an underlying error
    pub fn acquisition_with_source<E>(
        resource_id: impl Into<String>,
        reason: impl Into<String>,
        source: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Acquisition {
            resource_id: resource_id.into(),
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the resource ID associated with this error
    #[must_use]
    pub fn resource_id(&self) -> &str {
        match self {
            Self::Acquisition { resource_id, .. }
            | Self::AlreadyOpen { resource_id, .. }
            | Self::NotFound { resource_id, .. } => resource_id,
        }
    }
}
