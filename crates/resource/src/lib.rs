//! # Custodian Resource
//!
//! Managed resources with deterministic construction and destruction hooks.
//! A [`ManagedResource`] acquires through a [`Backend`] when it is built,
//! reports each use, and releases exactly once when its lifetime ends.
//! Every step is reported as a [`LifecycleEvent`] to an [`EventSink`].

pub mod backend;
pub mod error;
pub mod events;
pub mod resource;
pub mod scope;

pub use backend::{Backend, Failing, Simulated};
pub use error::{Error, Result};
pub use events::{Console, EventSink, LifecycleEvent, Recorder};
pub use resource::{Category, DEFAULT_CATEGORY, ManagedResource, Release, ResourceBuilder, Usage};
pub use scope::Scope;
