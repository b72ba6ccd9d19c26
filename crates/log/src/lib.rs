//! # Custodian Log
//!
//! Subscriber setup for custodian binaries. Diagnostics always go to
//! stderr so that stdout stays reserved for lifecycle status lines.
//!
//! ```no_run
//! use custodian_log::{Config, LoggerBuilder};
//!
//! let _guard = LoggerBuilder::from_config(Config::from_env()).build()?;
//! tracing::info!("logger ready");
//! # Ok::<(), custodian_log::LogError>(())
//! ```

mod builder;
pub mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, Format};
pub use error::{LogError, LogResult};
