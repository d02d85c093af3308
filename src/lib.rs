//! kueue-viz library
//!
//! Builds JSON snapshots of Kueue resources and streams them to dashboard
//! clients over WebSockets. The binary wires these pieces to a live cluster;
//! the library is also used directly by the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod kube;
pub mod models;
pub mod snapshot;
pub mod stream;

// Re-export commonly used types for convenience
pub use error::{FetchError, FetchResult, StreamError};
pub use models::{Conventions, Resource, ResourceKind};
pub use snapshot::{Snapshot, View};
pub use stream::{AppState, StreamEnd, StreamSettings, StreamSummary, router, stream_snapshots};
