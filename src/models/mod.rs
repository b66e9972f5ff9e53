//! Diagnostic models
//!
//! Serializable views of the variable store, for display and logging.

pub mod snapshot;

pub use snapshot::{SnapshotEntry, VariableSnapshot};
