//! Variables Module
//!
//! Typed variable exchange with the host, plus a recency record of every
//! value written.

mod kind;
mod recency;
mod stats;
mod store;
pub mod value;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use kind::{TaggedKey, VariableKind};
pub use recency::{CacheEntry, RecencyList};
pub use stats::VariableStats;
pub(crate) use stats::ReadCounters;
pub use store::VariableStore;
pub use value::{FromVariable, HostValue, ToVariable};
