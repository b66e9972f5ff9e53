//! VoiceAttack Proxy - typed variables and lifecycle glue for host plugins
//!
//! Converts strongly-typed Rust values to and from the host's six primitive
//! variable kinds, keeping a most-recent-first record of every write.

pub mod config;
pub mod error;
pub mod host;
pub mod models;
pub mod plugin;
pub mod variables;

pub use config::Config;
pub use error::{PluginError, VariableError};
pub use host::{HostLog, HostVariables, InMemoryHost, LogColor};
pub use plugin::{PluginRunner, PluginSession, VoiceAttackPlugin};
pub use variables::{VariableKind, VariableStore};
